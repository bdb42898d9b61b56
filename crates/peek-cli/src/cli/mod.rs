//! CLI for the peek user-agent.

mod display;

use anyhow::{bail, Result};
use clap::Parser;
use peek_core::config::{self, PeekConfig};
use peek_core::fetch::{self, FetchOptions};
use peek_core::locator::{self, Locator};
use std::time::Duration;

/// Fetch a locator and print it as plain text.
#[derive(Debug, Parser)]
#[command(name = "peek")]
#[command(about = "peek: fetch http, https, file, data and view-source locators as text", long_about = None)]
pub struct Cli {
    /// Locator to fetch (defaults to `default_locator` from the config file).
    pub locator: Option<String>,

    /// Override the port of an http/https locator.
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Print the body as received, without reducing markup to text.
    #[arg(long)]
    pub raw: bool,

    /// Connect and read deadline in seconds, overriding the config file.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        cli.run(&cfg)
    }

    pub fn run(&self, cfg: &PeekConfig) -> Result<()> {
        let locator = self.resolve_locator(cfg)?;
        let opts = self.fetch_options(cfg);
        let response = fetch::fetch_with(locator, &opts)?;
        let mut stdout = std::io::stdout().lock();
        if self.raw {
            display::show_bytes(&mut stdout, response.body())
        } else {
            display::show_text(&mut stdout, &response.into_text())
        }
    }

    /// Parses the locator argument (or the configured default) and applies the port override.
    pub fn resolve_locator(&self, cfg: &PeekConfig) -> Result<Locator> {
        let raw = self.locator.as_deref().unwrap_or(&cfg.default_locator);
        let parsed = locator::parse(raw)?;
        match self.port {
            None => Ok(parsed),
            Some(port) if parsed.scheme().is_network() => Ok(parsed.with_port(port)),
            Some(_) => bail!("a port override only applies to http and https locators"),
        }
    }

    pub fn fetch_options(&self, cfg: &PeekConfig) -> FetchOptions {
        match self.timeout {
            Some(secs) => FetchOptions {
                connect_timeout: Some(Duration::from_secs(secs)),
                read_timeout: Some(Duration::from_secs(secs)),
            },
            None => FetchOptions::from_config(cfg),
        }
    }
}
