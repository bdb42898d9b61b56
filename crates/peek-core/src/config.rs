//! User configuration loaded from `~/.config/peek/config.toml`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Locator fetched when none is given on the command line.
pub const DEFAULT_LOCATOR: &str = "http://example.com";

fn default_locator() -> String {
    DEFAULT_LOCATOR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeekConfig {
    /// Locator used when the caller supplies none.
    #[serde(default = "default_locator")]
    pub default_locator: String,
    /// Optional dial deadline in seconds (None = wait indefinitely).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional deadline in seconds for each socket read/write (None = wait indefinitely).
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,
}

impl Default for PeekConfig {
    fn default() -> Self {
        Self {
            default_locator: default_locator(),
            connect_timeout_secs: None,
            read_timeout_secs: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("peek")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PeekConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PeekConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PeekConfig = toml::from_str(&data)?;
    Ok(cfg)
}
