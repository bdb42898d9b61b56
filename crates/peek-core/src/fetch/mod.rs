//! Scheme-specific retrieval of a parsed locator.
//!
//! `file` reads the local file, `data` returns the inline payload, and
//! `http`/`https` run one blocking HTTP/1.1 exchange. Each call owns its
//! connection and buffers; nothing is pooled, cached, or retried.

mod headers;
mod http;
mod transport;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::PeekConfig;
use crate::error::{Error, Result};
use crate::extract::{lex, LexState};
use crate::locator::{is_markup, Locator, Scheme};

pub use headers::{HeaderMap, UNSUPPORTED_HEADERS};
pub use http::{build_request, parse_status_code, USER_AGENT};

/// Deadlines for network fetches. `None` blocks indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    /// Applied to every socket read and write.
    pub read_timeout: Option<Duration>,
}

impl FetchOptions {
    pub fn from_config(cfg: &PeekConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            read_timeout: cfg.read_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Fully buffered body of a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    body: Vec<u8>,
    content_type: String,
    source: Scheme,
}

impl Response {
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Scheme the body was retrieved with.
    pub fn source(&self) -> Scheme {
        self.source
    }

    pub fn is_markup(&self) -> bool {
        is_markup(&self.content_type)
    }

    /// Text for display: markup is reduced to plain text, anything else is
    /// returned as-is. Bodies are decoded as UTF-8, replacing invalid bytes.
    ///
    /// HTTP(S) bodies are lexed starting inside a tag, so anything before the
    /// first `>` is dropped. Real pages open with a tag (`<!doctype ...>`), and
    /// this keeps output stable for servers that prefix stray bytes. Bodies from
    /// `file` and `data` start in plain text.
    pub fn into_text(self) -> String {
        let body = String::from_utf8_lossy(&self.body);
        if !self.is_markup() {
            return body.into_owned();
        }
        let initial = if self.source.is_network() {
            LexState::InTag
        } else {
            LexState::Text
        };
        lex(&body, initial)
    }
}

/// Fetches `locator` with no deadlines.
pub fn fetch(locator: Locator) -> Result<Response> {
    fetch_with(locator, &FetchOptions::default())
}

/// Fetches `locator`, applying the deadlines in `opts` to network schemes.
pub fn fetch_with(locator: Locator, opts: &FetchOptions) -> Result<Response> {
    tracing::debug!(locator = %locator, "fetching");

    let body = match locator.scheme() {
        Scheme::File => {
            let path = PathBuf::from(locator.path());
            fs::read(&path).map_err(|source| Error::Io { path, source })?
        }
        Scheme::Data => locator.path().as_bytes().to_vec(),
        Scheme::Http | Scheme::Https => http::get(&locator, opts)?,
    };

    tracing::info!(
        locator = %locator,
        bytes = body.len(),
        content_type = locator.content_type(),
        "fetched"
    );

    Ok(Response {
        body,
        content_type: locator.content_type().to_string(),
        source: locator.scheme(),
    })
}
