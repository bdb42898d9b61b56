//! Failure taxonomy for parsing and fetching a locator.
//!
//! Every variant is terminal for the call that produced it; nothing in the
//! core retries or recovers locally.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Scheme token (text before the first `:`) is not one we handle.
    #[error("unsupported scheme {scheme:?}; supported schemes are http, https, file, data, view-source")]
    UnsupportedScheme { scheme: String },

    /// Locator is structurally broken (missing `//`, bad port).
    #[error("malformed locator {locator:?}: {reason}")]
    MalformedLocator { locator: String, reason: String },

    /// Could not resolve, dial, or complete the TLS handshake.
    #[error("cannot connect to host {host} on port {port}: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Server answered with a 4xx/5xx status. The body is never read.
    #[error("server returned HTTP {status} for request:\n{request}")]
    HttpStatus { status: u16, request: String },

    /// Response uses an encoding this client does not decode.
    #[error("{header}: {value} is not supported")]
    UnsupportedFeature { header: String, value: String },

    /// Status line or header block could not be understood.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// Socket read/write failed after the connection was established.
    #[error("i/o error talking to {host}:{port}: {source}")]
    Stream {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Local file read failed (file scheme).
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn malformed_locator(locator: &str, reason: impl Into<String>) -> Self {
        Error::MalformedLocator {
            locator: locator.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_response(reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            reason: reason.into(),
        }
    }
}
