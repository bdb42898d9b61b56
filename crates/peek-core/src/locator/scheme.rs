//! Supported locator schemes.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
    File,
    Data,
}

/// Prefix token that wraps another locator and shows its raw source.
pub const VIEW_SOURCE: &str = "view-source";

static SUPPORTED: [(&str, Scheme); 4] = [
    ("http", Scheme::Http),
    ("https", Scheme::Https),
    ("file", Scheme::File),
    ("data", Scheme::Data),
];

impl Scheme {
    /// Looks up a scheme token (case-sensitive, as written before the first `:`).
    /// The [`VIEW_SOURCE`] wrapper is not a scheme of its own.
    pub fn from_token(token: &str) -> Option<Scheme> {
        SUPPORTED
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, scheme)| *scheme)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::File => "file",
            Scheme::Data => "data",
        }
    }

    /// Schemes whose remainder must start with `//`.
    pub fn requires_double_slash(self) -> bool {
        matches!(self, Scheme::Http | Scheme::Https | Scheme::File)
    }

    /// Port used when the locator names none; 0 for schemes without a port.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
            Scheme::File | Scheme::Data => 0,
        }
    }

    pub fn is_network(self) -> bool {
        matches!(self, Scheme::Http | Scheme::Https)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
