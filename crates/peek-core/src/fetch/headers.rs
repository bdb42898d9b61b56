//! Response header map.

use std::collections::HashMap;

use crate::locator::split1;

/// Header names whose presence aborts the exchange: the body would need a
/// decoder this client does not have.
pub const UNSUPPORTED_HEADERS: [&str; 2] = ["transfer-encoding", "content-encoding"];

/// Lower-cased header name → trimmed value, built once per exchange.
///
/// A repeated header overwrites the earlier value. Multi-value headers are not
/// needed for anything this client inspects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from raw `Name: value` lines; blank lines are skipped.
    #[cfg(test)]
    fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Self::new();
        for line in lines {
            if !line.trim().is_empty() {
                map.insert_line(line);
            }
        }
        map
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    /// Splits a raw header line on its first `:` and inserts it.
    pub fn insert_line(&mut self, line: &str) {
        let (name, value) = split1(line, ":");
        self.insert(name, value);
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// First header from [`UNSUPPORTED_HEADERS`] present in the map, with its value.
    pub fn unsupported_encoding(&self) -> Option<(&'static str, &str)> {
        UNSUPPORTED_HEADERS
            .iter()
            .find_map(|name| self.get(name).map(|value| (*name, value)))
    }
}
