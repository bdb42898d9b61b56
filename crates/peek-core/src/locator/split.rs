//! First-occurrence string splitting.

/// Splits `s` at the first occurrence of `delim`.
///
/// Returns `(prefix, suffix)` with the delimiter removed. When `delim` does not
/// occur, the whole input is the prefix and the suffix is empty. Later
/// occurrences of `delim` stay in the suffix untouched.
pub fn split1<'a>(s: &'a str, delim: &str) -> (&'a str, &'a str) {
    s.split_once(delim).unwrap_or((s, ""))
}

/// Extension of a file path: everything after the first `.`.
pub fn extension(path: &str) -> &str {
    split1(path, ".").1
}
