//! Locator parsing.
//!
//! Turns a raw locator string (`http://host:port/path`, `file:///tmp/a.html`,
//! `data:text/plain,hello`, `view-source:...`) into a [`Locator`]. Pure string
//! work; nothing here touches the network or the filesystem.

mod scheme;
mod split;

use std::fmt;

use crate::error::{Error, Result};

pub use scheme::{Scheme, VIEW_SOURCE};
pub use split::{extension, split1};

/// Content type of markup that the extractor reduces to text.
pub const TEXT_HTML: &str = "text/html";

/// Content type shown verbatim (non-HTML files, view-source).
pub const TEXT_PLAIN: &str = "text/plain";

/// Content type of a `data:` locator whose metadata segment is empty.
pub const DATA_DEFAULT_CONTENT_TYPE: &str = "text/plain;charset=US-ASCII";

/// Port value for schemes that have no port.
pub const NO_PORT: u16 = 0;

/// A parsed resource locator. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    scheme: Scheme,
    host: String,
    port: u16,
    /// Request path for http(s), filesystem path for file, payload for data.
    path: String,
    /// Content type of the wrapped resource, before any view-source override.
    content_type: String,
    view_source: bool,
}

impl Locator {
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Content type the fetched body is treated as. Always `text/plain` for
    /// a view-source locator.
    pub fn content_type(&self) -> &str {
        if self.view_source {
            TEXT_PLAIN
        } else {
            &self.content_type
        }
    }

    /// True when the locator was wrapped in `view-source:`.
    pub fn is_view_source(&self) -> bool {
        self.view_source
    }

    /// Returns a copy of this locator targeting a different port.
    pub fn with_port(self, port: u16) -> Self {
        Self { port, ..self }
    }
}

/// True when `content_type` names HTML markup (`text/html`, optionally with parameters).
pub fn is_markup(content_type: &str) -> bool {
    content_type.starts_with(TEXT_HTML)
}

/// Parses a raw locator string.
///
/// The scheme is the text before the first `:`. `http`, `https` and `file`
/// must be followed by `//`. Host validation is deferred to the fetcher: an
/// empty host parses fine and fails when dialled.
///
/// # Examples
///
/// - `parse("http://h:81/p")` → host `h`, port `81`, path `/p`
/// - `parse("https://h")` → port `443`, path `/`
/// - `parse("data:text/plain,a,b")` → content type `text/plain`, path `a,b`
/// - `parse("view-source:http://h/p")` → same as `http://h/p` with content type `text/plain`
pub fn parse(raw: &str) -> Result<Locator> {
    let (token, rest) = split1(raw, ":");
    if token == VIEW_SOURCE {
        let inner = parse(rest)?;
        return Ok(Locator {
            view_source: true,
            ..inner
        });
    }

    let scheme = Scheme::from_token(token).ok_or_else(|| Error::UnsupportedScheme {
        scheme: token.to_string(),
    })?;

    let rest = if scheme.requires_double_slash() {
        rest.strip_prefix("//")
            .ok_or_else(|| Error::malformed_locator(raw, "expected leading // after scheme"))?
    } else {
        rest
    };

    match scheme {
        Scheme::File => Ok(parse_file(rest)),
        Scheme::Data => Ok(parse_data(rest)),
        Scheme::Http | Scheme::Https => parse_network(raw, scheme, rest),
    }
}

fn parse_file(path: &str) -> Locator {
    let content_type = if extension(path) == "html" {
        TEXT_HTML
    } else {
        TEXT_PLAIN
    };
    Locator {
        scheme: Scheme::File,
        host: String::new(),
        port: NO_PORT,
        path: path.to_string(),
        content_type: content_type.to_string(),
        view_source: false,
    }
}

fn parse_data(rest: &str) -> Locator {
    let (content_type, content) = split1(rest, ",");
    let content_type = if content_type.is_empty() {
        DATA_DEFAULT_CONTENT_TYPE
    } else {
        content_type
    };
    Locator {
        scheme: Scheme::Data,
        host: String::new(),
        port: NO_PORT,
        path: content.to_string(),
        content_type: content_type.to_string(),
        view_source: false,
    }
}

fn parse_network(raw: &str, scheme: Scheme, rest: &str) -> Result<Locator> {
    let (host_port, path) = split1(rest, "/");
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    let (host, port) = split1(host_port, ":");
    let port = if port.is_empty() {
        scheme.default_port()
    } else {
        match port.parse::<u16>() {
            Ok(p) if p > 0 => p,
            _ => {
                return Err(Error::malformed_locator(
                    raw,
                    format!("invalid port {:?}", port),
                ))
            }
        }
    };

    Ok(Locator {
        scheme,
        host: host.to_string(),
        port,
        path,
        content_type: TEXT_HTML.to_string(),
        view_source: false,
    })
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.view_source {
            write!(f, "{}:", VIEW_SOURCE)?;
        }
        match self.scheme {
            Scheme::Http | Scheme::Https => {
                write!(f, "{}://{}", self.scheme, self.host)?;
                if self.port != self.scheme.default_port() {
                    write!(f, ":{}", self.port)?;
                }
                f.write_str(&self.path)
            }
            Scheme::File => write!(f, "file://{}", self.path),
            Scheme::Data => write!(f, "data:{},{}", self.content_type, self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_structural_fields() {
        let l = parse("http://h:81/p").unwrap();
        assert_eq!(l.scheme(), Scheme::Http);
        assert_eq!(l.host(), "h");
        assert_eq!(l.port(), 81);
        assert_eq!(l.path(), "/p");
        assert_eq!(l.content_type(), TEXT_HTML);
    }

    #[test]
    fn default_ports_by_scheme() {
        assert_eq!(parse("http://h/p").unwrap().port(), 80);
        assert_eq!(parse("https://h/p").unwrap().port(), 443);
    }

    #[test]
    fn missing_path_defaults_to_root() {
        assert_eq!(parse("http://h").unwrap().path(), "/");
        assert_eq!(parse("https://h:8443").unwrap().path(), "/");
    }

    #[test]
    fn nested_path_kept_intact() {
        let l = parse("http://example.com/a/b/c.html").unwrap();
        assert_eq!(l.host(), "example.com");
        assert_eq!(l.path(), "/a/b/c.html");
    }

    #[test]
    fn unsupported_scheme_fails() {
        match parse("ftp://h/p") {
            Err(Error::UnsupportedScheme { scheme }) => assert_eq!(scheme, "ftp"),
            other => panic!("expected UnsupportedScheme, got {:?}", other),
        }
        assert!(matches!(
            parse("example.com"),
            Err(Error::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn missing_double_slash_fails() {
        assert!(matches!(
            parse("http:h/p"),
            Err(Error::MalformedLocator { .. })
        ));
        assert!(matches!(
            parse("file:/tmp/a.html"),
            Err(Error::MalformedLocator { .. })
        ));
    }

    #[test]
    fn bad_port_fails() {
        assert!(matches!(
            parse("http://h:abc/"),
            Err(Error::MalformedLocator { .. })
        ));
        assert!(matches!(
            parse("http://h:0/"),
            Err(Error::MalformedLocator { .. })
        ));
    }

    #[test]
    fn empty_host_is_accepted() {
        let l = parse("http:///p").unwrap();
        assert_eq!(l.host(), "");
        assert_eq!(l.path(), "/p");
    }

    #[test]
    fn data_locator() {
        let l = parse("data:text/plain,hello").unwrap();
        assert_eq!(l.scheme(), Scheme::Data);
        assert_eq!(l.content_type(), "text/plain");
        assert_eq!(l.path(), "hello");
        assert_eq!(l.host(), "");
        assert_eq!(l.port(), NO_PORT);
    }

    #[test]
    fn data_payload_keeps_later_commas() {
        let l = parse("data:text/html,a, b, c").unwrap();
        assert_eq!(l.content_type(), "text/html");
        assert_eq!(l.path(), "a, b, c");
    }

    #[test]
    fn data_empty_metadata_defaults_to_ascii_text() {
        let l = parse("data:,hi").unwrap();
        assert_eq!(l.content_type(), DATA_DEFAULT_CONTENT_TYPE);
        assert_eq!(l.path(), "hi");
    }

    #[test]
    fn file_content_type_follows_extension() {
        let html = parse("file:///tmp/index.html").unwrap();
        assert_eq!(html.path(), "/tmp/index.html");
        assert_eq!(html.content_type(), TEXT_HTML);
        assert_eq!(html.port(), NO_PORT);

        let txt = parse("file:///tmp/notes.txt").unwrap();
        assert_eq!(txt.content_type(), TEXT_PLAIN);

        let bare = parse("file:///tmp/README").unwrap();
        assert_eq!(bare.content_type(), TEXT_PLAIN);
    }

    #[test]
    fn view_source_wraps_http() {
        let plain = parse("http://h/p").unwrap();
        let wrapped = parse("view-source:http://h/p").unwrap();
        assert!(wrapped.is_view_source());
        assert!(!plain.is_view_source());
        assert_eq!(wrapped.scheme(), plain.scheme());
        assert_eq!(wrapped.host(), plain.host());
        assert_eq!(wrapped.port(), plain.port());
        assert_eq!(wrapped.path(), plain.path());
        assert_eq!(wrapped.content_type(), TEXT_PLAIN);
        assert!(!is_markup(wrapped.content_type()));
    }

    #[test]
    fn view_source_data_keeps_wrapped_content_type() {
        let l = parse("view-source:data:text/html,<b>x</b>").unwrap();
        assert_eq!(l.scheme(), Scheme::Data);
        assert_eq!(l.content_type(), TEXT_PLAIN);
        assert_eq!(l.path(), "<b>x</b>");
        assert_eq!(l.to_string(), "view-source:data:text/html,<b>x</b>");
    }

    #[test]
    fn view_source_propagates_inner_errors() {
        assert!(matches!(
            parse("view-source:gopher://h"),
            Err(Error::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            parse("view-source:https:h"),
            Err(Error::MalformedLocator { .. })
        ));
    }

    #[test]
    fn with_port_overrides_only_port() {
        let l = parse("http://h/p").unwrap().with_port(8080);
        assert_eq!(l.port(), 8080);
        assert_eq!(l.host(), "h");
        assert_eq!(l.path(), "/p");
    }

    #[test]
    fn markup_check_allows_parameters() {
        assert!(is_markup("text/html"));
        assert!(is_markup("text/html; charset=utf-8"));
        assert!(!is_markup("text/plain"));
    }

    #[test]
    fn display_reconstructs_locator() {
        assert_eq!(parse("http://h/p").unwrap().to_string(), "http://h/p");
        assert_eq!(parse("https://h:8443").unwrap().to_string(), "https://h:8443/");
        assert_eq!(
            parse("file:///tmp/a.html").unwrap().to_string(),
            "file:///tmp/a.html"
        );
        assert_eq!(
            parse("data:text/plain,x,y").unwrap().to_string(),
            "data:text/plain,x,y"
        );
        assert_eq!(
            parse("view-source:http://h/p").unwrap().to_string(),
            "view-source:http://h/p"
        );
    }

    #[test]
    fn display_output_parses_back_to_same_locator() {
        let inputs = [
            "http://h/p",
            "http://h:80/p",
            "https://h:8443",
            "http:///p",
            "file:///tmp/a.html",
            "file:///tmp/notes.txt",
            "data:text/plain,x,y",
            "data:,hi",
            "data:text/html,<b>x</b>",
            "view-source:http://h/p",
            "view-source:https://h:8443/a/b",
            "view-source:file:///tmp/a.html",
            "view-source:data:text/html,<b>x</b>",
            "view-source:view-source:http://h/p",
        ];
        for raw in inputs {
            let l = parse(raw).unwrap();
            assert_eq!(parse(&l.to_string()).unwrap(), l, "round trip of {}", raw);
        }
        let moved = parse("view-source:http://h/p").unwrap().with_port(8080);
        assert_eq!(parse(&moved.to_string()).unwrap(), moved);
    }
}
