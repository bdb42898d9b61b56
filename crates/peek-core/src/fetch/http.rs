//! One-shot HTTP/1.1 GET exchange.
//!
//! connect → send request → status line → headers → body. The request asks
//! the server to close the connection, so the body is everything up to
//! end-of-stream.

use std::io::{self, BufRead, BufReader, Read, Write};

use super::headers::HeaderMap;
use super::transport;
use super::FetchOptions;
use crate::error::{Error, Result};
use crate::locator::{Locator, Scheme};

/// Fixed `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("peek/", env!("CARGO_PKG_VERSION"));

/// Renders the request sent for `path` on `host`.
pub fn build_request(host: &str, path: &str) -> String {
    format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\nUser-Agent: {}\r\n\r\n",
        path, host, USER_AGENT
    )
}

/// Fetches the body of an http or https locator.
pub(crate) fn get(locator: &Locator, opts: &FetchOptions) -> Result<Vec<u8>> {
    let tls = locator.scheme() == Scheme::Https;
    let mut stream = transport::connect(locator.host(), locator.port(), tls, opts)?;
    exchange(&mut stream, locator.host(), locator.port(), locator.path())
}

/// Runs the request/response exchange over an already-open stream.
pub(crate) fn exchange<S: Read + Write>(
    stream: &mut S,
    host: &str,
    port: u16,
    path: &str,
) -> Result<Vec<u8>> {
    let stream_err = |source: io::Error| Error::Stream {
        host: host.to_string(),
        port,
        source,
    };

    let request = build_request(host, path);
    stream.write_all(request.as_bytes()).map_err(stream_err)?;
    stream.flush().map_err(stream_err)?;
    tracing::debug!(host, port, path, "request sent");

    let mut reader = BufReader::new(stream);

    let status_line = read_line(&mut reader)
        .map_err(stream_err)?
        .ok_or_else(|| Error::malformed_response("connection closed before status line"))?;
    let status = parse_status_code(&status_line)?;
    tracing::debug!(status, "status line: {}", status_line);
    if status >= 400 {
        return Err(Error::HttpStatus { status, request });
    }

    let headers = read_headers(&mut reader).map_err(|e| match e {
        HeaderReadError::Io(source) => stream_err(source),
        HeaderReadError::Truncated => {
            Error::malformed_response("connection closed before end of headers")
        }
    })?;
    tracing::debug!(count = headers.len(), "headers read");

    if let Some((header, value)) = headers.unsupported_encoding() {
        return Err(Error::UnsupportedFeature {
            header: header.to_string(),
            value: value.to_string(),
        });
    }

    let mut body = Vec::new();
    match reader.read_to_end(&mut body) {
        Ok(_) => {}
        // TLS peers often drop TCP without close_notify once the body is sent.
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            tracing::warn!(host, port, "stream ended without close_notify: {}", e);
        }
        Err(e) => return Err(stream_err(e)),
    }
    tracing::debug!(bytes = body.len(), "body read");
    Ok(body)
}

/// Numeric status code: the second whitespace-delimited token of the status line.
pub fn parse_status_code(status_line: &str) -> Result<u16> {
    status_line
        .split_whitespace()
        .nth(1)
        .and_then(|token| token.parse::<u16>().ok())
        .ok_or_else(|| Error::malformed_response(format!("bad status line {:?}", status_line)))
}

enum HeaderReadError {
    Io(io::Error),
    Truncated,
}

fn read_headers<R: BufRead>(reader: &mut R) -> std::result::Result<HeaderMap, HeaderReadError> {
    let mut headers = HeaderMap::new();
    loop {
        match read_line(reader).map_err(HeaderReadError::Io)? {
            None => return Err(HeaderReadError::Truncated),
            Some(line) if line.is_empty() => return Ok(headers),
            Some(line) => headers.insert_line(&line),
        }
    }
}

/// Reads one line without its terminator; `None` at end-of-stream.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(
        line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string(),
    ))
}
