//! Byte streams to a remote host: plain TCP for http, rustls over TCP for https.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

use super::FetchOptions;
use crate::error::{Error, Result};

pub(crate) enum Transport {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.read(buf),
            Transport::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.write(buf),
            Transport::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Transport::Plain(s) => s.flush(),
            Transport::Tls(s) => s.flush(),
        }
    }
}

/// Opens a connection to `host:port`, wrapping it in TLS when `tls` is set.
/// Resolution, dial, and handshake failures all surface as [`Error::Connection`].
pub(crate) fn connect(host: &str, port: u16, tls: bool, opts: &FetchOptions) -> Result<Transport> {
    let connection_err = |source: io::Error| Error::Connection {
        host: host.to_string(),
        port,
        source,
    };

    let tcp = dial(host, port, opts.connect_timeout).map_err(connection_err)?;
    tcp.set_read_timeout(opts.read_timeout)
        .map_err(connection_err)?;
    tcp.set_write_timeout(opts.read_timeout)
        .map_err(connection_err)?;
    tracing::debug!(host, port, tls, "connected");

    if !tls {
        return Ok(Transport::Plain(tcp));
    }
    let stream = handshake(tcp, host).map_err(connection_err)?;
    tracing::debug!(host, port, "tls handshake complete");
    Ok(Transport::Tls(Box::new(stream)))
}

fn dial(host: &str, port: u16, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    let timeout = match timeout {
        Some(t) => t,
        None => return TcpStream::connect(&addrs[..]),
    };

    let mut last_err = None;
    for addr in &addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!(%addr, "connect failed: {}", e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
    }))
}

fn client_config() -> Arc<ClientConfig> {
    // Another caller may have installed a provider already; either way one is set.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let mut roots = RootCertStore::empty();
    let native = rustls_native_certs::load_native_certs();
    for err in &native.errors {
        tracing::warn!("failed to load a native root certificate: {}", err);
    }
    let (added, ignored) = roots.add_parsable_certificates(native.certs);
    tracing::debug!(added, ignored, "loaded native root certificates");

    Arc::new(
        ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth(),
    )
}

fn handshake(tcp: TcpStream, host: &str) -> io::Result<StreamOwned<ClientConnection, TcpStream>> {
    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let conn = ClientConnection::new(client_config(), server_name).map_err(io::Error::other)?;

    let mut stream = StreamOwned::new(conn, tcp);
    while stream.conn.is_handshaking() {
        stream.conn.complete_io(&mut stream.sock)?;
    }
    Ok(stream)
}
