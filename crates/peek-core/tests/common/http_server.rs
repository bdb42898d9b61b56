//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every connection with one scripted response and hands the raw
//! request text back to the test through a channel.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Script {
    /// Status line plus header lines, each ending in `\r\n`, plus the blank line.
    pub head: String,
    pub body: Vec<u8>,
    /// Keep the connection open this long after writing instead of closing.
    pub hold_open: Option<Duration>,
}

impl Script {
    pub fn new(head: &str, body: &[u8]) -> Self {
        Self {
            head: head.to_string(),
            body: body.to_vec(),
            hold_open: None,
        }
    }

    pub fn holding_open(mut self, d: Duration) -> Self {
        self.hold_open = Some(d);
        self
    }
}

pub struct TestServer {
    pub port: u16,
    requests: Receiver<String>,
}

impl TestServer {
    /// Next request received, waiting up to two seconds.
    pub fn next_request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(2))
            .expect("no request received")
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(script: Script) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let script = script.clone();
            let tx = tx.clone();
            thread::spawn(move || handle(stream, &script, tx));
        }
    });
    TestServer { port, requests: rx }
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().unwrap().port()
}

fn handle(mut stream: TcpStream, script: &Script, tx: Sender<String>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let _ = tx.send(String::from_utf8_lossy(&request).into_owned());

    let _ = stream.write_all(script.head.as_bytes());
    let _ = stream.write_all(&script.body);
    let _ = stream.flush();
    if let Some(d) = script.hold_open {
        thread::sleep(d);
    }
}
