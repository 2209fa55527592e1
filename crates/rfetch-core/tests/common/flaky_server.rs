//! Minimal HTTP/1.1 server that serves a scripted response sequence.
//!
//! Each incoming request consumes the next entry in the script; once the
//! script is exhausted the last entry repeats. Used to simulate transient
//! 5xx failures, throttling, and fatal 4xx responses for retry tests.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// One scripted response.
#[derive(Debug, Clone)]
pub struct Scripted {
    pub status: u32,
    pub body: Vec<u8>,
    /// Extra header lines, e.g. `Accept-Ranges: bytes`.
    pub extra_headers: Vec<String>,
}

impl Scripted {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            extra_headers: Vec::new(),
        }
    }

    pub fn status(status: u32) -> Self {
        Self {
            status,
            body: Vec::new(),
            extra_headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, line: &str) -> Self {
        self.extra_headers.push(line.to_string());
        self
    }
}

/// Starts a server in a background thread. Returns the base URL and a hit
/// counter incremented once per request. The server runs until the process
/// exits.
pub fn start(script: Vec<Scripted>) -> (String, Arc<AtomicUsize>) {
    assert!(!script.is_empty(), "script must have at least one response");
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let script = Arc::new(script);
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let n = hits_srv.fetch_add(1, Ordering::SeqCst);
            let entry = script[n.min(script.len() - 1)].clone();
            thread::spawn(move || handle(stream, &entry));
        }
    });
    (format!("http://127.0.0.1:{}/file.bin", port), hits)
}

fn handle(mut stream: std::net::TcpStream, entry: &Scripted) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let method = request.split_whitespace().next().unwrap_or("");

    let reason = match entry.status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Response",
    };
    let mut extra = String::new();
    for line in &entry.extra_headers {
        extra.push_str(line);
        extra.push_str("\r\n");
    }
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        entry.status,
        reason,
        entry.body.len(),
        extra
    );
    let _ = stream.write_all(head.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(&entry.body);
    }
}
