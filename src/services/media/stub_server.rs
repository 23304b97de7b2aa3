//! One-shot HTTP server for exercising provider adapters without the network.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub(crate) struct StubServer {
    pub base_url: String,
    requests: mpsc::Receiver<String>,
}

impl StubServer {
    /// Answers the first connection with `status` and `body`, then stops.
    pub fn start(status: &str, body: &str, path_prefix: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{}{}", addr, path_prefix),
            requests: rx,
        }
    }

    /// Request line and headers of the request the server received.
    pub fn received(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .unwrap_or_default()
    }

    pub fn request_line(&self) -> String {
        self.received().lines().next().unwrap_or_default().to_string()
    }
}

/// A base URL nothing listens on.
pub(crate) fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Client that talks to the stub directly, ignoring any proxy settings.
pub(crate) fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
