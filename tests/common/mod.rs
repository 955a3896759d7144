//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A mock Spring Cloud Config server on an ephemeral port.
pub struct MockConfigServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockConfigServer {
    /// Base URL to use as `serverAddress`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| p.as_str() == path).count()
    }
}

/// Start a programmable mock server; `f` maps a request path to `(status, body)`.
pub async fn start_programmable_server<F>(f: F) -> MockConfigServer
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        handle_connection(socket, f, recorded).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockConfigServer { addr, requests }
}

/// Serve the same `(status, body)` for every path in `routes`, 404 elsewhere.
pub async fn start_static_server(routes: Vec<(&'static str, u16, &'static str)>) -> MockConfigServer {
    start_programmable_server(move |path| {
        routes
            .iter()
            .find(|(route, _, _)| *route == path)
            .map(|(_, status, body)| (*status, body.to_string()))
            .unwrap_or((404, "Not Found".to_string()))
    })
    .await
}

/// Answer successive requests with `responses` in order; the last one repeats.
pub fn sequence(
    responses: Vec<(u16, &'static str)>,
) -> impl Fn(&str) -> (u16, String) + Send + Sync + 'static {
    let next = AtomicUsize::new(0);
    move |_path| {
        let i = next.fetch_add(1, Ordering::SeqCst).min(responses.len() - 1);
        let (status, body) = responses[i];
        (status, body.to_string())
    }
}

/// An address nothing listens on.
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn handle_connection<F>(mut socket: TcpStream, f: Arc<F>, recorded: Arc<Mutex<Vec<String>>>)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    recorded.lock().unwrap().push(path.clone());

    let (status, body) = f(&path);
    let status = StatusCode::from_u16(status).unwrap();
    let status_text = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}
