//! A tiny HTTP/1.1 server on localhost standing in for remote APIs.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn new(path: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            path,
            status,
            body: body.into(),
        }
    }
}

/// One request as received: its target (path plus query) and raw head
struct Seen {
    target: String,
    head: String,
}

pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Seen>>>,
}

impl TestServer {
    /// Request targets (path plus query) seen so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.target.clone()).collect()
    }

    /// Lowercased request line and headers of every request seen so far
    pub fn request_heads(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.head.to_lowercase()).collect()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Serve `routes` until the test's runtime shuts down. A request whose path
/// starts with a route's path gets that route's response; anything else
/// gets a 404.
pub async fn serve(routes: Vec<Route>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                seen.lock().unwrap().push(Seen {
                    target: target.clone(),
                    head: head.to_string(),
                });

                let (status, body) = routes
                    .iter()
                    .find(|r| target.starts_with(r.path))
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, String::new()));

                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    TestServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}
