//! Minimal HTTP/1.1 server serving canned JSON for integration tests.
//!
//! Every request gets a fresh connection (`Connection: close`). Unknown paths
//! answer 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A canned response.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }
}

/// Handle to a running server.
pub struct JsonServer {
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl JsonServer {
    /// Paths requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

/// Start a server. `routes` receives the base URL (e.g. `http://127.0.0.1:1234`)
/// so bodies can carry absolute links back to the server.
pub fn start<F>(routes: F) -> JsonServer
where
    F: FnOnce(&str) -> Vec<(&'static str, Route)>,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{port}");

    let table: HashMap<String, Route> = routes(&base_url)
        .into_iter()
        .map(|(path, route)| (path.to_string(), route))
        .collect();
    let table = Arc::new(table);
    let hits = Arc::new(Mutex::new(Vec::new()));

    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let table = Arc::clone(&table);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &table, &hits));
        }
    });

    JsonServer { base_url, hits }
}

/// A URL on which nothing is listening.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/people/")
}

fn handle(mut stream: TcpStream, table: &HashMap<String, Route>, hits: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let text = String::from_utf8_lossy(&request);
    let path = text
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    hits.lock().unwrap().push(path.clone());

    let route = table.get(&path).cloned().unwrap_or(Route::status(404));
    let reason = match route.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.status,
        reason,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
