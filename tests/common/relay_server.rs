//! Minimal HTTP/1.1 server standing in for the fetch relay in tests.
//!
//! The real relay takes the target URL percent-encoded in the `url` query
//! parameter. This fake decodes that parameter, serves a configured
//! response per target URL (404 for unknown targets), and records every
//! decoded target so tests can assert attempt order and counts.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Response served for one decoded target URL.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u32,
    pub body: Vec<u8>,
    /// Extra delay before this route's response, on top of the
    /// server-wide delay. Lets one target stall while others answer.
    pub delay: Duration,
}

impl Route {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u32) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Handle to a running fake relay.
pub struct RelayServer {
    /// Endpoint in the relay's `...?url=` form, ready for `RelayConfig`.
    pub endpoint: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl RelayServer {
    /// Decoded target URLs in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts the fake relay on a background thread. It runs until the process
/// exits. `delay` is applied before each response (zero for most tests;
/// nonzero to keep a build observably in flight).
pub fn start(routes: HashMap<String, Route>, delay: Duration) -> RelayServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &routes, &log, delay));
        }
    });
    RelayServer {
        endpoint: format!("http://127.0.0.1:{}/raw?url=", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    log: &Mutex<Vec<String>>,
    delay: Duration,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
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

    let target = match decode_target(request) {
        Some(t) => t,
        None => {
            let _ = stream.write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n");
            return;
        }
    };
    log.lock().unwrap().push(target.clone());

    let route = routes
        .get(&target)
        .cloned()
        .unwrap_or_else(|| Route::status(404));

    let pause = delay + route.delay;
    if !pause.is_zero() {
        thread::sleep(pause);
    }

    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

/// Pulls the decoded `url` parameter out of the request line.
fn decode_target(request: &str) -> Option<String> {
    let request_line = request.lines().next()?;
    let path = request_line.split_whitespace().nth(1)?;
    let query = path.split_once('?')?.1;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}
