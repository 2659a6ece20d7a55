// crates/poetry-contract/tests/common/mod.rs
// ============================================================================
// Module: Stub PoetryDB Service
// Description: In-process HTTP stub serving canned PoetryDB bodies.
// Purpose: Exercise the harness end to end without the public service.
// Dependencies: tiny_http, serde_json
// ============================================================================

//! Shared helpers for harness integration tests.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Shared helpers are reused across multiple test binaries."
)]

use std::collections::BTreeMap;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use poetry_contract::HarnessConfig;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Stub Server
// ============================================================================

/// Canned response for one request path.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
    pub location: Option<String>,
}

impl Route {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            location: None,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            location: None,
        }
    }

    /// Empty-bodied redirect to `target`.
    pub fn redirect(status: u16, target: &str) -> Self {
        Self {
            status,
            body: String::new(),
            location: Some(target.to_string()),
        }
    }
}

/// Stub service answering from a fixed route table and recording every path.
pub struct StubService {
    base_url: String,
    server: Arc<Server>,
    hits: Arc<Mutex<Vec<String>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StubService {
    /// Starts the stub on a free loopback port. Raw (encoded) paths are matched.
    pub fn start(routes: BTreeMap<String, Route>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let handle = {
            let server = Arc::clone(&server);
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    let path = request.url().to_string();
                    hits.lock().unwrap().push(path.clone());
                    let route = routes
                        .get(&path)
                        .cloned()
                        .unwrap_or_else(|| Route::raw(500, "no stub route"));
                    let mut response = Response::from_string(route.body)
                        .with_status_code(route.status)
                        .with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                .unwrap(),
                        );
                    if let Some(location) = &route.location {
                        response = response.with_header(
                            Header::from_bytes(&b"Location"[..], location.as_bytes()).unwrap(),
                        );
                    }
                    let _ = request.respond(response);
                }
            })
        };
        Self {
            base_url: format!("http://{addr}"),
            server,
            hits,
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Paths requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn config(&self) -> HarnessConfig {
        config_for(&self.base_url)
    }
}

impl Drop for StubService {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn config_for(base_url: &str) -> HarnessConfig {
    HarnessConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..HarnessConfig::default()
    }
}

/// Returns a loopback base URL nothing is listening on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ============================================================================
// SECTION: Canned Bodies
// ============================================================================

pub fn poem(title: &str, author: &str, lines: &[String]) -> Value {
    let non_empty = lines.iter().filter(|line| !line.is_empty()).count();
    json!({
        "title": title,
        "author": author,
        "lines": lines,
        "linecount": non_empty.to_string(),
    })
}

pub fn stanza(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}

/// Poem with `count` non-empty lines and a blank line after every tenth.
pub fn poem_with_line_count(title: &str, count: usize) -> Value {
    let mut lines = Vec::new();
    for index in 1..=count {
        lines.push(format!("line {index}"));
        if index % 10 == 0 && index != count {
            lines.push(String::new());
        }
    }
    poem(title, "Anonymous", &lines)
}

pub fn invalid_endpoint_body() -> Value {
    json!({
        "status": "405",
        "reason": "Bad request. Valid input fields are: author, title, lines, linecount, and poemcount. input field not available",
    })
}

pub fn no_match_body() -> Value {
    json!({"status": 404, "reason": "Not found"})
}

/// Routes answering every catalog case the way the real service does.
pub fn contract_routes() -> BTreeMap<String, Route> {
    let mut routes = BTreeMap::new();
    routes.insert(
        "/author/Mark%20Twain".to_string(),
        Route::json(
            200,
            &json!([
                poem("A Dog's Tale", "Mark Twain", &stanza(&["I am a dog", "", "my mother was one"])),
                poem("Ode to Stephen Dowling Bots", "Mark Twain", &stanza(&["And did young Stephen sicken,"])),
            ]),
        ),
    );
    routes.insert(
        "/title/A%20Sweltering%20Day%20In%20Australia".to_string(),
        Route::json(
            200,
            &json!([poem(
                "A Sweltering Day In Australia",
                "Banjo Paterson",
                &stanza(&["The bush was grey", "a week to-day"]),
            )]),
        ),
    );
    routes.insert(
        "/lines/one%20swift".to_string(),
        Route::json(
            200,
            &json!([
                poem("Swift", "A", &stanza(&["With One Swift glance", ""])),
                poem("Swifter", "B", &stanza(&["first", "and one swift stroke"])),
            ]),
        ),
    );
    routes.insert(
        "/linecount/80".to_string(),
        Route::json(200, &json!([poem_with_line_count("Eighty", 80), poem_with_line_count("Also Eighty", 80)])),
    );
    let seven: Vec<Value> =
        (1..=7).map(|index| poem(&format!("Poem {index}"), "Various", &stanza(&["x"]))).collect();
    routes.insert("/poemcount/7".to_string(), Route::json(200, &Value::Array(seven)));
    routes.insert("/invalidendpoint/test".to_string(), Route::json(200, &invalid_endpoint_body()));
    routes.insert("/author/NonExistentAuthor".to_string(), Route::json(200, &no_match_body()));
    routes
}
