#![allow(dead_code)]

//! Stub leads backend and web app helpers for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri, header::COOKIE},
    response::Response,
};
use axum_test::TestServer;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use leadmaster::domain::session::BackendSession;
use leadmaster::infrastructure::api::ApiClient;
use leadmaster::routes::router;
use leadmaster::state::AppState;
use leadmaster::web::middleware::web_auth::session_cookie;

/// Canned response of the stub backend.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: StatusCode,
    headers: Vec<(HeaderName, String)>,
    body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self::raw(status, &body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers
            .push((HeaderName::from_static(name), value.to_string()));
        self
    }
}

/// A request the stub backend received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    pub fn query_pairs(&self) -> HashMap<String, String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone, Default)]
struct Shared {
    routes: Arc<Mutex<HashMap<String, StubResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Leads backend on an ephemeral local port, answering from a route table
/// and recording every request. Unknown routes answer 404.
pub struct StubBackend {
    addr: SocketAddr,
    shared: Shared,
}

impl StubBackend {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, shared }
    }

    /// Answers `method path` (path without query, including `/api`).
    pub fn on(&self, method: &str, path: &str, response: StubResponse) -> &Self {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), response);
        self
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let key = format!("{method} {}", uri.path());

    shared.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers,
        body,
    });

    let stub = shared
        .routes
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or_else(|| StubResponse::json(404, json!({ "message": "Not found" })));

    let mut response = Response::builder().status(stub.status);
    response = response.header("content-type", "application/json");
    for (name, value) in stub.headers {
        response = response.header(name, value);
    }
    response.body(Body::from(stub.body)).unwrap()
}

/// A client for the stub backend without a session.
pub fn api_client(backend: &StubBackend) -> ApiClient {
    ApiClient::new(backend.base_url()).unwrap()
}

/// Web app talking to the stub backend.
pub fn web_server(backend: &StubBackend) -> TestServer {
    let state = AppState::new(api_client(backend), false);
    TestServer::new(router(state)).unwrap()
}

pub fn session() -> BackendSession {
    BackendSession {
        cookies: vec!["sid=abc123".to_string()],
        token: Some("tok-1".to_string()),
    }
}

/// `Cookie` header carrying `session` the way the browser would.
pub fn session_cookie_header(session: &BackendSession) -> (HeaderName, HeaderValue) {
    let set_cookie = session_cookie(session, false);
    let pair = set_cookie.split(';').next().unwrap().to_string();
    (COOKIE, HeaderValue::from_str(&pair).unwrap())
}

pub fn lead_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{id}@example.com"),
        "phone": "555-0100",
        "status": status,
        "createdAt": "2024-01-15T14:30:00.000Z",
        "updatedAt": "2024-02-01T08:00:05.000Z"
    })
}

pub fn leads_page_json(leads: Vec<Value>, pages: u32) -> Value {
    json!({
        "leads": leads,
        "pagination": { "page": 1, "limit": 10, "total": pages * 10, "pages": pages }
    })
}

pub fn analytics_json(total: u64, converted: u64) -> Value {
    json!({
        "totalLeads": total,
        "convertedLeads": converted,
        "leadsByStage": [
            { "_id": "New", "count": total - converted },
            { "_id": "Converted", "count": converted }
        ]
    })
}
