#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Response, StatusCode, Uri},
    Router,
};
use serde_json::{json, Value};

use portfolio_client::admin::AdminClient;
use portfolio_client::api::ApiClient;
use portfolio_client::auth::{MemoryTokenStore, SessionStore, TokenStore};
use portfolio_client::config::AppConfig;

/// A request the mock backend received
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

#[derive(Debug, Clone)]
struct Canned {
    method: String,
    path: String,
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<Vec<Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

/// In-process stand-in for the portfolio REST API.
///
/// Routes are matched on method plus the raw (still percent-encoded) path.
/// Anything unmatched answers 404 with `{"error": "Not found"}`.
pub struct MockBackend {
    pub base_url: String,
    pub port: u16,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;

        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            port,
            state,
        })
    }

    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.on_raw(
            method,
            path,
            status,
            vec![("content-type".to_string(), "application/json".to_string())],
            body.to_string(),
        )
    }

    pub fn on_raw(&self, method: &str, path: &str, status: u16, headers: Vec<(String, String)>, body: String) -> &Self {
        self.state.routes.lock().unwrap().push(Canned {
            method: method.to_uppercase(),
            path: path.to_string(),
            status,
            headers,
            body,
        });
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::with_base_url(&self.base_url)
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.config().api).unwrap()
    }

    /// Session over an in-memory token store, optionally pre-seeded
    pub fn session(&self, token: Option<&str>) -> Arc<SessionStore> {
        let tokens: Arc<dyn TokenStore> = match token {
            Some(t) => Arc::new(MemoryTokenStore::with_token(t)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        Arc::new(SessionStore::new(self.api(), tokens))
    }

    pub fn admin(&self, token: &str) -> AdminClient {
        AdminClient::new(self.session(Some(token)), 5)
    }

    pub fn upload_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.base_url, filename)
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response<Body> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    let recorded = Recorded {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: body.to_vec(),
    };
    state.requests.lock().unwrap().push(recorded.clone());

    let canned = state
        .routes
        .lock()
        .unwrap()
        .iter()
        .find(|c| c.method == recorded.method && c.path == recorded.path)
        .cloned();

    match canned {
        Some(canned) => {
            let mut response = Response::builder().status(canned.status);
            for (name, value) in &canned.headers {
                response = response.header(name.as_str(), value.as_str());
            }
            response.body(Body::from(canned.body)).unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header("content-type", "application/json")
            .body(Body::from(json!({ "error": "Not found" }).to_string()))
            .unwrap(),
    }
}

/// Base URL nothing is listening on
pub fn unreachable_base_url() -> String {
    let port = portpicker::pick_unused_port().unwrap_or(9);
    format!("http://127.0.0.1:{}", port)
}
