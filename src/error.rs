// Client Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

pub const GENERIC_NETWORK_ERROR: &str = "Network error occurred";

/// Failure of a call against the portfolio backend, or of a local check made before one
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The request never completed (connect, DNS, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the backend's `error`/`message`/`details` field
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    /// 401 on an authenticated call; the session has already been cleared
    #[error("Authentication expired")]
    AuthExpired,

    #[error("No authentication token available")]
    Unauthenticated,

    /// Local validation failure, raised before any network call
    #[error("{0}")]
    Validation(String),

    /// 2xx response whose body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network(message.into())
    }

    pub fn api(status: u16, message: impl Into<String>, body: Option<Value>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
            body,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ClientError::Parse(message.into())
    }

    /// HTTP status the error maps to (0 when no response was received)
    pub fn status_code(&self) -> u16 {
        match self {
            ClientError::Network(_) => 0,
            ClientError::Api { status, .. } => *status,
            ClientError::AuthExpired | ClientError::Unauthenticated => 401,
            ClientError::Validation(_) => 400,
            ClientError::Parse(_) => 502,
            ClientError::Io(_) => 500,
        }
    }

    /// Message suitable for showing to the user
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::AuthExpired => "AUTH_EXPIRED",
            ClientError::Unauthenticated => "UNAUTHENTICATED",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Parse(_) => "PARSE_ERROR",
            ClientError::Io(_) => "IO_ERROR",
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::AuthExpired | ClientError::Unauthenticated)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
            "code": self.error_code(),
        })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

// The public site surfaces backend failures as gateway errors
impl IntoResponse for ClientError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ClientError::Api { status: 404, .. } => StatusCode::NOT_FOUND,
            ClientError::Validation(_) => StatusCode::BAD_REQUEST,
            ClientError::AuthExpired | ClientError::Unauthenticated => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, Json(self.to_json())).into_response()
    }
}
