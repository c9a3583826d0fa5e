use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Method, RequestBuilder, Response, StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::{endpoints, ApiClient, FetchOptions};
use crate::error::{ClientError, ClientResult, GENERIC_NETWORK_ERROR};

use super::storage::TokenStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

/// Observable auth state.
///
/// `loading` is only true before the first verification pass has settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub authenticated: bool,
    pub loading: bool,
    pub user: Option<SessionUser>,
}

impl SessionState {
    pub fn unknown() -> Self {
        Self {
            authenticated: false,
            loading: true,
            user: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            loading: false,
            user: None,
        }
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            loading: false,
            user: Some(SessionUser {
                username: username.into(),
            }),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

/// Result of [`SessionStore::login`]; failures carry a displayable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginOutcome {
    fn ok(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    username: Option<String>,
}

/// The single admin session: bearer token in a [`TokenStore`], state in a watch channel.
///
/// Built once at the composition root and shared by reference or `Arc`.
pub struct SessionStore {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionState::unknown());
        Self {
            api,
            tokens,
            state,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn get_state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.load()
    }

    fn set_state(&self, next: SessionState) {
        let previous = self.state.send_replace(next.clone());
        if previous.authenticated != next.authenticated {
            tracing::info!(
                authenticated = next.authenticated,
                user = next.username().unwrap_or("-"),
                "session state changed"
            );
        }
    }

    /// Startup pass: verify a stored token if there is one, then settle `loading`.
    pub async fn init(&self) -> SessionState {
        self.set_state(SessionState {
            loading: true,
            ..self.get_state()
        });

        match self.tokens.load() {
            Some(token) => {
                self.verify_token(&token).await;
            }
            None => self.set_state(SessionState::anonymous()),
        }

        let settled = SessionState {
            loading: false,
            ..self.get_state()
        };
        self.set_state(settled.clone());
        settled
    }

    /// Checks `token` against the backend. Any failure clears the session.
    pub async fn verify_token(&self, token: &str) -> bool {
        let request = self
            .api
            .request(Method::GET, endpoints::AUTH_VERIFY)
            .bearer_auth(token);

        let verified = match self.api.execute(request).await {
            Ok(response) if response.status().is_success() => {
                match ApiClient::read_json::<VerifyResponse>(response).await {
                    Ok(body) => Some(body.username.unwrap_or_default()),
                    Err(e) => {
                        tracing::warn!("token verification returned an unreadable body: {}", e);
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::debug!("token rejected by backend with status {}", response.status());
                None
            }
            Err(e) => {
                tracing::warn!("token verification failed: {}", e);
                None
            }
        };

        let loading = self.get_state().loading;
        match verified {
            Some(username) => {
                self.set_state(SessionState {
                    loading,
                    ..SessionState::authenticated(username)
                });
                true
            }
            None => {
                self.tokens.clear();
                self.set_state(SessionState {
                    loading,
                    ..SessionState::anonymous()
                });
                false
            }
        }
    }

    /// Exchanges credentials for a token. State is untouched on failure.
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let request = self
            .api
            .request(Method::POST, endpoints::AUTH_LOGIN)
            .json(&json!({ "username": username, "password": password }));

        let response = match self.api.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("login request failed: {}", e);
                return LoginOutcome::failed(GENERIC_NETWORK_ERROR);
            }
        };

        if !response.status().is_success() {
            let body = response.json::<Value>().await.ok();
            let error = body
                .as_ref()
                .and_then(|b| b.get("error"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("Login failed")
                .to_string();
            return LoginOutcome::failed(error);
        }

        let body = match ApiClient::read_json::<LoginResponse>(response).await {
            Ok(body) if !body.token.is_empty() => body,
            Ok(_) => return LoginOutcome::failed("Login failed"),
            Err(e) => {
                tracing::warn!("login response could not be read: {}", e);
                return LoginOutcome::failed(GENERIC_NETWORK_ERROR);
            }
        };

        if let Err(e) = self.tokens.save(&body.token) {
            tracing::warn!("failed to persist session token: {}", e);
            return LoginOutcome::failed(format!("Could not store session: {e}"));
        }

        self.set_state(SessionState::authenticated(username));
        LoginOutcome::ok(body.message)
    }

    /// Clears the session. The backend call is best-effort and never blocks the local clear.
    pub async fn logout(&self) {
        if let Some(token) = self.tokens.load() {
            let request = self
                .api
                .request(Method::POST, endpoints::AUTH_LOGOUT)
                .bearer_auth(&token);
            match self.api.execute(request).await {
                Ok(response) if !response.status().is_success() => {
                    tracing::debug!("backend logout answered {}", response.status());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("logout request failed: {}", e),
            }
        }

        self.tokens.clear();
        self.set_state(SessionState::anonymous());
    }

    /// Issues `options` against `url` with the bearer token injected.
    ///
    /// A 401 logs the session out before the error is returned, so a stale token
    /// is evicted on its first rejected use.
    pub async fn authenticated_fetch(&self, url: &str, options: &FetchOptions) -> ClientResult<Response> {
        let token = self.tokens.load().ok_or(ClientError::Unauthenticated)?;

        let mut options = options.clone();
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::validation("Stored token is not a valid header value"))?;
        options.headers.insert(AUTHORIZATION, bearer);

        self.reject_expired(self.api.execute(self.api.request_with(url, &options)).await?)
            .await
    }

    /// Authenticated variant for request bodies [`FetchOptions`] cannot carry, such as multipart.
    pub async fn authenticated_execute(&self, request: RequestBuilder) -> ClientResult<Response> {
        let token = self.tokens.load().ok_or(ClientError::Unauthenticated)?;
        self.reject_expired(self.api.execute(request.bearer_auth(token)).await?)
            .await
    }

    async fn reject_expired(&self, response: Response) -> ClientResult<Response> {
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!("backend rejected the session token; logging out");
            self.logout().await;
            return Err(ClientError::AuthExpired);
        }
        Ok(response)
    }

    /// [`Self::authenticated_fetch`] plus non-2xx mapping and JSON decoding.
    pub async fn authenticated_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> ClientResult<T> {
        let response = ApiClient::check(self.authenticated_fetch(url, options).await?).await?;
        ApiClient::read_json(response).await
    }

    /// Like [`Self::authenticated_json`] for endpoints whose body is not needed.
    pub async fn authenticated_send(&self, url: &str, options: &FetchOptions) -> ClientResult<Value> {
        let response = ApiClient::check(self.authenticated_fetch(url, options).await?).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Remembered in the token store so it outlives this process.
    pub fn stash_redirect(&self, path: &str) {
        self.tokens.stash_redirect(path);
    }

    /// Post-login destination, consumed on read.
    pub fn take_redirect(&self) -> Option<String> {
        self.tokens.take_redirect()
    }
}
