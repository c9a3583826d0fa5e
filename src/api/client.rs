use reqwest::{header::HeaderMap, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Thin wrapper over `reqwest::Client` bound to the portfolio backend.
///
/// Every call funnels through [`ApiClient::execute`] and [`ApiClient::check`], so
/// callers only ever see the three failure shapes of [`ClientError`]: network,
/// structured non-2xx, or unparseable success body.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

/// Caller-supplied request options, cloned before the auth header is injected.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub json: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            json: None,
            query: Vec::new(),
        }
    }
}

impl FetchOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json(method: Method, body: Value) -> Self {
        Self {
            method,
            json: Some(body),
            ..Self::default()
        }
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Absolute URL for an endpoint path such as `/api/v1/projects`
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!("{}{}", self.base_url, endpoint)
    }

    /// Absolute URL built from raw path segments, each percent-encoded.
    pub fn url_with_segments(&self, segments: &[&str]) -> ClientResult<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::validation(format!("Invalid API base URL '{}': {e}", self.base_url)))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::validation(format!("API base URL '{}' cannot hold a path", self.base_url)))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url.to_string())
    }

    /// Prefix every backend-local upload URL starts with
    pub fn uploads_prefix(&self) -> String {
        format!("{}/uploads/", self.base_url)
    }

    pub fn is_local_upload(&self, url: &str) -> bool {
        url.starts_with(&self.uploads_prefix())
    }

    /// Turns a backend-relative upload path (`/uploads/a b.png`) into an absolute,
    /// segment-encoded URL. Absolute URLs pass through unchanged.
    pub fn absolute_upload_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let encoded = path
            .split('/')
            .map(encode_segment)
            .collect::<Vec<_>>()
            .join("/");
        format!("{}{}", self.base_url, encoded)
    }

    pub fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http.request(method, self.url(endpoint))
    }

    /// Builds a request from [`FetchOptions`]
    pub fn request_with(&self, url: &str, options: &FetchOptions) -> RequestBuilder {
        let mut builder = self
            .http
            .request(options.method.clone(), self.url(url))
            .headers(options.headers.clone());
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = &options.json {
            builder = builder.json(body);
        }
        builder
    }

    /// Sends the request; only transport failures become errors here.
    pub async fn execute(&self, request: RequestBuilder) -> ClientResult<Response> {
        request.send().await.map_err(|e| {
            tracing::debug!("request failed before a response arrived: {}", e);
            ClientError::network(e.to_string())
        })
    }

    /// Maps a non-2xx response to [`ClientError::Api`].
    pub async fn check(response: Response) -> ClientResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Self::error_from_response(response).await)
    }

    pub async fn error_from_response(response: Response) -> ClientError {
        let status = response.status();
        let body = response.json::<Value>().await.ok();
        let message = body
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                )
            });
        ClientError::api(status.as_u16(), message, body)
    }

    pub async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = Self::check(self.execute(request).await?).await?;
        Self::read_json(response).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        self.send_json(self.request(Method::GET, endpoint)).await
    }

    /// POST without a body, ignoring whatever the backend answers with
    pub async fn post_empty(&self, endpoint: &str) -> ClientResult<()> {
        Self::check(self.execute(self.request(Method::POST, endpoint)).await?).await?;
        Ok(())
    }
}

/// Backend error text, preferring `error`, then `message`, then `details`
pub fn error_message(body: &Value) -> Option<String> {
    ["error", "message", "details"]
        .iter()
        .filter_map(|key| body.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8082/".to_string(),
            timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_url_joins_endpoint() {
        let client = client();
        assert_eq!(client.url("/api/v1/projects"), "http://localhost:8082/api/v1/projects");
        assert_eq!(client.url("https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_segments_are_encoded() {
        let url = client()
            .url_with_segments(&["api", "v1", "upload", "skill", "C# / .NET"])
            .unwrap();
        assert_eq!(url, "http://localhost:8082/api/v1/upload/skill/C%23%20%2F%20.NET");
    }

    #[test]
    fn test_absolute_upload_url_encodes_each_segment() {
        let client = client();
        assert_eq!(
            client.absolute_upload_url("/uploads/1700000000_my shot.png"),
            "http://localhost:8082/uploads/1700000000_my%20shot.png"
        );
        assert!(client.is_local_upload("http://localhost:8082/uploads/a.png"));
        assert!(!client.is_local_upload("https://firebasestorage.googleapis.com/a.png"));
    }

    #[test]
    fn test_error_message_precedence() {
        assert_eq!(
            error_message(&json!({"error": "Invalid credentials", "message": "x"})),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(
            error_message(&json!({"message": "Not found"})),
            Some("Not found".to_string())
        );
        assert_eq!(error_message(&json!({"error": ""})), None);
    }
}
