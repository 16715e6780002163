//! JSON request client with a failure-notification side channel.
//!
//! DESIGN
//! ======
//! `request` performs exactly one HTTP attempt and classifies the result:
//! a success status with a JSON body is returned as-is; anything else
//! (transport failure, non-success status, undecodable body) is logged,
//! raised as one generic error toast, and returned to the caller. The toast
//! never replaces caller-side error handling.
//!
//! LIMITATIONS
//! ===========
//! No retries and no client-imposed timeout: a stalled server stalls the
//! caller until the transport gives up.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::config::UiConfig;
use crate::notify::{NotificationManager, Severity};

const JSON_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// ERROR
// =============================================================================

/// Broad failure classes, as the UI reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a response.
    Transport,
    /// A response arrived but reports failure.
    Application,
    /// The request could not be built from the given input.
    Configuration,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid request target {target:?}: {reason}")]
    InvalidUrl { target: String, reason: String },

    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("transport failed: {0}")]
    Transport(String),

    #[error("HTTP error status {status}")]
    Status { status: u16, body: String },

    #[error("response decode failed: {0}")]
    Decode(String),
}

impl RequestError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidHeader { .. } | Self::HttpClientBuild(_) => {
                FailureKind::Configuration
            }
            Self::Transport(_) | Self::Decode(_) => FailureKind::Transport,
            Self::Status { .. } => FailureKind::Application,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "E_INVALID_URL",
            Self::InvalidHeader { .. } => "E_INVALID_HEADER",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_HTTP_STATUS",
            Self::Decode(_) => "E_DECODE",
        }
    }

    /// Whether a caller-side retry could plausibly succeed. The client
    /// itself never retries.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Per-request settings. Headers are merged over the JSON content type;
/// caller entries win.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::GET, headers: Vec::new(), body: None }
    }
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn post(body: Value) -> Self {
        Self { method: Method::POST, body: Some(body), ..Self::default() }
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct RequestClient {
    http: reqwest::Client,
    base_url: Url,
    notifications: NotificationManager,
    failure_message: String,
}

impl RequestClient {
    /// # Errors
    ///
    /// Fails if the configured base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &UiConfig, notifications: NotificationManager) -> Result<Self, RequestError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| RequestError::InvalidUrl {
            target: config.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| RequestError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url, notifications, failure_message: config.failure_message.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Issue one request and return its JSON body.
    ///
    /// # Errors
    ///
    /// Any failure is logged and raised as an error toast before being
    /// returned.
    pub async fn request(&self, target: &str, options: RequestOptions) -> Result<Value, RequestError> {
        self.request_json(target, options).await
    }

    /// Like [`request`](Self::request), decoding the body into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request); a body that does not match `T` is
    /// a decode failure.
    pub async fn request_json<T: DeserializeOwned>(&self, target: &str, options: RequestOptions) -> Result<T, RequestError> {
        match self.fetch(target, options).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.report(target, e)),
        }
    }

    /// `GET` shorthand.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn get(&self, target: &str) -> Result<Value, RequestError> {
        self.request(target, RequestOptions::get()).await
    }

    /// `POST` shorthand with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn post(&self, target: &str, body: Value) -> Result<Value, RequestError> {
        self.request(target, RequestOptions::post(body)).await
    }

    async fn fetch<T: DeserializeOwned>(&self, target: &str, options: RequestOptions) -> Result<T, RequestError> {
        let response = self.execute(target, options).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestError::Status { status: status.as_u16(), body });
        }
        decode(response).await
    }

    fn report(&self, target: &str, e: RequestError) -> RequestError {
        error!(error = %e, code = e.error_code(), %target, "request failed");
        self.notifications.notify(self.failure_message.clone(), Severity::Error);
        e
    }

    /// Send without classifying the status and without the failure toast.
    pub(crate) async fn execute(&self, target: &str, options: RequestOptions) -> Result<reqwest::Response, RequestError> {
        let url = self.resolve(target)?;
        let headers = merge_headers(&options.headers)?;

        let mut builder = self.http.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body.to_string());
        }
        builder.send().await.map_err(|e| RequestError::Transport(e.to_string()))
    }

    /// `http`/`https` URLs are used as-is; anything else joins the base URL.
    /// A target that only looks like it has a scheme (`localhost:8000/api`)
    /// is joined as a relative path.
    fn resolve(&self, target: &str) -> Result<Url, RequestError> {
        let joined = match Url::parse(target) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => return Ok(url),
            Ok(_) => self.base_url.join(&format!("./{target}")),
            Err(_) => self.base_url.join(target),
        };
        joined.map_err(|e| RequestError::InvalidUrl { target: target.to_owned(), reason: e.to_string() })
    }
}

/// Decode a response body as JSON.
pub(crate) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
    let bytes = response.bytes().await.map_err(|e| RequestError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| RequestError::Decode(e.to_string()))
}

fn merge_headers(extra: &[(String, String)]) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    for (name, value) in extra {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RequestError::InvalidHeader { name: name.clone(), reason: e.to_string() })?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| RequestError::InvalidHeader { name: name.clone(), reason: e.to_string() })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
