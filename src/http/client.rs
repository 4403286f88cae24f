//! HTTP client for the Graph API
//!
//! A thin wrapper over reqwest that:
//! - Applies a bounded per-request timeout
//! - Parses every response body as JSON, whatever the status code
//! - Never retries; a failed request is reported once to the caller

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("tap-fbpageinsights/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// A parsed JSON response
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed body
    pub body: JsonValue,
}

/// HTTP client with a bounded timeout and JSON bodies
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Make a GET request to an absolute URL and parse the body as JSON
    ///
    /// Non-2xx statuses are not errors: the API reports failures in the body,
    /// which the caller inspects. Only transport failures, timeouts and
    /// bodies that are not JSON fail.
    ///
    /// Query values may carry credentials, so reqwest errors are stripped of
    /// their URL and logs only name the path.
    pub async fn get_json(&self, url: &str, config: RequestConfig) -> Result<JsonResponse> {
        let timeout_ms = self.config.timeout.as_millis() as u64;

        let mut req = self.client.get(url);
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        let response = req.send().await.map_err(|e| transport_error(e, timeout_ms))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout_ms))?;

        let body: JsonValue = serde_json::from_str(&text).map_err(|e| {
            Error::decode(format!("Response from GET {url} is not JSON (HTTP {status}): {e}"))
        })?;

        if (200..300).contains(&status) {
            debug!("Request succeeded: GET {}", url);
        } else {
            warn!("Request returned HTTP {}: GET {}", status, url);
        }

        Ok(JsonResponse { status, body })
    }
}

fn transport_error(e: reqwest::Error, timeout_ms: u64) -> Error {
    if e.is_timeout() {
        Error::Timeout { timeout_ms }
    } else {
        Error::Http(e.without_url())
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
