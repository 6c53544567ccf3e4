//! HTTP client for the Tracker API
//!
//! A thin wrapper over `reqwest` that handles:
//! - Base URL and API token header
//! - Query parameter and JSON body attachment
//! - Non-2xx status classification
//!
//! There is deliberately no retry loop here: a failed page fetch must leave
//! the pagination cursor untouched so the caller can reissue the identical
//! request.

use super::request::ApiRequest;
use crate::error::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default base URL of the Tracker v5 API
pub const DEFAULT_BASE_URL: &str = "https://www.pivotaltracker.com/services/v5";

/// Header carrying the API token
pub const TOKEN_HEADER: &str = "X-TrackerToken";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// API token, sent as `X-TrackerToken` on every request
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("tracker-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// HTTP client executing [`ApiRequest`] templates
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    /// Execute a request, returning the raw response
    ///
    /// Non-2xx statuses are mapped to [`Error::HttpStatus`] with the body
    /// text attached; the response body is always consumed before returning.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response> {
        let url = self.build_url(&request.path)?;

        let mut req = self.client.request(request.method.clone(), url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(ref token) = self.config.token {
            req = req.header(TOKEN_HEADER, token.as_str());
        }
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("{} {} -> {}", request.method, url, status.as_u16());
        Ok(response)
    }

    /// Execute a request and decode the JSON response body
    ///
    /// This is the primitive every non-paginated resource call goes through.
    /// A body that is not valid JSON surfaces as [`Error::Decode`], not as a
    /// transport error.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let response = self.execute(request).await?;
        let value: T = response.json().await.map_err(Error::from_body)?;
        Ok(value)
    }

    /// Execute a request and discard the response body
    pub async fn execute_unit(&self, request: &ApiRequest) -> Result<()> {
        let response = self.execute(request).await?;
        // Drain the body so the connection can be reused.
        let _ = response.bytes().await;
        Ok(())
    }

    /// Build and validate a full URL from a relative path
    fn build_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("has_token", &self.config.token.is_some())
            .finish_non_exhaustive()
    }
}
