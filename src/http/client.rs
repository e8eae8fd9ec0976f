//! HTTP client with bounded retry
//!
//! Every failure class the upstream API produces (connection errors,
//! timeouts, any non-2xx status) is retried up to `max_retries` times with
//! a constant `retry_delay` between attempts. When the last attempt fails its
//! error is returned to the caller.

use super::auth::TokenAuth;
use crate::error::{Error, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Longest error body kept in `Error::HttpStatus`
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Additional attempts after the first
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
    /// Token attached to every request
    pub auth: Option<TokenAuth>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_delay: Duration::from_secs(10),
            auth: None,
            user_agent: format!("warehouse-extract/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Total attempts per request
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
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

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the delay between attempts
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the token authentication
    pub fn auth(mut self, auth: TokenAuth) -> Self {
        self.config.auth = Some(auth);
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

/// HTTP client with bounded retry
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

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET a URL and return the response body, retrying on failure
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        let max_attempts = self.config.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            info!(attempt, max_attempts, url = %truncate(url.as_str(), 120), "Requesting");

            match self.send_once(url).await {
                Ok(body) => {
                    debug!(attempt, bytes = body.len(), "Request succeeded");
                    return Ok(body);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(
                        "Request failed ({e}), attempt {attempt}/{max_attempts}, retrying in {:?}",
                        self.config.retry_delay
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) => {
                    warn!("Request failed ({e}), attempt {attempt}/{max_attempts}, giving up");
                    return Err(e);
                }
            }
        }
    }

    /// One attempt: send the request and read the whole body
    async fn send_once(&self, url: &Url) -> Result<String> {
        let mut req = self.client.get(url.clone()).timeout(self.config.timeout);

        if let Some(ref auth) = self.config.auth {
            req = auth.apply(req);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(
                status.as_u16(),
                truncate(&body, MAX_ERROR_BODY),
            ));
        }

        Ok(response.text().await?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Cut a string to at most `max` characters
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
