// crates/network/src/client.rs
//! Blocking HTTP client wrapper with retry

use crate::error::{NetworkError, NetworkResult};
use leadsync_resilience::{with_retry_if, RetryPolicy};
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Longest response body kept in a `NetworkError::Status`
const MAX_ERROR_BODY: usize = 512;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Retry policy applied to every request
    pub retry_policy: RetryPolicy,
    /// Headers sent with every request (e.g. authorization)
    pub default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Adds a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("LeadSync/{}", env!("CARGO_PKG_VERSION")),
            retry_policy: RetryPolicy::new(3).with_initial_delay(Duration::from_millis(500)),
            default_headers: Vec::new(),
        }
    }
}

/// HTTP client with retry on transient failures
#[derive(Clone)]
pub struct Client {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with default configuration
    pub fn new() -> NetworkResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetworkResult<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| NetworkError::InvalidHeader(name.clone()))?;
            let mut header_value = HeaderValue::from_str(value)
                .map_err(|_| NetworkError::InvalidHeader(name.clone()))?;
            if header_name == reqwest::header::AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            inner: client,
            config,
        })
    }

    /// Returns the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs a GET request and decodes the JSON response
    pub fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> NetworkResult<T>
    where
        T: DeserializeOwned,
    {
        self.send_json::<T, ()>(Method::GET, url, query, None)
    }

    /// Sends a request with an optional JSON body and decodes the JSON response
    ///
    /// Timeouts, connection failures, 429 and 5xx responses are retried
    /// according to the client's retry policy.
    pub fn send_json<T, B>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> NetworkResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(method, url, query, body, NetworkError::is_retryable)
    }

    /// Like [`Client::send_json`], for requests that must reach the server at most once
    ///
    /// Only failures to connect are retried. After a timeout or an error
    /// response the server may already have acted on the request, so the
    /// error is returned as is.
    pub fn send_json_once<T, B>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> NetworkResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(method, url, query, body, NetworkError::is_connect_failure)
    }

    fn request<T, B>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
        is_retryable: fn(&NetworkError) -> bool,
    ) -> NetworkResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = reqwest::Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{}: {}", url, e)))?;

        let build = || {
            let mut builder = self.inner.request(method.clone(), url.clone()).query(query);
            if let Some(body) = body {
                builder = builder.json(body);
            }
            builder
        };

        with_retry_if(
            &self.config.retry_policy,
            || Self::attempt(build()),
            is_retryable,
        )
    }

    fn attempt<T: DeserializeOwned>(builder: RequestBuilder) -> NetworkResult<T> {
        let response = builder.send()?;
        let status = response.status();

        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            log::debug!("HTTP {} response: {}", status.as_u16(), body);
            return Err(NetworkError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes()?;
        serde_json::from_slice(&bytes).map_err(|e| NetworkError::Decode(e.to_string()))
    }
}
