//! HTTP transport seam.
//!
//! Token providers and the API facade never talk to `reqwest` directly; they
//! build an [`HttpRequest`] and hand it to an [`HttpTransport`]. Non-2xx
//! responses come back as [`TransportError::Status`] carrying the status code
//! and raw body so callers can classify them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::error::TransportError;

/// Overall per-request timeout used when no transport is supplied.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const DEFAULT_USER_AGENT: &str = "yelp-rs/0.1";

/// A single outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    /// Sent as an `application/x-www-form-urlencoded` body when non-empty.
    pub form: Vec<(String, String)>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn form(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The URL with query parameters applied, percent-encoded.
    #[must_use]
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.query {
                pairs.append_pair(k, v);
            }
        }
        url
    }
}

/// Executes requests and decodes JSON response bodies.
///
/// Implementations must return `Ok` only for 2xx responses. An empty 2xx body
/// decodes to [`serde_json::Value::Null`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs the request and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Status`] for any non-2xx response.
    /// - [`TransportError::Request`] on network, TLS, or timeout failure.
    /// - [`TransportError::Decode`] if a 2xx body is not valid JSON.
    async fn execute(&self, request: HttpRequest) -> Result<serde_json::Value, TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with an overall request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest::Error` if the client cannot be constructed
    /// (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a transport with the default 60-second timeout.
    ///
    /// # Errors
    ///
    /// See [`ReqwestTransport::new`].
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<serde_json::Value, TransportError> {
        let url = request.full_url();
        let url_str = redact_query(&url);

        let mut builder = self.client.request(request.method.clone(), url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: url_str.clone(),
                source,
            })?;

        if !status.is_success() {
            tracing::debug!(url = %url_str, status = status.as_u16(), "non-success response");
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url_str,
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&body).map_err(|source| TransportError::Decode {
            url: url_str,
            source,
        })
    }
}

/// URL rendering for errors and logs: path only, query values dropped.
fn redact_query(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}
