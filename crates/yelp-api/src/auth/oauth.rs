//! OAuth2 client-credentials token provider.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{Credentials, Token, TokenCachePolicy, TokenProvider};
use crate::error::AuthError;
use crate::transport::{HttpRequest, HttpTransport};

pub const DEFAULT_AUTH_URL: &str = "https://api.yelp.com/oauth2/token";

const GRANT_TYPE: &str = "grant_type";
const CLIENT_CREDENTIALS: &str = "client_credentials";
const CLIENT_ID: &str = "client_id";
const CLIENT_SECRET: &str = "client_secret";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

const ACCESS_TOKEN: &str = "access_token";
const EXPIRES_IN: &str = "expires_in";

/// Obtains bearer tokens through the OAuth2 client-credentials grant.
///
/// Each exchange POSTs `grant_type=client_credentials` with the client id
/// and secret to the authorization URL and validates the JSON grant:
///
/// - HTTP 400 → [`AuthError::BadCredentials`] with the raw response body.
/// - Any other transport failure → [`AuthError::TokenAcquisitionFailed`].
/// - A null body, non-object body, or missing `access_token`/`expires_in`
///   → [`AuthError::MalformedResponse`].
/// - A non-numeric `expires_in` is logged and otherwise ignored.
///
/// With the default [`TokenCachePolicy::AlwaysRefresh`] every call performs a
/// new exchange and the provider holds no state between calls.
pub struct OAuthTokenProvider {
    credentials: Credentials,
    auth_url: Url,
    transport: Arc<dyn HttpTransport>,
    cache_policy: TokenCachePolicy,
    // Held across the exchange under `UntilExpiry` so concurrent callers
    // share one in-flight request.
    cached: Mutex<Option<Token>>,
}

impl OAuthTokenProvider {
    /// Creates a provider that re-authenticates on every call.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidConfiguration`] if `auth_url` is not a
    /// valid http(s) URL.
    pub fn new(
        credentials: Credentials,
        auth_url: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, AuthError> {
        Self::builder()
            .credentials(credentials)
            .auth_url(auth_url)
            .transport(transport)
            .build()
    }

    #[must_use]
    pub fn builder() -> OAuthTokenProviderBuilder {
        OAuthTokenProviderBuilder::default()
    }

    #[must_use]
    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    #[must_use]
    pub fn cache_policy(&self) -> TokenCachePolicy {
        self.cache_policy
    }

    /// Returns a validated token, exchanging credentials as the cache policy
    /// requires.
    ///
    /// # Errors
    ///
    /// See the type-level documentation for the failure classification.
    pub async fn fetch_token(&self) -> Result<Token, AuthError> {
        let TokenCachePolicy::UntilExpiry { margin } = self.cache_policy else {
            return self.exchange().await;
        };

        let margin =
            chrono::Duration::from_std(margin).unwrap_or_else(|_| chrono::Duration::days(36_500));
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.is_expired_with_margin(chrono::Utc::now(), margin) {
                tracing::trace!("reusing cached access token");
                return Ok(token.clone());
            }
        }

        let token = self.exchange().await?;
        *cached = token.expires_in.map(|_| token.clone());
        Ok(token)
    }

    /// Drops any cached token so the next call re-authenticates.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn exchange(&self) -> Result<Token, AuthError> {
        let request = HttpRequest::post(self.auth_url.clone())
            .header(reqwest::header::CONTENT_TYPE.as_str(), FORM_URLENCODED)
            .header(reqwest::header::ACCEPT.as_str(), "application/json")
            .form(GRANT_TYPE, CLIENT_CREDENTIALS)
            .form(CLIENT_ID, self.credentials.client_id())
            .form(CLIENT_SECRET, self.credentials.client_secret());

        tracing::debug!(auth_url = %self.auth_url, "requesting access token");

        let body = match self.transport.execute(request).await {
            Ok(body) => body,
            Err(err) if err.has_response() && err.status_code() == Some(400) => {
                tracing::warn!(
                    auth_url = %self.auth_url,
                    "token endpoint rejected the client id/secret pair"
                );
                return Err(AuthError::BadCredentials {
                    body: err.body().unwrap_or_default().to_string(),
                });
            }
            Err(source) => {
                tracing::warn!(auth_url = %self.auth_url, error = %source, "token exchange failed");
                return Err(AuthError::TokenAcquisitionFailed { source });
            }
        };

        parse_grant(&body)
    }
}

#[async_trait]
impl TokenProvider for OAuthTokenProvider {
    async fn get_token(&self) -> Result<String, AuthError> {
        self.fetch_token().await.map(|token| token.access_token)
    }
}

impl std::fmt::Debug for OAuthTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthTokenProvider")
            .field("credentials", &self.credentials)
            .field("auth_url", &self.auth_url.as_str())
            .field("cache_policy", &self.cache_policy)
            .finish_non_exhaustive()
    }
}

/// Builder for [`OAuthTokenProvider`].
#[derive(Default)]
pub struct OAuthTokenProviderBuilder {
    credentials: Option<Credentials>,
    auth_url: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
    cache_policy: TokenCachePolicy,
}

impl OAuthTokenProviderBuilder {
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Overrides the token endpoint (default `https://api.yelp.com/oauth2/token`).
    #[must_use]
    pub fn auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn cache_policy(mut self, cache_policy: TokenCachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidConfiguration`] if credentials or the
    /// transport were not supplied, or if the auth URL is not a valid
    /// http(s) URL.
    pub fn build(self) -> Result<OAuthTokenProvider, AuthError> {
        let credentials = self.credentials.ok_or_else(|| {
            AuthError::InvalidConfiguration("client id and client secret are required".to_string())
        })?;
        let transport = self.transport.ok_or_else(|| {
            AuthError::InvalidConfiguration("an HTTP transport is required".to_string())
        })?;
        let auth_url = parse_auth_url(self.auth_url.as_deref().unwrap_or(DEFAULT_AUTH_URL))?;

        Ok(OAuthTokenProvider {
            credentials,
            auth_url,
            transport,
            cache_policy: self.cache_policy,
            cached: Mutex::new(None),
        })
    }
}

fn parse_auth_url(raw: &str) -> Result<Url, AuthError> {
    if raw.trim().is_empty() {
        return Err(AuthError::InvalidConfiguration(
            "authorization URL is required".to_string(),
        ));
    }
    let url = Url::parse(raw).map_err(|e| {
        AuthError::InvalidConfiguration(format!("invalid authorization URL '{raw}': {e}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AuthError::InvalidConfiguration(format!(
            "authorization URL '{raw}' must use http or https"
        )));
    }
    Ok(url)
}

/// Validates a decoded grant and extracts the token.
///
/// The response is either fully trusted or rejected; nothing is salvaged
/// from a grant that fails validation.
fn parse_grant(body: &Value) -> Result<Token, AuthError> {
    let Some(grant) = body.as_object() else {
        return Err(AuthError::MalformedResponse(if body.is_null() {
            "received null response from token endpoint".to_string()
        } else {
            format!("expected a JSON object, got {}", json_type(body))
        }));
    };

    let fields = || grant.keys().map(String::as_str).collect::<Vec<_>>().join(", ");

    let Some(expiration) = grant.get(EXPIRES_IN) else {
        return Err(AuthError::MalformedResponse(format!(
            "response is missing `{EXPIRES_IN}` (fields present: [{}])",
            fields()
        )));
    };

    let access_token = match grant.get(ACCESS_TOKEN) {
        None => {
            return Err(AuthError::MalformedResponse(format!(
                "response is missing `{ACCESS_TOKEN}` (fields present: [{}])",
                fields()
            )));
        }
        Some(Value::String(token)) if !token.trim().is_empty() => token.clone(),
        Some(other) => {
            return Err(AuthError::MalformedResponse(format!(
                "`{ACCESS_TOKEN}` must be a non-empty string, got {}",
                json_type(other)
            )));
        }
    };

    let expires_in = expiration_seconds(expiration);
    match expires_in {
        Some(secs) => tracing::debug!(
            expires_in_days = secs / 86_400,
            expires_in_minutes = secs / 60,
            "access token obtained"
        ),
        None => tracing::warn!(
            expires_in = %expiration,
            "token endpoint sent an unexpected expiration value; continuing without expiry"
        ),
    }

    Ok(Token::new(access_token, expires_in))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn expiration_seconds(value: &Value) -> Option<u64> {
    if let Some(secs) = value.as_u64() {
        return Some(secs);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "oauth_test.rs"]
mod tests;
