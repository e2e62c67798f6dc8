//! HTTP client for the Yelp Fusion business API.
//!
//! Every call asks the configured [`TokenProvider`] for a bearer token before
//! touching the network. Provider failures surface as
//! [`YelpError::TokenUnavailable`] without a request being made; transport
//! failures are classified by status (401 → unauthenticated, 400 → bad
//! argument, anything else → operation failed).

use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::auth::{BasicTokenProvider, TokenProvider};
use crate::error::YelpError;
use crate::search::SearchRequest;
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::types::{Business, BusinessDetails, Review, ReviewsResponse, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";

const MIN_API_KEY_LEN: usize = 3;

/// Client for the Yelp Fusion business API.
///
/// Use [`YelpClient::with_api_key`] for a static key or
/// [`YelpClient::builder`] to supply an OAuth token provider, a custom
/// transport, or a mock server base URL.
#[derive(Clone)]
pub struct YelpClient {
    transport: Arc<dyn HttpTransport>,
    token_provider: Arc<dyn TokenProvider>,
    base_url: Url,
}

impl YelpClient {
    #[must_use]
    pub fn builder() -> YelpClientBuilder {
        YelpClientBuilder::default()
    }

    /// Creates a client against the production API authenticated with a
    /// fixed key.
    ///
    /// # Errors
    ///
    /// Returns [`YelpError::InvalidConfiguration`] if `api_key` is shorter
    /// than three characters or the default transport cannot be built.
    pub fn with_api_key(api_key: &str) -> Result<Self, YelpError> {
        if api_key.trim().chars().count() < MIN_API_KEY_LEN {
            return Err(YelpError::InvalidConfiguration(format!(
                "API key must be at least {MIN_API_KEY_LEN} characters"
            )));
        }
        let provider = BasicTokenProvider::new(api_key)
            .map_err(|e| YelpError::InvalidConfiguration(e.to_string()))?;
        Self::builder().token_provider(Arc::new(provider)).build()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Searches for businesses matching `request`.
    ///
    /// # Errors
    ///
    /// - [`YelpError::BadArgument`] if the request fails validation or the
    ///   API answers 400.
    /// - [`YelpError::TokenUnavailable`] / [`YelpError::Unauthenticated`] if
    ///   no token is available or the API answers 401.
    /// - [`YelpError::OperationFailed`] for any other failure, including a
    ///   null response body.
    /// - [`YelpError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn search_businesses(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Business>, YelpError> {
        request.validate()?;

        let url = self.endpoint(&["businesses", "search"]);
        let mut http = HttpRequest::get(url.clone());
        for (key, value) in request.to_query_pairs() {
            http = http.query(key, value);
        }

        let body = self.send(http).await?;
        if body.is_null() {
            tracing::warn!(url = %url, "received null search response");
            return Err(YelpError::OperationFailed {
                message: format!("received null response from {url}"),
                source: None,
            });
        }

        let response: SearchResponse = decode(body, "businesses/search")?;
        let businesses = response.businesses.unwrap_or_default();
        tracing::info!(
            returned = businesses.len(),
            total = response.total,
            "business search complete"
        );
        Ok(businesses)
    }

    /// Fetches the full record for one business.
    ///
    /// # Errors
    ///
    /// - [`YelpError::BadArgument`] if `business_id` is empty (no request is
    ///   made) or the API answers 400.
    /// - [`YelpError::TokenUnavailable`] / [`YelpError::Unauthenticated`].
    /// - [`YelpError::OperationFailed`] for other transport failures.
    /// - [`YelpError::Deserialize`] if the body (including a null body) does
    ///   not decode into [`BusinessDetails`].
    pub async fn get_business_details(
        &self,
        business_id: &str,
    ) -> Result<BusinessDetails, YelpError> {
        let business_id = require_business_id(business_id)?;
        let url = self.endpoint(&["businesses", business_id]);
        let body = self.send(HttpRequest::get(url)).await?;
        decode(body, &format!("businesses/{business_id}"))
    }

    /// [`get_business_details`](Self::get_business_details) for a business
    /// returned by search.
    ///
    /// # Errors
    ///
    /// Same as [`get_business_details`](Self::get_business_details).
    pub async fn get_business_details_for(
        &self,
        business: &Business,
    ) -> Result<BusinessDetails, YelpError> {
        self.get_business_details(&business.id).await
    }

    /// Fetches the reviews excerpted for one business.
    ///
    /// A null response body yields an empty list.
    ///
    /// # Errors
    ///
    /// Same classification as [`get_business_details`](Self::get_business_details).
    pub async fn get_reviews(&self, business_id: &str) -> Result<Vec<Review>, YelpError> {
        let business_id = require_business_id(business_id)?;
        let url = self.endpoint(&["businesses", business_id, "reviews"]);
        let body = self.send(HttpRequest::get(url)).await?;
        if body.is_null() {
            return Ok(Vec::new());
        }

        let response: ReviewsResponse = decode(body, &format!("businesses/{business_id}/reviews"))?;
        tracing::debug!(total = response.total, business_id, "fetched reviews");
        Ok(response.reviews.unwrap_or_default())
    }

    /// [`get_reviews`](Self::get_reviews) for a business returned by search.
    ///
    /// # Errors
    ///
    /// Same as [`get_reviews`](Self::get_reviews).
    pub async fn get_reviews_for(&self, business: &Business) -> Result<Vec<Review>, YelpError> {
        self.get_reviews(&business.id).await
    }

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attaches a bearer token and performs the request.
    async fn send(&self, request: HttpRequest) -> Result<serde_json::Value, YelpError> {
        let token = self.token_provider.get_token().await.map_err(|e| {
            tracing::warn!(error = %e, "no access token available");
            YelpError::TokenUnavailable(e)
        })?;

        let url = request.url.to_string();
        let request = request.header(
            reqwest::header::AUTHORIZATION.as_str(),
            format!("Bearer {token}"),
        );

        self.transport.execute(request).await.map_err(|err| {
            tracing::warn!(url = %url, status = ?err.status_code(), error = %err, "Yelp API call failed");
            YelpError::from_transport(&url, err)
        })
    }
}

impl std::fmt::Debug for YelpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YelpClient")
            .field("base_url", &self.base_url.as_str())
            .field("token_provider", &self.token_provider)
            .finish_non_exhaustive()
    }
}

/// Builder for [`YelpClient`].
#[derive(Default)]
pub struct YelpClientBuilder {
    base_url: Option<String>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl YelpClientBuilder {
    /// Overrides the API base (default `https://api.yelp.com/v3`).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Uses `transport` instead of a default [`ReqwestTransport`].
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// # Errors
    ///
    /// Returns [`YelpError::InvalidConfiguration`] if no token provider was
    /// supplied, the base URL is not a valid http(s) URL, or the default
    /// transport cannot be constructed.
    pub fn build(self) -> Result<YelpClient, YelpError> {
        let token_provider = self.token_provider.ok_or_else(|| {
            YelpError::InvalidConfiguration("a token provider is required".to_string())
        })?;
        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_defaults().map_err(|e| {
                YelpError::InvalidConfiguration(format!("could not build HTTP client: {e}"))
            })?),
        };

        Ok(YelpClient {
            transport,
            token_provider,
            base_url,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, YelpError> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| YelpError::InvalidConfiguration(format!("invalid base URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(YelpError::InvalidConfiguration(format!(
            "base URL '{raw}' must be an http(s) URL"
        )));
    }
    Ok(url)
}

fn require_business_id(business_id: &str) -> Result<&str, YelpError> {
    let trimmed = business_id.trim();
    if trimmed.is_empty() {
        return Err(YelpError::bad_argument("business id cannot be empty"));
    }
    Ok(trimmed)
}

fn decode<T: DeserializeOwned>(body: serde_json::Value, context: &str) -> Result<T, YelpError> {
    serde_json::from_value(body).map_err(|source| YelpError::Deserialize {
        context: context.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
