//! Wiring from [`AppConfig`] to a ready-to-use [`YelpClient`].

use std::sync::Arc;

use anyhow::{bail, Context};
use yelp_api::{
    BasicTokenProvider, Credentials, HttpTransport, OAuthTokenProvider, ReqwestTransport,
    TokenCachePolicy, TokenProvider, YelpClient,
};
use yelp_core::{AppConfig, AuthConfig};

pub(crate) fn build_transport(config: &AppConfig) -> anyhow::Result<Arc<dyn HttpTransport>> {
    let transport = ReqwestTransport::new(config.request_timeout_secs, &config.user_agent)
        .context("failed to build HTTP client")?;
    Ok(Arc::new(transport))
}

fn cache_policy(config: &AppConfig) -> TokenCachePolicy {
    if config.token_cache {
        TokenCachePolicy::until_expiry()
    } else {
        TokenCachePolicy::AlwaysRefresh
    }
}

/// Builds the OAuth provider; fails if the config holds a static API key.
pub(crate) fn build_oauth_provider(
    config: &AppConfig,
    transport: Arc<dyn HttpTransport>,
) -> anyhow::Result<OAuthTokenProvider> {
    let AuthConfig::ClientCredentials {
        client_id,
        client_secret,
    } = &config.auth
    else {
        bail!("token exchange requires YELP_CLIENT_ID and YELP_CLIENT_SECRET, not YELP_API_KEY");
    };

    let provider = OAuthTokenProvider::builder()
        .credentials(Credentials::new(client_id.as_str(), client_secret.as_str())?)
        .auth_url(config.auth_url.clone())
        .transport(transport)
        .cache_policy(cache_policy(config))
        .build()?;
    Ok(provider)
}

pub(crate) fn build_token_provider(
    config: &AppConfig,
    transport: Arc<dyn HttpTransport>,
) -> anyhow::Result<Arc<dyn TokenProvider>> {
    match &config.auth {
        AuthConfig::ApiKey(key) => Ok(Arc::new(BasicTokenProvider::new(key.as_str())?)),
        AuthConfig::ClientCredentials { .. } => {
            Ok(Arc::new(build_oauth_provider(config, transport)?))
        }
    }
}

pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<YelpClient> {
    build_client_with(config, build_transport(config)?)
}

/// The token exchange and the API calls share `transport`'s connection pool.
pub(crate) fn build_client_with(
    config: &AppConfig,
    transport: Arc<dyn HttpTransport>,
) -> anyhow::Result<YelpClient> {
    let client = YelpClient::builder()
        .base_url(config.base_url.clone())
        .token_provider(build_token_provider(config, Arc::clone(&transport))?)
        .transport(transport)
        .build()?;
    Ok(client)
}

/// Shows only the first and last four characters of a token.
pub(crate) fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail} ({} chars)", chars.len())
}
