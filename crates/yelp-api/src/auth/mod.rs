//! Bearer token supply for outbound API calls.
//!
//! Every authenticated call asks a [`TokenProvider`] for a token first. Two
//! providers ship with the crate:
//!
//! - [`BasicTokenProvider`] returns a fixed key with no network access.
//! - [`OAuthTokenProvider`] performs an OAuth2 client-credentials exchange
//!   against the authorization endpoint and validates the grant response.
//!
//! By default the OAuth provider re-authenticates on every call. Opting into
//! [`TokenCachePolicy::UntilExpiry`] reuses a token until shortly before its
//! advertised expiry and coalesces concurrent refreshes into one request.

mod basic;
mod credentials;
mod oauth;
mod token;

use async_trait::async_trait;

use crate::error::AuthError;

pub use basic::BasicTokenProvider;
pub use credentials::Credentials;
pub use oauth::{OAuthTokenProvider, OAuthTokenProviderBuilder, DEFAULT_AUTH_URL};
pub use token::{Token, TokenCachePolicy};

/// Supplies a bearer token on demand.
///
/// Implementations never return an empty token: if one cannot be produced
/// the call fails with a classified [`AuthError`].
#[async_trait]
pub trait TokenProvider: Send + Sync + std::fmt::Debug {
    /// Returns a non-empty bearer token.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] describing why no token is available.
    async fn get_token(&self) -> Result<String, AuthError>;
}
