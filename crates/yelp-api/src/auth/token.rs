use chrono::{DateTime, Duration, Utc};

/// An access token as granted by the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    /// Lifetime advertised by the server, if it sent a usable value.
    pub expires_in: Option<u64>,
    pub obtained_at: DateTime<Utc>,
}

impl Token {
    #[must_use]
    pub fn new(access_token: String, expires_in: Option<u64>) -> Self {
        Self {
            access_token,
            expires_in,
            obtained_at: Utc::now(),
        }
    }

    /// Absolute expiry instant, when the lifetime is known.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.expires_in?).ok()?;
        self.obtained_at
            .checked_add_signed(Duration::try_seconds(secs)?)
    }

    /// `true` if the token expires within `margin` of `now`.
    ///
    /// Tokens with an unknown lifetime are always treated as expired.
    #[must_use]
    pub fn is_expired_with_margin(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match self.expires_at() {
            Some(expires_at) => now
                .checked_add_signed(margin)
                .is_none_or(|deadline| deadline >= expires_at),
            None => true,
        }
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[redacted]")
            .field("expires_in", &self.expires_in)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

/// Whether [`OAuthTokenProvider`](super::OAuthTokenProvider) reuses tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenCachePolicy {
    /// Perform a fresh exchange on every call.
    #[default]
    AlwaysRefresh,
    /// Reuse the last token until `margin` before it expires.
    UntilExpiry { margin: std::time::Duration },
}

impl TokenCachePolicy {
    /// Caching with a 60-second refresh margin.
    #[must_use]
    pub fn until_expiry() -> Self {
        TokenCachePolicy::UntilExpiry {
            margin: std::time::Duration::from_secs(60),
        }
    }
}
