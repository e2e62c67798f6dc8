use async_trait::async_trait;

use super::TokenProvider;
use crate::error::AuthError;

/// Token provider that always returns the same key.
#[derive(Clone)]
pub struct BasicTokenProvider {
    token: String,
}

impl BasicTokenProvider {
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidConfiguration`] if `token` is empty or
    /// whitespace-only.
    pub fn new(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "token is required".to_string(),
            ));
        }
        Ok(Self { token })
    }
}

impl std::fmt::Debug for BasicTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicTokenProvider")
            .field("token", &"[redacted]")
            .finish()
    }
}

#[async_trait]
impl TokenProvider for BasicTokenProvider {
    async fn get_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}
