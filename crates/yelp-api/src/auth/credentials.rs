use crate::error::AuthError;

const MIN_CREDENTIAL_LEN: usize = 3;

/// OAuth2 client id and secret.
///
/// Validated once at construction and immutable afterwards. Both values are
/// redacted from `Debug`; there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidConfiguration`] if either value is empty
    /// or shorter than three characters.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        check_field("client id", &client_id)?;
        check_field("client secret", &client_secret)?;
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

fn check_field(name: &str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::InvalidConfiguration(format!("{name} is required")));
    }
    if value.chars().count() < MIN_CREDENTIAL_LEN {
        return Err(AuthError::InvalidConfiguration(format!(
            "{name} must be at least {MIN_CREDENTIAL_LEN} characters"
        )));
    }
    Ok(())
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &"[redacted]")
            .field("client_secret", &"[redacted]")
            .finish()
    }
}
