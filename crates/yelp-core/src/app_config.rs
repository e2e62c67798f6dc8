pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";
pub const DEFAULT_AUTH_URL: &str = "https://api.yelp.com/oauth2/token";

/// How the client authenticates against the API.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// A fixed bearer key, sent as-is on every call.
    ApiKey(String),
    /// An OAuth2 client-credentials pair exchanged at the auth URL.
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::ApiKey(_) => f.debug_tuple("ApiKey").field(&"[redacted]").finish(),
            AuthConfig::ClientCredentials { .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", &"[redacted]")
                .field("client_secret", &"[redacted]")
                .finish(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub base_url: String,
    pub auth_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub token_cache: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("auth", &self.auth)
            .field("base_url", &self.base_url)
            .field("auth_url", &self.auth_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("token_cache", &self.token_cache)
            .finish()
    }
}
