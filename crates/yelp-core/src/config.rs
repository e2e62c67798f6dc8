use crate::app_config::{AppConfig, AuthConfig, DEFAULT_AUTH_URL, DEFAULT_BASE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Blank values are treated as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match optional(var) {
            None => Ok(default),
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{raw}\""),
            }),
        }
    };

    let auth = resolve_auth(
        optional("YELP_API_KEY"),
        optional("YELP_CLIENT_ID"),
        optional("YELP_CLIENT_SECRET"),
    )?;

    let base_url = or_default("YELP_BASE_URL", DEFAULT_BASE_URL);
    let auth_url = or_default("YELP_AUTH_URL", DEFAULT_AUTH_URL);
    let log_level = or_default("YELP_LOG_LEVEL", "info");
    let user_agent = or_default("YELP_USER_AGENT", "yelp-rs/0.1");
    let request_timeout_secs = parse_u64("YELP_REQUEST_TIMEOUT_SECS", "60")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "YELP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    let token_cache = parse_bool("YELP_TOKEN_CACHE", false)?;

    Ok(AppConfig {
        auth,
        base_url,
        auth_url,
        log_level,
        request_timeout_secs,
        user_agent,
        token_cache,
    })
}

/// A static API key takes precedence; otherwise the full client-credentials
/// pair is required.
fn resolve_auth(
    api_key: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Result<AuthConfig, ConfigError> {
    if let Some(key) = api_key {
        return Ok(AuthConfig::ApiKey(key));
    }

    match (client_id, client_secret) {
        (Some(client_id), Some(client_secret)) => Ok(AuthConfig::ClientCredentials {
            client_id,
            client_secret,
        }),
        (Some(_), None) => Err(ConfigError::MissingEnvVar("YELP_CLIENT_SECRET".to_string())),
        (None, Some(_)) => Err(ConfigError::MissingEnvVar("YELP_CLIENT_ID".to_string())),
        (None, None) => Err(ConfigError::MissingEnvVar("YELP_API_KEY".to_string())),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
