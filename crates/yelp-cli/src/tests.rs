use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::*;
use yelp_api::{
    HttpRequest, HttpTransport, SearchRequest, SortBy, TokenCachePolicy, TransportError,
};
use yelp_core::{AppConfig, AuthConfig, DEFAULT_AUTH_URL, DEFAULT_BASE_URL};

fn config(auth: AuthConfig) -> AppConfig {
    AppConfig {
        auth,
        base_url: DEFAULT_BASE_URL.to_string(),
        auth_url: DEFAULT_AUTH_URL.to_string(),
        log_level: "info".to_string(),
        request_timeout_secs: 60,
        user_agent: "yelp-rs/0.1".to_string(),
        token_cache: false,
    }
}

fn search_request(args: &[&str]) -> SearchRequest {
    let cli = Cli::try_parse_from(args).expect("expected valid cli args");
    match cli.command {
        Commands::Search(args) => args.into_request(),
        other => panic!("expected search command, got {other:?}"),
    }
}

#[test]
fn parses_business_command() {
    let cli = Cli::try_parse_from(["yelp-cli", "business", "gary-danko-san-francisco"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Business { ref id } if id == "gary-danko-san-francisco"
    ));
}

#[test]
fn parses_reviews_and_token_commands() {
    let cli = Cli::try_parse_from(["yelp-cli", "reviews", "abc"]).unwrap();
    assert!(matches!(cli.command, Commands::Reviews { .. }));

    let cli = Cli::try_parse_from(["yelp-cli", "token"]).unwrap();
    assert!(matches!(cli.command, Commands::Token));
}

#[test]
fn business_requires_an_id() {
    assert!(Cli::try_parse_from(["yelp-cli", "business"]).is_err());
}

#[test]
fn search_flags_map_onto_request() {
    let request = search_request(&[
        "yelp-cli",
        "search",
        "--term",
        "coffee",
        "--latitude",
        "37.78",
        "--longitude",
        "-122.39",
        "--sort-by",
        "distance",
        "--price",
        "1,2",
        "--open-now",
    ]);

    assert_eq!(request.term.as_deref(), Some("coffee"));
    assert_eq!(request.latitude, Some(37.78));
    assert_eq!(request.longitude, Some(-122.39));
    assert_eq!(request.sort_by, Some(SortBy::Distance));
    assert_eq!(request.price, Some(vec![1, 2]));
    assert_eq!(request.open_now, Some(true));
    assert!(request.location.is_none());
}

#[test]
fn search_without_open_now_leaves_it_unset() {
    let request = search_request(&["yelp-cli", "search", "--location", "NYC"]);
    assert_eq!(request.open_now, None);
    assert_eq!(request, SearchRequest::new().location("NYC"));
}

#[test]
fn search_rejects_unknown_sort_key() {
    assert!(Cli::try_parse_from(["yelp-cli", "search", "--sort-by", "nearest"]).is_err());
}

#[test]
fn search_rejects_open_now_with_open_at() {
    let result = Cli::try_parse_from([
        "yelp-cli",
        "search",
        "--open-now",
        "--open-at",
        "1700000000",
    ]);
    assert!(result.is_err());
}

#[test]
fn mask_token_hides_middle() {
    let masked = setup::mask_token("abcdefghijklmnopqrstuvwxyz");
    assert_eq!(masked, "abcd...wxyz (26 chars)");
}

#[test]
fn mask_token_hides_short_tokens_entirely() {
    assert_eq!(setup::mask_token("abc123"), "******");
}

#[test]
fn build_client_from_api_key_config() {
    let client = setup::build_client(&config(AuthConfig::ApiKey("key-123".to_string())))
        .expect("client should build");
    assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
}

#[test]
fn build_client_from_client_credentials_config() {
    let config = config(AuthConfig::ClientCredentials {
        client_id: "client-abc".to_string(),
        client_secret: "secret-xyz".to_string(),
    });
    assert!(setup::build_client(&config).is_ok());
}

#[test]
fn oauth_provider_honours_token_cache_flag() {
    let mut config = config(AuthConfig::ClientCredentials {
        client_id: "client-abc".to_string(),
        client_secret: "secret-xyz".to_string(),
    });
    config.token_cache = true;

    let transport = setup::build_transport(&config).unwrap();
    let provider = setup::build_oauth_provider(&config, transport).unwrap();
    assert_eq!(provider.cache_policy(), TokenCachePolicy::until_expiry());
    assert_eq!(provider.auth_url().as_str(), DEFAULT_AUTH_URL);
}

#[test]
fn oauth_provider_requires_client_credentials() {
    let config = config(AuthConfig::ApiKey("key-123".to_string()));
    let transport = setup::build_transport(&config).unwrap();
    let err = setup::build_oauth_provider(&config, transport).unwrap_err();
    assert!(err.to_string().contains("YELP_CLIENT_ID"));
}

#[test]
fn short_client_secret_is_rejected() {
    let config = config(AuthConfig::ClientCredentials {
        client_id: "client-abc".to_string(),
        client_secret: "ab".to_string(),
    });
    let transport = setup::build_transport(&config).unwrap();
    assert!(setup::build_token_provider(&config, transport).is_err());
}

/// Answers the token endpoint and the API from one counted instance.
#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
}

#[async_trait]
impl HttpTransport for CountingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.url.path().ends_with("/oauth2/token") {
            Ok(json!({ "access_token": "oauth-token", "expires_in": 3600 }))
        } else {
            Ok(json!({ "id": "abc" }))
        }
    }
}

#[tokio::test]
async fn token_exchange_and_api_calls_share_one_transport() {
    let config = config(AuthConfig::ClientCredentials {
        client_id: "client-abc".to_string(),
        client_secret: "secret-xyz".to_string(),
    });
    let transport = Arc::new(CountingTransport::default());

    let client = setup::build_client_with(&config, transport.clone()).unwrap();
    let details = client.get_business_details("abc").await.unwrap();

    assert_eq!(details.id, "abc");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
}
