use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_env_is_empty() {
    let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.base_url, DEFAULT_API_URL);
    assert_eq!(config.token, None);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
}

#[test]
fn env_values_override_defaults() {
    let config = ClientConfig::from_lookup(lookup(&[
        (ENV_API_URL, "https://api.example.test/"),
        (ENV_API_TOKEN, "secret"),
        (ENV_TIMEOUT_SECS, "5"),
    ]))
    .unwrap();
    assert_eq!(config.base_url, "https://api.example.test");
    assert_eq!(config.token.as_deref(), Some("secret"));
    assert_eq!(config.timeout, Duration::from_secs(5));
}

#[test]
fn bad_timeout_is_rejected() {
    for raw in ["soon", "0", "-3"] {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, raw)])).unwrap_err();
        assert!(matches!(err, ReelError::Validation(_)), "{raw}");
    }
}

#[test]
fn base_url_must_be_http() {
    assert!(ClientConfig::new("ftp://example.test").is_err());
    assert!(ClientConfig::new("not a url").is_err());
    assert!(ClientConfig::new("http://127.0.0.1:8000").is_ok());
}

#[test]
fn empty_token_means_no_auth() {
    let config = ClientConfig::new("http://localhost").unwrap().with_token("");
    assert!(config.token.is_none());
}

#[test]
fn reel_urls_are_joined_under_api_prefix() {
    let config = ClientConfig::new("http://localhost:8000/").unwrap();
    assert_eq!(config.reels_url("42"), "http://localhost:8000/api/reels/42");
    assert_eq!(
        config.reels_url("42/render"),
        "http://localhost:8000/api/reels/42/render"
    );
}
