//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = BridgeConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_negative_bounds() {
    let mut config = BridgeConfig::default();
    config.webview.bounds.width = -1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("webview.bounds.width"));
}

#[test]
fn catches_oversized_bounds() {
    let mut config = BridgeConfig::default();
    config.webview.bounds.height = 100_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("webview.bounds.height"));
}

#[test]
fn catches_blank_home_url() {
    let mut config = BridgeConfig::default();
    config.webview.home_url = "   ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("webview.home_url"));
}

#[test]
fn catches_blank_user_agent() {
    let mut config = BridgeConfig::default();
    config.webview.user_agent = Some(String::new());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("webview.user_agent"));
}

#[test]
fn no_user_agent_is_fine() {
    let mut config = BridgeConfig::default();
    config.webview.user_agent = None;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_bad_thread_name() {
    let mut config = BridgeConfig::default();
    config.dispatch.thread_name = "bad\0name".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("NUL"));

    config.dispatch.thread_name = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("dispatch.thread_name must not be empty"));
}

#[test]
fn catches_blank_allowlist_entry() {
    let mut config = BridgeConfig::default();
    config.navigation.allowed_prefixes = vec!["https://".into(), "".into()];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("navigation.allowed_prefixes[1]"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = BridgeConfig::default();
    config.webview.bounds.width = -10;
    config.logging.level = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("webview.bounds.width"));
    assert!(err.contains("logging.level"));
    assert!(err.contains("; "));
}
