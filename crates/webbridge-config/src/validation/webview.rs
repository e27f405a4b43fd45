//! Browser control defaults validation (home page, initial bounds).

use crate::schema::BridgeConfig;

use super::helpers::{validate_non_blank, validate_range};

/// Largest window dimension accepted for the initial bounds.
const MAX_DIMENSION: i32 = 16_384;

pub(crate) fn validate_webview(errors: &mut Vec<String>, config: &BridgeConfig) {
    let webview = &config.webview;
    validate_non_blank(errors, "webview.home_url", &webview.home_url);
    validate_range(
        errors,
        "webview.bounds.width",
        webview.bounds.width,
        0,
        MAX_DIMENSION,
    );
    validate_range(
        errors,
        "webview.bounds.height",
        webview.bounds.height,
        0,
        MAX_DIMENSION,
    );
    if let Some(ua) = &webview.user_agent {
        validate_non_blank(errors, "webview.user_agent", ua);
    }
}
