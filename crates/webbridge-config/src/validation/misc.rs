//! Validation for smaller config sections: dispatch, navigation, logging.

use crate::schema::BridgeConfig;

use super::helpers::validate_non_blank;

pub(crate) fn validate_dispatch(errors: &mut Vec<String>, config: &BridgeConfig) {
    let name = &config.dispatch.thread_name;
    validate_non_blank(errors, "dispatch.thread_name", name);
    // std::thread::Builder panics on interior NULs
    if name.contains('\0') {
        errors.push("dispatch.thread_name must not contain NUL".into());
    }
}

pub(crate) fn validate_navigation(errors: &mut Vec<String>, config: &BridgeConfig) {
    for (i, prefix) in config.navigation.allowed_prefixes.iter().enumerate() {
        validate_non_blank(errors, &format!("navigation.allowed_prefixes[{i}]"), prefix);
    }
}

pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &BridgeConfig) {
    validate_non_blank(errors, "logging.level", &config.logging.level);
}
