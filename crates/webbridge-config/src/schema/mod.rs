//! Configuration schema types for webbridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod dispatch;
mod logging;
mod navigation;
mod webview;

pub use dispatch::*;
pub use logging::*;
pub use navigation::*;
pub use webview::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub dispatch: DispatchConfig,
    pub webview: WebViewConfig,
    pub navigation: NavigationConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use webbridge_common::Rect;

    #[test]
    fn default_dispatch_thread_name() {
        let config = BridgeConfig::default();
        assert_eq!(config.dispatch.thread_name, "native-dispatch");
    }

    #[test]
    fn default_webview_settings() {
        let config = BridgeConfig::default();
        assert_eq!(config.webview.home_url, "about:blank");
        assert!(config.webview.clipboard);
        assert!(!config.webview.transparent);
        assert!(config
            .webview
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.starts_with("WebBridge/")));
    }

    #[test]
    fn default_bounds_convert_to_rect() {
        let config = BridgeConfig::default();
        let rect: Rect = config.webview.bounds.into();
        assert_eq!(rect, Rect::new(0, 0, 800, 600));
    }

    #[test]
    fn default_logging_level() {
        let config = BridgeConfig::default();
        assert_eq!(config.logging.level, "webbridge=info");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: BridgeConfig = toml::from_str(
            r#"
[webview]
home_url = "https://start.example.test"

[webview.bounds]
width = 1024
"#,
        )
        .unwrap();
        assert_eq!(config.webview.home_url, "https://start.example.test");
        assert_eq!(config.webview.bounds.width, 1024);
        assert_eq!(config.webview.bounds.height, 600);
        assert_eq!(config.dispatch.thread_name, "native-dispatch");
        assert!(config.navigation.allowed_prefixes.is_empty());
    }
}
