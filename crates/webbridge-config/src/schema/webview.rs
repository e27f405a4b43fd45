//! Embedded browser defaults applied to every new instance.

use serde::{Deserialize, Serialize};
use webbridge_common::Rect;

/// Initial bounds for a freshly created instance, in logical pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoundsConfig {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 800,
            height: 600,
        }
    }
}

impl From<BoundsConfig> for Rect {
    fn from(b: BoundsConfig) -> Self {
        Rect::new(b.x, b.y, b.width, b.height)
    }
}

/// Browser control settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewConfig {
    /// Custom user agent string. `None` keeps the platform default.
    pub user_agent: Option<String>,
    /// Whether the control background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools.
    pub devtools: bool,
    pub clipboard: bool,
    pub autoplay: bool,
    /// Page loaded into every new instance.
    pub home_url: String,
    pub bounds: BoundsConfig,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(format!("WebBridge/{}", env!("CARGO_PKG_VERSION"))),
            transparent: false,
            devtools: cfg!(debug_assertions),
            clipboard: true,
            autoplay: false,
            home_url: "about:blank".into(),
            bounds: BoundsConfig::default(),
        }
    }
}
