//! webbridge configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use webbridge_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BoundsConfig, BridgeConfig, DispatchConfig, LoggingConfig, NavigationConfig, WebViewConfig,
    CONFIG_SCHEMA_VERSION,
};

use std::path::Path;
use webbridge_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// An explicit path must exist. The default path is created with a
/// documented template on first use. The result is validated.
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BridgeConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
