//! Dispatch thread configuration.

use serde::{Deserialize, Serialize};

/// Settings for the native dispatch thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// OS thread name, visible in debuggers and crash reports.
    pub thread_name: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            thread_name: "native-dispatch".into(),
        }
    }
}
