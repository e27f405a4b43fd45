//! Navigation policy.

use serde::{Deserialize, Serialize};

/// Which URLs an instance may navigate to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Allowed URL prefixes. Empty allows everything.
    pub allowed_prefixes: Vec<String>,
}

impl NavigationConfig {
    /// Check whether a URL passes the allowlist.
    pub fn is_allowed(&self, url: &str) -> bool {
        self.allowed_prefixes.is_empty()
            || self
                .allowed_prefixes
                .iter()
                .any(|prefix| url.starts_with(prefix.as_str()))
    }
}
