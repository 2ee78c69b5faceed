//! Hook installation configuration.

use serde::{Deserialize, Serialize};

/// Hook installation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Whether to install the human-readable progress hook.
    #[serde(default = "default_true")]
    pub progress: bool,
    /// Whether to install the structured tracing hook.
    #[serde(default = "default_true")]
    pub trace: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            progress: true,
            trace: true,
        }
    }
}

fn default_true() -> bool {
    true
}
