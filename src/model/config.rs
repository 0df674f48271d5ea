use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the store directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreOptions,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Behavior options for the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreOptions {
    /// When on, items marked done move to the separate completed list.
    /// When off, done items stay in place with the flag set.
    #[serde(default = "default_true")]
    pub track_completed_separately: bool,
    /// When on, selection is a set; when off, selecting an item replaces
    /// the previous selection.
    #[serde(default)]
    pub multi_select: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            track_completed_separately: true,
            multi_select: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex overrides for theme colors, e.g. `highlight = "#FB4196"`.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}
