//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::components::data_table::{DEFAULT_SORT_COLUMN, PAGE_SIZES};
use crate::services::search::{DEFAULT_DEBOUNCE, DebounceMode, DebounceOptions};

#[derive(Clone, Debug, Deserialize)]
/// Settings for the console driver and the search effects.
pub struct AppConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub debounce_mode: DebounceMode,
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
    #[serde(default = "default_sort_column")]
    pub default_sort_column: String,
    pub accounts_path: String,
    pub translations_path: Option<String>,
    #[serde(default)]
    pub backend_latency_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

fn default_page_sizes() -> Vec<usize> {
    PAGE_SIZES.to_vec()
}

fn default_sort_column() -> String {
    DEFAULT_SORT_COLUMN.to_string()
}

impl AppConfig {
    pub fn debounce(&self) -> DebounceOptions {
        DebounceOptions {
            window: Duration::from_millis(self.debounce_ms),
            mode: self.debounce_mode,
        }
    }

    pub fn backend_latency(&self) -> Duration {
        Duration::from_millis(self.backend_latency_ms)
    }
}
