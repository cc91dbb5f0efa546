//! Application Config
//!
//! Resolved once at startup. WASM has no process environment, so values
//! are baked in at build time and fall back to defaults.

use std::time::Duration;

use crate::debounce::DEFAULT_DELAY;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base address of the task API, without trailing slash
    pub api_url: String,
    /// Quiet period before a title edit is sent
    pub title_debounce: Duration,
    /// Records kept by the in-memory log sink
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

impl AppConfig {
    /// Read `TASKLIST_API_URL`, `TASKLIST_DEBOUNCE_MS`, `TASKLIST_LOG_CAPACITY`
    /// as set when the crate was compiled
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("TASKLIST_API_URL"),
            option_env!("TASKLIST_DEBOUNCE_MS"),
            option_env!("TASKLIST_LOG_CAPACITY"),
        )
    }

    pub fn from_values(api_url: Option<&str>, debounce_ms: Option<&str>, log_capacity: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        let title_debounce = debounce_ms
            .and_then(|ms| ms.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DELAY);
        let log_capacity = log_capacity
            .and_then(|n| n.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_LOG_CAPACITY);

        Self {
            api_url,
            title_debounce,
            log_capacity,
        }
    }
}
