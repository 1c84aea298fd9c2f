use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_max_age_secs() -> u64 {
    24 * 60 * 60
}

fn default_fetch_timeout_secs() -> Option<u64> {
    Some(30)
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum age of a cached document before the next read refreshes it
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
    /// Deadline for a single remote fetch, `None` waits forever
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: Option<u64>,
    /// Consult the draft word list when the vetted one has no match
    #[serde(default = "default_enabled")]
    pub sandbox_fallback: bool,
    /// Fetch the catalog and default word list when the cache opens
    #[serde(default = "default_enabled")]
    pub bootstrap_on_open: bool,
}

impl CacheConfig {
    pub fn new() -> Self {
        let max_age_secs = env::var("LINKU_MAX_AGE_HOURS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(hours_to_secs)
            .unwrap_or_else(default_max_age_secs);

        // 0 disables the deadline
        let fetch_timeout_secs = match env::var("LINKU_FETCH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            Some(0) => None,
            Some(secs) => Some(secs),
            None => default_fetch_timeout_secs(),
        };

        let sandbox_fallback = env_flag("LINKU_SANDBOX_FALLBACK").unwrap_or_else(default_enabled);
        let bootstrap_on_open = env_flag("LINKU_BOOTSTRAP").unwrap_or_else(default_enabled);

        Self {
            max_age_secs,
            fetch_timeout_secs,
            sandbox_fallback,
            bootstrap_on_open,
        }
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_secs: default_max_age_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            sandbox_fallback: default_enabled(),
            bootstrap_on_open: default_enabled(),
        }
    }
}

fn hours_to_secs(hours: u64) -> u64 {
    hours.saturating_mul(60 * 60)
}

fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
