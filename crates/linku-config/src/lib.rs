use std::env;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::source::SourceConfig;

pub mod cache;
pub mod source;

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub cache: CacheConfig,
    /// Definition language for users without a stored preference
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Config {
    pub fn new() -> Self {
        let default_language =
            env::var("LINKU_DEFAULT_LANGUAGE").unwrap_or_else(|_| default_language());

        Config {
            source: SourceConfig::new(),
            cache: CacheConfig::new(),
            default_language,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            cache: CacheConfig::default(),
            default_language: default_language(),
        }
    }
}
