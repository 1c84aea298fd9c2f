use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.linku.la/v1".to_string()
}

fn default_words_route() -> String {
    "words".to_string()
}

fn default_sandbox_route() -> String {
    "sandbox".to_string()
}

fn default_languages_route() -> String {
    "languages".to_string()
}

fn default_language_param() -> String {
    "lang".to_string()
}

/// Where the remote lexical datasets live
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Route of the vetted word list
    #[serde(default = "default_words_route")]
    pub words_route: String,
    /// Route of the draft word list
    #[serde(default = "default_sandbox_route")]
    pub sandbox_route: String,
    #[serde(default = "default_languages_route")]
    pub languages_route: String,
    /// Query parameter carrying the language code
    #[serde(default = "default_language_param")]
    pub language_param: String,
}

impl SourceConfig {
    pub fn new() -> Self {
        let base_url = env::var("LINKU_BASE_URL").unwrap_or_else(|_| default_base_url());

        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            words_route: default_words_route(),
            sandbox_route: default_sandbox_route(),
            languages_route: default_languages_route(),
            language_param: default_language_param(),
        }
    }
}
