use linku_core::{LexiconError, MemoryPreferences, Preferences, RefreshError, Resolver, UserId};
use linku_types::WordEntry;
use serde_json::{Map, Value};

/// The command line acts as one user
pub const CLI_USER: UserId = 0;

/// Front-end view of the resolver: user language choice and query casing
pub struct Session {
    resolver: Resolver,
    preferences: Preferences<MemoryPreferences>,
}

impl Session {
    pub fn new(resolver: Resolver, default_language: &str) -> Self {
        Self {
            resolver,
            preferences: Preferences::with_default_language(
                MemoryPreferences::new(),
                default_language,
            ),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Language in effect for this run. A requested code must be in the
    /// language catalog.
    pub async fn select_language(&self, requested: Option<&str>) -> Result<String, LexiconError> {
        if let Some(code) = requested {
            let catalog = self.resolver.catalog().await?;
            self.preferences
                .choose_language(CLI_USER, code, &catalog)
                .await?;
        }

        Ok(self.preferences.language_for(CLI_USER).await)
    }

    /// Typed words are lowercased before lookup
    pub async fn lookup_word(
        &self,
        word: &str,
        language: &str,
    ) -> Result<Option<WordEntry>, RefreshError> {
        self.resolver
            .lookup_word(&word.to_lowercase(), language)
            .await
    }

    pub async fn lookup_by_prefix(
        &self,
        prefix: &str,
        language: &str,
    ) -> Result<Map<String, Value>, RefreshError> {
        self.resolver
            .lookup_by_prefix(&prefix.to_lowercase(), language)
            .await
    }
}
