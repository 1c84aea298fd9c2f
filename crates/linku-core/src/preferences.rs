use std::collections::HashMap;

use async_trait::async_trait;
use linku_types::LanguageCatalog;
use tokio::sync::RwLock;

use crate::error::ValidationError;

pub type UserId = i64;

/// Language used for users who never picked one
pub const DEFAULT_USER_LANGUAGE: &str = "en";

/// Per-user display language storage, provided by the front end
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn language(&self, user: UserId) -> Option<String>;

    /// Insert or replace the user's language
    async fn upsert_language(&self, user: UserId, language: String);
}

/// Process-local store
#[derive(Default)]
pub struct MemoryPreferences {
    languages: RwLock<HashMap<UserId, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn language(&self, user: UserId) -> Option<String> {
        self.languages.read().await.get(&user).cloned()
    }

    async fn upsert_language(&self, user: UserId, language: String) {
        self.languages.write().await.insert(user, language);
    }
}

/// Language preference rules on top of a store
pub struct Preferences<S> {
    store: S,
    default_language: String,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self::with_default_language(store, DEFAULT_USER_LANGUAGE)
    }

    /// Users without a stored choice get `default_language`
    pub fn with_default_language(store: S, default_language: impl Into<String>) -> Self {
        Self {
            store,
            default_language: default_language.into(),
        }
    }

    pub async fn language_for(&self, user: UserId) -> String {
        self.store
            .language(user)
            .await
            .unwrap_or_else(|| self.default_language.clone())
    }

    /// Store `language` for `user` if the catalog knows it
    pub async fn choose_language(
        &self,
        user: UserId,
        language: &str,
        catalog: &LanguageCatalog,
    ) -> Result<(), ValidationError> {
        if !catalog.contains(language) {
            return Err(ValidationError::UnknownLanguage(language.to_string()));
        }

        self.store.upsert_language(user, language.to_string()).await;
        tracing::debug!("User {user} switched to {language}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog() -> LanguageCatalog {
        LanguageCatalog::from_document(&json!({
            "en": { "name_endonym": "English" },
            "de": { "name_endonym": "Deutsch" },
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_unset_language_defaults_to_english() {
        let prefs = Preferences::new(MemoryPreferences::new());
        assert_eq!(prefs.language_for(7).await, "en");
    }

    #[tokio::test]
    async fn test_configured_default_language() {
        let prefs = Preferences::with_default_language(MemoryPreferences::new(), "de");
        assert_eq!(prefs.language_for(7).await, "de");
    }

    #[tokio::test]
    async fn test_choose_language_upserts() {
        let prefs = Preferences::new(MemoryPreferences::new());
        let catalog = catalog();

        prefs.choose_language(7, "de", &catalog).await.unwrap();
        assert_eq!(prefs.language_for(7).await, "de");

        prefs.choose_language(7, "en", &catalog).await.unwrap();
        assert_eq!(prefs.language_for(7).await, "en");
        assert_eq!(prefs.language_for(8).await, "en");
    }

    #[tokio::test]
    async fn test_unknown_language_is_rejected() {
        let prefs = Preferences::new(MemoryPreferences::new());
        prefs.choose_language(7, "de", &catalog()).await.unwrap();

        let err = prefs.choose_language(7, "xx", &catalog()).await.unwrap_err();
        assert!(matches!(err, ValidationError::UnknownLanguage(code) if code == "xx"));
        assert_eq!(prefs.language_for(7).await, "de");
    }
}
