use std::sync::Arc;

use linku_types::{LanguageCatalog, LogicalKey, WordEntry};
use serde_json::{Map, Value};

use crate::cache::{Document, LexicalCache};
use crate::error::{LexiconError, RefreshError};
use crate::matching::{as_word_list, collect_prefix, find_word};

/// Answers word, prefix and catalog queries from the cache.
///
/// The vetted word list is always searched first. The draft list is only
/// consulted, when enabled, if the vetted list has nothing.
#[derive(Clone)]
pub struct Resolver {
    cache: Arc<LexicalCache>,
    sandbox_fallback: bool,
}

impl Resolver {
    pub fn new(cache: Arc<LexicalCache>, sandbox_fallback: bool) -> Self {
        Self {
            cache,
            sandbox_fallback,
        }
    }

    pub fn cache(&self) -> &Arc<LexicalCache> {
        &self.cache
    }

    /// `Ok(None)` means no match under the matching rules
    pub async fn lookup_word(
        &self,
        word: &str,
        language: &str,
    ) -> Result<Option<WordEntry>, RefreshError> {
        let primary = self.cache.get(&LogicalKey::words(language)).await?;
        if let Some(entry) = as_word_list(&primary).and_then(|words| find_word(words, word)) {
            return Ok(Some(entry));
        }

        if !self.sandbox_fallback {
            return Ok(None);
        }

        let draft = self.cache.get(&LogicalKey::sandbox(language)).await?;
        Ok(as_word_list(&draft).and_then(|words| find_word(words, word)))
    }

    /// Entries whose key starts with `prefix`, from the vetted list or, if
    /// that has none, from the draft list. Never a union of both.
    /// Order follows the document; sort if presentation order matters.
    pub async fn lookup_by_prefix(
        &self,
        prefix: &str,
        language: &str,
    ) -> Result<Map<String, Value>, RefreshError> {
        let primary = self.cache.get(&LogicalKey::words(language)).await?;
        let hits = prefix_hits(&primary, prefix);
        if !hits.is_empty() || !self.sandbox_fallback {
            return Ok(hits);
        }

        let draft = self.cache.get(&LogicalKey::sandbox(language)).await?;
        Ok(prefix_hits(&draft, prefix))
    }

    /// The cached language catalog document
    pub async fn languages(&self) -> Result<Document, RefreshError> {
        self.cache.get(&LogicalKey::catalog()).await
    }

    pub async fn catalog(&self) -> Result<LanguageCatalog, LexiconError> {
        let document = self.languages().await?;
        LanguageCatalog::from_document(&document).map_err(LexiconError::Catalog)
    }
}

fn prefix_hits(document: &Value, prefix: &str) -> Map<String, Value> {
    as_word_list(document)
        .map(|words| collect_prefix(words, prefix))
        .unwrap_or_default()
}
