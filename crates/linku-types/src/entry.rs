use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Language used when a definition is missing in the requested one
pub const FALLBACK_DEFINITION_LANGUAGE: &str = "en";

/// A word-list hit: the key it was stored under and its raw document value
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    pub key: String,
    pub value: Value,
}

impl WordEntry {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Typed view of the entry for rendering
    pub fn details(&self) -> Result<WordDetails, serde_json::Error> {
        WordDetails::deserialize(&self.value)
    }
}

/// Attributes of a word entry that front ends display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordDetails {
    pub word: String,
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub usage_category: String,
    /// Description per language code
    #[serde(default)]
    pub def: BTreeMap<String, String>,
    pub etymology: Option<String>,
    pub source_language: Option<String>,
    pub ku_data: Option<Value>,
    pub commentary: Option<String>,
    pub see_also: Option<Value>,
}

impl WordDetails {
    /// Description in `language`, or the English one when that is missing
    pub fn definition(&self, language: &str) -> Option<&str> {
        self.def
            .get(language)
            .or_else(|| self.def.get(FALLBACK_DEFINITION_LANGUAGE))
            .map(String::as_str)
    }

    pub fn etymology_line(&self) -> Option<String> {
        if self.etymology.is_none() && self.source_language.is_none() {
            return None;
        }

        let mut line = String::from("←");
        if let Some(source) = &self.source_language {
            line.push(' ');
            line.push_str(source);
        }
        if let Some(etymology) = &self.etymology {
            line.push(' ');
            line.push_str(etymology);
        }
        Some(line)
    }

    /// Core books already list their related words elsewhere
    pub fn shows_see_also(&self) -> bool {
        !matches!(self.book.as_str(), "pu" | "ku suli")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pona() -> WordEntry {
        WordEntry::new(
            "pona",
            json!({
                "word": "pona",
                "book": "pu",
                "usage_category": "core",
                "def": { "en": "good, simple", "de": "gut, einfach" },
                "source_language": "Tok Pisin",
                "etymology": "bona",
                "see_also": "ike"
            }),
        )
    }

    #[test]
    fn test_definition_falls_back_to_english() {
        let details = pona().details().unwrap();
        assert_eq!(details.definition("de"), Some("gut, einfach"));
        assert_eq!(details.definition("fr"), Some("good, simple"));
    }

    #[test]
    fn test_definition_missing_everywhere() {
        let entry = WordEntry::new("kin", json!({ "word": "kin", "def": { "eo": "ankaŭ" } }));
        let details = entry.details().unwrap();
        assert_eq!(details.definition("de"), None);
        assert_eq!(details.definition("eo"), Some("ankaŭ"));
    }

    #[test]
    fn test_etymology_line() {
        let details = pona().details().unwrap();
        assert_eq!(details.etymology_line().as_deref(), Some("← Tok Pisin bona"));

        let bare = WordEntry::new("a", json!({ "word": "a" })).details().unwrap();
        assert_eq!(bare.etymology_line(), None);
    }

    #[test]
    fn test_see_also_hidden_for_core_books() {
        let details = pona().details().unwrap();
        assert!(!details.shows_see_also());

        let sandbox = WordEntry::new("kiki", json!({ "word": "kiki", "book": "none" }))
            .details()
            .unwrap();
        assert!(sandbox.shows_see_also());
    }

    #[test]
    fn test_details_require_word() {
        let entry = WordEntry::new("x", json!({ "book": "pu" }));
        assert!(entry.details().is_err());
    }
}
