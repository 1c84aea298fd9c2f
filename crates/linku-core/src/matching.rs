//! Word and prefix matching over a single word-list document.
//!
//! Keys are compared after one `to_lowercase` on both sides and nothing else:
//! no trimming, no Unicode normalization.

use linku_types::WordEntry;
use serde_json::{Map, Value};

/// Find `word` in `words`.
///
/// An exact key wins. Otherwise the key whose lowercase form equals
/// `word.to_lowercase()` is returned, but only if it is the only such key;
/// several case variants count as no match.
pub fn find_word(words: &Map<String, Value>, word: &str) -> Option<WordEntry> {
    if let Some(value) = words.get(word) {
        return Some(WordEntry::new(word, value.clone()));
    }

    let folded = word.to_lowercase();
    let mut candidates = words.iter().filter(|(key, _)| key.to_lowercase() == folded);

    match (candidates.next(), candidates.next()) {
        (Some((key, value)), None) => Some(WordEntry::new(key.as_str(), value.clone())),
        _ => None,
    }
}

/// Every entry whose lowercase key starts with `prefix.to_lowercase()`,
/// in document order.
pub fn collect_prefix(words: &Map<String, Value>, prefix: &str) -> Map<String, Value> {
    let folded = prefix.to_lowercase();
    words
        .iter()
        .filter(|(key, _)| key.to_lowercase().starts_with(&folded))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// View a document as a word list. Documents that are not objects hold no words.
pub fn as_word_list(document: &Value) -> Option<&Map<String, Value>> {
    document.as_object()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn words(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_exact_match_beats_case_variants() {
        let doc = words(json!({
            "Pona": { "word": "Pona" },
            "pona": { "word": "pona" },
        }));

        let entry = find_word(&doc, "pona").unwrap();
        assert_eq!(entry.key, "pona");
        assert_eq!(entry.value["word"], "pona");
    }

    #[test]
    fn test_single_case_variant_matches() {
        let doc = words(json!({ "Pingo": { "word": "Pingo" }, "pona": {} }));

        let entry = find_word(&doc, "pingo").unwrap();
        assert_eq!(entry.key, "Pingo");

        let entry = find_word(&doc, "PINGO").unwrap();
        assert_eq!(entry.key, "Pingo");
    }

    #[test]
    fn test_ambiguous_case_variants_are_not_found() {
        let doc = words(json!({ "Pona": {}, "PONA": {} }));
        assert_eq!(find_word(&doc, "pona"), None);
    }

    #[test]
    fn test_no_trimming() {
        let doc = words(json!({ "pona": {} }));
        assert_eq!(find_word(&doc, " pona"), None);
        assert_eq!(find_word(&doc, "pona "), None);
    }

    #[test]
    fn test_empty_document() {
        let doc = Map::new();
        assert_eq!(find_word(&doc, "pona"), None);
        assert!(collect_prefix(&doc, "").is_empty());
    }

    #[test]
    fn test_prefix_is_case_insensitive_and_ordered() {
        let doc = words(json!({
            "pona": {},
            "Pali": {},
            "moku": {},
            "pakala": {},
        }));

        let hits = collect_prefix(&doc, "PA");
        let keys: Vec<&str> = hits.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Pali", "pakala"]);
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let doc = words(json!({ "a": {}, "B": {}, "c": {} }));
        let hits = collect_prefix(&doc, "");
        assert_eq!(hits.len(), 3);
        let keys: Vec<&str> = hits.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "B", "c"]);
    }

    #[test]
    fn test_as_word_list() {
        assert!(as_word_list(&json!({})).is_some());
        assert!(as_word_list(&json!([])).is_none());
    }
}
