use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display metadata of one definition language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name_endonym: String,
    #[serde(default)]
    pub name_toki_pona: Option<String>,
}

/// Language code -> metadata, in catalog order
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    languages: Vec<(String, LanguageInfo)>,
}

impl LanguageCatalog {
    pub fn from_document(document: &Value) -> Result<Self, serde_json::Error> {
        let map = serde_json::Map::<String, Value>::deserialize(document)?;

        let mut languages = Vec::with_capacity(map.len());
        for (code, value) in map {
            let info = LanguageInfo::deserialize(value)?;
            languages.push((code, info));
        }

        Ok(Self { languages })
    }

    pub fn get(&self, code: &str) -> Option<&LanguageInfo> {
        self.languages
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, info)| info)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageInfo)> {
        self.languages.iter().map(|(c, info)| (c.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
