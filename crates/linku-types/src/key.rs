use std::fmt;

use serde::{Deserialize, Serialize};

/// Which remote dataset a document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Vetted word list for one language
    Words,
    /// Draft/unvetted word list for one language
    Sandbox,
    /// Language catalog, shared by every language
    Languages,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Words => "words",
            DatasetKind::Sandbox => "sandbox",
            DatasetKind::Languages => "languages",
        }
    }
}

/// Identifier of one cached document.
///
/// Two keys are equal only when both the kind and the language code match
/// byte for byte; codes are never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalKey {
    kind: DatasetKind,
    language: String,
}

impl LogicalKey {
    pub fn words(language: impl Into<String>) -> Self {
        Self {
            kind: DatasetKind::Words,
            language: language.into(),
        }
    }

    pub fn sandbox(language: impl Into<String>) -> Self {
        Self {
            kind: DatasetKind::Sandbox,
            language: language.into(),
        }
    }

    /// The single catalog key. It carries no language code.
    pub fn catalog() -> Self {
        Self {
            kind: DatasetKind::Languages,
            language: String::new(),
        }
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_catalog(&self) -> bool {
        self.kind == DatasetKind::Languages
    }
}

impl fmt::Display for LogicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_catalog() {
            f.write_str(self.kind.as_str())
        } else {
            write!(f, "{}[{}]", self.kind.as_str(), self.language)
        }
    }
}
