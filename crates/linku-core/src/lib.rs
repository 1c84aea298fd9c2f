pub mod cache;
pub mod error;
pub mod matching;
pub mod preferences;
pub mod resolver;
pub mod source;

pub use cache::{CacheEntry, Document, LexicalCache};
pub use error::{
    DecodeError, FetchError, LexiconError, RefreshError, RefreshErrorKind, SourceError,
    ValidationError,
};
pub use preferences::{MemoryPreferences, PreferenceStore, Preferences, UserId};
pub use resolver::Resolver;
pub use source::{HttpSource, RemoteSource};

#[cfg(test)]
mod tests;
