use std::sync::Arc;
use std::time::Duration;

use linku_types::LogicalKey;

/// Transport-level failure talking to the remote source
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Fetched body is not a usable document
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cache is closed")]
    Closed,

    #[error("Fetch task aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshErrorKind {
    Fetch,
    Decode,
    Timeout,
    Closed,
}

/// A refresh of `key` failed.
///
/// Cloneable so that every caller coalesced onto one fetch observes the
/// same failure.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to refresh {key}: {cause}")]
pub struct RefreshError {
    pub key: LogicalKey,
    #[source]
    pub cause: Arc<SourceError>,
}

impl RefreshError {
    pub fn new(key: LogicalKey, cause: SourceError) -> Self {
        Self {
            key,
            cause: Arc::new(cause),
        }
    }

    pub fn closed(key: LogicalKey) -> Self {
        Self::new(key, SourceError::Closed)
    }

    pub fn kind(&self) -> RefreshErrorKind {
        match self.cause.as_ref() {
            SourceError::Fetch(FetchError::Transport(e)) if e.is_timeout() => {
                RefreshErrorKind::Timeout
            }
            SourceError::Fetch(_) | SourceError::Aborted(_) => RefreshErrorKind::Fetch,
            SourceError::Decode(_) => RefreshErrorKind::Decode,
            SourceError::Timeout(_) => RefreshErrorKind::Timeout,
            SourceError::Closed => RefreshErrorKind::Closed,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is not a valid language code")]
    UnknownLanguage(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed language catalog: {0}")]
    Catalog(#[source] serde_json::Error),
}
