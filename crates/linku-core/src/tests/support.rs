//! Scripted in-memory remote source for cache and resolver tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use linku_config::cache::CacheConfig;
use linku_types::LogicalKey;
use serde_json::Value;

use crate::error::{DecodeError, FetchError, SourceError};
use crate::source::RemoteSource;

pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

pub fn test_config() -> CacheConfig {
    CacheConfig {
        max_age_secs: DAY.as_secs(),
        fetch_timeout_secs: None,
        sandbox_fallback: true,
        bootstrap_on_open: false,
    }
}

#[derive(Default)]
pub struct ScriptedSource {
    documents: Mutex<HashMap<LogicalKey, Value>>,
    failing: Mutex<HashSet<LogicalKey>>,
    malformed: Mutex<HashSet<LogicalKey>>,
    panic_once: Mutex<HashSet<LogicalKey>>,
    delays: Mutex<HashMap<LogicalKey, Duration>>,
    calls: Mutex<HashMap<LogicalKey, usize>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, key: LogicalKey, document: Value) -> Self {
        self.set_document(key, document);
        self
    }

    pub fn with_delay(self, key: LogicalKey, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(key, delay);
        self
    }

    pub fn set_document(&self, key: LogicalKey, document: Value) {
        self.documents.lock().unwrap().insert(key, document);
    }

    pub fn set_failing(&self, key: &LogicalKey, failing: bool) {
        let mut set = self.failing.lock().unwrap();
        if failing {
            set.insert(key.clone());
        } else {
            set.remove(key);
        }
    }

    pub fn set_malformed(&self, key: &LogicalKey) {
        self.malformed.lock().unwrap().insert(key.clone());
    }

    /// The next fetch of `key` panics; later ones behave normally
    pub fn panic_next(&self, key: &LogicalKey) {
        self.panic_once.lock().unwrap().insert(key.clone());
    }

    pub fn calls(&self, key: &LogicalKey) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl RemoteSource for ScriptedSource {
    async fn fetch(&self, key: &LogicalKey) -> Result<Value, SourceError> {
        *self.calls.lock().unwrap().entry(key.clone()).or_default() += 1;

        let delay = self.delays.lock().unwrap().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.panic_once.lock().unwrap().remove(key) {
            panic!("{key} source blew up");
        }
        if self.failing.lock().unwrap().contains(key) {
            return Err(FetchError::Unavailable(format!("{key} is down")).into());
        }
        if self.malformed.lock().unwrap().contains(key) {
            return Err(DecodeError::NotAnObject { found: "array" }.into());
        }

        self.documents
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| {
                FetchError::Status {
                    url: key.to_string(),
                    status: 404,
                }
                .into()
            })
    }
}
