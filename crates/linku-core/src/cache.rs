use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared, try_join_all};
use linku_config::cache::CacheConfig;
use linku_types::LogicalKey;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{RefreshError, SourceError};
use crate::source::RemoteSource;

/// A cached document. Shared so every reader of one refresh sees the same instance.
pub type Document = Arc<Value>;

type PendingRefresh = Shared<BoxFuture<'static, Result<Document, RefreshError>>>;

/// One fetched document and when it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub document: Document,
    pub fetched_at: Instant,
}

impl CacheEntry {
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

#[derive(Default)]
struct SlotState {
    entry: Option<CacheEntry>,
    pending: Option<PendingRefresh>,
}

/// Per-key state. Each key has its own lock so a slow refresh of one
/// dataset never holds up another.
#[derive(Default)]
struct Slot {
    state: Mutex<SlotState>,
}

/// TTL-gated cache of remote lexical documents
pub struct LexicalCache {
    source: Arc<dyn RemoteSource>,
    max_age: Duration,
    fetch_timeout: Option<Duration>,
    slots: RwLock<HashMap<LogicalKey, Arc<Slot>>>,
    shutdown: CancellationToken,
}

impl LexicalCache {
    /// Create an empty cache; nothing is fetched until first read
    pub fn new(config: &CacheConfig, source: Arc<dyn RemoteSource>) -> Self {
        Self {
            source,
            max_age: config.max_age(),
            fetch_timeout: config.fetch_timeout(),
            slots: RwLock::new(HashMap::new()),
            shutdown: CancellationToken::new(),
        }
    }

    /// Create the cache and, when `bootstrap_on_open` is set, load the
    /// catalog and the default language's word list before returning.
    /// A bootstrap failure is returned to the caller.
    pub async fn open(
        config: &CacheConfig,
        default_language: &str,
        source: Arc<dyn RemoteSource>,
    ) -> Result<Self, RefreshError> {
        let cache = Self::new(config, source);

        if config.bootstrap_on_open {
            let keys = [LogicalKey::catalog(), LogicalKey::words(default_language)];
            try_join_all(keys.iter().map(|key| cache.get(key))).await?;
            tracing::info!("Lexical cache bootstrapped ({default_language})");
        }

        Ok(cache)
    }

    /// Cancel in-flight fetches and drop every cached document.
    /// Reads after this fail with a `Closed` error.
    pub async fn close(&self) {
        self.shutdown.cancel();
        self.slots.write().await.clear();
        tracing::info!("Lexical cache closed");
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Document for `key`, refreshed first when missing or older than `max_age`
    pub async fn get(&self, key: &LogicalKey) -> Result<Document, RefreshError> {
        if self.is_closed() {
            return Err(RefreshError::closed(key.clone()));
        }

        let slot = self.slot(key).await;
        let pending = {
            let mut state = slot.state.lock().await;
            if let Some(entry) = &state.entry {
                if entry.age() < self.max_age {
                    tracing::debug!("Cache hit for {key}");
                    return Ok(entry.document.clone());
                }
            }
            self.join_or_start(key, &slot, &mut state)
        };

        pending.await
    }

    /// Cached document for `key` and its age, without fetching
    pub async fn peek(&self, key: &LogicalKey) -> Option<(Document, Duration)> {
        let slot = self.slots.read().await.get(key).cloned()?;
        let state = slot.state.lock().await;
        state
            .entry
            .as_ref()
            .map(|entry| (entry.document.clone(), entry.age()))
    }

    /// Refresh `key` regardless of its age.
    /// Joins a refresh already in flight instead of starting another.
    pub async fn refresh(&self, key: &LogicalKey) -> Result<Document, RefreshError> {
        if self.is_closed() {
            return Err(RefreshError::closed(key.clone()));
        }

        let slot = self.slot(key).await;
        let pending = {
            let mut state = slot.state.lock().await;
            self.join_or_start(key, &slot, &mut state)
        };

        pending.await
    }

    async fn slot(&self, key: &LogicalKey) -> Arc<Slot> {
        if let Some(slot) = self.slots.read().await.get(key) {
            return slot.clone();
        }

        self.slots
            .write()
            .await
            .entry(key.clone())
            .or_default()
            .clone()
    }

    /// Must be called with the slot's lock held.
    fn join_or_start(
        &self,
        key: &LogicalKey,
        slot: &Arc<Slot>,
        state: &mut SlotState,
    ) -> PendingRefresh {
        if let Some(pending) = &state.pending {
            tracing::debug!("Joining refresh in flight for {key}");
            return pending.clone();
        }

        tracing::debug!("Refreshing {key}");

        // The fetch runs detached so that a waiter going away does not
        // cancel it for the others. It stores its own result.
        let task = tokio::spawn(run_refresh(
            self.source.clone(),
            key.clone(),
            slot.clone(),
            self.fetch_timeout,
            self.shutdown.clone(),
        ));

        let task_key = key.clone();
        let task_slot = slot.clone();
        let pending = async move {
            match task.await {
                Ok(result) => result,
                Err(e) => {
                    // The task died before it could release the slot
                    task_slot.state.lock().await.pending = None;
                    tracing::warn!("Refresh task for {task_key} died: {e}");
                    Err(RefreshError::new(task_key, SourceError::Aborted(e.to_string())))
                }
            }
        }
        .boxed()
        .shared();

        state.pending = Some(pending.clone());
        pending
    }
}

async fn run_refresh(
    source: Arc<dyn RemoteSource>,
    key: LogicalKey,
    slot: Arc<Slot>,
    fetch_timeout: Option<Duration>,
    shutdown: CancellationToken,
) -> Result<Document, RefreshError> {
    // A panicking source must still release the slot below
    let fetch = AssertUnwindSafe(fetch_with_deadline(source.as_ref(), &key, fetch_timeout))
        .catch_unwind();

    let outcome = tokio::select! {
        _ = shutdown.cancelled() => Err(SourceError::Closed),
        result = fetch => result.unwrap_or_else(|panic| Err(SourceError::Aborted(panic_message(&*panic)))),
    };

    let mut state = slot.state.lock().await;
    state.pending = None;

    match outcome {
        Ok(value) => {
            let document = Arc::new(value);
            state.entry = Some(CacheEntry {
                document: document.clone(),
                fetched_at: Instant::now(),
            });
            tracing::debug!("Stored fresh document for {key}");
            Ok(document)
        }
        Err(cause) => {
            // Previous entry stays servable through `peek`
            tracing::warn!("Refresh of {key} failed: {cause}");
            Err(RefreshError::new(key, cause))
        }
    }
}

async fn fetch_with_deadline(
    source: &dyn RemoteSource,
    key: &LogicalKey,
    deadline: Option<Duration>,
) -> Result<Value, SourceError> {
    match deadline {
        Some(limit) => tokio::time::timeout(limit, source.fetch(key))
            .await
            .unwrap_or(Err(SourceError::Timeout(limit))),
        None => source.fetch(key).await,
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("fetch panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("fetch panicked: {message}")
    } else {
        "fetch panicked".to_string()
    }
}
