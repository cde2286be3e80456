//! In-memory fetcher and sink used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::ResolvedCharacter;
use crate::services::ResourceFetcher;
use crate::storage::CharacterSink;

#[derive(Clone)]
enum Reply {
    Json { body: Value, delay_ms: u64 },
    Missing,
    TransportError,
}

/// Canned responses keyed by URL. Unknown URLs behave like a 404.
#[derive(Default)]
pub struct MockFetcher {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, url: &str, body: Value) -> Self {
        self.with_delayed_json(url, body, 0)
    }

    pub fn with_delayed_json(mut self, url: &str, body: Value, delay_ms: u64) -> Self {
        self.replies
            .insert(url.to_string(), Reply::Json { body, delay_ms });
        self
    }

    pub fn with_missing(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), Reply::Missing);
        self
    }

    pub fn with_transport_error(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), Reply::TransportError);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Highest number of fetches that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    async fn reply(&self, url: &str) -> Result<Option<Value>> {
        match self.replies.get(url).cloned().unwrap_or(Reply::Missing) {
            Reply::Json { body, delay_ms } => {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Ok(Some(body))
            }
            Reply::Missing => Ok(None),
            Reply::TransportError => Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("connection refused: {url}"),
            ))),
        }
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<Value>> {
        self.calls.lock().unwrap().push(url.to_string());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);
        let reply = self.reply(url).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        reply
    }
}

/// Collects rows and rejects duplicate ids like a primary key would.
#[derive(Default)]
pub struct MemorySink {
    rows: Mutex<Vec<ResolvedCharacter>>,
    ids: Mutex<HashSet<i32>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that already holds rows with these ids.
    pub fn with_existing_ids(ids: impl IntoIterator<Item = i32>) -> Self {
        let sink = Self::default();
        sink.ids.lock().unwrap().extend(ids);
        sink
    }

    pub fn rows(&self) -> Vec<ResolvedCharacter> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl CharacterSink for MemorySink {
    async fn insert(&self, record: &ResolvedCharacter) -> Result<()> {
        if !self.ids.lock().unwrap().insert(record.id) {
            return Err(AppError::validation(format!(
                "duplicate key value violates unique constraint \"people_pkey\" (id={})",
                record.id
            )));
        }
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }
}
