use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::r#trait::{Document, DocumentStore, Fields, StoreError, StoreOp};
use super::{CollectionPath, DocumentPath};

/// In-memory document store.
///
/// Intended for tests/dev. Collections keep insertion order, which is also the
/// enumeration order of `list`. Supports one-shot fault injection and
/// per-collection latency so callers can exercise failure and interleaving.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<CollectionPath, Vec<(String, Fields)>>>,
    faults: Mutex<VecDeque<(StoreOp, StoreError)>>,
    latency: Mutex<HashMap<CollectionPath, Duration>>,
    calls: Mutex<HashMap<StoreOp, usize>>,
}

fn poisoned() -> StoreError {
    StoreError::Internal("lock poisoned".to_string())
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a document under an explicit id (insert or replace).
    ///
    /// Seeding helper; does not count as a store call and ignores faults.
    pub fn insert(&self, path: &DocumentPath, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let docs = collections.entry(path.parent()).or_default();
        match docs.iter_mut().find(|(id, _)| id == path.id()) {
            Some((_, existing)) => *existing = fields,
            None => docs.push((path.id().to_string(), fields)),
        }
        Ok(())
    }

    /// Current fields of a document, bypassing faults and latency.
    pub fn snapshot(&self, path: &DocumentPath) -> Option<Fields> {
        let collections = self.collections.read().ok()?;
        collections
            .get(&path.parent())?
            .iter()
            .find(|(id, _)| id == path.id())
            .map(|(_, fields)| fields.clone())
    }

    /// Number of documents directly inside a collection.
    pub fn count(&self, collection: &CollectionPath) -> usize {
        self.collections
            .read()
            .ok()
            .and_then(|c| c.get(collection).map(Vec::len))
            .unwrap_or(0)
    }

    /// Make the next `op` call fail with `error` (queued, one-shot).
    pub fn fail_next(&self, op: StoreOp, error: StoreError) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.push_back((op, error));
        }
    }

    /// Delay every call touching `collection` (or a document in it).
    pub fn set_latency(&self, collection: CollectionPath, delay: Duration) {
        if let Ok(mut latency) = self.latency.lock() {
            latency.insert(collection, delay);
        }
    }

    /// How many times `op` has been attempted (including injected failures).
    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls
            .lock()
            .ok()
            .and_then(|c| c.get(&op).copied())
            .unwrap_or(0)
    }

    /// Count the call, apply latency, then surface any queued fault.
    async fn enter(&self, op: StoreOp, collection: &CollectionPath) -> Result<(), StoreError> {
        {
            let mut calls = self.calls.lock().map_err(|_| poisoned())?;
            *calls.entry(op).or_default() += 1;
        }

        let delay = {
            let latency = self.latency.lock().map_err(|_| poisoned())?;
            latency.get(collection).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut faults = self.faults.lock().map_err(|_| poisoned())?;
        if let Some(pos) = faults.iter().position(|(o, _)| *o == op) {
            if let Some((_, err)) = faults.remove(pos) {
                tracing::debug!(op = op.as_str(), collection = %collection, "injected store fault");
                return Err(err);
            }
        }
        Ok(())
    }

    fn generate_id() -> String {
        Uuid::now_v7().simple().to_string()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, collection: &CollectionPath, fields: Fields) -> Result<Document, StoreError> {
        self.enter(StoreOp::Create, collection).await?;

        let path = collection.doc(Self::generate_id())?;
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        collections
            .entry(collection.clone())
            .or_default()
            .push((path.id().to_string(), fields.clone()));

        Ok(Document::new(path, fields))
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        let parent = path.parent();
        self.enter(StoreOp::Get, &parent).await?;

        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections.get(&parent).and_then(|docs| {
            docs.iter()
                .find(|(id, _)| id == path.id())
                .map(|(_, fields)| Document::new(path.clone(), fields.clone()))
        }))
    }

    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, StoreError> {
        self.enter(StoreOp::List, collection).await?;

        let collections = self.collections.read().map_err(|_| poisoned())?;
        let Some(docs) = collections.get(collection) else {
            return Ok(vec![]);
        };

        docs.iter()
            .map(|(id, fields)| Ok(Document::new(collection.doc(id)?, fields.clone())))
            .collect()
    }

    async fn update(&self, path: &DocumentPath, patch: Fields) -> Result<(), StoreError> {
        let parent = path.parent();
        self.enter(StoreOp::Update, &parent).await?;

        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let existing = collections
            .get_mut(&parent)
            .and_then(|docs| docs.iter_mut().find(|(id, _)| id == path.id()))
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;

        // Partial update: merge top-level fields.
        for (key, value) in patch {
            existing.1.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError> {
        let parent = path.parent();
        self.enter(StoreOp::Delete, &parent).await?;

        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        if let Some(docs) = collections.get_mut(&parent) {
            docs.retain(|(id, _)| id != path.id());
        }
        Ok(())
    }
}
