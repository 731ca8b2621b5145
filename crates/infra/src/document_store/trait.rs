use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use shopventory_core::Fields;

use super::{CollectionPath, DocumentPath};

/// A document read from (or just written to) the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: DocumentPath,
    pub fields: Fields,
}

impl Document {
    pub fn new(path: DocumentPath, fields: Fields) -> Self {
        Self { path, fields }
    }

    /// Store-assigned (or caller-chosen) document id.
    pub fn id(&self) -> &str {
        self.path.id()
    }
}

/// Kind of store operation (used for logging and fault injection).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Create,
    Get,
    List,
    Update,
    Delete,
}

impl StoreOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOp::Create => "create",
            StoreOp::Get => "get",
            StoreOp::List => "list",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
        }
    }
}

/// Remote store failure.
///
/// These are **infrastructure errors** (transport, permissions, addressing).
/// Callers treat them uniformly as "the remote call failed".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("internal store error: {0}")]
    Internal(String),
}

/// Hierarchical document database.
///
/// ## Semantics
///
/// - `create` stores the fields under a **store-generated** id in the given
///   collection and returns the written document.
/// - `get` returns `None` for a missing document (not an error).
/// - `list` returns every document directly inside the collection, in the
///   store's enumeration order; an unknown collection is simply empty.
/// - `update` merges the given fields into an existing document and fails with
///   [`StoreError::NotFound`] when the document does not exist.
/// - `delete` is unconditional: deleting a missing document succeeds.
///
/// No batching, transactions or optimistic concurrency.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, collection: &CollectionPath, fields: Fields) -> Result<Document, StoreError>;

    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;

    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, StoreError>;

    async fn update(&self, path: &DocumentPath, patch: Fields) -> Result<(), StoreError>;

    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn create(&self, collection: &CollectionPath, fields: Fields) -> Result<Document, StoreError> {
        (**self).create(collection, fields).await
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        (**self).get(path).await
    }

    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, StoreError> {
        (**self).list(collection).await
    }

    async fn update(&self, path: &DocumentPath, patch: Fields) -> Result<(), StoreError> {
        (**self).update(path, patch).await
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError> {
        (**self).delete(path).await
    }
}
