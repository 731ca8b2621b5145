//! Hierarchical document store boundary.
//!
//! Collections of documents addressed by alternating path segments
//! (`collection/doc/collection/doc/...`). No schema is enforced: a document is
//! a JSON field map.

pub mod in_memory;
pub mod path;
pub mod r#trait;

pub use in_memory::InMemoryDocumentStore;
pub use path::{CollectionPath, DocumentPath};
pub use r#trait::{Document, DocumentStore, Fields, StoreError, StoreOp};
