//! Infrastructure layer: the remote document store boundary and its layout.

pub mod config;
pub mod document_store;
pub mod layout;

pub use config::StoreConfig;
pub use document_store::{
    CollectionPath, Document, DocumentPath, DocumentStore, Fields, InMemoryDocumentStore,
    StoreError, StoreOp,
};
pub use layout::StoreLayout;
