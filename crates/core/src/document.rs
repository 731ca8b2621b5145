//! Schemaless document contents.

/// Field map of a stored document, shared by the store boundary and the
/// record mapping.
pub type Fields = serde_json::Map<String, serde_json::Value>;
