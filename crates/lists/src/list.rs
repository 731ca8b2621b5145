use serde::{Deserialize, Serialize};

use shopventory_core::ListId;

/// List metadata as shown in the view header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    pub id: ListId,
    pub name: Option<String>,
}

impl ListMeta {
    pub fn new(id: ListId, name: Option<String>) -> Self {
        Self { id, name }
    }

    /// The stored name, or the list id when the name is missing or empty.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.id.to_string(),
        }
    }
}
