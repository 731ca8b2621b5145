//! Store layout configuration.

/// Names of the collections that make up the per-user hierarchy
/// `{users}/{userId}/{lists}/{listId}/{items}/{itemId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub users_collection: String,
    pub lists_collection: String,
    pub items_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_collection: "users".to_string(),
            lists_collection: "lists".to_string(),
            items_collection: "items".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_users_collection(mut self, name: impl Into<String>) -> Self {
        self.users_collection = name.into();
        self
    }

    pub fn with_lists_collection(mut self, name: impl Into<String>) -> Self {
        self.lists_collection = name.into();
        self
    }

    pub fn with_items_collection(mut self, name: impl Into<String>) -> Self {
        self.items_collection = name.into();
        self
    }
}
