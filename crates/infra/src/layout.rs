//! Where list data lives in the document hierarchy.

use shopventory_core::{ItemId, ListId, UserId};

use crate::{CollectionPath, DocumentPath, StoreConfig, StoreError};

/// Builds user-scoped store paths from typed identifiers.
#[derive(Debug, Clone, Default)]
pub struct StoreLayout {
    config: StoreConfig,
}

impl StoreLayout {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// `users/{userId}/lists`
    pub fn lists(&self, user_id: &UserId) -> Result<CollectionPath, StoreError> {
        CollectionPath::root(&self.config.users_collection)?
            .doc(user_id)?
            .collection(&self.config.lists_collection)
    }

    /// `users/{userId}/lists/{listId}`
    pub fn list(&self, user_id: &UserId, list_id: &ListId) -> Result<DocumentPath, StoreError> {
        self.lists(user_id)?.doc(list_id)
    }

    /// `users/{userId}/lists/{listId}/items`
    pub fn items(&self, user_id: &UserId, list_id: &ListId) -> Result<CollectionPath, StoreError> {
        self.list(user_id, list_id)?
            .collection(&self.config.items_collection)
    }

    /// `users/{userId}/lists/{listId}/items/{itemId}`
    pub fn item(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        item_id: &ItemId,
    ) -> Result<DocumentPath, StoreError> {
        self.items(user_id, list_id)?.doc(item_id)
    }
}
