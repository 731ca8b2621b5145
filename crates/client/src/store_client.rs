//! List-item store client: CRUD of items under `(user, list)` plus list-name
//! reads, against a hierarchical document store.

use chrono::{DateTime, Utc};

use shopventory_auth::Identity;
use shopventory_core::{ItemId, ListId, TemplateId, entity::find_by_id};
use shopventory_infra::{Document, DocumentStore, StoreLayout};
use shopventory_lists::{
    AvailableItemTemplate, Item, ItemRecord, ListRecord, NewItem, Quantity, TemplateRecord,
    record::quantity_patch,
};

use crate::{ClientConfig, ClientError};

/// Thin client over a [`DocumentStore`].
///
/// Every call takes the caller's [`Identity`] explicitly; an anonymous identity
/// fails with [`ClientError::NotAuthenticated`] before any store access.
/// Failures are logged here and returned; callers decide what to show.
#[derive(Debug)]
pub struct ListItemClient<S> {
    store: S,
    layout: StoreLayout,
    catalog_list: ListId,
}

fn item_from(doc: Document) -> Result<Item, ClientError> {
    let id = ItemId::parse(doc.id())?;
    Ok(ItemRecord::from_fields(&doc.fields).into_item(id))
}

fn template_from(doc: Document) -> Result<AvailableItemTemplate, ClientError> {
    let id = TemplateId::parse(doc.id())?;
    Ok(TemplateRecord::from_fields(&doc.fields).into_template(id))
}

impl<S> ListItemClient<S>
where
    S: DocumentStore,
{
    pub fn new(store: S, config: &ClientConfig) -> Self {
        Self {
            store,
            layout: StoreLayout::new(config.store.clone()),
            catalog_list: config.catalog_list_id.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn catalog_list(&self) -> &ListId {
        &self.catalog_list
    }

    /// All items in the list, in store enumeration order.
    pub async fn fetch_items(
        &self,
        identity: &Identity,
        list_id: &ListId,
    ) -> Result<Vec<Item>, ClientError> {
        let user_id = identity.require()?;
        let result = async {
            let docs = self.store.list(&self.layout.items(user_id, list_id)?).await?;
            docs.into_iter().map(item_from).collect::<Result<Vec<_>, ClientError>>()
        }
        .await;

        match &result {
            Ok(items) => {
                tracing::debug!(user_id = %user_id, list_id = %list_id, count = items.len(), "fetched items")
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, list_id = %list_id, error = %e, "failed to fetch items")
            }
        }
        result
    }

    /// Catalog templates: the items of the configured catalog list.
    pub async fn fetch_available_items(
        &self,
        identity: &Identity,
    ) -> Result<Vec<AvailableItemTemplate>, ClientError> {
        let user_id = identity.require()?;
        let result = async {
            let collection = self.layout.items(user_id, &self.catalog_list)?;
            let docs = self.store.list(&collection).await?;
            docs.into_iter()
                .map(template_from)
                .collect::<Result<Vec<_>, ClientError>>()
        }
        .await;

        if let Err(e) = &result {
            tracing::error!(user_id = %user_id, error = %e, "failed to fetch catalog");
        }
        result
    }

    /// Display name of the list; the list id when the list document is missing
    /// or carries no name.
    pub async fn fetch_list_name(
        &self,
        identity: &Identity,
        list_id: &ListId,
    ) -> Result<String, ClientError> {
        let user_id = identity.require()?;
        let path = self.layout.list(user_id, list_id)?;

        let doc = self.store.get(&path).await.inspect_err(|e| {
            tracing::error!(user_id = %user_id, list_id = %list_id, error = %e, "failed to fetch list name")
        })?;

        Ok(match doc {
            Some(doc) => ListRecord::from_fields(&doc.fields)
                .into_meta(list_id.clone())
                .display_name(),
            None => {
                tracing::warn!(user_id = %user_id, list_id = %list_id, "list not found; using id as name");
                list_id.to_string()
            }
        })
    }

    /// Create an item from a catalog template.
    ///
    /// Validation happens before any store access, in this order: a selection
    /// is required, then a signed-in user, then the selection must exist in
    /// `catalog`.
    pub async fn add_item(
        &self,
        identity: &Identity,
        list_id: &ListId,
        selection: Option<&TemplateId>,
        catalog: &[AvailableItemTemplate],
        quantity: Quantity,
        created_at: DateTime<Utc>,
    ) -> Result<Item, ClientError> {
        let selection = selection.ok_or(ClientError::SelectionRequired)?;
        let user_id = identity.require()?;
        let template = find_by_id(catalog, selection)
            .ok_or_else(|| ClientError::TemplateNotFound(selection.clone()))?;

        let new_item = NewItem::from_template(template, quantity, created_at);
        let result = async {
            let collection = self.layout.items(user_id, list_id)?;
            let doc = self
                .store
                .create(&collection, ItemRecord::from(&new_item).to_fields())
                .await?;
            Ok::<_, ClientError>(ItemId::parse(doc.id())?)
        }
        .await;

        match result {
            Ok(item_id) => {
                tracing::info!(
                    user_id = %user_id,
                    list_id = %list_id,
                    item_id = %item_id,
                    template_id = %selection,
                    quantity = %quantity,
                    "item added"
                );
                Ok(new_item.into_item(item_id))
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, list_id = %list_id, error = %e, "failed to add item");
                Err(e)
            }
        }
    }

    /// Write `new_quantity` for `current` (only the quantity field is sent).
    ///
    /// The caller computes the final value; writing it twice is harmless.
    pub async fn set_item_quantity(
        &self,
        identity: &Identity,
        list_id: &ListId,
        current: &Item,
        new_quantity: Quantity,
    ) -> Result<Item, ClientError> {
        let user_id = identity.require()?;
        let item_id = current.id_typed();
        let result = async {
            let path = self.layout.item(user_id, list_id, item_id)?;
            self.store.update(&path, quantity_patch(new_quantity)).await?;
            Ok::<_, ClientError>(())
        }
        .await;

        match result {
            Ok(()) => {
                tracing::debug!(
                    user_id = %user_id,
                    list_id = %list_id,
                    item_id = %item_id,
                    quantity = %new_quantity,
                    "quantity updated"
                );
                Ok(current.with_quantity(new_quantity))
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    list_id = %list_id,
                    item_id = %item_id,
                    error = %e,
                    "failed to update quantity"
                );
                Err(e)
            }
        }
    }

    /// Delete an item. No existence check; deleting a missing item succeeds.
    pub async fn delete_item(
        &self,
        identity: &Identity,
        list_id: &ListId,
        item_id: &ItemId,
    ) -> Result<(), ClientError> {
        let user_id = identity.require()?;
        let result = async {
            let path = self.layout.item(user_id, list_id, item_id)?;
            self.store.delete(&path).await?;
            Ok::<_, ClientError>(())
        }
        .await;

        match &result {
            Ok(()) => {
                tracing::info!(user_id = %user_id, list_id = %list_id, item_id = %item_id, "item deleted")
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    list_id = %list_id,
                    item_id = %item_id,
                    error = %e,
                    "failed to delete item"
                )
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopventory_core::UserId;
    use shopventory_infra::{Fields, InMemoryDocumentStore, StoreError, StoreOp};
    use std::sync::Arc;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap_or_default()
    }

    fn user() -> UserId {
        UserId::parse("u1").unwrap()
    }

    fn signed_in() -> Identity {
        Identity::authenticated(user())
    }

    fn weekly() -> ListId {
        ListId::parse("weekly").unwrap()
    }

    fn client() -> ListItemClient<Arc<InMemoryDocumentStore>> {
        ListItemClient::new(Arc::new(InMemoryDocumentStore::new()), &ClientConfig::default())
    }

    fn milk() -> AvailableItemTemplate {
        AvailableItemTemplate::new(TemplateId::parse("milk").unwrap(), "Milk", "Dairy")
    }

    #[tokio::test]
    async fn fetch_items_of_empty_list_is_empty() {
        let client = client();
        assert!(client.fetch_items(&signed_in(), &weekly()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_available_items_reads_catalog_list() {
        let client = client();
        let path = client
            .layout()
            .items(&user(), &ListId::default_catalog())
            .and_then(|c| c.doc("bread"))
            .unwrap();
        client
            .store()
            .insert(&path, fields(json!({"name": "Bread", "category": "Bakery"})))
            .unwrap();

        let catalog = client.fetch_available_items(&signed_in()).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].label(), "Bread (Bakery)");
    }

    #[tokio::test]
    async fn list_name_falls_back_to_id_when_missing() {
        let client = client();
        let name = client.fetch_list_name(&signed_in(), &weekly()).await.unwrap();
        assert_eq!(name, "weekly");
    }

    #[tokio::test]
    async fn list_name_reads_stored_name() {
        let client = client();
        let path = client.layout().list(&user(), &weekly()).unwrap();
        client
            .store()
            .insert(&path, fields(json!({"name": "Weekly shop"})))
            .unwrap();
        let name = client.fetch_list_name(&signed_in(), &weekly()).await.unwrap();
        assert_eq!(name, "Weekly shop");
    }

    #[tokio::test]
    async fn add_item_requires_selection_before_anything_else() {
        let client = client();
        let err = client
            .add_item(&Identity::Anonymous, &weekly(), None, &[milk()], Quantity::ONE, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::SelectionRequired);
        assert_eq!(client.store().calls(StoreOp::Create), 0);
    }

    #[tokio::test]
    async fn add_item_rejects_unknown_template() {
        let client = client();
        let unknown = TemplateId::parse("caviar").unwrap();
        let err = client
            .add_item(&signed_in(), &weekly(), Some(&unknown), &[milk()], Quantity::ONE, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::TemplateNotFound(unknown));
        assert_eq!(client.store().calls(StoreOp::Create), 0);
    }

    #[tokio::test]
    async fn add_item_writes_document_with_template_fields() {
        let client = client();
        let template = milk();
        let item = client
            .add_item(
                &signed_in(),
                &weekly(),
                Some(template.id_typed()),
                &[template.clone()],
                Quantity::new(2),
                Utc::now(),
            )
            .await
            .unwrap();

        assert_eq!(item.name(), "Milk");
        assert_eq!(item.category(), "Dairy");
        assert_eq!(item.quantity(), Quantity::new(2));

        let stored = client.fetch_items(&signed_in(), &weekly()).await.unwrap();
        assert_eq!(stored, vec![item]);
    }

    #[tokio::test]
    async fn anonymous_identity_is_rejected_uniformly() {
        let client = client();
        let anon = Identity::Anonymous;
        let item = Item::new(ItemId::parse("i1").unwrap(), "x", "y", Quantity::ONE, None);

        assert_eq!(client.fetch_items(&anon, &weekly()).await, Err(ClientError::NotAuthenticated));
        assert_eq!(client.fetch_available_items(&anon).await, Err(ClientError::NotAuthenticated));
        assert_eq!(client.fetch_list_name(&anon, &weekly()).await, Err(ClientError::NotAuthenticated));
        assert_eq!(
            client.set_item_quantity(&anon, &weekly(), &item, Quantity::ZERO).await,
            Err(ClientError::NotAuthenticated)
        );
        assert_eq!(
            client.delete_item(&anon, &weekly(), item.id_typed()).await,
            Err(ClientError::NotAuthenticated)
        );
    }

    #[tokio::test]
    async fn set_quantity_writes_only_quantity() {
        let client = client();
        let template = milk();
        let item = client
            .add_item(&signed_in(), &weekly(), Some(template.id_typed()), &[template.clone()], Quantity::ONE, Utc::now())
            .await
            .unwrap();

        let updated = client
            .set_item_quantity(&signed_in(), &weekly(), &item, Quantity::new(5))
            .await
            .unwrap();
        assert_eq!(updated.quantity(), Quantity::new(5));
        assert_eq!(updated.name(), item.name());

        let path = client.layout().item(&user(), &weekly(), item.id_typed()).unwrap();
        let snapshot = client.store().snapshot(&path).unwrap();
        assert_eq!(snapshot.get("quantity"), Some(&json!(5)));
        assert_eq!(snapshot.get("name"), Some(&json!("Milk")));
    }

    #[tokio::test]
    async fn set_quantity_on_missing_remote_item_is_a_store_error() {
        let client = client();
        let ghost = Item::new(ItemId::parse("ghost").unwrap(), "x", "y", Quantity::ONE, None);
        let err = client
            .set_item_quantity(&signed_in(), &weekly(), &ghost, Quantity::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::RemoteStore(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_of_missing_item_succeeds() {
        let client = client();
        let ghost = ItemId::parse("ghost").unwrap();
        assert!(client.delete_item(&signed_in(), &weekly(), &ghost).await.is_ok());
    }

    #[tokio::test]
    async fn store_failures_surface_as_remote_errors() {
        let client = client();
        client
            .store()
            .fail_next(StoreOp::List, StoreError::PermissionDenied("rules".into()));
        let err = client.fetch_items(&signed_in(), &weekly()).await.unwrap_err();
        assert!(matches!(err, ClientError::RemoteStore(StoreError::PermissionDenied(_))));
    }
}
