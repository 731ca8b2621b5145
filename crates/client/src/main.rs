//! Demo driver: runs a list session against a seeded in-memory store.

use std::sync::Arc;

use chrono::Utc;

use shopventory_auth::StaticIdentityProvider;
use shopventory_client::{ClientConfig, ListItemClient, ListSession, ListViewState};
use shopventory_core::{ListId, UserId};
use shopventory_infra::{Fields, InMemoryDocumentStore, StoreLayout};
use shopventory_lists::{ItemRecord, NewItem, Quantity};

fn seed(store: &InMemoryDocumentStore, layout: &StoreLayout, config: &ClientConfig, user: &UserId) -> anyhow::Result<()> {
    let catalog = layout.items(user, &config.catalog_list_id)?;
    for (id, name, category) in [
        ("milk", "Milk", "Dairy"),
        ("bread", "Bread", "Bakery"),
        ("apples", "Apples", "Produce"),
    ] {
        let entry = NewItem {
            name: name.to_string(),
            category: category.to_string(),
            quantity: Quantity::ZERO,
            created_at: Utc::now(),
        };
        store.insert(&catalog.doc(id)?, ItemRecord::from(&entry).to_fields())?;
    }

    let mut list = Fields::new();
    list.insert("name".to_string(), "Weekly shop".into());
    store.insert(&layout.list(user, &ListId::parse("weekly")?)?, list)?;
    Ok(())
}

fn log_state(stage: &str, state: &ListViewState) {
    let items: Vec<String> = state
        .items()
        .iter()
        .map(|item| format!("{} x{}", item.name(), item.quantity()))
        .collect();
    tracing::info!(
        stage,
        list = state.list_name().unwrap_or(state.list_id().as_str()),
        catalog = state.catalog().len(),
        items = ?items,
        "list state"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopventory_observability::init();

    let config = ClientConfig::from_env();
    let user = UserId::parse(std::env::var("SHOPVENTORY_DEMO_USER").unwrap_or_else(|_| "demo".to_string()))?;

    let store = Arc::new(InMemoryDocumentStore::new());
    let client = Arc::new(ListItemClient::new(store.clone(), &config));
    seed(&store, client.layout(), &config, &user)?;

    let identity = StaticIdentityProvider::signed_in(user);
    let mut session = ListSession::open(
        client,
        identity,
        ListId::parse("weekly")?,
        config.default_add_quantity,
    );
    session.settle().await;
    log_state("opened", session.state());

    let Some(first) = session.state().catalog().first().map(|t| t.id_typed().clone()) else {
        anyhow::bail!("catalog is empty");
    };
    session.select_template(Some(first));
    session.set_quantity_input("2")?;
    let added = session.add_item().await?;
    log_state("added", session.state());

    session.change_quantity(added.id_typed(), 1).await?;
    session.change_quantity(added.id_typed(), -5).await?;
    log_state("adjusted", session.state());

    session.delete_item(added.id_typed()).await?;
    log_state("deleted", session.state());

    for notice in session.take_notices() {
        tracing::warn!(op = notice.op.as_str(), message = %notice.message, "notice");
    }
    session.close();
    Ok(())
}
