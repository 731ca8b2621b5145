//! View state reconciler for one list screen.
//!
//! A session owns its [`ListViewState`] and mutates it from a single logical
//! thread of control (`&mut self`). The three initial fetches run as tasks in
//! a [`JoinSet`] owned by the session and report back over a channel; closing
//! or dropping the session, or switching to another list, aborts them. Results
//! that arrive for a superseded list are discarded.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

use shopventory_auth::{Identity, IdentityProvider};
use shopventory_core::{ItemId, ListId, TemplateId};
use shopventory_infra::DocumentStore;
use shopventory_lists::{Item, Quantity};

use crate::{ClientError, ListItemClient, ListViewState, Notice, ViewAction};

/// Operations a session performs (used to attribute notices and logs).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOp {
    LoadItems,
    LoadCatalog,
    LoadListName,
    AddItem,
    ChangeQuantity,
    DeleteItem,
    EditInput,
}

impl SessionOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOp::LoadItems => "load_items",
            SessionOp::LoadCatalog => "load_catalog",
            SessionOp::LoadListName => "load_list_name",
            SessionOp::AddItem => "add_item",
            SessionOp::ChangeQuantity => "change_quantity",
            SessionOp::DeleteItem => "delete_item",
            SessionOp::EditInput => "edit_input",
        }
    }

    /// Whether a signed-out user is told about it. Only loading the items and
    /// adding one are blocking; every other operation is a quiet no-op.
    pub fn reports_missing_user(&self) -> bool {
        matches!(self, SessionOp::LoadItems | SessionOp::AddItem)
    }
}

fn log_join_failure(joined: Result<(), JoinError>) {
    if let Err(err) = joined {
        if !err.is_cancelled() {
            tracing::error!(error = %err, "fetch task failed");
        }
    }
}

/// Result of one initial fetch, tagged with the session generation that
/// started it.
#[derive(Debug)]
struct FetchOutcome {
    generation: u64,
    op: SessionOp,
    result: Result<ViewAction, ClientError>,
}

pub struct ListSession<S, P> {
    client: Arc<ListItemClient<S>>,
    identity: P,
    default_quantity: Quantity,
    state: ListViewState,
    generation: u64,
    tasks: JoinSet<()>,
    outcomes_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    notices: Vec<Notice>,
}

impl<S, P> ListSession<S, P>
where
    S: DocumentStore + 'static,
    P: IdentityProvider,
{
    /// Open a list screen and start its initial fetches.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        client: Arc<ListItemClient<S>>,
        identity: P,
        list_id: ListId,
        default_quantity: Quantity,
    ) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let mut session = Self {
            client,
            identity,
            default_quantity,
            state: ListViewState::new(list_id, default_quantity),
            generation: 0,
            tasks: JoinSet::new(),
            outcomes_tx,
            outcomes_rx,
            notices: Vec::new(),
        };
        session.start_fetches();
        session
    }

    pub fn state(&self) -> &ListViewState {
        &self.state
    }

    pub fn list_id(&self) -> &ListId {
        self.state.list_id()
    }

    /// Number of initial fetches not yet finished, as of the last
    /// [`poll_updates`](Self::poll_updates) or [`next_update`](Self::next_update).
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Drain the notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Switch to another list. Re-initializes only when the id changes.
    ///
    /// Returns `true` when a reload was started.
    pub fn navigate(&mut self, list_id: ListId) -> bool {
        if &list_id == self.state.list_id() {
            return false;
        }

        tracing::debug!(from = %self.state.list_id(), to = %list_id, "switching list");
        // Dropping the old set aborts its tasks.
        self.tasks = JoinSet::new();
        self.state = ListViewState::new(list_id, self.default_quantity);
        self.start_fetches();
        true
    }

    /// Abort outstanding fetches and tear the session down.
    pub fn close(mut self) {
        let aborted = self.tasks.len();
        self.tasks.abort_all();
        tracing::debug!(list_id = %self.state.list_id(), aborted, "session closed");
    }

    fn start_fetches(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let identity = self.identity.current();
        let list_id = self.state.list_id().clone();

        {
            let (client, identity, list_id) = (self.client.clone(), identity.clone(), list_id.clone());
            self.spawn_fetch(generation, SessionOp::LoadItems, async move {
                client
                    .fetch_items(&identity, &list_id)
                    .await
                    .map(ViewAction::ItemsLoaded)
            });
        }
        {
            let (client, identity) = (self.client.clone(), identity.clone());
            self.spawn_fetch(generation, SessionOp::LoadCatalog, async move {
                client
                    .fetch_available_items(&identity)
                    .await
                    .map(ViewAction::CatalogLoaded)
            });
        }
        {
            let client = self.client.clone();
            self.spawn_fetch(generation, SessionOp::LoadListName, async move {
                client
                    .fetch_list_name(&identity, &list_id)
                    .await
                    .map(ViewAction::ListNameLoaded)
            });
        }
    }

    fn spawn_fetch<F>(&mut self, generation: u64, op: SessionOp, fetch: F)
    where
        F: Future<Output = Result<ViewAction, ClientError>> + Send + 'static,
    {
        let tx = self.outcomes_tx.clone();
        self.tasks.spawn(async move {
            let result = fetch.await;
            if tx.send(FetchOutcome { generation, op, result }).is_err() {
                tracing::debug!(op = op.as_str(), "session gone; dropping fetch result");
            }
        });
    }

    fn handle_outcome(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(op = outcome.op.as_str(), "discarding result for a previous list");
            return false;
        }
        match outcome.result {
            Ok(action) => {
                self.dispatch(action);
                true
            }
            Err(err) => {
                self.report(outcome.op, &err);
                false
            }
        }
    }

    fn dispatch(&mut self, action: ViewAction) {
        self.state.reduce(action);
    }

    fn report(&mut self, op: SessionOp, err: &ClientError) {
        tracing::debug!(op = op.as_str(), error = %err, "session operation failed");
        if let Some(notice) = Notice::for_error(op, err) {
            tracing::info!(op = op.as_str(), message = %notice.message, "user notice raised");
            self.notices.push(notice);
        }
    }

    /// Apply every fetch result that has already arrived, without waiting.
    ///
    /// Returns the number of state updates applied.
    pub fn poll_updates(&mut self) -> usize {
        while let Some(joined) = self.tasks.try_join_next() {
            log_join_failure(joined);
        }

        let mut applied = 0;
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            if self.handle_outcome(outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next fetch result and apply it.
    ///
    /// Returns the operation that reported, or `None` once nothing is in
    /// flight and nothing is pending.
    pub async fn next_update(&mut self) -> Option<SessionOp> {
        loop {
            if let Ok(outcome) = self.outcomes_rx.try_recv() {
                let op = outcome.op;
                if outcome.generation == self.generation {
                    self.handle_outcome(outcome);
                    return Some(op);
                }
                continue;
            }
            if self.tasks.is_empty() {
                return None;
            }
            if let Some(joined) = self.tasks.join_next().await {
                log_join_failure(joined);
            }
        }
    }

    /// Wait until every in-flight fetch has reported and apply the results.
    pub async fn settle(&mut self) {
        while self.next_update().await.is_some() {}
    }

    /// Choose the catalog template for the add form.
    pub fn select_template(&mut self, selection: Option<TemplateId>) {
        self.dispatch(ViewAction::TemplateSelected(selection));
    }

    /// Set the add form's quantity from raw text input.
    ///
    /// Accepts a non-negative integer (surrounding whitespace ignored). On
    /// failure the previous quantity is kept and a notice is raised.
    pub fn set_quantity_input(&mut self, raw: &str) -> Result<Quantity, ClientError> {
        match raw.trim().parse::<u32>() {
            Ok(value) => {
                let quantity = Quantity::new(value);
                self.dispatch(ViewAction::QuantityInputChanged(quantity));
                Ok(quantity)
            }
            Err(_) => {
                let err = ClientError::InvalidQuantity(raw.to_string());
                self.report(SessionOp::EditInput, &err);
                Err(err)
            }
        }
    }

    fn current_identity(&self) -> Identity {
        self.identity.current()
    }

    /// Add the selected template with the entered quantity.
    ///
    /// On success the item is appended locally and the form is reset.
    pub async fn add_item(&mut self) -> Result<Item, ClientError> {
        let identity = self.current_identity();
        let result = self
            .client
            .add_item(
                &identity,
                self.state.list_id(),
                self.state.selected_template(),
                self.state.catalog(),
                self.state.quantity_input(),
                Utc::now(),
            )
            .await;

        match result {
            Ok(item) => {
                self.dispatch(ViewAction::ItemAdded(item.clone()));
                Ok(item)
            }
            Err(err) => {
                self.report(SessionOp::AddItem, &err);
                Err(err)
            }
        }
    }

    /// Move an item's quantity by `delta`, clamped at zero.
    ///
    /// An item that is not in the local view is ignored without contacting the
    /// store (`Ok(None)`).
    pub async fn change_quantity(
        &mut self,
        item_id: &ItemId,
        delta: i64,
    ) -> Result<Option<Item>, ClientError> {
        let Some(current) = self.state.item(item_id).cloned() else {
            tracing::debug!(item_id = %item_id, "quantity change for unknown item ignored");
            return Ok(None);
        };

        let identity = self.current_identity();
        let new_quantity = current.quantity().adjust(delta);
        let result = self
            .client
            .set_item_quantity(&identity, self.state.list_id(), &current, new_quantity)
            .await;

        match result {
            Ok(updated) => {
                self.dispatch(ViewAction::QuantityChanged {
                    item_id: item_id.clone(),
                    quantity: updated.quantity(),
                });
                Ok(Some(updated))
            }
            Err(err) => {
                self.report(SessionOp::ChangeQuantity, &err);
                Err(err)
            }
        }
    }

    /// Delete an item remotely, then drop it from the local view.
    pub async fn delete_item(&mut self, item_id: &ItemId) -> Result<(), ClientError> {
        let identity = self.current_identity();
        let result = self
            .client
            .delete_item(&identity, self.state.list_id(), item_id)
            .await;

        match result {
            Ok(()) => {
                self.dispatch(ViewAction::ItemRemoved(item_id.clone()));
                Ok(())
            }
            Err(err) => {
                self.report(SessionOp::DeleteItem, &err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopventory_auth::StaticIdentityProvider;
    use shopventory_core::UserId;
    use shopventory_infra::InMemoryDocumentStore;

    use crate::ClientConfig;

    fn session(identity: StaticIdentityProvider) -> ListSession<Arc<InMemoryDocumentStore>, StaticIdentityProvider> {
        let client = Arc::new(ListItemClient::new(
            Arc::new(InMemoryDocumentStore::new()),
            &ClientConfig::default(),
        ));
        ListSession::open(client, identity, ListId::parse("weekly").unwrap(), Quantity::ONE)
    }

    #[tokio::test]
    async fn open_starts_three_fetches() {
        let mut s = session(StaticIdentityProvider::signed_in(UserId::parse("u1").unwrap()));
        assert_eq!(s.in_flight(), 3);
        s.settle().await;
        assert_eq!(s.in_flight(), 0);
        assert_eq!(s.state().list_name(), Some("weekly"));
        assert!(s.take_notices().is_empty());
    }

    #[tokio::test]
    async fn navigate_to_same_list_is_noop() {
        let mut s = session(StaticIdentityProvider::signed_in(UserId::parse("u1").unwrap()));
        s.settle().await;
        assert!(!s.navigate(ListId::parse("weekly").unwrap()));
        assert_eq!(s.in_flight(), 0);
    }

    #[tokio::test]
    async fn invalid_quantity_input_keeps_previous_value() {
        let mut s = session(StaticIdentityProvider::signed_in(UserId::parse("u1").unwrap()));
        assert_eq!(s.set_quantity_input(" 4 "), Ok(Quantity::new(4)));
        assert!(matches!(s.set_quantity_input("four"), Err(ClientError::InvalidQuantity(_))));
        assert!(matches!(s.set_quantity_input("-1"), Err(ClientError::InvalidQuantity(_))));
        assert_eq!(s.state().quantity_input(), Quantity::new(4));

        let notices = s.take_notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.op == SessionOp::EditInput));
    }

    #[tokio::test]
    async fn anonymous_open_notifies_only_for_items() {
        let mut s = session(StaticIdentityProvider::anonymous());
        s.settle().await;

        let notices = s.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].op, SessionOp::LoadItems);
        assert_eq!(notices[0].message, "User not logged in!");
        assert_eq!(s.state().list_name(), None);
        assert!(s.state().catalog().is_empty());
    }
}
