//! Local view state of one list screen.
//!
//! State is an immutable value; every change goes through [`ListViewState::apply`]
//! with a named [`ViewAction`]. Replaying the same actions from the same
//! initial state always yields the same result.

use serde::Serialize;

use shopventory_core::{
    ItemId, ListId, TemplateId,
    entity::{find_by_id, remove_by_id, replace_by_id},
};
use shopventory_lists::{AvailableItemTemplate, Item, Quantity};

/// Everything that can happen to the view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViewAction {
    /// The list's items were fetched (replaces the local items).
    ItemsLoaded(Vec<Item>),
    /// The catalog templates were fetched.
    CatalogLoaded(Vec<AvailableItemTemplate>),
    /// The list's display name was fetched.
    ListNameLoaded(String),
    /// An item was created remotely.
    ItemAdded(Item),
    /// An item's quantity was written remotely.
    QuantityChanged { item_id: ItemId, quantity: Quantity },
    /// An item was deleted remotely.
    ItemRemoved(ItemId),
    /// Add-form input: chosen template (or none).
    TemplateSelected(Option<TemplateId>),
    /// Add-form input: quantity to add.
    QuantityInputChanged(Quantity),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListViewState {
    list_id: ListId,
    items: Vec<Item>,
    catalog: Vec<AvailableItemTemplate>,
    list_name: Option<String>,
    selected_template: Option<TemplateId>,
    quantity_input: Quantity,
    default_quantity: Quantity,
}

impl ListViewState {
    /// Empty state for a freshly opened list.
    pub fn new(list_id: ListId, default_quantity: Quantity) -> Self {
        Self {
            list_id,
            items: Vec::new(),
            catalog: Vec::new(),
            list_name: None,
            selected_template: None,
            quantity_input: default_quantity,
            default_quantity,
        }
    }

    /// Fold a sequence of actions into a state.
    pub fn replay(self, actions: impl IntoIterator<Item = ViewAction>) -> Self {
        actions.into_iter().fold(self, Self::apply)
    }

    /// Produce the next state.
    #[must_use]
    pub fn apply(mut self, action: ViewAction) -> Self {
        self.reduce(action);
        self
    }

    /// In-place form of [`apply`](Self::apply), for an owner that holds the
    /// state behind `&mut`.
    pub(crate) fn reduce(&mut self, action: ViewAction) {
        match action {
            ViewAction::ItemsLoaded(items) => self.items = items,
            ViewAction::CatalogLoaded(catalog) => self.catalog = catalog,
            ViewAction::ListNameLoaded(name) => self.list_name = Some(name),
            ViewAction::ItemAdded(item) => {
                self.items.push(item);
                self.selected_template = None;
                self.quantity_input = self.default_quantity;
            }
            ViewAction::QuantityChanged { item_id, quantity } => {
                if let Some(updated) = find_by_id(&self.items, &item_id).map(|i| i.with_quantity(quantity)) {
                    replace_by_id(&mut self.items, updated);
                }
            }
            ViewAction::ItemRemoved(item_id) => {
                remove_by_id(&mut self.items, &item_id);
            }
            ViewAction::TemplateSelected(selection) => self.selected_template = selection,
            ViewAction::QuantityInputChanged(quantity) => self.quantity_input = quantity,
        }
    }

    pub fn list_id(&self) -> &ListId {
        &self.list_id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&Item> {
        find_by_id(&self.items, item_id)
    }

    pub fn catalog(&self) -> &[AvailableItemTemplate] {
        &self.catalog
    }

    /// `None` until the name fetch has completed.
    pub fn list_name(&self) -> Option<&str> {
        self.list_name.as_deref()
    }

    pub fn selected_template(&self) -> Option<&TemplateId> {
        self.selected_template.as_ref()
    }

    pub fn quantity_input(&self) -> Quantity {
        self.quantity_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: &str, name: &str, qty: u32) -> Item {
        Item::new(ItemId::parse(id).unwrap(), name, "Misc", Quantity::new(qty), None)
    }

    fn template(id: &str, name: &str) -> AvailableItemTemplate {
        AvailableItemTemplate::new(TemplateId::parse(id).unwrap(), name, "Misc")
    }

    fn fresh() -> ListViewState {
        ListViewState::new(ListId::parse("weekly").unwrap(), Quantity::ONE)
    }

    fn loaded() -> ListViewState {
        fresh().replay([
            ViewAction::ItemsLoaded(vec![item("a", "Apples", 1), item("b", "Bread", 0), item("c", "Cheese", 2)]),
            ViewAction::CatalogLoaded(vec![template("t1", "Milk")]),
            ViewAction::ListNameLoaded("Weekly".into()),
        ])
    }

    #[test]
    fn fresh_state_has_default_inputs() {
        let state = fresh();
        assert!(state.items().is_empty());
        assert_eq!(state.list_name(), None);
        assert_eq!(state.selected_template(), None);
        assert_eq!(state.quantity_input(), Quantity::ONE);
    }

    #[test]
    fn item_added_appends_and_resets_inputs() {
        let state = loaded()
            .apply(ViewAction::TemplateSelected(Some(TemplateId::parse("t1").unwrap())))
            .apply(ViewAction::QuantityInputChanged(Quantity::new(6)))
            .apply(ViewAction::ItemAdded(item("d", "Milk", 6)));

        assert_eq!(state.items().len(), 4);
        assert_eq!(state.items()[3].name(), "Milk");
        assert_eq!(state.selected_template(), None);
        assert_eq!(state.quantity_input(), Quantity::ONE);
    }

    #[test]
    fn quantity_changed_replaces_in_place() {
        let before = loaded();
        let after = before.clone().apply(ViewAction::QuantityChanged {
            item_id: ItemId::parse("b").unwrap(),
            quantity: Quantity::new(9),
        });

        let ids: Vec<_> = after.items().iter().map(|i| i.id_typed().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(after.items()[1].quantity(), Quantity::new(9));
        assert_eq!(after.items()[1].name(), "Bread");
        assert_eq!(after.items()[0], before.items()[0]);
        assert_eq!(after.items()[2], before.items()[2]);
    }

    #[test]
    fn quantity_changed_for_unknown_item_is_noop() {
        let before = loaded();
        let after = before.clone().apply(ViewAction::QuantityChanged {
            item_id: ItemId::parse("zzz").unwrap(),
            quantity: Quantity::new(9),
        });
        assert_eq!(after, before);
    }

    #[test]
    fn item_removed_keeps_others_untouched() {
        let before = loaded();
        let after = before.clone().apply(ViewAction::ItemRemoved(ItemId::parse("b").unwrap()));
        assert_eq!(after.items(), &[before.items()[0].clone(), before.items()[2].clone()]);
    }

    #[test]
    fn in_place_reduce_matches_apply() {
        let actions = [
            ViewAction::TemplateSelected(Some(TemplateId::parse("t1").unwrap())),
            ViewAction::ItemAdded(item("d", "Milk", 2)),
            ViewAction::ItemRemoved(ItemId::parse("a").unwrap()),
        ];
        let mut in_place = loaded();
        for action in actions.clone() {
            in_place.reduce(action);
        }
        assert_eq!(in_place, loaded().replay(actions));
    }

    fn init_actions() -> Vec<ViewAction> {
        vec![
            ViewAction::ItemsLoaded(vec![item("a", "Apples", 3)]),
            ViewAction::CatalogLoaded(vec![template("t1", "Milk"), template("t2", "Eggs")]),
            ViewAction::ListNameLoaded("Weekly".into()),
        ]
    }

    proptest! {
        #[test]
        fn init_result_is_independent_of_arrival_order(order in Just(init_actions()).prop_shuffle()) {
            let expected = fresh().replay(init_actions());
            prop_assert_eq!(fresh().replay(order), expected);
        }
    }
}
