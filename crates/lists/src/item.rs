use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopventory_core::{Entity, ItemId, ValueObject};

use crate::AvailableItemTemplate;

/// Non-negative item quantity.
///
/// The only way to move a quantity is [`Quantity::adjust`], which clamps at
/// zero, so a negative quantity is unrepresentable.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// `max(0, current + delta)`, saturating at `u32::MAX` on the high side.
    pub fn adjust(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }

    /// Clamp an arbitrary signed value into range (negative values become 0).
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(u32::MAX)) as u32)
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A quantity-tracked entry within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    category: String,
    quantity: Quantity,
    created_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: Quantity,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            quantity,
            created_at,
        }
    }

    pub fn id_typed(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Same item with a different quantity; identity and all other fields are
    /// carried over unchanged.
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An item about to be created (no id yet; the store assigns one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
}

impl NewItem {
    /// Copy name and category from a catalog template.
    pub fn from_template(
        template: &AvailableItemTemplate,
        quantity: Quantity,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: template.name().to_string(),
            category: template.category().to_string(),
            quantity,
            created_at,
        }
    }

    /// Attach the store-assigned identifier.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            created_at: Some(self.created_at),
        }
    }
}
