//! Mapping between domain values and stored document fields.
//!
//! The store enforces no schema, so decoding is lenient: a missing or
//! ill-typed field falls back to its empty value instead of failing the whole
//! read. Encoding always writes the full shape.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

pub use shopventory_core::Fields;
use shopventory_core::{ItemId, ListId, TemplateId};

use crate::{AvailableItemTemplate, Item, ListMeta, NewItem, Quantity};

/// Stored field names.
pub mod field {
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category";
    pub const QUANTITY: &str = "quantity";
    pub const CREATED_AT: &str = "createdAt";
}

fn string_field(fields: &Fields, key: &str) -> String {
    fields
        .get(key)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Whole numbers are accepted in any JSON number form (`3`, `3.0`); anything
/// else reads as zero.
fn quantity_field(fields: &Fields, key: &str) -> Quantity {
    let Some(value) = fields.get(key) else {
        return Quantity::ZERO;
    };
    if let Some(signed) = value.as_i64() {
        return Quantity::clamped(signed);
    }
    if value.as_u64().is_some() {
        return Quantity::new(u32::MAX);
    }
    match value.as_f64() {
        // `as` saturates out-of-range floats.
        Some(float) if float.is_finite() && float.fract() == 0.0 => Quantity::clamped(float as i64),
        _ => Quantity::ZERO,
    }
}

fn timestamp_field(fields: &Fields, key: &str) -> Option<DateTime<Utc>> {
    let raw = fields.get(key)?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Stored shape of an item document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub name: String,
    pub category: String,
    pub quantity: Quantity,
    pub created_at: Option<DateTime<Utc>>,
}

impl ItemRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            name: string_field(fields, field::NAME),
            category: string_field(fields, field::CATEGORY),
            quantity: quantity_field(fields, field::QUANTITY),
            created_at: timestamp_field(fields, field::CREATED_AT),
        }
    }

    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(field::NAME.into(), JsonValue::from(self.name.clone()));
        fields.insert(field::CATEGORY.into(), JsonValue::from(self.category.clone()));
        fields.insert(field::QUANTITY.into(), quantity_value(self.quantity));
        if let Some(ts) = self.created_at {
            fields.insert(field::CREATED_AT.into(), JsonValue::from(ts.to_rfc3339()));
        }
        fields
    }

    pub fn into_item(self, id: ItemId) -> Item {
        Item::new(id, self.name, self.category, self.quantity, self.created_at)
    }
}

impl From<&NewItem> for ItemRecord {
    fn from(item: &NewItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            created_at: Some(item.created_at),
        }
    }
}

/// The partial update written when only the quantity changes.
pub fn quantity_patch(quantity: Quantity) -> Fields {
    let mut fields = Fields::new();
    fields.insert(field::QUANTITY.into(), quantity_value(quantity));
    fields
}

fn quantity_value(quantity: Quantity) -> JsonValue {
    JsonValue::from(quantity.get())
}

/// Stored shape of a catalog template document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    pub name: String,
    pub category: String,
}

impl TemplateRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            name: string_field(fields, field::NAME),
            category: string_field(fields, field::CATEGORY),
        }
    }

    pub fn into_template(self, id: TemplateId) -> AvailableItemTemplate {
        AvailableItemTemplate::new(id, self.name, self.category)
    }
}

/// Stored shape of a list document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecord {
    pub name: Option<String>,
}

impl ListRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            name: fields
                .get(field::NAME)
                .and_then(JsonValue::as_str)
                .map(str::to_string),
        }
    }

    pub fn into_meta(self, id: ListId) -> ListMeta {
        ListMeta::new(id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: JsonValue) -> Fields {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn item_record_reads_full_document() {
        let f = fields(json!({
            "name": "Milk",
            "category": "Dairy",
            "quantity": 2,
            "createdAt": "2024-05-01T10:00:00Z",
        }));
        let record = ItemRecord::from_fields(&f);
        assert_eq!(record.name, "Milk");
        assert_eq!(record.category, "Dairy");
        assert_eq!(record.quantity, Quantity::new(2));
        assert!(record.created_at.is_some());
    }

    #[test]
    fn item_record_falls_back_on_missing_or_bad_fields() {
        let f = fields(json!({ "name": 5, "quantity": "lots", "createdAt": "yesterday" }));
        let record = ItemRecord::from_fields(&f);
        assert_eq!(record.name, "");
        assert_eq!(record.category, "");
        assert_eq!(record.quantity, Quantity::ZERO);
        assert_eq!(record.created_at, None);
    }

    #[test]
    fn negative_stored_quantity_is_clamped() {
        let f = fields(json!({ "quantity": -4 }));
        assert_eq!(ItemRecord::from_fields(&f).quantity, Quantity::ZERO);
    }

    #[test]
    fn whole_float_quantity_is_kept() {
        assert_eq!(ItemRecord::from_fields(&fields(json!({ "quantity": 3.0 }))).quantity, Quantity::new(3));
        assert_eq!(ItemRecord::from_fields(&fields(json!({ "quantity": -2.0 }))).quantity, Quantity::ZERO);
        assert_eq!(ItemRecord::from_fields(&fields(json!({ "quantity": 2.5 }))).quantity, Quantity::ZERO);
        assert_eq!(ItemRecord::from_fields(&fields(json!({ "quantity": 1e12 }))).quantity, Quantity::new(u32::MAX));
    }

    #[test]
    fn new_item_encodes_every_field() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let new_item = NewItem {
            name: "Eggs".into(),
            category: "Dairy".into(),
            quantity: Quantity::new(12),
            created_at,
        };
        let encoded = ItemRecord::from(&new_item).to_fields();
        assert_eq!(encoded.get("name"), Some(&json!("Eggs")));
        assert_eq!(encoded.get("quantity"), Some(&json!(12)));
        assert_eq!(ItemRecord::from_fields(&encoded).created_at, Some(created_at));
    }

    #[test]
    fn quantity_patch_only_touches_quantity() {
        let patch = quantity_patch(Quantity::new(3));
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("quantity"), Some(&json!(3)));
    }

    #[test]
    fn list_record_keeps_missing_name_as_none() {
        let meta = ListRecord::from_fields(&Fields::new()).into_meta(ListId::parse("l1").unwrap());
        assert_eq!(meta.display_name(), "l1");
    }
}
