use serde::{Deserialize, Serialize};

use shopventory_core::{Entity, TemplateId};

/// Read-only catalog entry used as the source when adding an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableItemTemplate {
    id: TemplateId,
    name: String,
    category: String,
}

impl AvailableItemTemplate {
    pub fn new(id: TemplateId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
        }
    }

    pub fn id_typed(&self) -> &TemplateId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Selector label, e.g. `Milk (Dairy)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}

impl Entity for AvailableItemTemplate {
    type Id = TemplateId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_shows_name_and_category() {
        let t = AvailableItemTemplate::new(TemplateId::parse("t").unwrap(), "Bread", "Bakery");
        assert_eq!(t.label(), "Bread (Bakery)");
    }
}
