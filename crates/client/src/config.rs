//! Client configuration.

use shopventory_core::ListId;
use shopventory_infra::StoreConfig;
use shopventory_lists::Quantity;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// List whose items serve as the add-item catalog.
    pub catalog_list_id: ListId,
    /// Quantity the add form starts with (and resets to after an add).
    pub default_add_quantity: Quantity,
    pub store: StoreConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_list_id: ListId::default_catalog(),
            default_add_quantity: Quantity::ONE,
            store: StoreConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Read `SHOPVENTORY_CATALOG_LIST` and `SHOPVENTORY_DEFAULT_QUANTITY`.
    ///
    /// Invalid values are logged and replaced by defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("SHOPVENTORY_CATALOG_LIST") {
            match ListId::parse(raw) {
                Ok(id) => config.catalog_list_id = id,
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring SHOPVENTORY_CATALOG_LIST")
                }
            }
        }

        if let Ok(raw) = std::env::var("SHOPVENTORY_DEFAULT_QUANTITY") {
            match raw.trim().parse::<u32>() {
                Ok(q) => config.default_add_quantity = Quantity::new(q),
                Err(err) => {
                    tracing::warn!(value = %raw, error = %err, "ignoring SHOPVENTORY_DEFAULT_QUANTITY")
                }
            }
        }

        config
    }

    pub fn with_catalog_list(mut self, list_id: ListId) -> Self {
        self.catalog_list_id = list_id;
        self
    }

    pub fn with_default_add_quantity(mut self, quantity: Quantity) -> Self {
        self.default_add_quantity = quantity;
        self
    }

    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }
}
