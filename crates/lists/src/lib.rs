//! Shopping-list domain module.
//!
//! Items, catalog templates and list metadata, plus the lenient mapping between
//! them and the field maps held by the document store. Pure logic: no IO, no
//! storage, no async.

pub mod item;
pub mod list;
pub mod record;
pub mod template;

pub use item::{Item, NewItem, Quantity};
pub use list::ListMeta;
pub use record::{Fields, ItemRecord, ListRecord, TemplateRecord};
pub use template::AvailableItemTemplate;
