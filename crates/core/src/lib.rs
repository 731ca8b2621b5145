//! `shopventory-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod document;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use document::Fields;
pub use entity::Entity;
pub use error::{DomainError, IdDefect};
pub use id::{ItemId, ListId, TemplateId, UserId};
pub use value_object::ValueObject;
