//! Strongly-typed identifiers used across the domain.
//!
//! Every identifier doubles as a single document-path segment in the remote
//! store, so they are opaque strings rather than UUIDs: the store assigns item
//! ids, the identity provider assigns user ids, and list ids may be
//! human-chosen (`"default"`).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, IdDefect};

/// Identifier of an authenticated user (owner of all lists).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// Identifier of a list owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListId(String);

/// Identifier of an item inside a list (store-assigned, immutable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

/// Identifier of a catalog entry in the template list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateId(String);

/// Validate a raw identifier: non-empty, no surrounding whitespace, no path
/// separator.
pub fn validate_segment(kind: &'static str, raw: &str) -> Result<(), DomainError> {
    let defect = if raw.is_empty() {
        IdDefect::Empty
    } else if raw.trim() != raw {
        IdDefect::SurroundingWhitespace
    } else if raw.contains('/') {
        IdDefect::PathSeparator
    } else {
        return Ok(());
    };
    Err(DomainError::invalid_id(kind, raw, defect))
}

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Parse and validate an identifier.
            pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
                let raw = raw.into();
                validate_segment($name, &raw)?;
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl TryFrom<&str> for $t {
            type Error = DomainError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

impl ListId {
    /// Id of the per-user catalog list that holds item templates.
    pub const DEFAULT_CATALOG: &'static str = "default";

    pub fn default_catalog() -> Self {
        Self(Self::DEFAULT_CATALOG.to_string())
    }
}

impl_string_newtype!(UserId, "UserId");
impl_string_newtype!(ListId, "ListId");
impl_string_newtype!(ItemId, "ItemId");
impl_string_newtype!(TemplateId, "TemplateId");
