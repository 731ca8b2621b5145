//! Domain error model.

use thiserror::Error;

/// Why an identifier was rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IdDefect {
    Empty,
    SurroundingWhitespace,
    PathSeparator,
}

impl core::fmt::Display for IdDefect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            IdDefect::Empty => "empty",
            IdDefect::SurroundingWhitespace => "surrounding whitespace",
            IdDefect::PathSeparator => "contains '/'",
        })
    }
}

/// Domain-level error.
///
/// Only deterministic failures of pure values live here. Remote store failures
/// belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier cannot address a document.
    #[error("invalid {kind} '{value}': {defect}")]
    InvalidId {
        kind: &'static str,
        value: String,
        defect: IdDefect,
    },
}

impl DomainError {
    pub fn invalid_id(kind: &'static str, value: impl Into<String>, defect: IdDefect) -> Self {
        Self::InvalidId {
            kind,
            value: value.into(),
            defect,
        }
    }
}
