//! Client errors and the user-visible notices derived from them.

use serde::Serialize;
use thiserror::Error;

use shopventory_auth::AuthError;
use shopventory_core::{DomainError, TemplateId};
use shopventory_infra::StoreError;

use crate::SessionOp;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("user not logged in")]
    NotAuthenticated,

    #[error("no catalog item selected")]
    SelectionRequired,

    #[error("catalog item {0} not found")]
    TemplateNotFound(TemplateId),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("remote store error: {0}")]
    RemoteStore(#[from] StoreError),
}

impl From<AuthError> for ClientError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::NotAuthenticated => ClientError::NotAuthenticated,
        }
    }
}

impl From<DomainError> for ClientError {
    /// Domain errors only arise here when the store hands back something we
    /// cannot address (e.g. an unusable document id).
    fn from(value: DomainError) -> Self {
        ClientError::RemoteStore(StoreError::Internal(value.to_string()))
    }
}

impl ClientError {
    /// Message shown to the end user, for errors that are ever shown at all.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ClientError::NotAuthenticated => Some("User not logged in!"),
            ClientError::SelectionRequired => Some("Please select an item."),
            ClientError::TemplateNotFound(_) => Some("Item not found."),
            ClientError::InvalidQuantity(_) => Some("Please enter a valid quantity."),
            ClientError::RemoteStore(_) => None,
        }
    }
}

/// A blocking, user-visible message raised by a session operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub op: SessionOp,
    pub message: String,
}

impl Notice {
    /// The single visibility policy for session errors.
    ///
    /// - Remote store failures are never shown (they are logged).
    /// - A missing user is shown for the item fetch and for adding an item;
    ///   the catalog and list-name fetches, quantity changes and deletes skip
    ///   quietly.
    /// - Input validation failures are always shown.
    pub fn for_error(op: SessionOp, error: &ClientError) -> Option<Notice> {
        let message = error.user_message()?;
        if matches!(error, ClientError::NotAuthenticated) && !op.reports_missing_user() {
            return None;
        }
        Some(Notice {
            op,
            message: message.to_string(),
        })
    }
}
