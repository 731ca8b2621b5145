use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopventory_core::UserId;

/// The caller's identity as seen by the store client.
///
/// `Anonymous` is the typed "not logged in" variant: every consumer has to
/// handle it, usually through [`Identity::require`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "user_id", rename_all = "snake_case")]
pub enum Identity {
    Authenticated(UserId),
    Anonymous,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("user not logged in")]
    NotAuthenticated,
}

impl Identity {
    pub fn authenticated(user_id: UserId) -> Self {
        Self::Authenticated(user_id)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Identity::Authenticated(id) => Some(id),
            Identity::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    /// Resolve the user id or fail with [`AuthError::NotAuthenticated`].
    pub fn require(&self) -> Result<&UserId, AuthError> {
        self.user_id().ok_or(AuthError::NotAuthenticated)
    }
}

impl From<Option<UserId>> for Identity {
    fn from(value: Option<UserId>) -> Self {
        match value {
            Some(id) => Identity::Authenticated(id),
            None => Identity::Anonymous,
        }
    }
}
