use std::sync::{Arc, RwLock};

use shopventory_core::UserId;

use crate::Identity;

/// Source of the "current user" (an external authentication collaborator).
pub trait IdentityProvider: Send + Sync {
    /// Snapshot of the current identity. Called once per operation.
    fn current(&self) -> Identity;
}

impl<P> IdentityProvider for Arc<P>
where
    P: IdentityProvider + ?Sized,
{
    fn current(&self) -> Identity {
        (**self).current()
    }
}

/// In-process identity provider with explicit sign-in / sign-out.
///
/// Intended for tests, demos and hosts that resolve the user elsewhere and
/// just need to publish it.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    current: RwLock<Option<UserId>>,
}

impl StaticIdentityProvider {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user_id: UserId) -> Self {
        Self {
            current: RwLock::new(Some(user_id)),
        }
    }

    pub fn sign_in(&self, user_id: UserId) {
        match self.current.write() {
            Ok(mut guard) => {
                tracing::info!(user_id = %user_id, "user signed in");
                *guard = Some(user_id);
            }
            Err(_) => tracing::error!("identity lock poisoned; sign-in dropped"),
        }
    }

    pub fn sign_out(&self) {
        match self.current.write() {
            Ok(mut guard) => {
                if let Some(previous) = guard.take() {
                    tracing::info!(user_id = %previous, "user signed out");
                }
            }
            Err(_) => tracing::error!("identity lock poisoned; sign-out dropped"),
        }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current(&self) -> Identity {
        match self.current.read() {
            Ok(guard) => Identity::from(guard.clone()),
            // A poisoned lock means we cannot trust who is signed in.
            Err(_) => Identity::Anonymous,
        }
    }
}
