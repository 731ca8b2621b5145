//! `shopventory-auth`: identity boundary.
//!
//! The rest of the workspace never reads a "current user" from ambient state:
//! an [`Identity`] is resolved from an [`IdentityProvider`] at the edge and
//! threaded explicitly into every store call.

pub mod identity;
pub mod provider;

pub use identity::{AuthError, Identity};
pub use provider::{IdentityProvider, StaticIdentityProvider};
