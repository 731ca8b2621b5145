//! `shopventory-client`
//!
//! **Responsibility:** keep a list screen in step with the remote store.
//!
//! This crate provides:
//! - [`ListItemClient`]: item CRUD and list-name reads against a [`DocumentStore`]
//! - [`ListViewState`]: immutable view state driven by named [`ViewAction`]s
//! - [`ListSession`]: the reconciler that runs the initial fetches as cancelable
//!   tasks and mirrors successful writes into local state
//!
//! The store stays the authority: there is no offline cache, no optimistic
//! update and no conflict resolution.
//!
//! [`DocumentStore`]: shopventory_infra::DocumentStore

pub mod config;
pub mod error;
pub mod session;
pub mod store_client;
pub mod view_state;

pub use config::ClientConfig;
pub use error::{ClientError, Notice};
pub use session::{ListSession, SessionOp};
pub use store_client::ListItemClient;
pub use view_state::{ListViewState, ViewAction};
