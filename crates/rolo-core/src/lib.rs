//! Core types and trait definitions for the Rolo contacts browser.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! defines the contact record in its three shapes (wire, storage,
//! presentation), the mappings between them, and the two gateway traits the
//! synchronisation layer mediates between.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod live;
pub mod mapping;
pub mod remote;
pub mod store;
pub mod wire;

pub use contact::{Contact, ContactEntity, ContactId, country_flag};
pub use error::{RemoteFailure, Result};
pub use live::LiveQuery;
pub use remote::{PAGE_SIZE, RemoteSource};
pub use store::LocalStore;
