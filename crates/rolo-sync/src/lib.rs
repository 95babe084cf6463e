//! Synchronisation layer for Rolo.
//!
//! [`SyncRepository`] mediates between a [`LocalStore`](rolo_core::LocalStore)
//! cache and a paginated [`RemoteSource`](rolo_core::RemoteSource): screens
//! observe the cache, and "load more" pulls the next remote page into it. The
//! [`state`] reducers fold those streams plus transient UI signals into
//! immutable view-state snapshots.

pub mod error;
pub mod repository;
pub mod state;

pub use error::{Error, Result};
pub use repository::{ContactRepository, SyncRepository, page_for_count};

#[cfg(test)]
mod testing;
