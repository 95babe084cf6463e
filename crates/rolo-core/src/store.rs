//! The `LocalStore` trait — the gateway to the on-device contact cache.
//!
//! Implemented by storage backends (e.g. `rolo-store-sqlite`). The
//! synchronisation layer depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  contact::{ContactEntity, ContactId},
  live::LiveQuery,
};

/// Abstraction over the local contact cache.
///
/// Reads are live: every committed mutation re-publishes the whole ordered
/// table to every open [`LiveQuery`]. Writes are batched and atomic from an
/// observer's point of view.
///
/// All async methods return `Send` futures so the trait can be used from
/// spawned tasks on a multi-threaded runtime.
pub trait LocalStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored contact, ascending by identity, re-emitted on each
  /// mutation.
  fn observe_all(&self) -> LiveQuery<Vec<ContactEntity>>;

  /// The contact with identity `id`, or `None`; re-emitted on each mutation.
  fn observe_by_id(&self, id: ContactId) -> LiveQuery<Option<ContactEntity>>;

  /// Number of stored contacts.
  fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Insert or replace `contacts` by identity, all-or-nothing.
  ///
  /// A record with an unset identity (`0`) is inserted and assigned a fresh
  /// id; any other identity replaces the row with that id, or inserts it
  /// under that id if absent.
  fn upsert_all(
    &self,
    contacts: Vec<ContactEntity>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove every stored contact.
  fn delete_all(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
