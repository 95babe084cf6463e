//! The contact repository: one entry point for observing and paginating
//! contacts.

use std::future::Future;

use rolo_core::{
  Contact, ContactEntity, ContactId, LiveQuery, LocalStore, RemoteSource,
  mapping::to_contacts,
};
use tracing::{debug, info};

use crate::{Error, Result};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// What screens need from the data layer.
///
/// Streams are live views of the local cache and never fail; only
/// [`load_more_data`](Self::load_more_data) touches the network.
pub trait ContactRepository: Send + Sync + 'static {
  /// Every cached contact, ascending by identity.
  fn contacts_stream(&self) -> LiveQuery<Vec<Contact>>;

  /// The cached contact with identity `id`, or `None` if there is none.
  fn contact_stream(&self, id: ContactId) -> LiveQuery<Option<Contact>>;

  /// Fetch the page after the ones already cached and upsert it.
  fn load_more_data(&self) -> impl Future<Output = Result<()>> + Send + '_;
}

/// Next page to request when `count` contacts are cached.
///
/// Pages are 1-based, so an empty cache asks for page 1 and 25 cached
/// contacts with 20 per page ask for page 2.
pub fn page_for_count(count: usize, page_size: u32) -> u32 {
  let page_size = page_size.max(1) as usize;
  u32::try_from(count / page_size).map_or(u32::MAX, |full| full.saturating_add(1))
}

// ─── Implementation ──────────────────────────────────────────────────────────

/// [`ContactRepository`] over a local cache and a remote page source.
///
/// Holds no state of its own: the pagination cursor is derived from the cache
/// size on every call, so a restart resumes where the cache left off.
pub struct SyncRepository<L, R> {
  local:  L,
  remote: R,
}

impl<L, R> SyncRepository<L, R>
where
  L: LocalStore,
  R: RemoteSource,
{
  pub fn new(local: L, remote: R) -> Self { Self { local, remote } }

  pub fn local(&self) -> &L { &self.local }

  pub fn remote(&self) -> &R { &self.remote }
}

impl<L, R> ContactRepository for SyncRepository<L, R>
where
  L: LocalStore + 'static,
  R: RemoteSource + 'static,
{
  fn contacts_stream(&self) -> LiveQuery<Vec<Contact>> {
    self.local.observe_all().map(|rows| to_contacts(&rows))
  }

  fn contact_stream(&self, id: ContactId) -> LiveQuery<Option<Contact>> {
    self.local.observe_by_id(id).map(|row| row.map(Contact::from))
  }

  async fn load_more_data(&self) -> Result<()> {
    let cached = self.local.count().await.map_err(Error::store)?;
    let page = page_for_count(cached, self.remote.page_size());
    debug!(cached, page, "requesting next contacts page");

    let fetched: Vec<ContactEntity> = self
      .remote
      .load_page(page)
      .await?
      .into_iter()
      .map(ContactEntity::from)
      .collect();
    let fetched_len = fetched.len();

    self.local.upsert_all(fetched).await.map_err(Error::store)?;
    info!(page, fetched = fetched_len, "synced contacts page");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use rolo_core::LocalStore;
  use rolo_store_sqlite::SqliteStore;

  use super::*;
  use crate::testing::{FailingStore, FakeRemote, seeded_store};

  #[test]
  fn page_number_is_derived_from_count() {
    assert_eq!(page_for_count(0, 20), 1);
    assert_eq!(page_for_count(19, 20), 1);
    assert_eq!(page_for_count(20, 20), 2);
    assert_eq!(page_for_count(25, 20), 2);
    assert_eq!(page_for_count(40, 20), 3);
    assert_eq!(page_for_count(7, 0), 8);
  }

  #[tokio::test]
  async fn empty_cache_requests_page_one() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(0).await, remote.clone());

    repo.load_more_data().await.unwrap();

    assert_eq!(remote.requested(), [1]);
    assert_eq!(repo.local().count().await.unwrap(), 20);
  }

  #[tokio::test]
  async fn twenty_five_cached_requests_page_two() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(25).await, remote.clone());

    repo.load_more_data().await.unwrap();

    assert_eq!(remote.requested(), [2]);
    assert_eq!(repo.local().count().await.unwrap(), 25 + 20);
  }

  #[tokio::test]
  async fn successive_loads_walk_the_pages() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(0).await, remote.clone());

    for _ in 0..3 {
      repo.load_more_data().await.unwrap();
    }

    assert_eq!(remote.requested(), [1, 2, 3]);
    let names: Vec<_> = repo
      .contacts_stream()
      .current()
      .into_iter()
      .map(|c| c.first_name)
      .collect();
    assert_eq!(names.len(), 60);
    assert_eq!(names[0], "p1-0");
    assert_eq!(names[20], "p2-0");
    assert_eq!(names[59], "p3-19");
  }

  #[tokio::test]
  async fn remote_failure_leaves_the_cache_untouched() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(5).await, remote.clone());
    let before = repo.local().observe_all().current();
    remote.set_failing(true);

    let err = repo.load_more_data().await.unwrap_err();

    assert!(matches!(err, Error::Remote(_)));
    assert_eq!(remote.requested(), [1]);
    assert_eq!(repo.local().observe_all().current(), before);
    assert_eq!(repo.local().count().await.unwrap(), 5);
  }

  #[tokio::test]
  async fn store_failure_is_not_classified_as_remote() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(FailingStore::new().await, remote.clone());

    let err = repo.load_more_data().await.unwrap_err();

    assert!(matches!(err, Error::Store(_)));
    assert_eq!(remote.requested(), [1]);
  }

  #[tokio::test]
  async fn contacts_stream_re_emits_mapped_rows_after_sync() {
    let repo = SyncRepository::new(seeded_store(0).await, FakeRemote::new());
    let mut stream = repo.contacts_stream();
    assert!(stream.next().await.unwrap().is_empty());

    repo.load_more_data().await.unwrap();

    let contacts = stream.next().await.unwrap();
    assert_eq!(contacts.len(), 20);
    assert!(contacts.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(contacts[0].name(), "p1-0 Doe");
  }

  #[tokio::test]
  async fn contact_stream_for_absent_identity_emits_none() {
    let repo = SyncRepository::new(seeded_store(3).await, FakeRemote::new());

    let mut missing = repo.contact_stream(4242);
    assert_eq!(missing.next().await.unwrap(), None);

    let first_id = repo.contacts_stream().current()[0].id;
    let present = repo.contact_stream(first_id).current();
    assert_eq!(present.map(|c| c.id), Some(first_id));
  }

  #[tokio::test]
  async fn refetching_a_seeded_page_with_stable_ids_is_idempotent() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let repo = SyncRepository::new(store, FakeRemote::new());
    repo.load_more_data().await.unwrap();

    // Re-upserting what is already stored must not grow the table.
    let stored = repo.local().observe_all().current();
    repo.local().upsert_all(stored.clone()).await.unwrap();
    assert_eq!(repo.local().count().await.unwrap(), stored.len());
  }
}
