//! Test doubles shared by the repository and reducer tests.

use std::{
  io,
  sync::{Arc, Mutex},
};

use rolo_core::{
  ContactEntity, ContactId, LiveQuery, LocalStore, RemoteFailure, RemoteSource,
  wire::{ContactDto, LocationDto, LoginDto, NameDto, PictureDto},
};
use rolo_store_sqlite::SqliteStore;
use tokio::sync::Semaphore;
use uuid::Uuid;

pub fn dto(first: &str) -> ContactDto {
  ContactDto {
    login:    LoginDto { uuid: Uuid::new_v4() },
    gender:   "male".into(),
    email:    format!("{first}Doe@test.com"),
    name:     NameDto {
      title: "Mr".into(),
      first: first.into(),
      last:  "Doe".into(),
    },
    phone:    "0123456789".into(),
    cell:     "0123456789".into(),
    location: LocationDto {
      city:    "Paris".into(),
      country: "France".into(),
    },
    picture:  PictureDto {
      medium: String::new(),
      large:  String::new(),
    },
    nat:      "FR".into(),
  }
}

/// An in-memory store pre-filled with `n` contacts named `local-<i>`.
pub async fn seeded_store(n: usize) -> SqliteStore {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let rows: Vec<ContactEntity> =
    (0..n).map(|i| ContactEntity::from(dto(&format!("local-{i}")))).collect();
  store.upsert_all(rows).await.unwrap();
  store
}

// ─── Remote ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RemoteState {
  requested: Vec<u32>,
  failing:   bool,
  gate:      Option<Arc<Semaphore>>,
}

/// A remote that serves `page_size` generated contacts per page, named
/// `p<page>-<i>`, and records every page it was asked for.
#[derive(Clone)]
pub struct FakeRemote {
  state:     Arc<Mutex<RemoteState>>,
  page_size: u32,
}

impl FakeRemote {
  pub fn new() -> Self {
    Self { state: Arc::default(), page_size: rolo_core::PAGE_SIZE }
  }

  pub fn requested(&self) -> Vec<u32> { self.state.lock().unwrap().requested.clone() }

  pub fn set_failing(&self, failing: bool) { self.state.lock().unwrap().failing = failing; }

  /// Hold every subsequent `load_page` until a permit is added to the
  /// returned semaphore.
  pub fn hold(&self) -> Arc<Semaphore> {
    let gate = Arc::new(Semaphore::new(0));
    self.state.lock().unwrap().gate = Some(Arc::clone(&gate));
    gate
  }
}

impl RemoteSource for FakeRemote {
  async fn load_page(&self, page: u32) -> Result<Vec<ContactDto>, RemoteFailure> {
    let (failing, gate) = {
      let mut state = self.state.lock().unwrap();
      state.requested.push(page);
      (state.failing, state.gate.clone())
    };

    if let Some(gate) = gate {
      let _permit = gate.acquire().await.unwrap();
    }

    if failing {
      return Err(RemoteFailure::Status(503));
    }
    Ok((0..self.page_size).map(|i| dto(&format!("p{page}-{i}"))).collect())
  }

  fn page_size(&self) -> u32 { self.page_size }
}

// ─── Local ───────────────────────────────────────────────────────────────────

/// A store whose reads work but whose writes always fail.
pub struct FailingStore {
  inner: SqliteStore,
}

impl FailingStore {
  pub async fn new() -> Self { Self { inner: seeded_store(0).await } }
}

impl LocalStore for FailingStore {
  type Error = io::Error;

  fn observe_all(&self) -> LiveQuery<Vec<ContactEntity>> { self.inner.observe_all() }

  fn observe_by_id(&self, id: ContactId) -> LiveQuery<Option<ContactEntity>> {
    self.inner.observe_by_id(id)
  }

  async fn count(&self) -> io::Result<usize> {
    self.inner.count().await.map_err(io::Error::other)
  }

  async fn upsert_all(&self, _contacts: Vec<ContactEntity>) -> io::Result<()> {
    Err(io::Error::other("disk full"))
  }

  async fn delete_all(&self) -> io::Result<()> { Err(io::Error::other("disk full")) }
}
