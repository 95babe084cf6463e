//! State for the contact list screen.

use std::sync::Arc;

use rolo_core::{Contact, LiveQuery};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::UserMessage;
use crate::{ContactRepository, Error, Result};

/// Everything the list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactsUiState {
  pub is_loading:     bool,
  pub items:          Vec<Contact>,
  /// Set by a failed fetch and kept until a fetch succeeds.
  pub network_failed: bool,
  pub user_message:   Option<UserMessage>,
}

impl Default for ContactsUiState {
  fn default() -> Self {
    Self {
      is_loading:     true,
      items:          Vec::new(),
      network_failed: false,
      user_message:   None,
    }
  }
}

/// Re-entrancy guard for "last row became visible" signals.
#[derive(Debug, Default)]
struct ScrollTrigger {
  /// Outer `None` until the first signal arrives.
  last_position:  Option<Option<usize>>,
  reached_bottom: bool,
}

/// Folds the contacts stream and pagination outcomes into
/// [`ContactsUiState`].
///
/// Owned by the UI loop. Pagination runs as a spawned task and reports back
/// over a channel, so the reducer itself never blocks on the network; call
/// [`sync`](Self::sync) or [`updated`](Self::updated) to pick up results.
pub struct ContactsReducer<R> {
  repository: Arc<R>,
  contacts:   LiveQuery<Vec<Contact>>,
  loads_tx:   mpsc::UnboundedSender<Result<()>>,
  loads_rx:   mpsc::UnboundedReceiver<Result<()>>,
  observed:   bool,
  in_flight:  bool,
  scroll:     ScrollTrigger,
  state:      ContactsUiState,
}

impl<R: ContactRepository> ContactsReducer<R> {
  pub fn new(repository: Arc<R>) -> Self {
    let contacts = repository.contacts_stream();
    let (loads_tx, loads_rx) = mpsc::unbounded_channel();
    Self {
      repository,
      contacts,
      loads_tx,
      loads_rx,
      observed: false,
      in_flight: false,
      scroll: ScrollTrigger::default(),
      state: ContactsUiState::default(),
    }
  }

  pub fn state(&self) -> &ContactsUiState { &self.state }

  /// Start fetching the next page. Returns `false` if a fetch is already
  /// running, in which case nothing happens.
  ///
  /// Dropping the reducer does not abort a started fetch; its rows still land
  /// in the cache.
  pub fn load_more(&mut self) -> bool {
    if self.in_flight {
      debug!("load more ignored, a fetch is already running");
      return false;
    }
    self.in_flight = true;
    self.state.is_loading = true;

    let repository = Arc::clone(&self.repository);
    let loads_tx = self.loads_tx.clone();
    tokio::spawn(async move {
      let outcome = repository.load_more_data().await;
      // The reducer may be gone by now.
      let _ = loads_tx.send(outcome);
    });
    true
  }

  /// The UI has displayed the current message.
  pub fn message_shown(&mut self) { self.state.user_message = None; }

  /// Report the index of the last visible row (`None` for an empty list).
  /// Returns `true` if this started a fetch.
  pub fn on_last_visible(&mut self, position: Option<usize>) -> bool {
    if self.scroll.last_position == Some(position) {
      return false;
    }
    self.scroll.last_position = Some(position);

    let at_end = position.is_some_and(|p| p + 1 == self.state.items.len());
    if at_end && !self.state.is_loading && !self.scroll.reached_bottom {
      self.scroll.reached_bottom = true;
      return self.load_more();
    }
    self.scroll.reached_bottom = false;
    false
  }

  /// Apply every update that is already available without waiting.
  /// Returns whether the state changed.
  ///
  /// Remote failures are folded into the state; a local store failure is
  /// returned as an error.
  pub fn sync(&mut self) -> Result<bool> {
    let mut changed = false;
    while let Ok(outcome) = self.loads_rx.try_recv() {
      self.finish_load(outcome)?;
      changed = true;
    }
    if let Some(items) = self.contacts.poll() {
      self.apply_contacts(items);
      changed = true;
    }
    Ok(changed)
  }

  /// Wait for the next update, then drain whatever else is pending.
  ///
  /// Returns `false` only once the contacts stream has ended and no fetch is
  /// outstanding.
  pub async fn updated(&mut self) -> Result<bool> {
    tokio::select! {
      Some(outcome) = self.loads_rx.recv() => self.finish_load(outcome)?,
      Some(items) = self.contacts.next() => self.apply_contacts(items),
      else => return Ok(false),
    }
    self.sync()?;
    Ok(true)
  }

  fn apply_contacts(&mut self, items: Vec<Contact>) {
    let first = !self.observed;
    self.observed = true;

    let empty = items.is_empty();
    self.state.items = items;
    self.state.is_loading = self.in_flight;

    if first && empty {
      debug!("contact cache is empty, loading the first page");
      self.load_more();
    }
  }

  fn finish_load(&mut self, outcome: Result<()>) -> Result<()> {
    self.in_flight = false;
    self.state.is_loading = false;

    match outcome {
      Ok(()) => self.state.network_failed = false,
      Err(Error::Remote(e)) => {
        warn!(error = %e, "loading more contacts failed");
        self.state.network_failed = true;
        self.state.user_message = Some(UserMessage::LoadingContactsFailed);
      }
      Err(e) => return Err(e),
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use rolo_core::LocalStore;
  use tokio::time::timeout;

  use super::*;
  use crate::{
    SyncRepository,
    testing::{FailingStore, FakeRemote, seeded_store},
  };

  /// Pump updates until no fetch is running.
  async fn settle<R: ContactRepository>(reducer: &mut ContactsReducer<R>) {
    timeout(Duration::from_secs(5), async {
      loop {
        assert!(reducer.updated().await.unwrap());
        if !reducer.state().is_loading {
          break;
        }
      }
    })
    .await
    .expect("reducer did not settle");
  }

  #[tokio::test]
  async fn starts_out_loading_with_no_items() {
    let repo = SyncRepository::new(seeded_store(0).await, FakeRemote::new());
    let reducer = ContactsReducer::new(Arc::new(repo));

    assert_eq!(reducer.state(), &ContactsUiState::default());
    assert!(reducer.state().is_loading);
  }

  #[tokio::test]
  async fn empty_cache_loads_page_one_exactly_once() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(0).await, remote.clone());
    let mut reducer = ContactsReducer::new(Arc::new(repo));

    settle(&mut reducer).await;

    assert_eq!(remote.requested(), [1]);
    assert_eq!(reducer.state().items.len(), 20);
    assert!(!reducer.state().network_failed);
    assert_eq!(reducer.state().user_message, None);
  }

  #[tokio::test]
  async fn populated_cache_does_not_load() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(5).await, remote.clone());
    let mut reducer = ContactsReducer::new(Arc::new(repo));

    settle(&mut reducer).await;

    assert!(remote.requested().is_empty());
    assert_eq!(reducer.state().items.len(), 5);
    assert!(!reducer.sync().unwrap());
  }

  #[tokio::test]
  async fn remote_failure_is_sticky_until_the_next_success() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(3).await, remote.clone());
    let mut reducer = ContactsReducer::new(Arc::new(repo));
    remote.set_failing(true);

    assert!(reducer.load_more());
    settle(&mut reducer).await;

    let state = reducer.state();
    assert!(state.network_failed);
    assert_eq!(state.user_message, Some(UserMessage::LoadingContactsFailed));
    assert_eq!(state.items.len(), 3);

    reducer.message_shown();
    assert_eq!(reducer.state().user_message, None);
    assert!(reducer.state().network_failed);

    remote.set_failing(false);
    assert!(reducer.load_more());
    settle(&mut reducer).await;

    assert!(!reducer.state().network_failed);
    assert_eq!(reducer.state().items.len(), 23);
    assert_eq!(remote.requested(), [1, 1]);
  }

  #[tokio::test]
  async fn store_failure_propagates() {
    let repo = SyncRepository::new(FailingStore::new().await, FakeRemote::new());
    let mut reducer = ContactsReducer::new(Arc::new(repo));

    let err = timeout(Duration::from_secs(5), async {
      loop {
        if let Err(e) = reducer.updated().await {
          break e;
        }
      }
    })
    .await
    .expect("store error surfaced");

    assert!(matches!(err, Error::Store(_)));
    assert!(!reducer.state().is_loading);
    assert!(!reducer.state().network_failed);
  }

  #[tokio::test]
  async fn second_load_while_in_flight_is_ignored() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(2).await, remote.clone());
    let mut reducer = ContactsReducer::new(Arc::new(repo));
    let gate = remote.hold();

    assert!(reducer.load_more());
    assert!(!reducer.load_more());
    assert!(reducer.state().is_loading);

    gate.add_permits(1);
    settle(&mut reducer).await;

    assert_eq!(remote.requested(), [1]);
    assert_eq!(reducer.state().items.len(), 22);
  }

  #[tokio::test]
  async fn reaching_the_last_row_loads_once_per_arrival() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(5).await, remote.clone());
    let mut reducer = ContactsReducer::new(Arc::new(repo));
    settle(&mut reducer).await;

    assert!(!reducer.on_last_visible(None));
    assert!(!reducer.on_last_visible(Some(2)));
    assert!(reducer.on_last_visible(Some(4)));
    assert!(!reducer.on_last_visible(Some(4)));
    settle(&mut reducer).await;
    assert_eq!(reducer.state().items.len(), 25);
    assert_eq!(remote.requested(), [1]);

    // Arriving at the new end straight after a trigger only re-arms.
    assert!(!reducer.on_last_visible(Some(24)));
    assert!(!reducer.on_last_visible(Some(23)));
    assert!(reducer.on_last_visible(Some(24)));
    settle(&mut reducer).await;
    assert_eq!(remote.requested(), [1, 2]);
  }

  #[tokio::test]
  async fn last_row_while_loading_does_not_trigger() {
    let remote = FakeRemote::new();
    let repo = SyncRepository::new(seeded_store(5).await, remote.clone());
    let mut reducer = ContactsReducer::new(Arc::new(repo));
    settle(&mut reducer).await;
    let gate = remote.hold();

    assert!(reducer.load_more());
    assert!(!reducer.on_last_visible(Some(4)));

    gate.add_permits(1);
    settle(&mut reducer).await;
    assert_eq!(remote.requested(), [1]);
  }

  #[tokio::test]
  async fn dropping_the_reducer_lets_the_fetch_finish() {
    let remote = FakeRemote::new();
    let store = seeded_store(0).await;
    let repo = SyncRepository::new(store.clone(), remote.clone());
    let mut reducer = ContactsReducer::new(Arc::new(repo));
    let gate = remote.hold();

    assert!(reducer.sync().unwrap());
    assert!(reducer.state().is_loading);
    let mut all = store.observe_all();
    all.current();
    drop(reducer);

    gate.add_permits(1);
    let rows = timeout(Duration::from_secs(5), all.next())
      .await
      .expect("fetch finished")
      .unwrap();
    assert_eq!(rows.len(), 20);
  }
}
