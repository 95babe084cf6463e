//! Live queries over the contact table.
//!
//! A store publishes the complete, ordered table into a [`watch`] channel
//! after every committed mutation. A [`LiveQuery`] is one subscriber to that
//! channel plus a projection from the table onto whatever the caller wants
//! (every row, one row, mapped rows).
//!
//! Delivery is latest-value: an observer that falls behind sees only the
//! newest snapshot, never a backlog.

use std::{fmt, sync::Arc};

use tokio::sync::watch;

use crate::contact::ContactEntity;

/// The full contact table, ascending by identity.
pub type Snapshot = Arc<Vec<ContactEntity>>;

type Projection<T> = Arc<dyn Fn(&[ContactEntity]) -> T + Send + Sync>;

/// Create the publishing side for a table that starts out as `initial`.
pub fn publisher(initial: Vec<ContactEntity>) -> watch::Sender<Snapshot> {
  watch::Sender::new(Arc::new(initial))
}

/// A restartable subscription to the contact table.
pub struct LiveQuery<T> {
  rx:      watch::Receiver<Snapshot>,
  project: Projection<T>,
  primed:  bool,
}

impl<T: 'static> LiveQuery<T> {
  pub fn new(
    rx: watch::Receiver<Snapshot>,
    project: impl Fn(&[ContactEntity]) -> T + Send + Sync + 'static,
  ) -> Self {
    Self { rx, project: Arc::new(project), primed: false }
  }

  /// Project the latest published snapshot and mark it as seen.
  pub fn current(&mut self) -> T {
    self.primed = true;
    let snapshot = self.rx.borrow_and_update().clone();
    (self.project)(&snapshot)
  }

  /// The first call yields the current value immediately; later calls wait
  /// for the next publication. Returns `None` once the store is gone.
  pub async fn next(&mut self) -> Option<T> {
    if self.primed {
      self.rx.changed().await.ok()?;
    }
    Some(self.current())
  }

  /// Non-blocking variant of [`next`](Self::next): `Some` only when there is
  /// a value this subscriber has not seen yet.
  pub fn poll(&mut self) -> Option<T> {
    if !self.primed || self.rx.has_changed().unwrap_or(false) {
      Some(self.current())
    } else {
      None
    }
  }

  /// Derive a query that applies `f` after this query's projection.
  pub fn map<U: 'static>(
    self,
    f: impl Fn(T) -> U + Send + Sync + 'static,
  ) -> LiveQuery<U> {
    let inner = self.project;
    LiveQuery {
      rx:      self.rx,
      project: Arc::new(move |rows: &[ContactEntity]| f(inner(rows))),
      primed:  self.primed,
    }
  }
}

impl<T> Clone for LiveQuery<T> {
  /// Clones start unprimed so they emit the current value first.
  fn clone(&self) -> Self {
    Self {
      rx:      self.rx.clone(),
      project: Arc::clone(&self.project),
      primed:  false,
    }
  }
}

impl<T> fmt::Debug for LiveQuery<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LiveQuery")
      .field("rows", &self.rx.borrow().len())
      .field("primed", &self.primed)
      .finish()
  }
}

/// Every row, in table order.
pub fn all_rows(rx: watch::Receiver<Snapshot>) -> LiveQuery<Vec<ContactEntity>> {
  LiveQuery::new(rx, |rows| rows.to_vec())
}

/// The row with identity `id`, if present.
pub fn row_by_id(
  rx: watch::Receiver<Snapshot>,
  id: crate::ContactId,
) -> LiveQuery<Option<ContactEntity>> {
  LiveQuery::new(rx, move |rows| rows.iter().find(|r| r.id == id).cloned())
}
