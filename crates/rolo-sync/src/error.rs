//! Error type for `rolo-sync`.

use rolo_core::RemoteFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The remote page could not be fetched; nothing was written locally.
  #[error(transparent)]
  Remote(#[from] RemoteFailure),

  /// The local store failed. Not recovered anywhere in this crate.
  #[error("local store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    Self::Store(err.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
