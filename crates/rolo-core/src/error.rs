//! Error types for `rolo-core`.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure while fetching a page from the remote contact source.
///
/// This is the only error kind the synchronisation layer classifies; every
/// other failure is treated as a local fault and propagated untouched.
#[derive(Debug, Error)]
pub enum RemoteFailure {
  /// The request never produced a response (DNS, connect, TLS, timeout…).
  #[error("transport error: {0}")]
  Transport(#[source] BoxError),

  /// The server answered with a non-success status code.
  #[error("remote responded with status {0}")]
  Status(u16),

  /// The response body was not a valid results page.
  #[error("could not decode results page: {0}")]
  Decode(#[source] BoxError),
}

impl RemoteFailure {
  pub fn transport(err: impl Into<BoxError>) -> Self { Self::Transport(err.into()) }

  pub fn decode(err: impl Into<BoxError>) -> Self { Self::Decode(err.into()) }
}

pub type Result<T, E = RemoteFailure> = std::result::Result<T, E>;
