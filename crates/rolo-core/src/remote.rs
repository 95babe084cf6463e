//! The `RemoteSource` trait — the gateway to the paginated contact API.

use std::future::Future;

use crate::{error::RemoteFailure, wire::ContactDto};

/// Number of contacts per remote page in the reference deployment.
pub const PAGE_SIZE: u32 = 20;

/// A paginated, read-only source of contacts.
///
/// Implementations own their transport concerns (timeouts, TLS, decoding) and
/// never retry on their own; a failed call surfaces exactly one
/// [`RemoteFailure`].
pub trait RemoteSource: Send + Sync {
  /// Fetch page `page` (1-based).
  fn load_page(
    &self,
    page: u32,
  ) -> impl Future<Output = Result<Vec<ContactDto>, RemoteFailure>> + Send + '_;

  /// Contacts per page; pagination math divides the local count by this.
  fn page_size(&self) -> u32 { PAGE_SIZE }
}
