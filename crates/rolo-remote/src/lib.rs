//! HTTP client for the randomuser.me results endpoint.
//!
//! Implements [`RemoteSource`] on top of [`reqwest`]. The seed pins the
//! generated dataset, so the same page number always yields the same people.

use std::time::Duration;

use reqwest::Client;
use rolo_core::{
  PAGE_SIZE, RemoteFailure, RemoteSource,
  wire::{ContactDto, ResultsPage},
};
use serde::Deserialize;
use tracing::{debug, warn};

/// Connection settings for the remote contact source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
  /// Endpoint that serves results pages; query parameters are appended.
  pub base_url:     String,
  /// Fixes the generated dataset across requests and restarts.
  pub seed:         String,
  pub page_size:    u32,
  pub timeout_secs: u64,
}

impl Default for RemoteConfig {
  fn default() -> Self {
    Self {
      base_url:     "https://randomuser.me/api/1.3/".into(),
      seed:         "rolo".into(),
      page_size:    PAGE_SIZE,
      timeout_secs: 30,
    }
  }
}

/// Async client for the randomuser.me API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RandomUserClient {
  client: Client,
  config: RemoteConfig,
}

impl RandomUserClient {
  pub fn new(config: RemoteConfig) -> Result<Self, RemoteFailure> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(RemoteFailure::transport)?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &RemoteConfig { &self.config }

  /// `GET <base_url>?seed=<seed>&results=<page_size>&page=<page>`
  async fn fetch(&self, page: u32) -> Result<Vec<ContactDto>, RemoteFailure> {
    let resp = self
      .client
      .get(&self.config.base_url)
      .query(&[
        ("seed", self.config.seed.clone()),
        ("results", self.config.page_size.to_string()),
        ("page", page.to_string()),
      ])
      .send()
      .await
      .map_err(RemoteFailure::transport)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(RemoteFailure::Status(status.as_u16()));
    }

    let body = resp.bytes().await.map_err(RemoteFailure::transport)?;
    let page: ResultsPage =
      serde_json::from_slice(&body).map_err(RemoteFailure::decode)?;
    Ok(page.results)
  }
}

impl RemoteSource for RandomUserClient {
  async fn load_page(&self, page: u32) -> Result<Vec<ContactDto>, RemoteFailure> {
    debug!(page, seed = %self.config.seed, "fetching contacts page");
    match self.fetch(page).await {
      Ok(contacts) => {
        debug!(page, fetched = contacts.len(), "fetched contacts page");
        Ok(contacts)
      }
      Err(e) => {
        warn!(page, error = %e, "contacts page fetch failed");
        Err(e)
      }
    }
  }

  fn page_size(&self) -> u32 { self.config.page_size }
}
