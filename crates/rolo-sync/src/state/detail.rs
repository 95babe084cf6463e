//! State for the single-contact screen.

use rolo_core::{Contact, ContactId, LiveQuery};
use tracing::debug;

use super::UserMessage;
use crate::ContactRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDetailUiState {
  pub contact:      Option<Contact>,
  pub is_loading:   bool,
  pub user_message: Option<UserMessage>,
}

impl Default for ContactDetailUiState {
  fn default() -> Self { Self { contact: None, is_loading: true, user_message: None } }
}

/// Follows one cached contact.
pub struct ContactDetailReducer {
  id:      ContactId,
  contact: LiveQuery<Option<Contact>>,
  state:   ContactDetailUiState,
}

impl ContactDetailReducer {
  pub fn new<R: ContactRepository>(repository: &R, id: ContactId) -> Self {
    Self {
      id,
      contact: repository.contact_stream(id),
      state: ContactDetailUiState::default(),
    }
  }

  pub fn id(&self) -> ContactId { self.id }

  pub fn state(&self) -> &ContactDetailUiState { &self.state }

  pub fn message_shown(&mut self) { self.state.user_message = None; }

  /// Apply the latest emission if there is an unseen one.
  pub fn sync(&mut self) -> bool {
    match self.contact.poll() {
      Some(contact) => {
        self.apply(contact);
        true
      }
      None => false,
    }
  }

  /// Wait for the next emission. Returns `false` once the store is gone.
  pub async fn updated(&mut self) -> bool {
    match self.contact.next().await {
      Some(contact) => {
        self.apply(contact);
        true
      }
      None => false,
    }
  }

  fn apply(&mut self, contact: Option<Contact>) {
    let was_missing = !self.state.is_loading && self.state.contact.is_none();
    self.state.is_loading = false;

    match contact {
      Some(contact) => {
        self.state.contact = Some(contact);
        self.state.user_message = None;
      }
      None => {
        self.state.contact = None;
        // Only announce the transition, not every later table change.
        if !was_missing {
          debug!(id = self.id, "contact not found");
          self.state.user_message = Some(UserMessage::ContactNotFound);
        }
      }
    }
  }
}
