//! View-state reducers for the list and detail screens.
//!
//! Each reducer owns the screen's subscription to the repository and folds
//! stream emissions, pagination outcomes and one-shot messages into an
//! immutable snapshot the UI renders as-is.

mod contacts;
mod detail;

use std::fmt;

pub use contacts::{ContactsReducer, ContactsUiState};
pub use detail::{ContactDetailReducer, ContactDetailUiState};

/// A one-shot message for the user; cleared once the UI reports it shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMessage {
  LoadingContactsFailed,
  ContactNotFound,
}

impl fmt::Display for UserMessage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::LoadingContactsFailed => "Could not load contacts. Press r to retry.",
      Self::ContactNotFound => "Contact not found.",
    })
  }
}
