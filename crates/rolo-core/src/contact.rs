//! Contact record — the attribute set shared by every layer.
//!
//! The record exists in two local shapes: [`ContactEntity`] is what the store
//! persists, [`Contact`] is what observers and screens consume. Both carry the
//! store-assigned identity; the wire shape lives in [`crate::wire`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The local store's own key for a contact.
///
/// `0` means "not yet inserted"; the store assigns a fresh id on first write.
pub type ContactId = i64;

/// Identity value carried by records that have never been stored.
pub const UNSET_ID: ContactId = 0;

// ─── Storage ─────────────────────────────────────────────────────────────────

/// A contact as persisted by the local store, one row per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntity {
  pub id:          ContactId,
  pub gender:      String,
  pub title:       String,
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       String,
  pub cell:        String,
  /// Large-resolution picture only; the medium URL is not retained.
  pub picture_url: String,
  /// Two-letter nationality code, e.g. `"FR"`.
  pub nat:         String,
  /// The remote service's identifier. Never used for local lookups.
  pub uuid:        Uuid,
  pub city:        String,
  pub country:     String,
}

impl ContactEntity {
  /// Whether the store has assigned this record an identity yet.
  pub fn is_stored(&self) -> bool { self.id != UNSET_ID }
}

// ─── Presentation ────────────────────────────────────────────────────────────

/// Immutable contact handed to observers and rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:          ContactId,
  pub gender:      String,
  pub title:       String,
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       String,
  pub cell:        String,
  pub city:        String,
  pub country:     String,
  pub picture_url: String,
  pub nat:         String,
  pub uuid:        Uuid,
}

impl Contact {
  /// `"Jon Doe"`
  pub fn name(&self) -> String { format!("{} {}", self.first_name, self.last_name) }

  /// `"Mr. Jon Doe"`
  pub fn name_with_title(&self) -> String {
    format!("{}. {} {}", self.title, self.first_name, self.last_name)
  }

  /// `"Paris, France"`
  pub fn address(&self) -> String { format!("{}, {}", self.city, self.country) }

  pub fn country_flag(&self) -> String { country_flag(&self.nat) }
}

// ─── Flag glyph ──────────────────────────────────────────────────────────────

const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Build the flag emoji for a two-letter nationality code by mapping each
/// letter onto its Unicode regional-indicator symbol.
///
/// Only meaningful for two ASCII letters; anything else yields an arbitrary
/// (possibly empty) string. Characters that would land outside the valid
/// scalar range are dropped, so this never panics.
pub fn country_flag(nat: &str) -> String {
  nat
    .chars()
    .map(|c| c.to_ascii_uppercase())
    .filter_map(|c| {
      (c as u32)
        .checked_sub('A' as u32)
        .and_then(|offset| char::from_u32(REGIONAL_INDICATOR_A + offset))
    })
    .collect()
}
