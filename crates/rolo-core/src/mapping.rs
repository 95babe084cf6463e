//! Conversions between the three contact shapes.
//!
//! - wire → storage keeps every field Rolo models; the identity starts unset.
//! - storage ↔ presentation is field-for-field.
//! - storage/presentation → wire is lossy in exactly one place: the store only
//!   keeps the large picture, so `picture.medium` comes back as an empty
//!   string. Callers that need the medium URL must refetch.

use crate::{
  contact::{Contact, ContactEntity, UNSET_ID},
  wire::{ContactDto, LocationDto, LoginDto, NameDto, PictureDto},
};

// ─── Wire → storage ──────────────────────────────────────────────────────────

impl From<ContactDto> for ContactEntity {
  fn from(dto: ContactDto) -> Self {
    Self {
      id:          UNSET_ID,
      gender:      dto.gender,
      title:       dto.name.title,
      first_name:  dto.name.first,
      last_name:   dto.name.last,
      email:       dto.email,
      phone:       dto.phone,
      cell:        dto.cell,
      picture_url: dto.picture.large,
      nat:         dto.nat,
      uuid:        dto.login.uuid,
      city:        dto.location.city,
      country:     dto.location.country,
    }
  }
}

// ─── Storage ↔ presentation ──────────────────────────────────────────────────

impl From<ContactEntity> for Contact {
  fn from(e: ContactEntity) -> Self {
    Self {
      id:          e.id,
      gender:      e.gender,
      title:       e.title,
      first_name:  e.first_name,
      last_name:   e.last_name,
      email:       e.email,
      phone:       e.phone,
      cell:        e.cell,
      city:        e.city,
      country:     e.country,
      picture_url: e.picture_url,
      nat:         e.nat,
      uuid:        e.uuid,
    }
  }
}

impl From<Contact> for ContactEntity {
  fn from(c: Contact) -> Self {
    Self {
      id:          c.id,
      gender:      c.gender,
      title:       c.title,
      first_name:  c.first_name,
      last_name:   c.last_name,
      email:       c.email,
      phone:       c.phone,
      cell:        c.cell,
      picture_url: c.picture_url,
      nat:         c.nat,
      uuid:        c.uuid,
      city:        c.city,
      country:     c.country,
    }
  }
}

// ─── Back to the wire (lossy) ────────────────────────────────────────────────

impl From<ContactEntity> for ContactDto {
  fn from(e: ContactEntity) -> Self {
    Self {
      login:    LoginDto { uuid: e.uuid },
      gender:   e.gender,
      email:    e.email,
      name:     NameDto {
        title: e.title,
        first: e.first_name,
        last:  e.last_name,
      },
      phone:    e.phone,
      cell:     e.cell,
      location: LocationDto {
        city:    e.city,
        country: e.country,
      },
      picture:  PictureDto {
        // Not retained locally.
        medium: String::new(),
        large:  e.picture_url,
      },
      nat:      e.nat,
    }
  }
}

impl From<Contact> for ContactDto {
  fn from(c: Contact) -> Self { ContactEntity::from(c).into() }
}

/// Map a batch of stored rows into presentation order-preservingly.
pub fn to_contacts(entities: &[ContactEntity]) -> Vec<Contact> {
  entities.iter().cloned().map(Contact::from).collect()
}
