//! Wire shapes of the randomuser.me results endpoint.
//!
//! Only the fields Rolo keeps are modelled; serde ignores the rest of the
//! payload (`dob`, `registered`, `id`, `info`, …).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The page envelope: `{"results": [...], "info": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsPage {
  pub results: Vec<ContactDto>,
}

/// One element of `results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDto {
  pub login:    LoginDto,
  pub gender:   String,
  pub email:    String,
  pub name:     NameDto,
  pub phone:    String,
  pub cell:     String,
  pub location: LocationDto,
  pub picture:  PictureDto,
  pub nat:      String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginDto {
  pub uuid: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDto {
  pub title: String,
  pub first: String,
  pub last:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDto {
  pub city:    String,
  pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureDto {
  pub medium: String,
  pub large:  String,
}
