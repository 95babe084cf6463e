//! Encoding and decoding helpers between [`ContactEntity`] and the plain-text
//! columns of the `contacts` table.
//!
//! UUIDs are stored as hyphenated lowercase strings; everything else is
//! already text or an integer.

use rolo_core::ContactEntity;
use rusqlite::{Row, types::Type};
use uuid::Uuid;

use crate::schema::CONTACT_COLUMNS;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column index of `uuid` within [`CONTACT_COLUMNS`].
const UUID_COLUMN: usize = 10;

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:          i64,
  pub gender:      String,
  pub title:       String,
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       String,
  pub cell:        String,
  pub picture_url: String,
  pub nat:         String,
  pub uuid:        String,
  pub city:        String,
  pub country:     String,
}

impl RawContact {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      gender:      row.get(1)?,
      title:       row.get(2)?,
      first_name:  row.get(3)?,
      last_name:   row.get(4)?,
      email:       row.get(5)?,
      phone:       row.get(6)?,
      cell:        row.get(7)?,
      picture_url: row.get(8)?,
      nat:         row.get(9)?,
      uuid:        row.get(UUID_COLUMN)?,
      city:        row.get(11)?,
      country:     row.get(12)?,
    })
  }

  /// Decode the text columns; a malformed uuid is reported as a column
  /// conversion failure so it travels with the rest of the SQLite errors.
  pub fn into_entity(self) -> rusqlite::Result<ContactEntity> {
    let uuid = Uuid::parse_str(&self.uuid).map_err(|e| {
      rusqlite::Error::FromSqlConversionFailure(UUID_COLUMN, Type::Text, Box::new(e))
    })?;

    Ok(ContactEntity {
      id: self.id,
      gender: self.gender,
      title: self.title,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      phone: self.phone,
      cell: self.cell,
      picture_url: self.picture_url,
      nat: self.nat,
      uuid,
      city: self.city,
      country: self.country,
    })
  }
}

/// Read the whole table, ascending by identity.
pub fn read_table(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<ContactEntity>> {
  let mut stmt =
    conn.prepare_cached(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"))?;
  let raws = stmt
    .query_map([], RawContact::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawContact::into_entity).collect()
}
