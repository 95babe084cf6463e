//! SQL schema for the Rolo SQLite cache.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per cached contact. `id` is the local identity and the only key
-- used for lookups; `uuid` is the remote service's identifier.
CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    gender      TEXT NOT NULL,
    title       TEXT NOT NULL,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL,
    cell        TEXT NOT NULL,
    picture_url TEXT NOT NULL,   -- large resolution only
    nat         TEXT NOT NULL,   -- two-letter nationality code
    uuid        TEXT NOT NULL,   -- hyphenated lowercase
    city        TEXT NOT NULL,
    country     TEXT NOT NULL
);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT`, in [`RawContact`](crate::encode::RawContact) order.
pub const CONTACT_COLUMNS: &str = "id, gender, title, first_name, last_name, email, phone, cell, \
   picture_url, nat, uuid, city, country";
