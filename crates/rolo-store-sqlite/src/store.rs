//! [`SqliteStore`] — the SQLite implementation of [`LocalStore`].

use std::{path::Path, sync::Arc};

use rolo_core::{
  ContactEntity, ContactId, LiveQuery, LocalStore,
  live::{self, Snapshot},
};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
  Error, Result,
  encode::{encode_uuid, read_table},
  schema::SCHEMA,
};

const INSERT_NEW: &str = "INSERT INTO contacts (
     gender, title, first_name, last_name, email, phone, cell,
     picture_url, nat, uuid, city, country
   ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

const UPSERT_BY_ID: &str = "INSERT INTO contacts (
     id, gender, title, first_name, last_name, email, phone, cell,
     picture_url, nat, uuid, city, country
   ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
   ON CONFLICT(id) DO UPDATE SET
     gender      = excluded.gender,
     title       = excluded.title,
     first_name  = excluded.first_name,
     last_name   = excluded.last_name,
     email       = excluded.email,
     phone       = excluded.phone,
     cell        = excluded.cell,
     picture_url = excluded.picture_url,
     nat         = excluded.nat,
     uuid        = excluded.uuid,
     city        = excluded.city,
     country     = excluded.country";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolo contact cache backed by a single SQLite file.
///
/// Cloning is cheap: the connection and the publisher are
/// reference-counted, and clones share live queries.
#[derive(Clone)]
pub struct SqliteStore {
  conn:  tokio_rusqlite::Connection,
  table: Arc<watch::Sender<Snapshot>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self::init(conn).await?;
    info!(path = %path.display(), "opened contact cache");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let store = Self { conn, table: Arc::new(live::publisher(Vec::new())) };
    let table = Arc::clone(&store.table);
    store
      .conn
      .call(move |conn| {
        conn.execute_batch(SCHEMA)?;
        publish(conn, &table)?;
        Ok(())
      })
      .await?;
    Ok(store)
  }
}

/// Re-read the table and hand it to every live query.
///
/// Runs on the connection thread right after a commit, so snapshots are
/// published in commit order.
fn publish(
  conn: &rusqlite::Connection,
  table: &watch::Sender<Snapshot>,
) -> rusqlite::Result<()> {
  let rows = read_table(conn)?;
  table.send_replace(Arc::new(rows));
  Ok(())
}

// ─── LocalStore impl ─────────────────────────────────────────────────────────

impl LocalStore for SqliteStore {
  type Error = Error;

  fn observe_all(&self) -> LiveQuery<Vec<ContactEntity>> {
    live::all_rows(self.table.subscribe())
  }

  fn observe_by_id(&self, id: ContactId) -> LiveQuery<Option<ContactEntity>> {
    live::row_by_id(self.table.subscribe(), id)
  }

  async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(id) FROM contacts", [], |r| r.get(0))?)
      })
      .await?;
    usize::try_from(n).map_err(|_| Error::InvalidCount(n))
  }

  async fn upsert_all(&self, contacts: Vec<ContactEntity>) -> Result<()> {
    if contacts.is_empty() {
      return Ok(());
    }

    let batch = contacts.len();
    let table = Arc::clone(&self.table);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut insert = tx.prepare_cached(INSERT_NEW)?;
          let mut upsert = tx.prepare_cached(UPSERT_BY_ID)?;

          for c in &contacts {
            let uuid = encode_uuid(c.uuid);
            if c.is_stored() {
              upsert.execute(rusqlite::params![
                c.id,
                c.gender,
                c.title,
                c.first_name,
                c.last_name,
                c.email,
                c.phone,
                c.cell,
                c.picture_url,
                c.nat,
                uuid,
                c.city,
                c.country,
              ])?;
            } else {
              insert.execute(rusqlite::params![
                c.gender,
                c.title,
                c.first_name,
                c.last_name,
                c.email,
                c.phone,
                c.cell,
                c.picture_url,
                c.nat,
                uuid,
                c.city,
                c.country,
              ])?;
            }
          }
        }
        tx.commit()?;
        publish(conn, &table)?;
        Ok(())
      })
      .await?;

    debug!(batch, "upserted contacts");
    Ok(())
  }

  async fn delete_all(&self) -> Result<()> {
    let table = Arc::clone(&self.table);

    let removed = self
      .conn
      .call(move |conn| {
        let removed = conn.execute("DELETE FROM contacts", [])?;
        publish(conn, &table)?;
        Ok(removed)
      })
      .await?;

    debug!(removed, "cleared contact cache");
    Ok(())
  }
}
