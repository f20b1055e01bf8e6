//! SQLite implementation of the local album store.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;

use super::traits::LocalStore;
use crate::albums::Album;
use crate::db::Database;

/// SQLite-based album store.
pub struct SqliteStore {
  db: Mutex<Database>,
}

impl SqliteStore {
  /// Open the store at `path`, or at the default data location.
  pub fn open(path: Option<&Path>) -> Result<Self> {
    Ok(Self {
      db: Mutex::new(Database::open(path)?),
    })
  }

  /// Open a throwaway in-memory store.
  #[cfg(test)]
  pub fn open_in_memory() -> Result<Self> {
    Ok(Self {
      db: Mutex::new(Database::open_in_memory()?),
    })
  }

  /// When the last bulk write happened, if ever.
  pub fn last_written_at(&self) -> Result<Option<DateTime<Utc>>> {
    let db = self.db.lock().map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let value: Option<String> = db
      .conn()
      .query_row(
        "SELECT last_written_at FROM sync_state WHERE id = 1",
        [],
        |row| row.get(0),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read sync state: {}", e))?;

    value.map(|s| parse_datetime(&s)).transpose()
  }
}

impl LocalStore for SqliteStore {
  fn read_all(&self) -> Result<Vec<Album>> {
    let db = self.db.lock().map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let mut stmt = db
      .conn()
      .prepare(
        "SELECT id, group_id, title, image_url, thumbnail_url FROM albums
         ORDER BY id",
      )
      .map_err(|e| eyre!("Failed to prepare query: {}", e))?;

    let albums = stmt
      .query_map([], album_from_row)
      .map_err(|e| eyre!("Failed to query albums: {}", e))?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(|e| eyre!("Failed to read album row: {}", e))?;

    Ok(albums)
  }

  fn upsert_all(&self, albums: &[Album]) -> Result<()> {
    let mut db = self.db.lock().map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let tx = db
      .conn_mut()
      .transaction()
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    {
      let mut stmt = tx
        .prepare(
          "INSERT OR REPLACE INTO albums (id, group_id, title, image_url, thumbnail_url)
           VALUES (?, ?, ?, ?, ?)",
        )
        .map_err(|e| eyre!("Failed to prepare insert: {}", e))?;

      for album in albums {
        stmt
          .execute(params![
            album.id,
            album.group_id,
            album.title,
            album.image_url,
            album.thumbnail_url
          ])
          .map_err(|e| eyre!("Failed to store album {}: {}", album.id, e))?;
      }
    }

    tx.execute(
      "INSERT OR REPLACE INTO sync_state (id, last_written_at) VALUES (1, ?)",
      params![Utc::now().to_rfc3339()],
    )
    .map_err(|e| eyre!("Failed to update sync state: {}", e))?;

    tx.commit()
      .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;

    Ok(())
  }

  fn find_by_id(&self, id: i64) -> Result<Option<Album>> {
    let db = self.db.lock().map_err(|e| eyre!("Lock poisoned: {}", e))?;

    db.conn()
      .query_row(
        "SELECT id, group_id, title, image_url, thumbnail_url FROM albums
         WHERE id = ?",
        params![id],
        album_from_row,
      )
      .optional()
      .map_err(|e| eyre!("Failed to look up album {}: {}", id, e))
  }
}

fn album_from_row(row: &Row<'_>) -> rusqlite::Result<Album> {
  Ok(Album {
    id: row.get(0)?,
    group_id: row.get(1)?,
    title: row.get(2)?,
    image_url: row.get(3)?,
    thumbnail_url: row.get(4)?,
  })
}

/// Parse an RFC 3339 timestamp written by `upsert_all`.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| eyre!("Failed to parse datetime '{}': {}", s, e))
}
