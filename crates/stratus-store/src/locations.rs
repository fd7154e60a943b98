//! Saved-location storage.
//!
//! Locations are identified by `(name, lat, lon)`: saving a matching
//! location updates it in place instead of inserting a duplicate. At most
//! one row carries `is_current = 1`; the flag is cleared on every other row
//! inside the same transaction that sets it.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{StoreError, StoreResult};

/// A location the user has saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLocation {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for a save operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

/// Whether a save inserted a new row or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl SaveOutcome {
    pub fn message(self) -> &'static str {
        match self {
            SaveOutcome::Created => "Location saved successfully",
            SaveOutcome::Updated => "Location updated successfully",
        }
    }
}

/// SQLite-backed saved-location storage.
pub struct LocationStore {
    conn: Connection,
}

impl LocationStore {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS saved_locations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                lat REAL NOT NULL,
                lon REAL NOT NULL,
                country TEXT,
                state TEXT,
                is_current INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_saved_locations_identity
                ON saved_locations(name, lat, lon);",
        )?;
        Ok(())
    }

    /// Save a location, updating in place when `(name, lat, lon)` matches
    /// an existing row.
    ///
    /// Runs as a single transaction; when `is_current` is requested the
    /// flag is first cleared on all other rows so at most one row ever
    /// carries it.
    ///
    /// # Errors
    /// `InvalidInput` when the name is blank or a coordinate is missing
    /// (zero and non-finite values are treated as absent).
    pub fn save(&mut self, loc: &NewLocation) -> StoreResult<SaveOutcome> {
        if loc.name.trim().is_empty() {
            return Err(StoreError::invalid_input("name is required"));
        }
        if !is_present(loc.lat) || !is_present(loc.lon) {
            return Err(StoreError::invalid_input("lat and lon are required"));
        }

        let tx = self.conn.transaction()?;

        if loc.is_current {
            tracing::debug!("Clearing previous current location");
            tx.execute(
                "UPDATE saved_locations SET is_current = 0 WHERE is_current = 1",
                [],
            )?;
        }

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM saved_locations WHERE name = ?1 AND lat = ?2 AND lon = ?3",
                params![loc.name, loc.lat, loc.lon],
                |row| row.get(0),
            )
            .optional()?;

        let outcome = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE saved_locations SET country = ?1, state = ?2, is_current = ?3
                     WHERE id = ?4",
                    params![loc.country, loc.state, loc.is_current, id],
                )?;
                SaveOutcome::Updated
            }
            None => {
                tx.execute(
                    "INSERT INTO saved_locations (name, lat, lon, country, state, is_current, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        loc.name,
                        loc.lat,
                        loc.lon,
                        loc.country,
                        loc.state,
                        loc.is_current,
                        Utc::now(),
                    ],
                )?;
                SaveOutcome::Created
            }
        };

        tx.commit()?;
        tracing::debug!(name = %loc.name, "{}", outcome.message());
        Ok(outcome)
    }

    /// List all saved locations, current location first, then most recently
    /// created.
    pub fn list(&self) -> StoreResult<Vec<SavedLocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, lat, lon, country, state, is_current, created_at
             FROM saved_locations
             ORDER BY is_current DESC, created_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SavedLocation {
                id: row.get(0)?,
                name: row.get(1)?,
                lat: row.get(2)?,
                lon: row.get(3)?,
                country: row.get(4)?,
                state: row.get(5)?,
                is_current: row.get(6)?,
                created_at: row.get(7)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a saved location by id.
    ///
    /// # Errors
    /// `NotFound` when no row has the id; the store is left unchanged.
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM saved_locations WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(StoreError::not_found(format!("location {id}")));
        }

        tracing::debug!(id, "Location deleted");
        Ok(())
    }
}

/// A coordinate is present when it is finite and non-zero; the zero value
/// doubles as "absent" in inbound payloads.
fn is_present(coord: f64) -> bool {
    coord.is_finite() && coord != 0.0
}
