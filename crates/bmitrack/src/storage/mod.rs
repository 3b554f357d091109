//! Storage layer for bmitrack.
//!
//! `SQLite`-backed persistence for BMI measurements: one table, appended
//! to on each computation and read back newest-first for the history
//! display. Records are immutable; there is no update or delete.

pub mod schema;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::bmi;
use crate::error::{Error, Result};
use crate::measurement::{Measurement, Reading};

/// Columns shared by every measurement query. `bmiDate` is stored as a
/// Julian day and rendered to a calendar date here.
const SELECT_COLUMNS: &str = "id, bmi, height, weight, date(bmiDate)";

/// Persistent store for BMI measurements.
///
/// The store moves from uninitialized to ready exactly once, inside
/// [`Store::open`], which runs the schema setup. It then lives for the
/// rest of the process; there is no teardown.
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a measurement database at the given path.
    ///
    /// Creates the parent directories and database file if they don't
    /// exist, and ensures the schema is in place. This is the only place
    /// schema setup runs in normal operation; it is not re-checked on
    /// every query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        schema::ensure_schema(&conn)?;

        info!("database ready at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        schema::ensure_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-run the idempotent schema setup.
    ///
    /// [`Store::open`] already does this; the operation stays exposed
    /// because it is safe to call at any time.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails to execute.
    pub fn ensure_schema(&self) -> Result<()> {
        schema::ensure_schema(&self.conn)
    }

    /// Append a measurement for the given reading.
    ///
    /// The BMI value is computed here from the validated reading, so a
    /// stored record can never disagree with its own inputs. The store
    /// assigns the id and the timestamp (`julianday('now')`). Returns the
    /// full record as persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the read-back fails; storage
    /// failures are never swallowed.
    pub fn append(&self, reading: &Reading) -> Result<Measurement> {
        let value = bmi::bmi(reading.weight_lb(), reading.height_in());

        self.conn.execute(
            "INSERT INTO bmi (bmi, height, weight, bmiDate) VALUES (?1, ?2, ?3, julianday('now'))",
            params![value, reading.height_in(), reading.weight_lb()],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("appended measurement {id} with bmi {value}");

        let measurement = self.conn.query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM bmi WHERE id = ?1"),
            [id],
            Self::row_to_measurement,
        )?;
        Ok(measurement)
    }

    /// All measurements, most recent first.
    ///
    /// Ties on the Julian-day timestamp (possible for back-to-back
    /// appends) fall back to descending id, so same-instant records still
    /// list in reverse insertion order. An empty store yields an empty
    /// vec, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn history(&self) -> Result<Vec<Measurement>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM bmi ORDER BY bmiDate DESC, id DESC"
        ))?;

        let measurements = stmt
            .query_map([], Self::row_to_measurement)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(measurements)
    }

    /// The most recent measurement, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn latest(&self) -> Result<Option<Measurement>> {
        let measurement = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM bmi ORDER BY bmiDate DESC, id DESC LIMIT 1"),
                [],
                Self::row_to_measurement,
            )
            .optional()?;
        Ok(measurement)
    }

    /// Count of stored measurements.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bmi", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a [`Measurement`].
    fn row_to_measurement(row: &rusqlite::Row) -> rusqlite::Result<Measurement> {
        let id: i64 = row.get(0)?;
        let bmi: f64 = row.get(1)?;
        let height_in: f64 = row.get(2)?;
        let weight_lb: f64 = row.get(3)?;
        let date_text: String = row.get(4)?;

        let recorded_on = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Real, Box::new(e))
        })?;

        Ok(Measurement {
            id,
            weight_lb,
            height_in,
            bmi,
            recorded_on,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputLimits;
    use chrono::Utc;

    fn create_test_store() -> Store {
        Store::open_in_memory().expect("failed to create test store")
    }

    fn reading(weight: f64, height: f64) -> Reading {
        Reading::new(weight, height, &InputLimits::default()).expect("invalid test reading")
    }

    #[test]
    fn test_open_in_memory() {
        assert!(Store::open_in_memory().is_ok());
    }

    #[test]
    fn test_append_returns_persisted_record() {
        let store = create_test_store();
        let m = store.append(&reading(150.0, 70.0)).unwrap();

        assert!(m.id > 0);
        assert!((m.weight_lb - 150.0).abs() < f64::EPSILON);
        assert!((m.height_in - 70.0).abs() < f64::EPSILON);
        assert!((m.bmi - 21.5).abs() < 1e-9);
    }

    #[test]
    fn test_append_derives_bmi_from_inputs() {
        let store = create_test_store();
        let m = store.append(&reading(250.0, 65.0)).unwrap();
        assert!((m.bmi - 41.6).abs() < 1e-9);
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let store = create_test_store();
        let first = store.append(&reading(150.0, 70.0)).unwrap();
        let second = store.append(&reading(160.0, 70.0)).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_recorded_on_uses_store_clock() {
        let store = create_test_store();
        let m = store.append(&reading(150.0, 70.0)).unwrap();

        // julianday('now') is UTC; allow a day of slack around midnight.
        let today = Utc::now().date_naive();
        assert!((today - m.recorded_on).num_days().abs() <= 1);
    }

    #[test]
    fn test_history_empty_store() {
        let store = create_test_store();
        let history = store.history().unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let store = create_test_store();

        let first = store.append(&reading(140.0, 70.0)).unwrap();
        let second = store.append(&reading(150.0, 70.0)).unwrap();
        let third = store.append(&reading(160.0, 70.0)).unwrap();

        let history = store.history().unwrap();
        let ids: Vec<i64> = history.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn test_history_returns_all_records() {
        let store = create_test_store();
        for i in 0..5 {
            store
                .append(&reading(140.0 + f64::from(i), 70.0))
                .unwrap();
        }
        assert_eq!(store.history().unwrap().len(), 5);
    }

    #[test]
    fn test_latest_empty_store() {
        let store = create_test_store();
        assert!(store.latest().unwrap().is_none());
    }

    #[test]
    fn test_latest_is_newest_append() {
        let store = create_test_store();
        store.append(&reading(140.0, 70.0)).unwrap();
        let newest = store.append(&reading(150.0, 70.0)).unwrap();

        let latest = store.latest().unwrap().unwrap();
        assert_eq!(latest.id, newest.id);
    }

    #[test]
    fn test_count() {
        let store = create_test_store();
        assert_eq!(store.count().unwrap(), 0);

        store.append(&reading(150.0, 70.0)).unwrap();
        store.append(&reading(160.0, 70.0)).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_ensure_schema_callable_after_open() {
        let store = create_test_store();
        store.append(&reading(150.0, 70.0)).unwrap();

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        // Existing data survives repeated schema runs.
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_path_in_memory() {
        let store = create_test_store();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based() {
        let db_path =
            std::env::temp_dir().join(format!("bmitrack_test_{}.db", std::process::id()));

        let store = Store::open(&db_path).unwrap();
        store.append(&reading(150.0, 70.0)).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.path(), db_path);

        // Reopen and verify persistence plus schema idempotence.
        drop(store);
        let store = Store::open(&db_path).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let nested = std::env::temp_dir().join(format!(
            "bmitrack_test_{}/nested/bmi.db",
            std::process::id()
        ));
        if let Some(parent) = nested.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let store = Store::open(&nested).unwrap();
        assert!(nested.exists());

        drop(store);
        if let Some(parent) = nested.parent().and_then(Path::parent) {
            let _ = std::fs::remove_dir_all(parent);
        }
    }
}
