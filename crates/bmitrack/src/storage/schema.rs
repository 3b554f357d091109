//! `SQLite` schema for the measurement table.
//!
//! One table, created if absent. There is no migration system: the schema
//! is fixed and `ensure_schema` is safe to run any number of times.

use rusqlite::Connection;

use crate::error::Result;

/// SQL statement to create the measurement table.
///
/// `bmiDate` holds a Julian-day timestamp (`julianday('now')` at insert)
/// and is rendered to a calendar date with `date(bmiDate)` at read time.
pub const CREATE_BMI_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS bmi (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bmi REAL NOT NULL,
    height REAL NOT NULL,
    weight REAL NOT NULL,
    bmiDate REAL NOT NULL
)
";

/// SQL statement to create an index for the descending history query.
pub const CREATE_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_bmi_date ON bmi(bmiDate DESC)
";

/// All schema statements in creation order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_BMI_TABLE, CREATE_DATE_INDEX];

/// Create the measurement table and index if they do not already exist.
///
/// Idempotent: running it against an existing database changes nothing
/// and loses no data.
///
/// # Errors
///
/// Returns an error if a schema statement fails to execute.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}
