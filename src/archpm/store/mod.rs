//! # Storage Layer
//!
//! One SQLite file holds both tables. [`Database`] only knows the path: every
//! gateway call opens its own connection, runs its statement and drops the
//! connection again, so nothing is held open between user actions and no
//! operation is ever part of a larger transaction.
//!
//! The [`RecordStore`] trait is the seam the commands and views are written
//! against. It speaks [`FieldMap`]s, the same shape the presentation layer
//! produces, and each implementation converts to its typed record before
//! validating and touching SQL.
//!
//! ## Implementations
//!
//! - [`contacts::ContactStore`]: the `contacts` table
//! - [`projects::ProjectStore`]: the `projects` table
//!
//! Construction (`open`) creates the table when missing and is the only place
//! where a store error is fatal.

use crate::error::{ArchpmError, Result};
use crate::model::{EntityKind, FieldMap, RecordId};
use crate::schema::TableSchema;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub mod contacts;
pub mod projects;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Location of the application database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection for a single operation.
    pub fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Creates `schema`'s table if it does not exist yet. Idempotent.
    pub(crate) fn ensure_table(&self, schema: &TableSchema) -> Result<()> {
        debug!(table = schema.table, path = %self.path.display(), "verifying table");
        let conn = self.connect().map_err(ArchpmError::Setup)?;
        conn.execute(&schema.create_table_sql(), [])
            .map_err(ArchpmError::Setup)?;
        Ok(())
    }
}

/// Gateway to one record table.
///
/// Every mutating call validates its input first and writes nothing when
/// validation fails. Errors never panic past this boundary: they come back
/// as [`ArchpmError`] values whose display text is the user-facing message.
pub trait RecordStore {
    fn schema(&self) -> &'static TableSchema;

    /// Validation messages for raw input; empty when valid.
    fn validate(&self, fields: &FieldMap) -> Vec<String>;

    /// Inserts a new record and returns its id.
    fn create(&self, fields: &FieldMap) -> Result<RecordId>;

    /// All records in the table's sort order, materialized for display.
    fn try_read_all(&self) -> Result<Vec<FieldMap>>;

    /// Like [`RecordStore::try_read_all`], but a failure is logged and read
    /// as an empty table.
    fn read_all(&self) -> Vec<FieldMap> {
        match self.try_read_all() {
            Ok(records) => records,
            Err(e) => {
                warn!(table = self.schema().table, error = %e, "failed to read records");
                Vec::new()
            }
        }
    }

    fn read_one(&self, id: RecordId) -> Result<Option<FieldMap>>;

    /// Replaces every persisted field of an existing record.
    fn update(&self, id: RecordId, fields: &FieldMap) -> Result<()>;

    fn delete(&self, id: RecordId) -> Result<()>;
}

/// Opens the gateway for `kind`, creating its table on first use.
pub fn open_store(kind: EntityKind, db: &Database) -> Result<Box<dyn RecordStore>> {
    let store: Box<dyn RecordStore> = match kind {
        EntityKind::Contacts => Box::new(contacts::ContactStore::open(db.clone())?),
        EntityKind::Projects => Box::new(projects::ProjectStore::open(db.clone())?),
    };
    Ok(store)
}

/// Reads a column as display text regardless of its storage class.
/// NULL reads as an empty string.
pub(crate) fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    })
}

/// Fails with `NotFound` when a keyed write touched no row.
pub(crate) fn expect_affected(affected: usize, schema: &TableSchema) -> Result<()> {
    if affected == 0 {
        return Err(ArchpmError::NotFound(schema.noun));
    }
    Ok(())
}

/// Fails with the full list of validation messages, if any.
pub(crate) fn reject_invalid(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ArchpmError::Validation(errors))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::DbFixture;
    use super::*;
    use crate::schema::contact::CONTACTS;

    #[test]
    fn ensure_table_is_idempotent() {
        let fx = DbFixture::new();
        fx.db.ensure_table(&CONTACTS).unwrap();
        fx.db.ensure_table(&CONTACTS).unwrap();

        let conn = fx.db.connect().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'contacts'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn unopenable_database_is_a_setup_error() {
        let fx = DbFixture::new();
        let db = Database::new(fx.db.path().join("missing-dir").join("x.db"));
        let err = db.ensure_table(&CONTACTS).unwrap_err();
        assert!(matches!(err, ArchpmError::Setup(_)));
        assert!(err.to_string().starts_with("Database initialization failed"));
    }

    #[test]
    fn text_column_renders_any_storage_class() {
        let conn = Connection::open_in_memory().unwrap();
        let values: Vec<String> = conn
            .query_row("SELECT NULL, 42, 'x', 1.5", [], |row| {
                (0..4).map(|i| text_column(row, i)).collect()
            })
            .unwrap();
        assert_eq!(values, vec!["", "42", "x", "1.5"]);
    }

    #[test]
    fn open_store_creates_both_tables() {
        let fx = DbFixture::new();
        for kind in EntityKind::all() {
            let store = open_store(kind, &fx.db).unwrap();
            assert_eq!(store.schema().table, kind.schema().table);
            assert!(store.try_read_all().unwrap().is_empty());
        }
    }
}
