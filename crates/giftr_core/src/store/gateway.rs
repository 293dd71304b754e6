//! Persistence gateway contract and SQLite snapshot implementation.
//!
//! # Responsibility
//! - Read/write the whole people collection as one serialized blob under
//!   a fixed storage key.
//! - Keep SQL and JSON encoding details inside this boundary.
//!
//! # Invariants
//! - `save` overwrites the whole snapshot; there is no partial-record
//!   persistence.
//! - Read paths reject invalid persisted state instead of masking it:
//!   a blob that decodes but fails record validation is corrupt.
//! - `load` has no side effect on the durable store.

use crate::model::person::{Person, PersonValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key for the serialized people collection.
pub const PEOPLE_KEY: &str = "people";

/// Load failure: storage reachable but the stored blob is unusable.
#[derive(Debug)]
pub enum PersistenceReadError {
    /// Underlying storage read failed.
    Storage(rusqlite::Error),
    /// Stored blob failed JSON decode or record validation.
    CorruptSnapshot { key: &'static str, message: String },
}

impl Display for PersistenceReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "snapshot read failed: {err}"),
            Self::CorruptSnapshot { key, message } => {
                write!(f, "corrupt snapshot under key `{key}`: {message}")
            }
        }
    }
}

impl Error for PersistenceReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::CorruptSnapshot { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for PersistenceReadError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value)
    }
}

/// Save failure: the durable store did not accept the new snapshot.
#[derive(Debug)]
pub enum PersistenceWriteError {
    /// Underlying storage write failed.
    Storage(rusqlite::Error),
    /// Snapshot could not be encoded to JSON.
    EncodeSnapshot { key: &'static str, message: String },
}

impl Display for PersistenceWriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "snapshot write failed: {err}"),
            Self::EncodeSnapshot { key, message } => {
                write!(f, "failed to encode snapshot for key `{key}`: {message}")
            }
        }
    }
}

impl Error for PersistenceWriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::EncodeSnapshot { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for PersistenceWriteError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value)
    }
}

/// Durable snapshot boundary for the people collection.
///
/// Callers must serialize `save` invocations; the trait itself assumes a
/// single logical writer (see `PeopleStore`).
pub trait PersistenceGateway {
    /// Loads the last saved collection.
    ///
    /// Returns `Ok(None)` when no prior snapshot exists. Returns
    /// `CorruptSnapshot` when a blob exists but cannot be decoded into
    /// valid records.
    fn load(&self) -> Result<Option<Vec<Person>>, PersistenceReadError>;

    /// Overwrites the durable snapshot with `people`.
    fn save(&self, people: &[Person]) -> Result<(), PersistenceWriteError>;
}

/// SQLite-backed snapshot gateway.
///
/// Stores the whole collection as one JSON document in the `snapshots`
/// key-value table, under [`PEOPLE_KEY`].
pub struct SqliteSnapshotGateway<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotGateway<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PersistenceGateway for SqliteSnapshotGateway<'_> {
    fn load(&self) -> Result<Option<Vec<Person>>, PersistenceReadError> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                [PEOPLE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(blob) = blob else {
            return Ok(None);
        };

        let people: Vec<Person> = serde_json::from_str(&blob).map_err(|err| {
            PersistenceReadError::CorruptSnapshot {
                key: PEOPLE_KEY,
                message: err.to_string(),
            }
        })?;

        for person in &people {
            person
                .validate()
                .map_err(|err| corrupt_record(person, err))?;
        }

        Ok(Some(people))
    }

    fn save(&self, people: &[Person]) -> Result<(), PersistenceWriteError> {
        let blob = serde_json::to_string(people).map_err(|err| {
            PersistenceWriteError::EncodeSnapshot {
                key: PEOPLE_KEY,
                message: err.to_string(),
            }
        })?;

        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![PEOPLE_KEY, blob],
        )?;

        Ok(())
    }
}

fn corrupt_record(person: &Person, err: PersonValidationError) -> PersistenceReadError {
    PersistenceReadError::CorruptSnapshot {
        key: PEOPLE_KEY,
        message: format!("invalid persisted person {}: {err}", person.id),
    }
}
