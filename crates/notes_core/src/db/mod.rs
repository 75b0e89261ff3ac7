//! SQLite file handling for the record store.
//!
//! `open_db` is the only way front ends get a connection: it prepares the
//! directory, sets the busy timeout and runs pending schema steps first.
//! References between tables (`package_id`, `parent_id`) carry no foreign
//! keys; the package cascade lives in `service::package_service`.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The directory for the database file could not be created.
    Io { path: PathBuf, message: String },
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::Io { path, message } => write!(
                f,
                "cannot create database directory `{}`: {message}",
                path.display()
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database uses schema {db_version}, this build knows up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
