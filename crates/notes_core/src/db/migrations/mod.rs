//! Ordered schema steps for the record store.
//!
//! Each step runs in its own transaction and bumps `PRAGMA user_version`
//! in that same transaction, so an interrupted upgrade resumes at the
//! first unapplied step. Versions only ever grow.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        name: "records",
        sql: include_str!("0001_records.sql"),
    },
    Step {
        version: 2,
        name: "listing_indexes",
        sql: include_str!("0002_listing_indexes.sql"),
    },
];

/// Highest schema version this build can open.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Version stored in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the schema up to `latest_version()`.
///
/// A database written by a newer build is refused rather than touched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let latest = latest_version();
    if found > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }

    for step in STEPS.iter().filter(|step| step.version > found) {
        let tx = conn.transaction()?;
        run_step(&tx, step)?;
        tx.commit()?;
        info!(
            "event=db_migrate module=db status=ok step={} version={}",
            step.name, step.version
        );
    }
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &Step) -> DbResult<()> {
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)?;
    Ok(())
}
