use std::time::Duration;

use rusqlite::Connection;

use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;

/// Prepare a connection for use: session pragmas plus the full schema.
/// Safe to call on every startup; all table creation lives in the
/// migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    // Handlers share one connection; the timeout covers the rare case of an
    // external process holding the file lock.
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    run_pending_migrations(conn)?;
    Ok(())
}
