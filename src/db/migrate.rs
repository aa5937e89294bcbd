use rusqlite::{Connection, OptionalExtension, Result};

use crate::models::settings::MapSettings;

/// Create the `pins` table.
fn create_pins_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS pins (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT,
            description TEXT,
            longitude   REAL NOT NULL,
            latitude    REAL NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pins_created_at ON pins(created_at);
        "#,
    )?;
    Ok(())
}

/// Create the `users` table.
fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role          TEXT NOT NULL CHECK(role IN ('admin','user'))
        );
        "#,
    )?;
    Ok(())
}

/// Create the singleton `settings` table and seed the default map view.
fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id               INTEGER PRIMARY KEY CHECK(id = 1),
            center_longitude REAL NOT NULL,
            center_latitude  REAL NOT NULL,
            zoom             INTEGER NOT NULL
        );
        "#,
    )?;

    let seeded: Option<i64> = conn
        .query_row("SELECT id FROM settings WHERE id = 1", [], |row| row.get(0))
        .optional()?;

    if seeded.is_none() {
        let defaults = MapSettings::default();
        conn.execute(
            "INSERT INTO settings (id, center_longitude, center_latitude, zoom)
             VALUES (1, ?1, ?2, ?3)",
            rusqlite::params![
                defaults.center_longitude,
                defaults.center_latitude,
                defaults.zoom
            ],
        )?;
    }

    Ok(())
}

/// Bring the schema up to date. Safe to run on every startup.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    create_pins_table(conn)?;
    create_users_table(conn)?;
    create_settings_table(conn)?;
    Ok(())
}
