#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

use pinmap::db::initialize::init_db;

pub fn pm() -> Command {
    cargo_bin_cmd!("pinmap")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pinmap.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Open an in-memory database with the full schema.
pub fn memory_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    init_db(&conn).expect("init db");
    conn
}

/// Insert a pin with a controlled creation timestamp ("YYYY-MM-DD HH:MM:SS").
pub fn insert_pin_at(
    conn: &Connection,
    title: &str,
    longitude: f64,
    latitude: f64,
    created_at: &str,
) -> i64 {
    conn.execute(
        "INSERT INTO pins (title, description, longitude, latitude, created_at)
         VALUES (?1, NULL, ?2, ?3, ?4)",
        rusqlite::params![title, longitude, latitude, created_at],
    )
    .expect("insert pin");
    conn.last_insert_rowid()
}

/// Small dataset spanning three months, useful for filter and export tests.
pub fn seed_pins(conn: &Connection) {
    insert_pin_at(conn, "Kiosko", -99.1332, 19.4326, "2024-03-15 10:30:00");
    insert_pin_at(conn, "Fuente", -99.1405, 19.4284, "2024-03-20 18:00:00");
    insert_pin_at(conn, "Mercado", -99.1250, 19.4400, "2024-04-01 09:15:00");
    insert_pin_at(conn, "Teatro", -99.1500, 19.4200, "2023-12-31 23:59:59");
}
