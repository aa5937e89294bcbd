use rusqlite::{Connection, OptionalExtension};

use crate::errors::AppResult;
use crate::models::settings::MapSettings;

/// Read the singleton map view. The row is seeded by the migrations; if it
/// is missing anyway (hand-edited database), it is re-created with defaults.
pub fn get_settings(conn: &Connection) -> AppResult<MapSettings> {
    let found = conn
        .query_row(
            "SELECT center_longitude, center_latitude, zoom FROM settings WHERE id = 1",
            [],
            |row| {
                Ok(MapSettings {
                    center_longitude: row.get(0)?,
                    center_latitude: row.get(1)?,
                    zoom: row.get(2)?,
                })
            },
        )
        .optional()?;

    match found {
        Some(settings) => Ok(settings),
        None => {
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
            Ok(defaults)
        }
    }
}

/// Single-row read-modify-write; last writer wins.
pub fn update_settings(conn: &Connection, settings: &MapSettings) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (id, center_longitude, center_latitude, zoom)
         VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             center_longitude = excluded.center_longitude,
             center_latitude  = excluded.center_latitude,
             zoom             = excluded.zoom",
        rusqlite::params![
            settings.center_longitude,
            settings.center_latitude,
            settings.zoom
        ],
    )?;
    Ok(())
}
