use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Stored format of `pins.created_at` (UTC, second precision).
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub id: i64,
    pub title: Option<String>,       // ⇔ pins.title (TEXT, nullable)
    pub description: Option<String>, // ⇔ pins.description (TEXT, nullable)
    pub longitude: f64,              // ⇔ pins.longitude (REAL NOT NULL)
    pub latitude: f64,               // ⇔ pins.latitude (REAL NOT NULL)
    pub created_at: NaiveDateTime,   // ⇔ pins.created_at (TEXT "YYYY-MM-DD HH:MM:SS", UTC)
}

impl Pin {
    pub fn created_at_str(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }
}

/// Request body for creating a pin. Coordinates are mandatory, text is
/// optional and trimmed; an empty string collapses to no value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPin {
    pub title: Option<String>,
    pub description: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
}

impl NewPin {
    /// Trim text fields in place, collapsing blank values to `None`.
    pub fn normalize(&mut self) {
        self.title = normalize_text(self.title.take());
        self.description = normalize_text(self.description.take());
    }
}

/// Coordinate check shared by pin creation and the map view update.
pub fn validate_coordinates(longitude: f64, latitude: f64) -> AppResult<()> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::Validation(format!(
            "longitude must be a finite value between -180 and 180, got {longitude}"
        )));
    }
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::Validation(format!(
            "latitude must be a finite value between -90 and 90, got {latitude}"
        )));
    }
    Ok(())
}

fn normalize_text(value: Option<String>) -> Option<String> {
    let trimmed = value.as_deref().map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
