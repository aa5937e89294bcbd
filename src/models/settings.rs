use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::pin::validate_coordinates;

/// Singleton map view configuration (settings row id = 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    pub center_longitude: f64,
    pub center_latitude: f64,
    pub zoom: i64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_longitude: -99.1332,
            center_latitude: 19.4326,
            zoom: 12,
        }
    }
}

impl MapSettings {
    /// Boundary validation for settings updates.
    pub fn validate(&self) -> AppResult<()> {
        validate_coordinates(self.center_longitude, self.center_latitude)?;
        if !(0..=22).contains(&self.zoom) {
            return Err(AppError::Validation(format!(
                "zoom must be between 0 and 22, got {}",
                self.zoom
            )));
        }
        Ok(())
    }
}
