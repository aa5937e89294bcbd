// src/export/model.rs

use serde::Serialize;

use crate::models::pin::Pin;

/// Flat pin row for export.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PinExport {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub longitude: f64,
    pub latitude: f64,
    pub created_at: String,
}

impl From<&Pin> for PinExport {
    fn from(pin: &Pin) -> Self {
        Self {
            id: pin.id,
            title: pin.title.clone().unwrap_or_default(),
            description: pin.description.clone().unwrap_or_default(),
            longitude: pin.longitude,
            latitude: pin.latitude,
            created_at: pin.created_at_str(),
        }
    }
}

/// Header row, fixed field order for CSV / XLSX.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "title",
        "description",
        "longitude",
        "latitude",
        "createdAt",
    ]
}

/// Rendered cell values, in header order.
pub(crate) fn pin_to_row(p: &PinExport) -> Vec<String> {
    vec![
        p.id.to_string(),
        p.title.clone(),
        p.description.clone(),
        p.longitude.to_string(),
        p.latitude.to_string(),
        p.created_at.clone(),
    ]
}
