// src/export/csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::PinExport;
use crate::export::model::{get_headers, pin_to_row};

/// Render the pin table as CSV bytes. The header row is written explicitly
/// so it is present even for an empty result set.
pub(crate) fn render_csv(pins: &[PinExport]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(get_headers())
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for pin in pins {
        wtr.write_record(pin_to_row(pin))
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV finalize error: {e}")))
}
