// src/export/logic.rs

use chrono::Utc;
use rusqlite::Connection;

use crate::db::pins::{SortOrder, load_pins};
use crate::errors::AppResult;
use crate::export::csv::render_csv;
use crate::export::filename::export_filename;
use crate::export::xlsx::render_xlsx;
use crate::export::{ExportFormat, PinExport};
use crate::filter::PinFilter;

/// A fully rendered download: bytes plus the metadata the transport needs.
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Load the pins matching `filter` in ascending id order and render them
    /// in the requested format. Purely a transform: nothing is persisted and
    /// a failed render returns an error, never partial bytes.
    pub fn export(
        conn: &Connection,
        filter: &PinFilter,
        format: ExportFormat,
    ) -> AppResult<ExportFile> {
        let pins = load_pins(conn, filter, SortOrder::OldestFirst)?;
        let rows: Vec<PinExport> = pins.iter().map(PinExport::from).collect();

        let bytes = match format {
            ExportFormat::Csv => render_csv(&rows)?,
            ExportFormat::Xlsx => render_xlsx(&rows)?,
        };

        Ok(ExportFile {
            filename: export_filename(&filter.qualifier(), format, Utc::now()),
            content_type: format.content_type(),
            bytes,
        })
    }
}
