// src/export/filename.rs

use chrono::{DateTime, Utc};

use crate::export::ExportFormat;

/// Domain segment of every export filename.
const DOMAIN: &str = "pines";

/// Build the download name: `pines_<qualifier>_<UTC YYYYMMDD_HHMMSS>.<ext>`.
/// The qualifier encodes which filter produced the set (`todo` when none).
pub(crate) fn export_filename(qualifier: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{DOMAIN}_{qualifier}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.as_str()
    )
}
