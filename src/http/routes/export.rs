// src/http/routes/export.rs

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::filter::{FilterParams, PinFilter};
use crate::http::extract::RequireAdmin;
use crate::http::state::AppState;

/// `GET /admin/export/pins.{xlsx,csv}`: filtered download, admin only.
/// Accepts the same filter parameters as the listing route.
pub async fn export_pins(
    RequireAdmin(claims): RequireAdmin,
    State(state): State<AppState>,
    Path(target): Path<String>,
    Query(params): Query<FilterParams>,
) -> AppResult<Response> {
    let format = parse_target(&target)?;
    let filter = PinFilter::parse(&params)?;

    let db = state.db()?;
    let file = ExportLogic::export(&db.conn, &filter, format)?;

    tracing::info!(
        admin = %claims.username,
        filename = %file.filename,
        bytes = file.bytes.len(),
        "export generated"
    );

    let headers = [
        (CONTENT_TYPE, file.content_type.to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
    ];

    Ok((headers, file.bytes).into_response())
}

/// Only the pin table is exportable; the path segment selects the format.
fn parse_target(target: &str) -> AppResult<ExportFormat> {
    let ext = target
        .strip_prefix("pins.")
        .ok_or_else(|| AppError::Validation(format!("unknown export target: {target}")))?;
    ExportFormat::from_extension(ext)
}
