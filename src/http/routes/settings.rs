// src/http/routes/settings.rs

use axum::Json;
use axum::extract::State;

use crate::db::settings::{get_settings, update_settings};
use crate::errors::AppResult;
use crate::http::extract::RequireAdmin;
use crate::http::state::AppState;
use crate::models::settings::MapSettings;

/// `GET /config`: current map view, readable by everyone.
pub async fn get_config(State(state): State<AppState>) -> AppResult<Json<MapSettings>> {
    let db = state.db()?;
    let settings = get_settings(&db.conn)?;
    Ok(Json(settings))
}

/// `POST /admin/config`: replace the map view. Admin only; the gate runs
/// before this body, so a rejected caller never touches the row.
pub async fn update_config(
    RequireAdmin(claims): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<MapSettings>,
) -> AppResult<Json<MapSettings>> {
    payload.validate()?;

    let db = state.db()?;
    update_settings(&db.conn, &payload)?;

    tracing::info!(admin = %claims.username, "map settings updated");
    Ok(Json(payload))
}
