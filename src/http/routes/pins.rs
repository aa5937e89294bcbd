// src/http/routes/pins.rs

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use crate::db::pins::{SortOrder, insert_pin, load_pins};
use crate::errors::AppResult;
use crate::filter::{FilterParams, PinFilter};
use crate::http::state::AppState;
use crate::models::pin::{NewPin, Pin, validate_coordinates};

/// `GET /pins`: filtered listing, newest first.
pub async fn list_pins(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<Vec<Pin>>> {
    let filter = PinFilter::parse(&params)?;

    let db = state.db()?;
    let pins = load_pins(&db.conn, &filter, SortOrder::NewestFirst)?;
    Ok(Json(pins))
}

/// `POST /pins`: create a pin. No gate, visitors may post.
pub async fn create_pin(
    State(state): State<AppState>,
    Json(mut payload): Json<NewPin>,
) -> AppResult<(StatusCode, Json<Pin>)> {
    payload.normalize();
    validate_coordinates(payload.longitude, payload.latitude)?;

    let db = state.db()?;
    let pin = insert_pin(&db.conn, &payload)?;

    tracing::debug!(id = pin.id, "pin created");
    Ok((StatusCode::CREATED, Json(pin)))
}
