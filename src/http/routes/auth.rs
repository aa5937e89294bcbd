// src/http/routes/auth.rs

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::auth::{authenticate, hash_password, validate_new_credentials};
use crate::db::users::register_user;
use crate::errors::{AppError, AppResult};
use crate::http::extract::OptionalIdentity;
use crate::http::state::AppState;
use crate::models::user::Role;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::User
}

#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// `POST /auth/login`: verify credentials and issue a capability token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Json<TokenResponse>> {
    let cfg = state.config();

    let db = state.db()?;
    let token = authenticate(
        &db.conn,
        &payload.username,
        &payload.password,
        &cfg.token_secret,
        cfg.token_validity_hours,
    )?;

    Ok(Json(TokenResponse { token }))
}

/// `POST /auth/register`: create an account.
///
/// Open while zero admins exist (the bootstrap window), admin-gated after
/// that. The zero-admin check and the insert run atomically in the store;
/// this handler only maps a closed window onto 401 vs 403 depending on
/// whether the caller presented a valid identity at all.
pub async fn register(
    OptionalIdentity(caller): OptionalIdentity,
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> AppResult<(StatusCode, Json<RegisteredResponse>)> {
    validate_new_credentials(&payload.username, &payload.password)?;

    let caller_is_admin = caller.as_ref().is_some_and(|c| c.is_admin());
    let password_hash = hash_password(&payload.password)?;

    let mut db = state.db()?;
    let result = register_user(
        &mut db.conn,
        &payload.username,
        &password_hash,
        payload.role,
        caller_is_admin,
    );

    let user = match result {
        Ok(user) => user,
        // Anonymous caller against a closed window: unauthenticated, not
        // merely unauthorized.
        Err(AppError::Forbidden(_)) if caller.is_none() => return Err(AppError::Auth),
        Err(e) => return Err(e),
    };

    tracing::info!(username = %user.username, role = ?user.role, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            id: user.id,
            username: user.username,
            role: user.role,
        }),
    ))
}
