// src/http/extract.rs

//! Access-gate extractors.
//!
//! Privileged handlers put `RequireAdmin` in their signature; the capability
//! check runs before the handler body and therefore before any side effect.
//! `OptionalIdentity` is for the registration route, where an
//! anonymous caller is legal while the bootstrap window is open.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::{Claims, verify_token};
use crate::errors::AppError;
use crate::http::state::AppState;

/// Extractor that requires a valid admin token.
///
/// Missing, malformed or expired tokens are rejected with 401; a valid token
/// without the admin role with 403.
pub struct RequireAdmin(pub Claims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Auth)?;
        let claims = verify_token(token, &state.config().token_secret)?;

        if !claims.is_admin() {
            return Err(AppError::Forbidden(
                "this operation requires the admin role".to_string(),
            ));
        }

        Ok(Self(claims))
    }
}

/// Extractor that reads the caller's identity if a valid token is present.
///
/// A failed verification counts as unauthenticated, never as an error.
pub struct OptionalIdentity(pub Option<Claims>);

impl FromRequestParts<AppState> for OptionalIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_token(parts)
            .and_then(|token| verify_token(token, &state.config().token_secret).ok());
        Ok(Self(claims))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}
