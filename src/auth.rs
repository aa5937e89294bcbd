// src/auth.rs

//! Credential verification and the signed, expiring capability token.
//!
//! `authenticate` checks a username/password pair against the user store and
//! issues an HS256 token carrying `{userId, username, role}`; `verify_token`
//! turns a presented token back into those claims. Every failure surfaces as
//! the same generic error so callers learn nothing about which check failed,
//! and no verification failure is ever fatal to the process.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use regex::Regex;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Default token validity window.
pub const DEFAULT_TOKEN_VALIDITY_HOURS: i64 = 8;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").expect("valid username regex"));

/// Claims carried by the capability token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64, // user id
    pub username: String,
    pub role: Role,
    pub iat: i64, // epoch seconds
    pub exp: i64, // epoch seconds
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Verify a username/password pair and issue a token.
///
/// Unknown user and wrong password both come back as `AppError::Auth`.
pub fn authenticate(
    conn: &Connection,
    username: &str,
    password: &str,
    secret: &str,
    validity_hours: i64,
) -> AppResult<String> {
    let user = users::find_by_username(conn, username)?.ok_or(AppError::Auth)?;
    verify_password(password, &user.password_hash)?;
    issue_token(&user, secret, validity_hours)
}

/// Issue a signed token for an authenticated user.
pub fn issue_token(user: &User, secret: &str, validity_hours: i64) -> AppResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role,
        iat: now,
        exp: now + validity_hours * 3600,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Other(format!("token signing failed: {e}")))
}

/// Validate a presented token. Expired, malformed and badly signed tokens
/// all collapse to the same generic error.
pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Auth)
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Other(format!("password hashing failed: {e}")))
}

/// Compare a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let parsed = PasswordHash::new(hash).map_err(|_| AppError::Auth)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::Auth)
}

/// Boundary checks for registration input.
pub fn validate_new_credentials(username: &str, password: &str) -> AppResult<()> {
    if !USERNAME_RE.is_match(username) {
        return Err(AppError::Validation(
            "username must be 3-32 characters from [A-Za-z0-9_.-]".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
