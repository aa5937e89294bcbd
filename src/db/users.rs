use rusqlite::{Connection, OptionalExtension, Row};

use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};

pub fn count_admins(conn: &Connection) -> AppResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'admin'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn find_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, role FROM users WHERE username = ?1",
    )?;
    let user = stmt.query_row([username], map_row).optional()?;
    Ok(user)
}

/// Register an account under the bootstrap rule.
///
/// Registration is open while the table holds zero admins; once an admin
/// exists only an admin caller may register further accounts. The admin
/// count and the insert run in one transaction so two concurrent first
/// registrations cannot both observe zero admins.
pub fn register_user(
    conn: &mut Connection,
    username: &str,
    password_hash: &str,
    role: Role,
    caller_is_admin: bool,
) -> AppResult<User> {
    let tx = conn.transaction()?;

    let admins: i64 = tx.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'admin'",
        [],
        |row| row.get(0),
    )?;

    if admins > 0 && !caller_is_admin {
        return Err(AppError::Forbidden(
            "registration requires an admin token".to_string(),
        ));
    }

    let inserted = tx.execute(
        "INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
        rusqlite::params![username, password_hash, role.to_db_str()],
    );

    match inserted {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::Conflict(format!(
                "username '{username}' already exists"
            )));
        }
        Err(e) => return Err(e.into()),
    }

    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(User {
        id,
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        role,
    })
}

fn map_row(row: &Row) -> rusqlite::Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid role: {role_str}"))),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        role,
    })
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
