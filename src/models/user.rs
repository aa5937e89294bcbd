use serde::{Deserialize, Serialize};

/// Account role. Only admins pass the access gate for settings updates,
/// exports and (after the first admin exists) account registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn to_db_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,      // ⇔ users.username (TEXT UNIQUE, case-sensitive)
    pub password_hash: String, // ⇔ users.password_hash (Argon2id PHC string)
    pub role: Role,            // ⇔ users.role ('admin' | 'user')
}
