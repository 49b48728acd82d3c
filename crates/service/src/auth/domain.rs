use chrono::{DateTime, FixedOffset, NaiveDate};
use models::user::{self, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// ISO date, `YYYY-MM-DD`
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain user (public view, never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub role: Role,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// Stored account with its hash, for credential checks only.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Authenticated user plus the bearer token issued for it
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}

impl From<user::Model> for UserRecord {
    fn from(m: user::Model) -> Self {
        let password_hash = m.password_hash.clone();
        UserRecord { user: AuthUser::from(m), password_hash }
    }
}

impl From<user::Model> for AuthUser {
    fn from(m: user::Model) -> Self {
        AuthUser {
            id: m.id,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            phone: m.phone,
            birth_date: m.birth_date,
            role: m.role,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
