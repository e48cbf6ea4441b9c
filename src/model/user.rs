use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Users.
    UserId,
    "user"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    Rider,
}

labels!(Role, "role", {
    User => "user",
    Admin => "admin",
    Rider => "rider",
});

/// A registered account. The email is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_log_in: DateTime<Utc>,
}

/// Payload for the first login of an email address.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
}

/// Emails compare case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
