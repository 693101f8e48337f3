use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                       // unique user ID
    pub username: String,               // display name, unique, min length 3
    pub email: String,                  // stored trimmed and lowercased
    pub age: i32,                       // non-negative, defaults to 20
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,  // bcrypt hash; absent for OAuth-only accounts
    pub is_admin: bool,
    pub created_at: OffsetDateTime,     // set once at creation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "ann".into(),
            email: "ann@x.com".into(),
            age: 30,
            password_hash: Some("$2b$10$abcdefghijklmnopqrstuv".into()),
            is_admin: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$10$"));
        assert!(json.contains("ann@x.com"));
    }
}
