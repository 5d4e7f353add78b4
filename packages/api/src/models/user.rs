//! # User model
//!
//! Two representations of a user:
//!
//! ## [`User`]
//!
//! The complete row from the `users` table, loaded with [`sqlx::FromRow`]. It carries the
//! stored `password` and the `is_active` flag used to pick the acting user when a request
//! does not name one. It deliberately does not implement `Serialize`.
//!
//! ## [`UserInfo`]
//!
//! The public projection returned by `GET /users`: only `id` and `email`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// User information safe to send to the client (never includes the password).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: i32,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_omits_password() {
        let user = User {
            id: 1,
            email: "luke@rebellion.org".into(),
            password: "tosche-station".into(),
            is_active: true,
        };

        let json = serde_json::to_value(user.to_info()).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "email": "luke@rebellion.org"}));
        assert!(json.get("password").is_none());
    }
}
