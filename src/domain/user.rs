use serde::{Deserialize, Serialize};

use crate::domain::types::{UserEmail, UserRole};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub role: String,
    pub created_at: Option<String>,
}

/// Payload of `POST /api/admin/users`.
#[derive(Clone, Debug, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: UserEmail,
    pub password: String,
    pub role: UserRole,
}

/// Payload of `PUT /api/admin/users/{id}`. The password is only sent when a
/// new one was entered.
#[derive(Clone, Debug, Serialize)]
pub struct UserUpdate {
    pub username: String,
    pub email: UserEmail,
    pub role: UserRole,
    #[serde(rename = "newPassword", skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}
