use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Role assigned when a create request omits one.
pub const DEFAULT_ROLE: &str = "user";

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Body of `POST /api/users`. Presence is checked by the service, not by serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Body of `PUT /api/users/{id}`.
///
/// Every column is overwritten; a missing field is written as `NULL` and the
/// store rejects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
