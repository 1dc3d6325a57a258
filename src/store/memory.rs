use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{StoreError, UserStore};
use crate::models::User;

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// `UserStore` held in process memory, mirroring the PostgreSQL table:
/// ids start at 1 and are never reused, emails are unique and every column is
/// NOT NULL.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, User>,
    last_id: i32,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let table = self.inner.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<User>, StoreError> {
        let table = self.inner.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, name: &str, email: &str, role: &str) -> Result<User, StoreError> {
        let mut table = self.inner.lock().await;
        if table.email_taken(email, None) {
            return Err(StoreError::UniqueViolation {
                constraint: Some(EMAIL_CONSTRAINT.to_string()),
            });
        }
        table.last_id += 1;
        let user = User {
            id: table.last_id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let mut table = self.inner.lock().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        let (Some(name), Some(email), Some(role)) = (name, email, role) else {
            return Err(StoreError::NotNullViolation);
        };
        if table.email_taken(email, Some(id)) {
            return Err(StoreError::UniqueViolation {
                constraint: Some(EMAIL_CONSTRAINT.to_string()),
            });
        }
        let updated = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        };
        table.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, StoreError> {
        let mut table = self.inner.lock().await;
        Ok(table.rows.remove(&id))
    }
}
