use std::sync::Arc;

use tracing::instrument;

use crate::{
    errors::ApiError,
    models::{DEFAULT_ROLE, NewUser, User, UserChanges},
    store::{StoreError, UserStore},
};

pub const MISSING_FIELDS: &str = "name and email are required";
pub const EMAIL_TAKEN: &str = "email already registered";

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "UserService: list", skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.store.list().await.map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            ApiError::Internal
        })
    }

    #[instrument(name = "UserService: get", skip(self))]
    pub async fn get(&self, id: i32) -> Result<User, ApiError> {
        let user = self.store.get(id).await.map_err(|e| {
            tracing::error!("Failed to fetch user: {:?}", e);
            ApiError::Internal
        })?;
        user.ok_or_else(|| {
            tracing::warn!("User not found");
            ApiError::NotFound
        })
    }

    #[instrument(name = "UserService: create", skip(self, new_user))]
    pub async fn create(&self, new_user: NewUser) -> Result<User, ApiError> {
        let (Some(name), Some(email)) = (present(new_user.name), present(new_user.email)) else {
            tracing::warn!("Create rejected: missing name or email");
            return Err(ApiError::Validation(MISSING_FIELDS.into()));
        };
        let role = new_user.role.unwrap_or_else(|| DEFAULT_ROLE.to_string());

        let user = self
            .store
            .insert(&name, &email, &role)
            .await
            .map_err(|e| store_failure("create", e))?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Overwrites every column; a field absent from `changes` is written as `NULL`.
    #[instrument(name = "UserService: update", skip(self, changes))]
    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<User, ApiError> {
        let user = self
            .store
            .update(
                id,
                changes.name.as_deref(),
                changes.email.as_deref(),
                changes.role.as_deref(),
            )
            .await
            .map_err(|e| store_failure("update", e))?;
        match user {
            Some(user) => {
                tracing::info!("User updated");
                Ok(user)
            }
            None => {
                tracing::warn!("Update matched no row");
                Err(ApiError::NotFound)
            }
        }
    }

    #[instrument(name = "UserService: delete", skip(self))]
    pub async fn delete(&self, id: i32) -> Result<User, ApiError> {
        let user = self.store.delete(id).await.map_err(|e| {
            tracing::error!("Failed to delete user: {:?}", e);
            ApiError::Internal
        })?;
        user.ok_or_else(|| {
            tracing::warn!("Delete matched no row");
            ApiError::NotFound
        })
    }
}

/// Empty strings count as missing.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

fn store_failure(operation: &str, e: StoreError) -> ApiError {
    match e {
        StoreError::UniqueViolation { constraint } => {
            tracing::warn!(?constraint, "{} rejected: email already registered", operation);
            ApiError::Conflict(EMAIL_TAKEN.into())
        }
        StoreError::NotNullViolation => {
            tracing::warn!("{} rejected: required column left empty", operation);
            ApiError::Validation(MISSING_FIELDS.into())
        }
        StoreError::Database(e) => {
            tracing::error!("Failed to {} user: {:?}", operation, e);
            ApiError::Internal
        }
    }
}
