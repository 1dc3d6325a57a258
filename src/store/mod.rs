pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod schema;
pub mod user;

use async_trait::async_trait;

use crate::models::User;

pub use error::StoreError;
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryUserStore;
pub use user::UserRepository;

/// Persistence port for the `users` table.
///
/// `None` from `get`, `update` and `delete` means no row matched the id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All rows, ascending by id.
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn get(&self, id: i32) -> Result<Option<User>, StoreError>;
    async fn insert(&self, name: &str, email: &str, role: &str) -> Result<User, StoreError>;
    /// Overwrites every mutable column in one statement. `None` is written as `NULL`.
    async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<&str>,
    ) -> Result<Option<User>, StoreError>;
    /// Returns the row as it was before removal.
    async fn delete(&self, id: i32) -> Result<Option<User>, StoreError>;
}
