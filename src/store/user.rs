use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;

use super::{StoreError, UserStore, schema::POSTGRES_INIT};
use crate::models::User;

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Creates the `users` table when it does not exist yet.
    #[instrument(name = "Ensuring users schema", skip(self))]
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(POSTGRES_INIT).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    #[instrument(name = "Listing users from database", skip(self))]
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, role FROM users ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    #[instrument(name = "Fetching user by id from database", skip(self))]
    async fn get(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, role FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(name = "Saving new user to database", skip(self))]
    async fn insert(&self, name: &str, email: &str, role: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, role) VALUES ($1, $2, $3)
            RETURNING id, name, email, role"#,
        )
        .bind(name)
        .bind(email)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(name = "Updating user in database", skip(self))]
    async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"UPDATE users SET name = $1, email = $2, role = $3 WHERE id = $4
            RETURNING id, name, email, role"#,
        )
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(name = "Deleting user from database", skip(self))]
    async fn delete(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"DELETE FROM users WHERE id = $1 RETURNING id, name, email, role"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
