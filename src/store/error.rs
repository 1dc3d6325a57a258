use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated ({})", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },

    #[error("not-null constraint violated")]
    NotNullViolation,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    /// Classifies by the driver's error kind (SQLSTATE), never by message text.
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.kind() {
                ErrorKind::UniqueViolation => {
                    return StoreError::UniqueViolation {
                        constraint: db.constraint().map(str::to_owned),
                    };
                }
                ErrorKind::NotNullViolation => return StoreError::NotNullViolation,
                _ => {}
            }
        }
        StoreError::Database(e)
    }
}
