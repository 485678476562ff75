use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    /// The store rejected a write because the login is held by another row
    #[error("Login '{0}' is already taken")]
    LoginTaken(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

// Postgres names the primary key of `users` this way
const PRIMARY_KEY_CONSTRAINT: &str = "users_pkey";

/// A unique violation reported by Postgres concerns `login` unless it names
/// the primary key.
fn is_login_conflict(detail: &str) -> bool {
    !detail.contains(PRIMARY_KEY_CONSTRAINT)
}

impl UserError {
    /// Map a store error, recognising unique violations on `login`.
    pub fn from_db(err: DbErr, login: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) if is_login_conflict(&detail) => {
                Self::LoginTaken(login.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) if is_login_conflict(&detail) => {
                Self::LoginTaken(detail)
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

/// Every failure reaching the transport is infrastructure: log the detail and
/// hand the caller the opaque status.
impl From<UserError> for tonic::Status {
    fn from(err: UserError) -> Self {
        core_grpc::internal_status(err)
    }
}
