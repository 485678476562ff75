/// Errors raised while connecting to or probing the store
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Statement failed, e.g. while applying migrations
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
