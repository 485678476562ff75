use core_config::{ConfigError, FromEnv, env_flag};
use core_grpc::server::ServerConfig;
use database::postgres::PostgresConfig;

/// Everything the login server reads from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: PostgresConfig,
    pub server: ServerConfig,
    /// `RUN_MIGRATIONS` (default: true)
    pub run_migrations: bool,
}

impl FromEnv for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: PostgresConfig::from_env()?,
            server: ServerConfig::from_env()?,
            run_migrations: env_flag("RUN_MIGRATIONS", true)?,
        })
    }
}
