//! gRPC server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Tracing and error report initialization
//! - Database connection (with retry) and migrations
//! - Service creation
//! - gRPC server configuration, startup and graceful shutdown
//! - Health check service (grpc.health.v1.Health)

use core_config::{Environment, FromEnv};
use core_grpc::server::{GrpcServer, create_health_service, shutdown_signal};
use database::postgres::{check_health, connect_from_config_with_retry, run_migrations};
use domain_users::{DirectoryService, PgUserRepository};
use eyre::{Result, WrapErr};
use migration::Migrator;
use rpc::login::login_service_server::{LoginServiceServer, SERVICE_NAME};
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tracing::info;

use crate::config::AppConfig;
use crate::service::LoginServiceImpl;

/// Run the gRPC server
///
/// 1. Sets up color-eyre and structured logging (JSON for prod, pretty for dev)
/// 2. Connects to the database with retry logic and applies migrations
/// 3. Creates the repository and service layers
/// 4. Marks the service SERVING once the database answers
/// 5. Serves until SIGINT/SIGTERM, then reports NOT_SERVING and drains
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database stays
/// unreachable past the retry budget, a migration fails, or the server
/// cannot bind.
pub async fn run() -> Result<()> {
    core_config::tracing::install_color_eyre();
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let config = AppConfig::from_env().wrap_err("Failed to load configuration")?;
    let addr = config.server.socket_addr()?;

    info!("Connecting to database...");
    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .wrap_err("Failed to connect to database")?;
    info!("Connected to database successfully");

    if config.run_migrations {
        run_migrations::<Migrator>(&db, "login_server")
            .await
            .wrap_err("Failed to apply migrations")?;
    }

    let repository = PgUserRepository::new(db.clone());
    let login_service = LoginServiceImpl::new(DirectoryService::new(repository));

    let (health_reporter, health_service) = create_health_service();
    GrpcServer::set_not_serving(&health_reporter, SERVICE_NAME).await;
    check_health(&db)
        .await
        .wrap_err("Database health check failed")?;
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;

    let mut login_server = LoginServiceServer::new(login_service)
        .max_decoding_message_size(config.server.max_decoding_message_size)
        .max_encoding_message_size(config.server.max_encoding_message_size);
    if config.server.enable_compression {
        login_server = login_server
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    GrpcServer::log_startup(&config.server, SERVICE_NAME);

    let shutdown_reporter = health_reporter.clone();
    Server::builder()
        .tcp_keepalive(Some(config.server.keepalive()))
        .add_service(health_service)
        .add_service(login_server)
        .serve_with_shutdown(addr, async move {
            shutdown_signal().await;
            GrpcServer::set_not_serving(&shutdown_reporter, SERVICE_NAME).await;
        })
        .await
        .wrap_err("gRPC server failed")?;

    info!("gRPC server stopped");
    Ok(())
}
