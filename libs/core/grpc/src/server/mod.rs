//! gRPC Server Builder
//!
//! Utilities for bringing up a tonic server with health checks,
//! compression, and standard configuration.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use core_grpc::server::{GrpcServer, ServerConfig, create_health_service};
//! use rpc::login::login_service_server::{LoginServiceServer, SERVICE_NAME};
//! use tonic::transport::Server;
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = create_health_service();
//!
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! Server::builder()
//!     .add_service(health_service)
//!     .add_service(
//!         LoginServiceServer::new(my_impl)
//!             .accept_compressed(CompressionEncoding::Zstd)
//!             .send_compressed(CompressionEncoding::Zstd),
//!     )
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

mod builder;
mod config;
mod shutdown;

pub use builder::{GrpcServer, create_health_service};
pub use config::ServerConfig;
pub use shutdown::shutdown_signal;
