//! # gRPC server support
//!
//! Shared plumbing for the tonic services in this workspace:
//!
//! - [`server::ServerConfig`]: bind address, compression and message limits
//!   loaded from `GRPC_*` environment variables
//! - [`server::GrpcServer`]: startup logging and `grpc.health.v1` reporting
//! - [`error`]: masking infrastructure failures behind an opaque status
//! - [`conversions`]: timestamp helper for proto `int64` fields
//!
//! ## Quick Start
//!
//! ```ignore
//! use core_config::FromEnv;
//! use core_grpc::server::{GrpcServer, ServerConfig, create_health_service};
//! use rpc::login::login_service_server::{LoginServiceServer, SERVICE_NAME};
//! use tonic::transport::Server;
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = create_health_service();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! Server::builder()
//!     .add_service(health_service)
//!     .add_service(LoginServiceServer::new(my_impl))
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

pub mod conversions;
pub mod error;
pub mod server;

pub use error::{GrpcError, GrpcResult, INTERNAL_ERROR_MESSAGE, internal_status};
