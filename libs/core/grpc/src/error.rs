use std::fmt::Display;
use std::net::AddrParseError;

use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Message carried by every masked infrastructure failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal service error";

/// Errors raised while bringing a gRPC server up
#[derive(Error, Debug)]
pub enum GrpcError {
  /// GRPC_HOST / GRPC_PORT do not form a socket address
  #[error("Invalid bind address '{addr}': {source}")]
  InvalidAddress {
    addr: String,
    #[source]
    source: AddrParseError,
  },
}

/// Log `err` and return the opaque internal status.
///
/// Callers never learn store details; operators find them in the logs.
///
/// # Example
/// ```ignore
/// let outcome = service.verify(&login, &salted).await.map_err(internal_status)?;
/// ```
pub fn internal_status(err: impl Display) -> tonic::Status {
  tracing::error!(error = %err, "Request failed");
  tonic::Status::internal(INTERNAL_ERROR_MESSAGE)
}
