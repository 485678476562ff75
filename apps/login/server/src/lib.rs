//! Login gRPC Service
//!
//! Credential verification and the user directory over gRPC.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, optional Zstd compression)
//! LoginServiceImpl (service.rs)
//!   ↓ (proto ↔ domain conversions)
//! DirectoryService (domain layer)
//!   ↓
//! PgUserRepository (persistence)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Modules
//!
//! - `config`: environment configuration for the process
//! - `conversions`: domain outcomes → proto messages
//! - `server`: server initialization and lifecycle
//! - `service`: gRPC service implementation (LoginServiceImpl)

pub mod config;
pub mod conversions;
pub mod server;
pub mod service;

// Re-export for convenience
pub use config::AppConfig;
pub use server::run;
pub use service::LoginServiceImpl;
