//! Users Domain
//!
//! Account storage and credential checks for the login service.
//!
//! # Features
//!
//! - Verify / Register against a caller-supplied credential digest
//! - Login and password changes guarded by the current digest
//! - Lookup by ids and paged, filtered listing ordered by login
//! - One-off seeding of an account with a fixed id
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Transport  │  ← gRPC (apps/login/server)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← DirectoryService: outcomes, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← UserRepository (Postgres, in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, NewUser, UserChanges, entity
//! └─────────────┘
//! ```
//!
//! Digests are produced by the caller (see [`codec`]); the service only
//! stores and compares them.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{DirectoryService, InMemoryUserRepository};
//!
//! # async fn run() -> domain_users::UserResult<()> {
//! let service = DirectoryService::new(InMemoryUserRepository::new());
//! let outcome = service.register("alice", "digest").await?;
//! assert!(outcome.success);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use codec::{CredentialCodec, Sha512Codec};
pub use error::{UserError, UserResult};
pub use models::{
    AuthOutcome, NewUser, SeedOutcome, User, UserChanges, UserFilter, UserPage, UserSummary,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::DirectoryService;
