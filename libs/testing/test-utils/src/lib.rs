//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the workspace migrations applied
//! - `TestDataBuilder`: deterministic logins and digests per test
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore] // Requires Docker
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let login = builder.login("admin");
//!     let digest = builder.digest("admin");
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic values
///
/// Values are derived from a seed, so two tests sharing a database never
/// collide on the unique login column as long as their names differ.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_register");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A login unique to this builder, e.g. `user-12345-alice`
    pub fn login(&self, suffix: &str) -> String {
        format!("user-{}-{}", self.seed, suffix)
    }

    /// A stand-in credential digest (128 hex chars, like the real codec)
    pub fn digest(&self, suffix: &str) -> String {
        let tag = suffix
            .bytes()
            .fold(self.seed, |acc, b| acc.rotate_left(5) ^ u64::from(b));
        format!("{:016x}", tag).repeat(8)
    }
}
