use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Width of the `login` column.
pub const MAX_LOGIN_LENGTH: u64 = 255;

/// A stored account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    /// Digest supplied by the client at registration or last change
    #[serde(skip_serializing)]
    pub credential_digest: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Exact comparison against the stored digest
    pub fn digest_matches(&self, supplied: &str) -> bool {
        self.credential_digest == supplied
    }
}

/// Input for creating a user; the store assigns id and creation time
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = MAX_LOGIN_LENGTH))]
    pub login: String,
    pub credential_digest: String,
}

impl NewUser {
    pub fn new(login: impl Into<String>, credential_digest: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            credential_digest: credential_digest.into(),
        }
    }
}

/// Partial update applied in a single statement; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UserChanges {
    #[validate(length(min = 1, max = MAX_LOGIN_LENGTH))]
    pub login: Option<String>,
    pub credential_digest: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.credential_digest.is_none()
    }
}

/// Substring filter on login, case-sensitive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub login_contains: Option<String>,
}

impl UserFilter {
    /// An empty string means "no filter"
    pub fn from_raw(filter: &str) -> Self {
        Self {
            login_contains: (!filter.is_empty()).then(|| filter.to_string()),
        }
    }

    pub fn matches(&self, login: &str) -> bool {
        self.login_contains
            .as_deref()
            .is_none_or(|needle| login.contains(needle))
    }
}

/// Result of Verify and Register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    /// Meaningful only when `success` is true
    pub id: u64,
}

impl AuthOutcome {
    pub fn accepted(id: u64) -> Self {
        Self { success: true, id }
    }

    pub fn rejected() -> Self {
        Self::default()
    }
}

/// Public projection of a user, without the digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: u64,
    pub login: String,
    pub registered_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            registered_at: user.created_at,
        }
    }
}

/// One page of ListUsers plus the number of rows matching the filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPage {
    pub list: Vec<UserSummary>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(User),
    /// A row with the requested id exists; nothing was written
    AlreadyPresent,
}
