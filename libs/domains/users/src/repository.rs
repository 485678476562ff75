use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserChanges, UserFilter};

/// Repository trait for User persistence
///
/// Lookups by id treat ids the store cannot represent as absent rather than
/// failing. Writes that would give two rows the same login fail with
/// [`UserError::LoginTaken`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by exact (case-sensitive) login
    async fn find_by_login(&self, login: &str) -> UserResult<Option<User>>;

    /// Get a user by ID
    async fn find_by_id(&self, id: u64) -> UserResult<Option<User>>;

    /// Get every user whose id is in `ids`; missing ids are skipped
    async fn find_by_ids(&self, ids: Vec<u64>) -> UserResult<Vec<User>>;

    /// Create a user, letting the store assign id and creation time
    async fn create(&self, input: NewUser) -> UserResult<User>;

    /// Create a user with a caller-chosen id
    async fn create_with_id(&self, id: u64, input: NewUser) -> UserResult<User>;

    /// Apply `changes` in one statement. Returns false when no row has `id`.
    async fn update_fields(&self, id: u64, changes: UserChanges) -> UserResult<bool>;

    /// Delete a user by ID; deleting an absent id is not an error
    async fn delete(&self, id: u64) -> UserResult<()>;

    /// Count users matching the filter
    async fn count_matching(&self, filter: &UserFilter) -> UserResult<u64>;

    /// One page of matching users ordered by login ascending
    async fn list_page(&self, filter: &UserFilter, offset: u64, limit: u64)
    -> UserResult<Vec<User>>;
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<u64, User>,
    next_id: u64,
}

impl Table {
    fn login_held_by_other(&self, login: &str, id: Option<u64>) -> bool {
        self.rows
            .values()
            .any(|u| u.login == login && Some(u.id) != id)
    }

    fn matching<'a>(&'a self, filter: &'a UserFilter) -> impl Iterator<Item = &'a User> + 'a {
        self.rows.values().filter(|u| filter.matches(&u.login))
    }
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Mirrors the Postgres adapter: ids start at 1, logins are unique and
/// case-sensitive, seeded ids push the next assigned id past them.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_login(&self, login: &str) -> UserResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.login == login).cloned())
    }

    async fn find_by_id(&self, id: u64) -> UserResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: Vec<u64>) -> UserResult<Vec<User>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut table = self.table.write().await;

        if table.login_held_by_other(&input.login, None) {
            return Err(UserError::LoginTaken(input.login));
        }

        let id = table.next_id.max(1);
        let user = User {
            id,
            login: input.login,
            credential_digest: input.credential_digest,
            created_at: Utc::now(),
        };
        table.next_id = id + 1;
        table.rows.insert(id, user.clone());

        tracing::info!(user_id = id, login = %user.login, "Created user");
        Ok(user)
    }

    async fn create_with_id(&self, id: u64, input: NewUser) -> UserResult<User> {
        let mut table = self.table.write().await;

        if table.rows.contains_key(&id) {
            return Err(UserError::Database(format!("duplicate primary key {}", id)));
        }
        if table.login_held_by_other(&input.login, None) {
            return Err(UserError::LoginTaken(input.login));
        }

        let user = User {
            id,
            login: input.login,
            credential_digest: input.credential_digest,
            created_at: Utc::now(),
        };
        table.next_id = table.next_id.max(id.saturating_add(1));
        table.rows.insert(id, user.clone());

        tracing::info!(user_id = id, login = %user.login, "Seeded user");
        Ok(user)
    }

    async fn update_fields(&self, id: u64, changes: UserChanges) -> UserResult<bool> {
        let mut table = self.table.write().await;

        if let Some(login) = &changes.login {
            if table.login_held_by_other(login, Some(id)) {
                return Err(UserError::LoginTaken(login.clone()));
            }
        }

        let Some(user) = table.rows.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(login) = changes.login {
            user.login = login;
        }
        if let Some(digest) = changes.credential_digest {
            user.credential_digest = digest;
        }

        tracing::info!(user_id = id, "Updated user");
        Ok(true)
    }

    async fn delete(&self, id: u64) -> UserResult<()> {
        let mut table = self.table.write().await;
        if table.rows.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(())
    }

    async fn count_matching(&self, filter: &UserFilter) -> UserResult<u64> {
        let table = self.table.read().await;
        Ok(table.matching(filter).count() as u64)
    }

    async fn list_page(
        &self,
        filter: &UserFilter,
        offset: u64,
        limit: u64,
    ) -> UserResult<Vec<User>> {
        let table = self.table.read().await;

        let mut result: Vec<User> = table.matching(filter).cloned().collect();
        result.sort_by(|a, b| a.login.cmp(&b.login));

        Ok(result
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }
}
