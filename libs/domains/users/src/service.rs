use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{AuthOutcome, NewUser, SeedOutcome, UserChanges, UserFilter, UserPage, UserSummary};
use crate::repository::UserRepository;

/// Credential checks and directory queries over a [`UserRepository`].
///
/// Negative outcomes (unknown user, wrong digest, login in use) are values.
/// `Err` is reserved for store failures.
#[derive(Clone)]
pub struct DirectoryService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> DirectoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Check a login against the supplied digest
    #[instrument(skip(self, salted))]
    pub async fn verify(&self, login: &str, salted: &str) -> UserResult<AuthOutcome> {
        let outcome = match self.repository.find_by_login(login).await? {
            Some(user) if user.digest_matches(salted) => AuthOutcome::accepted(user.id),
            _ => AuthOutcome::rejected(),
        };
        Ok(outcome)
    }

    /// Create an account unless the login is unusable or already taken
    #[instrument(skip(self, salted))]
    pub async fn register(&self, login: &str, salted: &str) -> UserResult<AuthOutcome> {
        let input = NewUser::new(login, salted);
        if input.validate().is_err() {
            return Ok(AuthOutcome::rejected());
        }

        if self.repository.find_by_login(login).await?.is_some() {
            return Ok(AuthOutcome::rejected());
        }

        match self.repository.create(input).await {
            Ok(user) => Ok(AuthOutcome::accepted(user.id)),
            // Lost a race with a concurrent registration
            Err(UserError::LoginTaken(_)) => Ok(AuthOutcome::rejected()),
            Err(e) => Err(e),
        }
    }

    /// Rename a user after checking its current digest.
    ///
    /// A non-empty `new_salted` replaces the digest in the same write, for
    /// clients that fold the login into their salt.
    #[instrument(skip(self, old_salted, new_salted))]
    pub async fn change_login(
        &self,
        user_id: u64,
        old_salted: &str,
        new_login: &str,
        new_salted: &str,
    ) -> UserResult<bool> {
        let changes = UserChanges {
            login: Some(new_login.to_string()),
            credential_digest: (!new_salted.is_empty()).then(|| new_salted.to_string()),
        };
        if changes.validate().is_err() {
            return Ok(false);
        }

        let Some(user) = self.repository.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if !user.digest_matches(old_salted) {
            return Ok(false);
        }

        if user.login != new_login {
            if let Some(holder) = self.repository.find_by_login(new_login).await? {
                if holder.id != user_id {
                    return Ok(false);
                }
            }
        }

        match self.repository.update_fields(user_id, changes).await {
            Ok(updated) => Ok(updated),
            Err(UserError::LoginTaken(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Replace the digest after checking the current one
    #[instrument(skip(self, old_salted, new_salted))]
    pub async fn change_password(
        &self,
        user_id: u64,
        old_salted: &str,
        new_salted: &str,
    ) -> UserResult<bool> {
        let Some(user) = self.repository.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if !user.digest_matches(old_salted) {
            return Ok(false);
        }

        let changes = UserChanges {
            credential_digest: Some(new_salted.to_string()),
            ..Default::default()
        };
        self.repository.update_fields(user_id, changes).await
    }

    /// Summaries for the ids that exist
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn get_users(&self, ids: &[u64]) -> UserResult<Vec<UserSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.repository.find_by_ids(ids.to_vec()).await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    /// The `[start, end)` window of users ordered by login, plus the match count
    #[instrument(skip(self))]
    pub async fn list_users(&self, start: u64, end: u64, filter: &str) -> UserResult<UserPage> {
        let filter = UserFilter::from_raw(filter);

        let total = self.repository.count_matching(&filter).await?;
        if total == 0 || end <= start {
            return Ok(UserPage {
                list: Vec::new(),
                total,
            });
        }

        let users = self.repository.list_page(&filter, start, end - start).await?;
        Ok(UserPage {
            list: users.into_iter().map(UserSummary::from).collect(),
            total,
        })
    }

    /// Remove a user; absent ids succeed too
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: u64) -> UserResult<bool> {
        self.repository.delete(user_id).await?;
        Ok(true)
    }

    /// Create the bootstrap account with a fixed id, once
    #[instrument(skip(self, salted))]
    pub async fn seed(&self, id: u64, login: &str, salted: &str) -> UserResult<SeedOutcome> {
        if self.repository.find_by_id(id).await?.is_some() {
            return Ok(SeedOutcome::AlreadyPresent);
        }

        let input = NewUser::new(login, salted);
        input
            .validate()
            .map_err(|e| UserError::Internal(format!("invalid seed login: {}", e)))?;

        let user = self.repository.create_with_id(id, input).await?;
        Ok(SeedOutcome::Created(user))
    }
}
