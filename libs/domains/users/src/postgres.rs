use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};

use crate::{
    entity::{self, Column, Entity},
    error::{UserError, UserResult},
    models::{NewUser, User, UserChanges, UserFilter},
    repository::UserRepository,
};

// Postgres binds LIMIT and OFFSET as signed bigint
const MAX_WINDOW: u64 = i64::MAX as u64;

// A statement accepts at most 65535 bind parameters
const ID_BATCH_SIZE: usize = 10_000;

// Keeps BIGSERIAL ahead of rows inserted with explicit ids
const SYNC_ID_SEQUENCE: &str = "SELECT setval(pg_get_serial_sequence('users', 'id'), \
     GREATEST((SELECT COALESCE(MAX(id), 0) FROM users), 1))";

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &UserFilter) -> Select<Entity> {
        let query = Entity::find();
        match filter.login_contains.as_deref() {
            Some(needle) => {
                query.filter(Column::Login.like(LikeExpr::new(like_pattern(needle)).escape('\\')))
            }
            None => query,
        }
    }

    /// Login-ordered window, or `None` when `offset` lies past any row the
    /// store can hold. `limit` is capped to what Postgres accepts.
    fn page_query(filter: &UserFilter, offset: u64, limit: u64) -> Option<Select<Entity>> {
        if offset > MAX_WINDOW {
            return None;
        }

        Some(
            Self::filtered(filter)
                .order_by_asc(Column::Login)
                .offset(offset)
                .limit(limit.min(MAX_WINDOW)),
        )
    }

    fn ids_query(batch: &[i64]) -> Select<Entity> {
        Entity::find()
            .filter(Column::Id.is_in(batch.iter().copied()))
            .order_by_asc(Column::Id)
    }
}

/// Storable ids, sorted and deduplicated, split into statement-sized batches
fn id_batches(ids: Vec<u64>) -> Vec<Vec<i64>> {
    let mut ids: Vec<i64> = ids.into_iter().filter_map(store_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.chunks(ID_BATCH_SIZE).map(<[i64]>::to_vec).collect()
}

fn into_users(models: Vec<entity::Model>) -> UserResult<Vec<User>> {
    models.into_iter().map(User::try_from).collect()
}

/// `%needle%` with LIKE metacharacters in `needle` escaped by backslash
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Ids above i64::MAX cannot be stored, so no row can have them
fn store_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_login(&self, login: &str) -> UserResult<Option<User>> {
        let model = Entity::find()
            .filter(Column::Login.eq(login))
            .one(&self.db)
            .await?;

        model.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: u64) -> UserResult<Option<User>> {
        let Some(id) = store_id(id) else {
            return Ok(None);
        };

        let model = Entity::find_by_id(id).one(&self.db).await?;
        model.map(User::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: Vec<u64>) -> UserResult<Vec<User>> {
        let mut users = Vec::new();
        for batch in id_batches(ids) {
            let models = Self::ids_query(&batch).all(&self.db).await?;
            users.extend(into_users(models)?);
        }

        Ok(users)
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let login = input.login.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| UserError::from_db(e, &login))?;

        tracing::info!(user_id = model.id, login = %model.login, "Created user");
        User::try_from(model)
    }

    async fn create_with_id(&self, id: u64, input: NewUser) -> UserResult<User> {
        let row_id = store_id(id)
            .ok_or_else(|| UserError::Internal(format!("id {} exceeds the store range", id)))?;
        let login = input.login.clone();

        let mut active_model: entity::ActiveModel = input.into();
        active_model.id = Set(row_id);

        let txn = self.db.begin().await?;
        let model = active_model
            .insert(&txn)
            .await
            .map_err(|e| UserError::from_db(e, &login))?;
        txn.execute_unprepared(SYNC_ID_SEQUENCE).await?;
        txn.commit().await?;

        tracing::info!(user_id = model.id, login = %model.login, "Seeded user");
        User::try_from(model)
    }

    async fn update_fields(&self, id: u64, changes: UserChanges) -> UserResult<bool> {
        let Some(id) = store_id(id) else {
            return Ok(false);
        };
        if changes.is_empty() {
            return Ok(Entity::find_by_id(id).count(&self.db).await? > 0);
        }

        let login = changes.login.clone().unwrap_or_default();
        let mut update = Entity::update_many().filter(Column::Id.eq(id));
        if let Some(new_login) = changes.login {
            update = update.col_expr(Column::Login, Expr::value(new_login));
        }
        if let Some(digest) = changes.credential_digest {
            update = update.col_expr(Column::CredentialDigest, Expr::value(digest));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| UserError::from_db(e, &login))?;

        tracing::info!(user_id = id, rows = result.rows_affected, "Updated user");
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: u64) -> UserResult<()> {
        let Some(id) = store_id(id) else {
            return Ok(());
        };

        let result = Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(())
    }

    async fn count_matching(&self, filter: &UserFilter) -> UserResult<u64> {
        Ok(Self::filtered(filter).count(&self.db).await?)
    }

    async fn list_page(
        &self,
        filter: &UserFilter,
        offset: u64,
        limit: u64,
    ) -> UserResult<Vec<User>> {
        let Some(query) = Self::page_query(filter, offset, limit) else {
            return Ok(Vec::new());
        };

        into_users(query.all(&self.db).await?)
    }
}
