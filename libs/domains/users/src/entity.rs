use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::error::UserError;

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub login: String,
    pub credential_digest: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for crate::models::User {
    type Error = UserError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = u64::try_from(model.id)
            .map_err(|_| UserError::Internal(format!("stored user id {} is negative", model.id)))?;

        Ok(Self {
            id,
            login: model.login,
            credential_digest: model.credential_digest,
            created_at: model.created_at.into(),
        })
    }
}

// id and created_at are left to the column defaults
impl From<crate::models::NewUser> for ActiveModel {
    fn from(input: crate::models::NewUser) -> Self {
        ActiveModel {
            login: Set(input.login),
            credential_digest: Set(input.credential_digest),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn model(id: i64) -> Model {
        Model {
            id,
            login: "alice".to_string(),
            credential_digest: "d1".to_string(),
            created_at: chrono::Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_model_converts_to_user() {
        let user = User::try_from(model(i64::MAX)).unwrap();
        assert_eq!(user.id, i64::MAX as u64);
        assert_eq!(user.login, "alice");
        assert_eq!(user.credential_digest, "d1");
    }

    #[test]
    fn test_negative_id_is_rejected() {
        let err = User::try_from(model(-1)).unwrap_err();
        assert!(matches!(err, UserError::Internal(ref msg) if msg.contains("-1")));
    }
}
