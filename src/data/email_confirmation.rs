//! Email confirmation token data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

/// Pending confirmation token row.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailConfirmationToken {
    pub id: i32,
    pub user_id: i32,
    pub email: String,
    pub token: String,
}

impl EmailConfirmationToken {
    fn from_entity(entity: entity::email_confirmation::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            email: entity.email,
            token: entity.token,
        }
    }
}

pub struct EmailConfirmationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmailConfirmationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        email: &str,
        token: &str,
    ) -> Result<EmailConfirmationToken, DbErr> {
        let now = Utc::now();
        let entity = entity::email_confirmation::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            email: ActiveValue::Set(email.to_string()),
            token: ActiveValue::Set(token.to_string()),
            is_used: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(EmailConfirmationToken::from_entity(entity))
    }

    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<EmailConfirmationToken>, DbErr> {
        let entity = entity::prelude::EmailConfirmation::find()
            .filter(entity::email_confirmation::Column::Token.eq(token))
            .filter(entity::email_confirmation::Column::IsUsed.eq(false))
            .one(self.db)
            .await?;

        Ok(entity.map(EmailConfirmationToken::from_entity))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::EmailConfirmation::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
