//! Application data repository.
//!
//! Handles whitelist application rows: submission, the accept/reject state
//! flips, and the queries the user profile and admin review views need.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::application::{
    Application, ApplicationCounts, ApplicationStatus, CreateApplicationParam,
};

pub struct ApplicationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new pending application.
    pub async fn create(&self, param: CreateApplicationParam) -> Result<Application, DbErr> {
        let now = Utc::now();
        let entity = entity::application::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            faction_id: ActiveValue::Set(param.faction_id),
            character_name: ActiveValue::Set(param.character_name),
            character_race: ActiveValue::Set(param.character_race),
            character_class: ActiveValue::Set(param.character_class),
            backstory: ActiveValue::Set(param.backstory),
            description: ActiveValue::Set(param.description),
            status: ActiveValue::Set(ApplicationStatus::Pending),
            rejection_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Application::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Application>, DbErr> {
        let entity = entity::prelude::Application::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Application::from_entity))
    }

    /// Gets all applications a user has submitted, newest first.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<Application>, DbErr> {
        let entities = entity::prelude::Application::find()
            .filter(entity::application::Column::UserId.eq(user_id))
            .order_by_desc(entity::application::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Application::from_entity).collect())
    }

    /// Gets the user's most recent application, if any.
    ///
    /// The cooldown window for resubmission is measured from this row.
    pub async fn latest_for_user(&self, user_id: i32) -> Result<Option<Application>, DbErr> {
        let entity = entity::prelude::Application::find()
            .filter(entity::application::Column::UserId.eq(user_id))
            .order_by_desc(entity::application::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(Application::from_entity))
    }

    /// Whether the user has an application still waiting for review.
    pub async fn pending_exists_for_user(&self, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Application::find()
            .filter(entity::application::Column::UserId.eq(user_id))
            .filter(entity::application::Column::Status.eq(ApplicationStatus::Pending))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets all applications in the given state, oldest first, for the admin
    /// review queues.
    pub async fn get_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>, DbErr> {
        let entities = entity::prelude::Application::find()
            .filter(entity::application::Column::Status.eq(status))
            .order_by_asc(entity::application::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Application::from_entity).collect())
    }

    /// Application counts by status for the admin dashboard.
    pub async fn counts(&self) -> Result<ApplicationCounts, DbErr> {
        let pending = self.count_status(ApplicationStatus::Pending).await?;
        let accepted = self.count_status(ApplicationStatus::Accepted).await?;
        let rejected = self.count_status(ApplicationStatus::Rejected).await?;

        Ok(ApplicationCounts {
            pending,
            accepted,
            rejected,
        })
    }

    /// Flips an application to accepted.
    ///
    /// Clears any rejection reason left over from a previous rejection, so a
    /// re-reviewed application reads cleanly.
    pub async fn set_accepted(&self, id: i32) -> Result<Application, DbErr> {
        let entity = self.require(id).await?;

        let mut active: entity::application::ActiveModel = entity.into();
        active.status = ActiveValue::Set(ApplicationStatus::Accepted);
        active.rejection_reason = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Application::from_entity(active.update(self.db).await?))
    }

    /// Flips an application to rejected with a reason.
    pub async fn set_rejected(&self, id: i32, reason: Option<String>) -> Result<Application, DbErr> {
        let entity = self.require(id).await?;

        let mut active: entity::application::ActiveModel = entity.into();
        active.status = ActiveValue::Set(ApplicationStatus::Rejected);
        active.rejection_reason = ActiveValue::Set(reason);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Application::from_entity(active.update(self.db).await?))
    }

    async fn count_status(&self, status: ApplicationStatus) -> Result<u64, DbErr> {
        entity::prelude::Application::find()
            .filter(entity::application::Column::Status.eq(status))
            .count(self.db)
            .await
    }

    async fn require(&self, id: i32) -> Result<entity::application::Model, DbErr> {
        entity::prelude::Application::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Application with id {} not found",
                id
            )))
    }
}
