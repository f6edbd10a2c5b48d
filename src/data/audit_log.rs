//! Audit log data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::audit::{AuditLogEntry, CreateAuditLogParam};

pub struct AuditLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateAuditLogParam) -> Result<AuditLogEntry, DbErr> {
        let entity = entity::audit_log::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            action: ActiveValue::Set(param.action.as_tag()),
            target_type: ActiveValue::Set(param.target_type),
            target_id: ActiveValue::Set(param.target_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(AuditLogEntry::from_entity(entity))
    }

    /// DataTables query over the audit trail.
    ///
    /// The search term matches the acting user's name, the action tag, or
    /// the target type. Rows come back newest first together with the acting
    /// user's username for display.
    ///
    /// # Returns
    /// - `Ok((rows, filtered, total))` - Page of (entry, username) pairs plus
    ///   the filtered count and the unfiltered total
    /// - `Err(DbErr)` - Database error during query
    pub async fn search_paginated(
        &self,
        search: Option<&str>,
        start: u64,
        length: u64,
    ) -> Result<(Vec<(AuditLogEntry, String)>, u64, u64), DbErr> {
        let mut query = entity::prelude::AuditLog::find();

        if let Some(term) = search {
            let pattern = format!("%{}%", term);

            // Resolve matching usernames first; filtering through the
            // relation here would collide with the join find_also_related
            // adds below.
            let matching_user_ids: Vec<i32> = entity::prelude::User::find()
                .filter(entity::user::Column::Username.like(&pattern))
                .all(self.db)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect();

            query = query.filter(
                Condition::any()
                    .add(entity::audit_log::Column::UserId.is_in(matching_user_ids))
                    .add(entity::audit_log::Column::Action.like(&pattern))
                    .add(entity::audit_log::Column::TargetType.like(&pattern)),
            );
        }

        let filtered = query.clone().count(self.db).await?;
        let total = entity::prelude::AuditLog::find().count(self.db).await?;

        let rows = query
            .order_by_desc(entity::audit_log::Column::CreatedAt)
            .offset(start)
            .limit(length)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        let entries = rows
            .into_iter()
            .map(|(entry, user)| {
                let username = user.map(|u| u.username).unwrap_or_default();
                (AuditLogEntry::from_entity(entry), username)
            })
            .collect();

        Ok((entries, filtered, total))
    }
}
