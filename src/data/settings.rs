//! Settings data repository.
//!
//! The settings table holds exactly one row. Reads go through
//! `get_or_create`, which seeds defaults on the first call, so no migration
//! or startup step has to insert the row.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

use crate::model::settings::{SiteSettings, UpdateSettingsParam};

pub struct SettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the settings row, inserting defaults if none exists yet.
    pub async fn get_or_create(&self) -> Result<SiteSettings, DbErr> {
        if let Some(entity) = self.first_row().await? {
            return Ok(SiteSettings::from_entity(entity));
        }

        let now = Utc::now();
        let entity = entity::system_setting::ActiveModel {
            applications_open: ActiveValue::Set(false),
            can_register: ActiveValue::Set(true),
            join_discord_on_register: ActiveValue::Set(false),
            maintenance_mode: ActiveValue::Set(false),
            site_theme: ActiveValue::Set("dark".to_string()),
            min_application_length: ActiveValue::Set(500),
            max_application_length: ActiveValue::Set(750),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(SiteSettings::from_entity(entity))
    }

    /// Replaces every editable field of the settings row.
    pub async fn update(&self, param: UpdateSettingsParam) -> Result<SiteSettings, DbErr> {
        // Make sure the row exists before updating it.
        self.get_or_create().await?;
        let entity = self.first_row().await?.ok_or(DbErr::RecordNotFound(
            "Settings row disappeared during update".to_string(),
        ))?;

        let mut active: entity::system_setting::ActiveModel = entity.into();
        active.applications_open = ActiveValue::Set(param.applications_open);
        active.can_register = ActiveValue::Set(param.can_register);
        active.join_discord_on_register = ActiveValue::Set(param.join_discord_on_register);
        active.maintenance_mode = ActiveValue::Set(param.maintenance_mode);
        active.site_theme = ActiveValue::Set(param.site_theme);
        active.min_application_length = ActiveValue::Set(param.min_application_length);
        active.max_application_length = ActiveValue::Set(param.max_application_length);
        active.panel_api_key = ActiveValue::Set(param.panel_api_key);
        active.panel_api_url = ActiveValue::Set(param.panel_api_url);
        active.live_server_uuid = ActiveValue::Set(param.live_server_uuid);
        active.staging_server_uuid = ActiveValue::Set(param.staging_server_uuid);
        active.fallback_server_uuid = ActiveValue::Set(param.fallback_server_uuid);
        active.ticket_webhook = ActiveValue::Set(param.ticket_webhook);
        active.application_webhook = ActiveValue::Set(param.application_webhook);
        active.general_webhook = ActiveValue::Set(param.general_webhook);
        active.dev_webhook = ActiveValue::Set(param.dev_webhook);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(SiteSettings::from_entity(active.update(self.db).await?))
    }

    /// Flips the applications-open toggle alone.
    pub async fn set_applications_open(&self, open: bool) -> Result<SiteSettings, DbErr> {
        self.get_or_create().await?;
        let entity = self.first_row().await?.ok_or(DbErr::RecordNotFound(
            "Settings row disappeared during update".to_string(),
        ))?;

        let mut active: entity::system_setting::ActiveModel = entity.into();
        active.applications_open = ActiveValue::Set(open);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(SiteSettings::from_entity(active.update(self.db).await?))
    }

    async fn first_row(&self) -> Result<Option<entity::system_setting::Model>, DbErr> {
        entity::prelude::SystemSetting::find()
            .order_by_asc(entity::system_setting::Column::Id)
            .one(self.db)
            .await
    }
}
