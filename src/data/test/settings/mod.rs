mod get_or_create;
mod update;

use crate::data::settings::SettingsRepository;
use crate::model::settings::UpdateSettingsParam;
use entity::prelude::SystemSetting;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

fn full_param() -> UpdateSettingsParam {
    UpdateSettingsParam {
        applications_open: true,
        can_register: false,
        join_discord_on_register: true,
        maintenance_mode: false,
        site_theme: "light".to_string(),
        min_application_length: 300,
        max_application_length: 900,
        panel_api_key: Some("key".to_string()),
        panel_api_url: Some("https://panel.example.com/api/client/".to_string()),
        live_server_uuid: Some("live-uuid".to_string()),
        staging_server_uuid: Some("staging-uuid".to_string()),
        fallback_server_uuid: None,
        ticket_webhook: Some("https://discord.com/api/webhooks/1/a".to_string()),
        application_webhook: None,
        general_webhook: None,
        dev_webhook: None,
    }
}
