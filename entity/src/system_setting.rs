//! Single-row site settings.
//!
//! The row is created on demand the first time settings are read. All
//! reads in request paths go through the settings cache; every setter
//! invalidates it.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "system_setting")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub applications_open: bool,
    pub can_register: bool,
    pub join_discord_on_register: bool,
    pub maintenance_mode: bool,
    pub site_theme: String,
    pub min_application_length: i32,
    pub max_application_length: i32,
    pub panel_api_key: Option<String>,
    pub panel_api_url: Option<String>,
    pub live_server_uuid: Option<String>,
    pub staging_server_uuid: Option<String>,
    pub fallback_server_uuid: Option<String>,
    pub ticket_webhook: Option<String>,
    pub application_webhook: Option<String>,
    pub general_webhook: Option<String>,
    pub dev_webhook: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
