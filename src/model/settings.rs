//! Site settings domain model and update parameters.
//!
//! The settings live in a single database row and are read through the
//! settings cache on every request path that needs them. The `WebhookKind`
//! enum names the four outbound webhook destinations an admin can configure.

use serde::Serialize;

/// Snapshot of the single settings row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSettings {
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
}

impl SiteSettings {
    pub fn from_entity(entity: entity::system_setting::Model) -> Self {
        Self {
            applications_open: entity.applications_open,
            can_register: entity.can_register,
            join_discord_on_register: entity.join_discord_on_register,
            maintenance_mode: entity.maintenance_mode,
            site_theme: entity.site_theme,
            min_application_length: entity.min_application_length,
            max_application_length: entity.max_application_length,
            panel_api_key: entity.panel_api_key,
            panel_api_url: entity.panel_api_url,
            live_server_uuid: entity.live_server_uuid,
            staging_server_uuid: entity.staging_server_uuid,
            fallback_server_uuid: entity.fallback_server_uuid,
            ticket_webhook: entity.ticket_webhook,
            application_webhook: entity.application_webhook,
            general_webhook: entity.general_webhook,
            dev_webhook: entity.dev_webhook,
        }
    }

    /// URL configured for the given webhook destination, if any.
    pub fn webhook_url(&self, kind: WebhookKind) -> Option<&str> {
        match kind {
            WebhookKind::Ticket => self.ticket_webhook.as_deref(),
            WebhookKind::Application => self.application_webhook.as_deref(),
            WebhookKind::General => self.general_webhook.as_deref(),
            WebhookKind::Dev => self.dev_webhook.as_deref(),
        }
    }

    /// The three panel-managed servers as (label, uuid) pairs, for the admin
    /// dashboard.
    pub fn server_list(&self) -> Vec<ServerRef> {
        [
            ("Live Server", &self.live_server_uuid),
            ("Staging Server", &self.staging_server_uuid),
            ("Fallback Server", &self.fallback_server_uuid),
        ]
        .into_iter()
        .filter_map(|(name, uuid)| {
            uuid.as_ref().map(|uuid| ServerRef {
                name: name.to_string(),
                uuid: uuid.clone(),
            })
        })
        .collect()
    }

    /// Settings view for unauthenticated/regular consumers. Hides panel
    /// credentials and webhook URLs.
    pub fn into_public_dto(self) -> PublicSettingsDto {
        PublicSettingsDto {
            applications_open: self.applications_open,
            can_register: self.can_register,
            maintenance_mode: self.maintenance_mode,
            site_theme: self.site_theme,
            min_application_length: self.min_application_length,
            max_application_length: self.max_application_length,
        }
    }
}

/// Outbound webhook destinations configurable in the settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookKind {
    Ticket,
    Application,
    General,
    Dev,
}

/// Named server reference for dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerRef {
    pub name: String,
    pub uuid: String,
}

/// Settings fields safe to expose to any visitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicSettingsDto {
    pub applications_open: bool,
    pub can_register: bool,
    pub maintenance_mode: bool,
    pub site_theme: String,
    pub min_application_length: i32,
    pub max_application_length: i32,
}

/// Full settings update submitted from the admin settings editor.
#[derive(Debug, Clone)]
pub struct UpdateSettingsParam {
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
}
