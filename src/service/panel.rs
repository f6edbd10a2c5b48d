//! Hosting panel API client.
//!
//! The panel credentials live in the settings row, not the environment, so
//! admins can rotate them from the back-office.

use serde_json::json;

use crate::{error::AppError, model::settings::SiteSettings};

#[derive(Clone)]
pub struct PanelService {
    client: reqwest::Client,
}

impl PanelService {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Sends a console command to a panel-managed server.
    ///
    /// # Returns
    /// - `Ok(true)` - Panel accepted the command (204)
    /// - `Ok(false)` - Panel refused, or no panel credentials are configured
    /// - `Err(AppError::ReqwestErr)` - The request itself failed
    pub async fn send_command(
        &self,
        settings: &SiteSettings,
        server_uuid: &str,
        command: &str,
    ) -> Result<bool, AppError> {
        let (Some(api_url), Some(api_key)) = (
            settings.panel_api_url.as_deref(),
            settings.panel_api_key.as_deref(),
        ) else {
            tracing::warn!("Panel API not configured, dropping command");
            return Ok(false);
        };

        tracing::debug!("Sending command '{}' to server {}", command, server_uuid);

        let response = self
            .client
            .post(format!("{}servers/{}/command", api_url, server_uuid))
            .bearer_auth(api_key)
            .json(&json!({ "command": command }))
            .send()
            .await?;

        Ok(response.status() == reqwest::StatusCode::NO_CONTENT)
    }
}
