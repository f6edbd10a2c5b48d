//! Mojang API client for username lookups.

use serde::Deserialize;

use crate::error::AppError;

/// One entry of a Mojang name-history response.
#[derive(Debug, Deserialize)]
struct NameHistoryEntry {
    name: String,
}

pub struct MojangService {
    client: reqwest::Client,
}

impl MojangService {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Current username for a Minecraft UUID.
    ///
    /// Reads the profile's name history and takes the most recent entry.
    pub async fn username_for_uuid(&self, uuid: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(format!(
                "https://api.mojang.com/user/profiles/{}/names",
                uuid
            ))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::BadRequest(
                "Error getting username from Mojang".to_string(),
            ));
        }

        let history = response.json::<Vec<NameHistoryEntry>>().await?;

        history
            .into_iter()
            .last()
            .map(|entry| entry.name)
            .ok_or_else(|| AppError::BadRequest("Error getting username from Mojang".to_string()))
    }
}
