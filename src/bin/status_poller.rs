//! Panel status poller.
//!
//! Every minute, queries the hosting panel's resource endpoint for the
//! three configured servers, folds the responses into a compact
//! `{uuid: {online, player_list}}` map, and posts it to the portal's
//! status intake. Fully stateless; the portal keeps the history.

use serde_json::{json, Value};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(60);

struct PollerConfig {
    panel_api_url: String,
    panel_api_key: String,
    portal_url: String,
    auth_key: String,
    server_uuids: Vec<String>,
}

impl PollerConfig {
    fn from_env() -> Result<Self, String> {
        let server_uuids = [
            "LIVE_SERVER_UUID",
            "STAGING_SERVER_UUID",
            "FALLBACK_SERVER_UUID",
        ]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .filter(|uuid| !uuid.is_empty())
        .collect::<Vec<_>>();

        if server_uuids.is_empty() {
            return Err("No server UUIDs configured".to_string());
        }

        Ok(Self {
            panel_api_url: std::env::var("PANEL_API_URL")
                .map_err(|_| "PANEL_API_URL environment variable not set".to_string())?,
            panel_api_key: std::env::var("PANEL_API_KEY")
                .map_err(|_| "PANEL_API_KEY environment variable not set".to_string())?,
            portal_url: std::env::var("WEB_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            auth_key: std::env::var("AUTH_KEY")
                .map_err(|_| "AUTH_KEY environment variable not set".to_string())?,
            server_uuids,
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = match PollerConfig::from_env() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    };

    let client = reqwest::Client::new();
    let mut interval = tokio::time::interval(POLL_INTERVAL);

    tracing::info!(
        "Polling {} servers every {}s",
        config.server_uuids.len(),
        POLL_INTERVAL.as_secs()
    );

    loop {
        interval.tick().await;

        let status = collect_statuses(&client, &config).await;
        if let Err(e) = post_to_portal(&client, &config, &status).await {
            tracing::warn!("Error posting status to portal: {}", e);
        }
    }
}

/// Queries every configured server and folds the results into the intake
/// payload shape.
async fn collect_statuses(client: &reqwest::Client, config: &PollerConfig) -> Value {
    let mut output = serde_json::Map::new();

    for uuid in &config.server_uuids {
        let status_json = match fetch_server_resources(client, config, uuid).await {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Error getting status for server {}: {}", uuid, e);
                json!({ "status": 0 })
            }
        };

        output.insert(uuid.clone(), summarize_server(&status_json));
    }

    Value::Object(output)
}

async fn fetch_server_resources(
    client: &reqwest::Client,
    config: &PollerConfig,
    server_uuid: &str,
) -> Result<Value, reqwest::Error> {
    tracing::debug!("Getting status for server {}", server_uuid);

    client
        .get(format!(
            "{}servers/{}/resources",
            config.panel_api_url, server_uuid
        ))
        .bearer_auth(&config.panel_api_key)
        .send()
        .await?
        .json::<Value>()
        .await
}

/// Reduces a panel resource response to the `{online, player_list}` shape
/// the portal stores.
fn summarize_server(status_json: &Value) -> Value {
    if !is_server_online(status_json) {
        return json!({ "online": false, "player_list": [] });
    }

    json!({
        "online": true,
        "player_list": player_list(status_json),
    })
}

/// A server counts as online when the panel reports `status == 1`.
fn is_server_online(status_json: &Value) -> bool {
    status_json["status"].as_i64() == Some(1)
}

/// Player list from the panel's query block; an absent block means an
/// empty server.
fn player_list(status_json: &Value) -> Vec<Value> {
    status_json["query"]["players"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

async fn post_to_portal(
    client: &reqwest::Client,
    config: &PollerConfig,
    status: &Value,
) -> Result<(), String> {
    let response = client
        .post(format!("{}/api/integration/server-status", config.portal_url))
        .header("Authorization", &config.auth_key)
        .json(status)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        let msg = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body["error"].as_str().map(str::to_string))
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(msg);
    }

    tracing::debug!("Posted status snapshot to portal");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn online_requires_status_one() {
        assert!(is_server_online(&json!({ "status": 1 })));
        assert!(!is_server_online(&json!({ "status": 0 })));
        assert!(!is_server_online(&json!({ "status": 2 })));
        assert!(!is_server_online(&json!({})));
    }

    #[test]
    fn summarizes_online_server_with_players() {
        let status = json!({
            "status": 1,
            "query": { "players": ["Steve", "Alex"] }
        });

        let summary = summarize_server(&status);

        assert_eq!(summary["online"], true);
        assert_eq!(summary["player_list"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn summarizes_online_server_without_query_block() {
        let summary = summarize_server(&json!({ "status": 1 }));

        assert_eq!(summary["online"], true);
        assert!(summary["player_list"].as_array().unwrap().is_empty());
    }

    #[test]
    fn summarizes_offline_server() {
        let summary = summarize_server(&json!({ "status": 0 }));

        assert_eq!(summary["online"], false);
        assert!(summary["player_list"].as_array().unwrap().is_empty());
    }
}
