mod config;
mod controller;
mod data;
mod error;
mod middleware;
mod model;
mod router;
mod service;
mod startup;
mod state;

use std::net::SocketAddr;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::AppError,
    service::{cache::TtlCache, mail::MailService, settings::SettingsCache, webhook::WebhookService},
    state::AppState,
};

/// TTL of the public whitelist roster memo.
const WHITELIST_CACHE_TTL: Duration = Duration::from_secs(600);
/// TTL of connection-gate verdict memos.
const GATE_CACHE_TTL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session_layer = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    let discord_http = std::sync::Arc::new(serenity::http::Http::new(&config.discord_bot_token));

    let state = AppState {
        db,
        http_client: http_client.clone(),
        oauth_client,
        discord_http,
        mailer: MailService::new(http_client, config.mail_config()),
        webhooks: WebhookService::new(),
        settings_cache: SettingsCache::new(),
        whitelist_cache: TtlCache::new(WHITELIST_CACHE_TTL),
        gate_cache: TtlCache::new(GATE_CACHE_TTL),
        app_url: config.app_url.clone(),
        auth_key: config.auth_key.clone(),
        secret_key: config.secret_key.clone(),
        discord_guild_id: config.discord_guild_id,
    };

    let app = router::router()
        .with_state(state)
        .layer(session_layer)
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind {}: {}", config.bind_addr, e)))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::InternalError(format!("Server error: {}", e)))?;

    Ok(())
}
