//! Application state shared across all request handlers.
//!
//! `AppState` holds every shared resource the handlers need. It is built
//! once during startup and cloned per request through Axum's state
//! extraction; all fields are cheap to clone (pools, `Arc`s, small strings).

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    model::user::PublicUserDto,
    service::{
        cache::TtlCache, gate::GateVerdict, mail::MailService, settings::SettingsCache,
        webhook::WebhookService,
    },
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for external API requests (Discord, Mojang, panel,
    /// Mailgun). Configured with no redirects.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord authentication flow.
    pub oauth_client: OAuth2Client,

    /// Discord HTTP client authenticated with the bot token, for the
    /// guild-join call after linking.
    pub discord_http: Arc<Http>,

    /// Mailgun-backed mailer.
    pub mailer: MailService,

    /// Fire-and-forget Discord webhook dispatcher.
    pub webhooks: WebhookService,

    /// Read-through memo of the single settings row.
    pub settings_cache: SettingsCache,

    /// 600 s memo of the public whitelist roster.
    pub whitelist_cache: TtlCache<(), Vec<PublicUserDto>>,

    /// 60 s memo of connection-gate verdicts, keyed by Minecraft UUID.
    pub gate_cache: TtlCache<String, GateVerdict>,

    /// Public base URL of the portal, for generating links.
    pub app_url: String,

    /// Shared key for the integration endpoints.
    pub auth_key: String,

    /// Secret for password reset tokens.
    pub secret_key: String,

    /// Discord guild freshly linked users are pulled into.
    pub discord_guild_id: u64,
}
