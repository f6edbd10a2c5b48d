//! Discord OAuth2 login flow.
//!
//! Wraps the OAuth2 client for the two halves of the authorization-code
//! flow: building the authorize URL (with CSRF state) and exchanging the
//! callback code for the Discord user behind it. Also carries the optional
//! guild-join call made right after linking.

use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use serenity::all::{GuildId, User as DiscordUser, UserId};
use serenity::builder::AddMember;
use serenity::http::Http;
use std::sync::Arc;
use url::Url;

use crate::{
    error::{auth::AuthError, AppError},
    state::OAuth2Client,
};

pub struct DiscordAuthService {
    http_client: reqwest::Client,
    oauth_client: OAuth2Client,
}

impl DiscordAuthService {
    pub fn new(http_client: reqwest::Client, oauth_client: OAuth2Client) -> Self {
        Self {
            http_client,
            oauth_client,
        }
    }

    /// Builds the Discord authorize URL and the CSRF token to stash in the
    /// session.
    ///
    /// Requests `identify` for the account id plus `guilds.join` so the
    /// portal can pull freshly linked users into the community guild.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("guilds.join".to_string()))
            .url();

        (authorize_url, csrf_state)
    }

    /// Exchanges the callback authorization code and fetches the Discord
    /// user it belongs to.
    ///
    /// # Returns
    /// - `Ok((user, access_token))` - The Discord user plus the bearer token,
    ///   which the guild-join call needs again
    /// - `Err(AppError::AuthErr(TokenExchangeFailed))` - Discord refused the code
    pub async fn callback(
        &self,
        authorization_code: String,
    ) -> Result<(DiscordUser, String), AppError> {
        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchangeFailed(e.to_string()))?;

        let access_token = token.access_token().secret().clone();
        let user = self.fetch_discord_user(&access_token).await?;

        Ok((user, access_token))
    }

    /// Retrieves a Discord user's information using the provided access token
    async fn fetch_discord_user(&self, access_token: &str) -> Result<DiscordUser, AppError> {
        let user_info = self
            .http_client
            .get("https://discord.com/api/users/@me")
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?
            .json::<DiscordUser>()
            .await?;

        Ok(user_info)
    }

    /// Joins the freshly linked user to the community guild.
    ///
    /// Uses the bot token (via the serenity HTTP client) together with the
    /// user's own `guilds.join`-scoped access token. Joining an existing
    /// member is a no-op on Discord's side.
    pub async fn join_guild(
        discord_http: Arc<Http>,
        guild_id: u64,
        user_id: UserId,
        access_token: String,
    ) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .add_member(discord_http, user_id, AddMember::new(access_token))
            .await?;

        Ok(())
    }
}
