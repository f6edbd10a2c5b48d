use crate::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

/// Mailgun configuration subset handed to the mail service.
#[derive(Clone)]
pub struct MailConfig {
    pub api_key: Option<String>,
    pub domain: String,
    pub from: String,
    /// Development mode logs links instead of sending mail.
    pub development: bool,
}

pub struct Config {
    pub database_url: String,
    /// Public base URL of the portal, for links in emails and webhooks.
    pub app_url: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Secret for password reset tokens.
    pub secret_key: String,
    /// Shared key the game servers present on integration endpoints.
    pub auth_key: String,
    /// `development` relaxes external side effects (email sending).
    pub environment: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,
    pub discord_bot_token: String,
    pub discord_guild_id: u64,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    pub mailgun_api_key: Option<String>,
    pub mailgun_domain: String,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string());

        let discord_guild_id = require("DISCORD_GUILD_ID")?
            .parse::<u64>()
            .map_err(|_| ConfigError::MissingEnvVar("DISCORD_GUILD_ID".to_string()))?;

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            app_url: require("APP_URL")?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            secret_key: require("SECRET_KEY")?,
            auth_key: require("AUTH_KEY")?,
            environment,
            discord_client_id: require("DISCORD_CLIENT_ID")?,
            discord_client_secret: require("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: require("DISCORD_REDIRECT_URL")?,
            discord_bot_token: require("DISCORD_BOT_TOKEN")?,
            discord_guild_id,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            mailgun_api_key: std::env::var("MAILGUN_API_KEY").ok(),
            mailgun_domain: std::env::var("MAILGUN_DOMAIN")
                .unwrap_or_else(|_| "mail.hearthgate.net".to_string()),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Hearthgate <noreply@hearthgate.net>".to_string()),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn mail_config(&self) -> MailConfig {
        MailConfig {
            api_key: self.mailgun_api_key.clone(),
            domain: self.mailgun_domain.clone(),
            from: self.mail_from.clone(),
            development: self.is_development(),
        }
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
