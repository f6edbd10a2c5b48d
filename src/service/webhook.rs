//! Outbound Discord webhook notifications.
//!
//! Builds the embeds for every portal event that notifies Discord and fires
//! them as detached tasks. Webhook delivery is best-effort: failures are
//! logged and never surfaced to the request that triggered them.

use serenity::all::Timestamp;
use serenity::builder::{CreateEmbed, ExecuteWebhook};
use serenity::http::Http;
use serenity::model::webhook::Webhook;
use std::sync::Arc;

use crate::model::{application::Application, ticket::Ticket, user::User};

/// Embed colors by event family.
const COLOR_CREATED: u32 = 0x00ff00;
const COLOR_PENDING: u32 = 0xf39c12;
const COLOR_ALERT: u32 = 0xff0000;

/// Fire-and-forget webhook dispatcher.
///
/// Holds a tokenless serenity HTTP client; webhook URLs carry their own
/// credentials.
#[derive(Clone)]
pub struct WebhookService {
    http: Arc<Http>,
}

impl WebhookService {
    pub fn new() -> Self {
        Self {
            http: Arc::new(Http::new("")),
        }
    }

    /// Executes a webhook in a background task.
    ///
    /// A `None` URL means the admin never configured this destination; the
    /// event is silently skipped.
    pub fn dispatch(&self, url: Option<String>, payload: ExecuteWebhook) {
        let Some(url) = url else {
            tracing::debug!("No webhook URL configured, skipping notification");
            return;
        };

        let http = self.http.clone();
        tokio::spawn(async move {
            let webhook = match Webhook::from_url(&http, &url).await {
                Ok(webhook) => webhook,
                Err(e) => {
                    tracing::warn!("Invalid webhook URL: {}", e);
                    return;
                }
            };

            if let Err(e) = webhook.execute(&http, false, payload).await {
                tracing::warn!("Failed to execute webhook: {}", e);
            }
        });
    }
}

impl Default for WebhookService {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload announcing a new registration on the general webhook.
///
/// Only a hash of the registrant's IP is included.
pub fn new_user(username: &str, email: &str, ip_hash: &str) -> ExecuteWebhook {
    let embed = CreateEmbed::new()
        .title("New user")
        .color(COLOR_CREATED)
        .field("Username", username, true)
        .field("Email", email, true)
        .field("IP Hash", ip_hash, false)
        .timestamp(Timestamp::now());

    ExecuteWebhook::new().username(username).embed(embed)
}

/// Payload announcing a confirmed email on the general webhook.
pub fn email_confirmed(user: &User) -> ExecuteWebhook {
    let embed = CreateEmbed::new()
        .title("Email confirmed")
        .color(COLOR_CREATED)
        .field("Username", &user.username, true)
        .field("Email", &user.email, true)
        .timestamp(Timestamp::now());

    ExecuteWebhook::new().username(&user.username).embed(embed)
}

/// Payload announcing a linked Minecraft account on the general webhook.
pub fn minecraft_linked(user: &User) -> ExecuteWebhook {
    let embed = CreateEmbed::new()
        .title("Minecraft linked")
        .color(COLOR_CREATED)
        .field(
            "Minecraft Username",
            user.minecraft_username.as_deref().unwrap_or("unknown"),
            true,
        )
        .field(
            "Minecraft UUID",
            user.minecraft_uuid.as_deref().unwrap_or("unknown"),
            true,
        )
        .timestamp(Timestamp::now());

    ExecuteWebhook::new()
        .username(&user.username)
        .avatar_url(user.avatar_link())
        .embed(embed)
}

/// Payload announcing a linked Discord account on the general webhook.
pub fn discord_linked(user: &User) -> ExecuteWebhook {
    let mention = user
        .discord_id
        .as_deref()
        .map(|id| format!("<@{}>", id))
        .unwrap_or_else(|| "unknown".to_string());

    let embed = CreateEmbed::new()
        .title("Discord linked")
        .color(COLOR_CREATED)
        .field("Discord", mention, true)
        .timestamp(Timestamp::now());

    ExecuteWebhook::new().username(&user.username).embed(embed)
}

/// Payload announcing a new whitelist application on the application
/// webhook.
pub fn new_application(application: &Application, user: &User, faction_name: &str) -> ExecuteWebhook {
    let embed = CreateEmbed::new()
        .title("New application")
        .color(COLOR_PENDING)
        .field("Name", &application.character_name, true)
        .field("Faction", faction_name, true)
        .field("Race", &application.character_race, true)
        .field("Class", &application.character_class, true)
        .timestamp(Timestamp::now());

    ExecuteWebhook::new()
        .username(&user.username)
        .avatar_url(user.avatar_link())
        .embed(embed)
}

/// Payload announcing a new ticket on the ticket webhook.
pub fn new_ticket(
    ticket: &Ticket,
    department_name: &str,
    owner: &User,
    first_message: &str,
) -> ExecuteWebhook {
    let embed = CreateEmbed::new()
        .title("New ticket created")
        .color(COLOR_CREATED)
        .field("Ticket ID", ticket.short_id(), true)
        .field("Department", department_name, true)
        .field("Subject", &ticket.subject, false)
        .field("Content", first_message, false)
        .timestamp(Timestamp::now());

    ExecuteWebhook::new()
        .username(&owner.username)
        .avatar_url(owner.avatar_link())
        .embed(embed)
}

/// Payload announcing a user reply on the ticket webhook.
///
/// Staff replies don't fire this; the owner gets notified in-portal
/// instead.
pub fn ticket_reply(
    ticket: &Ticket,
    department_name: &str,
    owner: &User,
    reply_content: &str,
) -> ExecuteWebhook {
    let embed = CreateEmbed::new()
        .title("New reply to ticket")
        .color(COLOR_PENDING)
        .field("Ticket ID", ticket.short_id(), true)
        .field("Department", department_name, true)
        .field("Reply", reply_content, false)
        .timestamp(Timestamp::now());

    ExecuteWebhook::new()
        .username(&owner.username)
        .avatar_url(owner.avatar_link())
        .embed(embed)
}

/// Payload announcing an admin edit of a user on the dev webhook.
pub fn user_edited(user: &User, admin: &User) -> ExecuteWebhook {
    let mention = user
        .discord_id
        .as_deref()
        .map(|id| format!("<@{}>", id))
        .unwrap_or_else(|| "not linked".to_string());

    let embed = CreateEmbed::new()
        .title(format!("User edited by {}", admin.username))
        .color(COLOR_ALERT)
        .field("Username", &user.username, true)
        .field("Email", &user.email, true)
        .field("Discord", mention, true)
        .field(
            "Minecraft Username",
            user.minecraft_username.as_deref().unwrap_or("not linked"),
            true,
        )
        .field(
            "Minecraft UUID",
            user.minecraft_uuid.as_deref().unwrap_or("not linked"),
            true,
        )
        .timestamp(Timestamp::now());

    ExecuteWebhook::new()
        .username(&admin.username)
        .avatar_url(admin.avatar_link())
        .embed(embed)
}

/// Payload announcing a settings change on the dev webhook.
pub fn settings_touched(admin: &User) -> ExecuteWebhook {
    ExecuteWebhook::new()
        .username(&admin.username)
        .avatar_url(admin.avatar_link())
        .content("I just messed with the site's settings!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: 1,
            session_id: Uuid::new_v4(),
            username: "steve".to_string(),
            password_hash: "hash".to_string(),
            email: "steve@example.com".to_string(),
            discord_id: Some("1234".to_string()),
            minecraft_username: Some("Steve".to_string()),
            minecraft_uuid: Some("069a79f4-44e9-4726-a5be-fca90e38aaf5".to_string()),
            is_admin: false,
            is_staff: false,
            is_banned: false,
            is_whitelisted: true,
            email_confirmed: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn new_user_embed_carries_ip_hash_not_ip() {
        let payload = new_user("steve", "steve@example.com", "abcd1234");
        let json = serde_json::to_value(&payload).unwrap();

        let fields = &json["embeds"][0]["fields"];
        assert_eq!(fields[2]["name"], "IP Hash");
        assert_eq!(fields[2]["value"], "abcd1234");
    }

    #[test]
    fn discord_linked_embed_mentions_user() {
        let user = sample_user();
        let payload = discord_linked(&user);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["embeds"][0]["fields"][0]["value"], "<@1234>");
    }

    #[test]
    fn avatar_uses_plain_uuid() {
        let user = sample_user();
        let payload = minecraft_linked(&user);
        let json = serde_json::to_value(&payload).unwrap();

        let avatar = json["avatar_url"].as_str().unwrap();
        assert!(avatar.contains("069a79f444e94726a5befca90e38aaf5"));
        assert!(!avatar.contains('-'));
    }

    #[test]
    fn settings_touched_is_content_only() {
        let admin = sample_user();
        let payload = settings_touched(&admin);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["content"], "I just messed with the site's settings!");
        assert!(json.get("embeds").is_none() || json["embeds"].as_array().unwrap().is_empty());
    }
}
