//! User domain models and parameters.
//!
//! Provides the portal user model with account-linking state and role flags,
//! plus parameter types for registration, linking, and moderation operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Portal user with linking state and role flags.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Rotating session identity; regenerated on password reset.
    pub session_id: Uuid,
    pub username: String,
    /// Argon2 PHC-format password hash. Never serialized.
    pub password_hash: String,
    pub email: String,
    pub discord_id: Option<String>,
    pub minecraft_username: Option<String>,
    pub minecraft_uuid: Option<String>,
    pub is_admin: bool,
    pub is_staff: bool,
    pub is_banned: bool,
    pub is_whitelisted: bool,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            session_id: entity.session_id,
            username: entity.username,
            password_hash: entity.password,
            email: entity.email,
            discord_id: entity.discord_id,
            minecraft_username: entity.minecraft_username,
            minecraft_uuid: entity.minecraft_uuid,
            is_admin: entity.is_admin,
            is_staff: entity.is_staff,
            is_banned: entity.is_banned,
            is_whitelisted: entity.is_whitelisted,
            email_confirmed: entity.email_confirmed,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Staff and admins share the elevated permission tier.
    pub fn is_elevated(&self) -> bool {
        self.is_admin || self.is_staff
    }

    /// Minecraft UUID without dashes, as avatar services expect it.
    pub fn minecraft_uuid_plain(&self) -> Option<String> {
        self.minecraft_uuid.as_ref().map(|u| u.replace('-', ""))
    }

    /// Link to a rendered avatar of the user's Minecraft skin.
    ///
    /// Falls back to the default Steve helm when no Minecraft account is
    /// linked yet.
    pub fn avatar_link(&self) -> String {
        match self.minecraft_uuid_plain() {
            Some(uuid) => format!("https://minotar.net/helm/{}/150", uuid),
            None => "https://minotar.net/helm/MHF_Steve/150".to_string(),
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            discord_id: self.discord_id,
            minecraft_username: self.minecraft_username,
            minecraft_uuid: self.minecraft_uuid,
            is_admin: self.is_admin,
            is_staff: self.is_staff,
            is_banned: self.is_banned,
            is_whitelisted: self.is_whitelisted,
            email_confirmed: self.email_confirmed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User representation returned by the API. Omits the password hash and the
/// session id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub discord_id: Option<String>,
    pub minecraft_username: Option<String>,
    pub minecraft_uuid: Option<String>,
    pub is_admin: bool,
    pub is_staff: bool,
    pub is_banned: bool,
    pub is_whitelisted: bool,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact user representation for public listings (whitelist roster).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUserDto {
    pub username: String,
    pub minecraft_username: Option<String>,
    pub minecraft_uuid: Option<String>,
}

impl User {
    pub fn into_public_dto(self) -> PublicUserDto {
        PublicUserDto {
            username: self.username,
            minecraft_username: self.minecraft_username,
            minecraft_uuid: self.minecraft_uuid,
        }
    }
}

/// Parameters for creating a user at registration time.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub username: String,
    /// Already hashed; hashing happens in the service layer.
    pub password_hash: String,
    pub email: String,
}

/// Parameters for linking a Minecraft account to a user.
#[derive(Debug, Clone)]
pub struct LinkMinecraftParam {
    pub user_id: i32,
    pub minecraft_username: String,
    pub minecraft_uuid: String,
}
