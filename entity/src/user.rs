//! Portal user accounts.
//!
//! A user authenticates with a username/password pair and may additionally
//! link a Minecraft account (via one-time auth code) and a Discord account
//! (via OAuth). The boolean flags drive role checks and whitelist gating.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Rotating session identity. Regenerated on password reset so existing
    /// sessions stop resolving to the user.
    #[sea_orm(unique)]
    pub session_id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 PHC-format password hash.
    pub password: String,
    pub email: String,
    pub discord_id: Option<String>,
    pub minecraft_username: Option<String>,
    #[sea_orm(unique)]
    pub minecraft_uuid: Option<String>,
    pub is_admin: bool,
    pub is_staff: bool,
    pub is_banned: bool,
    pub is_whitelisted: bool,
    pub email_confirmed: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application::Entity")]
    Application,
    #[sea_orm(has_many = "super::character::Entity")]
    Character,
    #[sea_orm(has_many = "super::ticket::Entity")]
    Ticket,
    #[sea_orm(has_many = "super::ticket_reply::Entity")]
    TicketReply,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<super::character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Character.def()
    }
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::ticket_reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketReply.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
