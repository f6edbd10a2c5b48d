//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles account creation, account-linking updates, moderation flag changes, and
//! the admin DataTables query, with conversion between entity models and domain models
//! at the infrastructure boundary.

use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::model::user::{CreateUserParam, LinkMinecraftParam, User};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user at registration time.
    ///
    /// Generates a fresh session UUID; the caller provides an already hashed
    /// password. New accounts start with every role flag off and the email
    /// unconfirmed.
    ///
    /// # Arguments
    /// - `param` - Username, password hash and email for the new account
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on username
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            session_id: ActiveValue::Set(Uuid::new_v4()),
            username: ActiveValue::Set(param.username),
            password: ActiveValue::Set(param.password_hash),
            email: ActiveValue::Set(param.email),
            is_admin: ActiveValue::Set(false),
            is_staff: ActiveValue::Set(false),
            is_banned: ActiveValue::Set(false),
            is_whitelisted: ActiveValue::Set(false),
            email_confirmed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by username, matched case-insensitively.
    ///
    /// Login and registration both treat `Steve` and `steve` as the same
    /// account name.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::user::Column::Username)))
                    .eq(username.to_lowercase()),
            )
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_session_id(&self, session_id: Uuid) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::SessionId.eq(session_id))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_minecraft_uuid(&self, uuid: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::MinecraftUuid.eq(uuid))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_minecraft_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::MinecraftUsername.eq(username))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Stores the Minecraft identity on a user after a successful auth-code
    /// link.
    pub async fn link_minecraft(&self, param: LinkMinecraftParam) -> Result<User, DbErr> {
        let entity = self.require(param.user_id).await?;

        let mut active: entity::user::ActiveModel = entity.into();
        active.minecraft_username = ActiveValue::Set(Some(param.minecraft_username));
        active.minecraft_uuid = ActiveValue::Set(Some(param.minecraft_uuid));
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(User::from_entity(active.update(self.db).await?))
    }

    /// Stores the Discord identity on a user after the OAuth callback.
    pub async fn link_discord(&self, user_id: i32, discord_id: &str) -> Result<User, DbErr> {
        let entity = self.require(user_id).await?;

        let mut active: entity::user::ActiveModel = entity.into();
        active.discord_id = ActiveValue::Set(Some(discord_id.to_string()));
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(User::from_entity(active.update(self.db).await?))
    }

    /// Updates the cached Minecraft username after a Mojang lookup.
    pub async fn set_minecraft_username(&self, user_id: i32, username: &str) -> Result<User, DbErr> {
        let entity = self.require(user_id).await?;

        let mut active: entity::user::ActiveModel = entity.into();
        active.minecraft_username = ActiveValue::Set(Some(username.to_string()));
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(User::from_entity(active.update(self.db).await?))
    }

    /// Replaces the password hash and rotates the session UUID.
    ///
    /// Rotating the session id invalidates every session that referenced the
    /// old one, logging out anything holding the account open.
    pub async fn set_password(&self, user_id: i32, password_hash: &str) -> Result<User, DbErr> {
        let entity = self.require(user_id).await?;

        let mut active: entity::user::ActiveModel = entity.into();
        active.password = ActiveValue::Set(password_hash.to_string());
        active.session_id = ActiveValue::Set(Uuid::new_v4());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(User::from_entity(active.update(self.db).await?))
    }

    pub async fn set_email_confirmed(&self, user_id: i32, confirmed: bool) -> Result<(), DbErr> {
        self.set_flag(user_id, entity::user::Column::EmailConfirmed, confirmed)
            .await
    }

    pub async fn set_whitelisted(&self, user_id: i32, whitelisted: bool) -> Result<(), DbErr> {
        self.set_flag(user_id, entity::user::Column::IsWhitelisted, whitelisted)
            .await
    }

    pub async fn set_banned(&self, user_id: i32, banned: bool) -> Result<(), DbErr> {
        self.set_flag(user_id, entity::user::Column::IsBanned, banned)
            .await
    }

    pub async fn set_staff(&self, user_id: i32, staff: bool) -> Result<(), DbErr> {
        self.set_flag(user_id, entity::user::Column::IsStaff, staff)
            .await
    }

    pub async fn set_admin(&self, user_id: i32, admin: bool) -> Result<(), DbErr> {
        self.set_flag(user_id, entity::user::Column::IsAdmin, admin)
            .await
    }

    /// Gets all whitelisted users, ordered by username.
    pub async fn get_whitelisted(&self) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::IsWhitelisted.eq(true))
            .order_by_asc(entity::user::Column::Username)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// DataTables query over all users.
    ///
    /// Applies an optional substring filter on username or email, orders by
    /// id descending, and pages with an offset/limit pair. Returns the page
    /// plus the filtered count and the unfiltered total, which the DataTables
    /// widget needs to render paging controls.
    ///
    /// # Returns
    /// - `Ok((users, filtered, total))` - Page of users plus both counts
    /// - `Err(DbErr)` - Database error during query
    pub async fn search_paginated(
        &self,
        search: Option<&str>,
        start: u64,
        length: u64,
    ) -> Result<(Vec<User>, u64, u64), DbErr> {
        let mut query = entity::prelude::User::find();

        if let Some(term) = search {
            let pattern = format!("%{}%", term);
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Username.like(&pattern))
                    .add(entity::user::Column::Email.like(&pattern)),
            );
        }

        let filtered = query.clone().count(self.db).await?;
        let total = entity::prelude::User::find().count(self.db).await?;

        let entities = query
            .order_by_desc(entity::user::Column::Id)
            .offset(start)
            .limit(length)
            .all(self.db)
            .await?;

        let users = entities.into_iter().map(User::from_entity).collect();

        Ok((users, filtered, total))
    }

    /// Count of accounts that have linked neither Minecraft nor Discord.
    pub async fn count_unlinked(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::DiscordId.is_null())
            .filter(entity::user::Column::MinecraftUuid.is_null())
            .count(self.db)
            .await
    }

    /// Count of fully linked accounts still waiting on the whitelist.
    pub async fn count_linked_unwhitelisted(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::DiscordId.is_not_null())
            .filter(entity::user::Column::MinecraftUuid.is_not_null())
            .filter(entity::user::Column::IsWhitelisted.eq(false))
            .count(self.db)
            .await
    }

    pub async fn count_whitelisted(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::IsWhitelisted.eq(true))
            .count(self.db)
            .await
    }

    async fn require(&self, user_id: i32) -> Result<entity::user::Model, DbErr> {
        entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "User with id {} not found",
                user_id
            )))
    }

    async fn set_flag(
        &self,
        user_id: i32,
        column: entity::user::Column,
        value: bool,
    ) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user_id))
            .col_expr(column, Expr::value(value))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }
}
