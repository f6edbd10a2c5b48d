//! User factory for creating test user entities.
//!
//! Provides factory methods for creating user entities with sensible
//! defaults, reducing boilerplate in tests. Customization goes through a
//! builder pattern.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .username("CustomUser")
///     .whitelisted(true)
///     .minecraft("Steve", "069a79f4-44e9-4726-a5be-fca90e38aaf5")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    username: String,
    email: String,
    password: String,
    discord_id: Option<String>,
    minecraft_username: Option<String>,
    minecraft_uuid: Option<String>,
    is_admin: bool,
    is_staff: bool,
    is_banned: bool,
    is_whitelisted: bool,
    email_confirmed: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults: unique `user_{id}` username and email, a placeholder
    /// password hash, no linked accounts, every flag off.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            username: format!("user_{}", id),
            email: format!("user_{}@example.com", id),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$placeholder".to_string(),
            discord_id: None,
            minecraft_username: None,
            minecraft_uuid: None,
            is_admin: false,
            is_staff: false,
            is_banned: false,
            is_whitelisted: false,
            email_confirmed: false,
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the stored password hash (already in PHC form).
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password = hash.into();
        self
    }

    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = Some(discord_id.into());
        self
    }

    /// Links a Minecraft identity.
    pub fn minecraft(mut self, username: impl Into<String>, uuid: impl Into<String>) -> Self {
        self.minecraft_username = Some(username.into());
        self.minecraft_uuid = Some(uuid.into());
        self
    }

    pub fn admin(mut self, admin: bool) -> Self {
        self.is_admin = admin;
        self
    }

    pub fn staff(mut self, staff: bool) -> Self {
        self.is_staff = staff;
        self
    }

    pub fn banned(mut self, banned: bool) -> Self {
        self.is_banned = banned;
        self
    }

    pub fn whitelisted(mut self, whitelisted: bool) -> Self {
        self.is_whitelisted = whitelisted;
        self
    }

    pub fn email_confirmed(mut self, confirmed: bool) -> Self {
        self.email_confirmed = confirmed;
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            session_id: ActiveValue::Set(Uuid::new_v4()),
            username: ActiveValue::Set(self.username),
            password: ActiveValue::Set(self.password),
            email: ActiveValue::Set(self.email),
            discord_id: ActiveValue::Set(self.discord_id),
            minecraft_username: ActiveValue::Set(self.minecraft_username),
            minecraft_uuid: ActiveValue::Set(self.minecraft_uuid),
            is_admin: ActiveValue::Set(self.is_admin),
            is_staff: ActiveValue::Set(self.is_staff),
            is_banned: ActiveValue::Set(self.is_banned),
            is_whitelisted: ActiveValue::Set(self.is_whitelisted),
            email_confirmed: ActiveValue::Set(self.email_confirmed),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a whitelisted user with a linked Minecraft account.
pub async fn create_whitelisted_user(
    db: &DatabaseConnection,
) -> Result<entity::user::Model, DbErr> {
    let id = next_id();
    UserFactory::new(db)
        .whitelisted(true)
        .minecraft(format!("Player{}", id), Uuid::new_v4().to_string())
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::User;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert!(!user.username.is_empty());
        assert!(!user.is_admin);
        assert!(!user.is_whitelisted);
        assert!(user.minecraft_uuid.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user1 = create_user(db).await?;
        let user2 = create_user(db).await?;

        assert_ne!(user1.username, user2.username);
        assert_ne!(user1.session_id, user2.session_id);

        Ok(())
    }

    #[tokio::test]
    async fn whitelisted_user_has_minecraft_link() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_whitelisted_user(db).await?;

        assert!(user.is_whitelisted);
        assert!(user.minecraft_uuid.is_some());

        Ok(())
    }
}
