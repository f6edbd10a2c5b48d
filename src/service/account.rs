//! Account lifecycle: registration, login, email confirmation, password
//! reset, and Minecraft/Discord linking.
//!
//! All the rules about who may create or recover an account live here;
//! controllers only translate HTTP in and out.

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        audit_log::AuditLogRepository, email_confirmation::EmailConfirmationRepository,
        minecraft_auth::MinecraftAuthRepository, user::UserRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        audit::{AuditAction, CreateAuditLogParam},
        user::{CreateUserParam, LinkMinecraftParam, User},
    },
    service::{password, token},
};

/// Minimum password length accepted at registration and reset.
const MIN_PASSWORD_LENGTH: usize = 6;
/// Minimum username length accepted at registration.
const MIN_USERNAME_LENGTH: usize = 3;

/// Registration form contents.
#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub email: String,
}

pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new account.
    ///
    /// Validates the form (matching passwords, minimum lengths, free
    /// username), hashes the password, creates the user, and mints the
    /// email confirmation token. The registration-open gate is checked by
    /// the caller against the cached settings.
    ///
    /// # Returns
    /// - `Ok((user, token))` - Created user plus the confirmation token to email
    /// - `Err(AppError::BadRequest)` - A validation failed
    pub async fn register(&self, param: RegisterParam) -> Result<(User, String), AppError> {
        if param.password != param.password_confirm {
            return Err(AppError::BadRequest("Passwords do not match".to_string()));
        }
        if param.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        if param.username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Username must be at least {} characters long",
                MIN_USERNAME_LENGTH
            )));
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_username(&param.username).await?.is_some() {
            return Err(AppError::BadRequest("Username already taken".to_string()));
        }

        let password_hash = password::hash_password(&param.password)?;
        let user = user_repo
            .create(CreateUserParam {
                username: param.username,
                password_hash,
                email: param.email,
            })
            .await?;

        let confirmation_token = token::confirmation_token(&user.email);
        EmailConfirmationRepository::new(self.db)
            .create(user.id, &user.email, &confirmation_token)
            .await?;

        Ok((user, confirmation_token))
    }

    /// Authenticates a username/password pair.
    ///
    /// Lookup is case-insensitive. A successful login is recorded in the
    /// audit trail. Both "no such user" and "wrong password" collapse into
    /// the same `InvalidCredentials` error.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !password::verify_password(password, &user.password_hash, user.id)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        AuditLogRepository::new(self.db)
            .create(CreateAuditLogParam {
                user_id: user.id,
                action: AuditAction::Login,
                target_type: None,
                target_id: None,
            })
            .await?;

        Ok(user)
    }

    /// Confirms an email address from a confirmation link token.
    ///
    /// The token is deleted after use so a link only works once.
    pub async fn confirm_email(&self, confirmation_token: &str) -> Result<User, AppError> {
        let confirmation_repo = EmailConfirmationRepository::new(self.db);
        let user_repo = UserRepository::new(self.db);

        let Some(confirmation) = confirmation_repo.find_by_token(confirmation_token).await? else {
            return Err(AppError::BadRequest(
                "Invalid confirmation token".to_string(),
            ));
        };

        let Some(user) = user_repo.find_by_email(&confirmation.email).await? else {
            return Err(AppError::BadRequest(
                "Invalid confirmation token".to_string(),
            ));
        };

        user_repo.set_email_confirmed(user.id, true).await?;
        confirmation_repo.delete(confirmation.id).await?;

        user_repo
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Starts a password reset for the given email.
    ///
    /// Returns `None` when no account carries the address; the caller
    /// responds identically either way so the endpoint doesn't leak which
    /// emails exist.
    pub async fn forgot_password(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<Option<(User, String)>, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            return Ok(None);
        };

        let reset_token = token::issue_reset_token(&user.username, secret)?;

        Ok(Some((user, reset_token)))
    }

    /// Completes a password reset from an emailed token.
    ///
    /// The new password must differ from the old one. A successful reset
    /// rotates the user's session id, logging out all existing sessions.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        secret: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<User, AppError> {
        let username = token::verify_reset_token(reset_token, secret)?;

        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_username(&username).await? else {
            return Err(AuthError::InvalidResetToken.into());
        };

        if new_password != new_password_confirm {
            return Err(AppError::BadRequest("Passwords do not match".to_string()));
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        if password::verify_password(new_password, &user.password_hash, user.id)? {
            return Err(AppError::BadRequest(
                "You cannot use the same password.".to_string(),
            ));
        }

        let password_hash = password::hash_password(new_password)?;
        user_repo.set_password(user.id, &password_hash).await
            .map_err(AppError::from)
    }

    /// Links a Minecraft account from a one-time auth code.
    ///
    /// The code must exist and be unspent, the user must not already have a
    /// linked account, and the Minecraft UUID must not be claimed by anyone
    /// else. The code row is deleted on success.
    pub async fn link_minecraft(&self, user_id: i32, auth_code: &str) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);
        let auth_repo = MinecraftAuthRepository::new(self.db);

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserGone(user_id).into());
        };
        if user.minecraft_uuid.is_some() {
            return Err(AppError::BadRequest("Already authenticated".to_string()));
        }

        let Some(auth) = auth_repo.find_unused_by_code(auth_code).await? else {
            return Err(AppError::BadRequest("Invalid auth code".to_string()));
        };

        if user_repo.find_by_minecraft_uuid(&auth.uuid).await?.is_some() {
            return Err(AppError::BadRequest(
                "This Minecraft account has already been linked.".to_string(),
            ));
        }

        let user = user_repo
            .link_minecraft(LinkMinecraftParam {
                user_id,
                minecraft_username: auth.username.clone(),
                minecraft_uuid: auth.uuid.clone(),
            })
            .await?;
        auth_repo.delete(auth.id).await?;

        Ok(user)
    }

    /// Stores the Discord id on a user after a completed OAuth flow.
    pub async fn link_discord(&self, user_id: i32, discord_id: &str) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .link_discord(user_id, discord_id)
            .await
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn register_param(username: &str, password: &str, confirm: &str) -> RegisterParam {
        RegisterParam {
            username: username.to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
            email: format!("{}@example.com", username),
        }
    }

    /// Tests a clean registration.
    ///
    /// Expected: Ok with the user created and a confirmation token minted
    #[tokio::test]
    async fn registers_new_account() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);
        let (user, confirmation_token) = service
            .register(register_param("steve", "hunter22", "hunter22"))
            .await
            .unwrap();

        assert_eq!(user.username, "steve");
        assert!(!user.email_confirmed);
        assert_eq!(confirmation_token.len(), 64);
        // The stored hash must verify against the original password.
        assert!(password::verify_password("hunter22", &user.password_hash, user.id).unwrap());
    }

    /// Tests the registration form validations.
    ///
    /// Expected: Err for mismatched, short-password, and short-username
    /// forms
    #[tokio::test]
    async fn rejects_invalid_registration_forms() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);

        assert!(service
            .register(register_param("steve", "hunter22", "different"))
            .await
            .is_err());
        assert!(service
            .register(register_param("steve", "abc", "abc"))
            .await
            .is_err());
        assert!(service
            .register(register_param("ab", "hunter22", "hunter22"))
            .await
            .is_err());
    }

    /// Tests that usernames collide case-insensitively.
    ///
    /// Expected: Err registering `STEVE` after `steve`
    #[tokio::test]
    async fn rejects_duplicate_username_any_case() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);
        service
            .register(register_param("steve", "hunter22", "hunter22"))
            .await
            .unwrap();

        let result = service
            .register(register_param("STEVE", "hunter22", "hunter22"))
            .await;

        assert!(result.is_err());
    }

    /// Tests login against a registered account.
    ///
    /// Expected: Ok for the right password under any username casing, Err
    /// for the wrong password, and a LOGIN audit entry recorded
    #[tokio::test]
    async fn login_verifies_password() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);
        service
            .register(register_param("steve", "hunter22", "hunter22"))
            .await
            .unwrap();

        assert!(service.login("Steve", "hunter22").await.is_ok());
        assert!(service.login("steve", "wrong").await.is_err());
        assert!(service.login("nobody", "hunter22").await.is_err());

        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
        let logins = entity::prelude::AuditLog::find()
            .filter(entity::audit_log::Column::Action.eq("LOGIN"))
            .all(db)
            .await
            .unwrap();
        assert_eq!(logins.len(), 1);
    }

    /// Tests the email confirmation flow.
    ///
    /// Expected: Ok confirming once, Err replaying the same token
    #[tokio::test]
    async fn confirms_email_once() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);
        let (_user, confirmation_token) = service
            .register(register_param("steve", "hunter22", "hunter22"))
            .await
            .unwrap();

        let confirmed = service.confirm_email(&confirmation_token).await.unwrap();
        assert!(confirmed.email_confirmed);

        assert!(service.confirm_email(&confirmation_token).await.is_err());
    }

    /// Tests the password reset flow end to end.
    ///
    /// Expected: Ok with the new password working, the old rejected, and
    /// the session rotated
    #[tokio::test]
    async fn resets_password_with_token() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);
        let (user, _) = service
            .register(register_param("steve", "hunter22", "hunter22"))
            .await
            .unwrap();
        let old_session_id = user.session_id;

        let Some((_, reset_token)) = service
            .forgot_password("steve@example.com", "secret")
            .await
            .unwrap()
        else {
            panic!("expected a reset token for a known email");
        };

        let updated = service
            .reset_password(&reset_token, "secret", "newpassword", "newpassword")
            .await
            .unwrap();

        assert_ne!(updated.session_id, old_session_id);
        assert!(service.login("steve", "newpassword").await.is_ok());
        assert!(service.login("steve", "hunter22").await.is_err());
    }

    /// Tests that a reset cannot reuse the current password.
    ///
    /// Expected: Err for the same password
    #[tokio::test]
    async fn reset_rejects_same_password() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);
        service
            .register(register_param("steve", "hunter22", "hunter22"))
            .await
            .unwrap();

        let Some((_, reset_token)) = service
            .forgot_password("steve@example.com", "secret")
            .await
            .unwrap()
        else {
            panic!("expected a reset token for a known email");
        };

        let result = service
            .reset_password(&reset_token, "secret", "hunter22", "hunter22")
            .await;

        assert!(result.is_err());
    }

    /// Tests that an unknown email yields no reset token.
    ///
    /// Expected: Ok(None)
    #[tokio::test]
    async fn forgot_password_is_silent_for_unknown_email() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);
        let result = service
            .forgot_password("nobody@example.com", "secret")
            .await
            .unwrap();

        assert!(result.is_none());
    }

    /// Tests the Minecraft linking happy path.
    ///
    /// Expected: Ok with the identity stored and the code row consumed
    #[tokio::test]
    async fn links_minecraft_and_consumes_code() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::create_user(db).await.unwrap();
        factory::create_auth_code(db, "012345", "66666666-6666-6666-6666-666666666666", "Steve", false)
            .await
            .unwrap();

        let service = AccountService::new(db);
        let linked = service.link_minecraft(user.id, "012345").await.unwrap();

        assert_eq!(linked.minecraft_username.as_deref(), Some("Steve"));

        // Code is single-use.
        assert!(service.link_minecraft(user.id, "012345").await.is_err());
    }

    /// Tests the linking error paths: bad code, already linked user, UUID
    /// claimed by another account.
    ///
    /// Expected: Err in all three cases
    #[tokio::test]
    async fn rejects_invalid_minecraft_links() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AccountService::new(db);

        // Bad code.
        let user = factory::create_user(db).await.unwrap();
        assert!(service.link_minecraft(user.id, "999999").await.is_err());

        // User already linked.
        let linked = factory::create_whitelisted_user(db).await.unwrap();
        factory::create_auth_code(db, "111111", "77777777-7777-7777-7777-777777777777", "Alex", false)
            .await
            .unwrap();
        assert!(service.link_minecraft(linked.id, "111111").await.is_err());

        // UUID already claimed by someone else.
        let claimed_uuid = linked.minecraft_uuid.clone().unwrap();
        factory::create_auth_code(db, "222222", &claimed_uuid, "Alex", false)
            .await
            .unwrap();
        assert!(service.link_minecraft(user.id, "222222").await.is_err());
    }
}
