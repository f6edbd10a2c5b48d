//! Whitelist application workflow.
//!
//! Owns the submission gates (applications open, no pending application,
//! cooldown window, length bounds) and the accept/reject transitions with
//! their side effects: acceptance whitelists the user and mints a character
//! from the application's fields.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::{
    data::{
        application::ApplicationRepository, character::CharacterRepository,
        faction::FactionRepository, user::UserRepository,
    },
    error::AppError,
    model::{
        application::{Application, CreateApplicationParam},
        character::{Character, CreateCharacterParam},
        settings::SiteSettings,
        user::User,
    },
};

pub struct ApplicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submits a new whitelist application.
    ///
    /// Gate order mirrors the review flow: global toggle, already
    /// whitelisted, pending application, cooldown, faction validity, then
    /// the length bounds from settings. The first failed gate is reported.
    pub async fn submit(
        &self,
        user: &User,
        param: CreateApplicationParam,
        settings: &SiteSettings,
    ) -> Result<Application, AppError> {
        if !settings.applications_open {
            return Err(AppError::BadRequest(
                "Applications are currently closed.".to_string(),
            ));
        }
        if user.is_whitelisted {
            return Err(AppError::BadRequest(
                "You're already whitelisted!".to_string(),
            ));
        }

        let application_repo = ApplicationRepository::new(self.db);
        if application_repo.pending_exists_for_user(user.id).await? {
            return Err(AppError::BadRequest(
                "You already have an application pending.".to_string(),
            ));
        }
        if let Some(latest) = application_repo.latest_for_user(user.id).await? {
            if Utc::now() < latest.cooldown_ends_at() {
                return Err(AppError::BadRequest(
                    "You can only apply once every 7 days.".to_string(),
                ));
            }
        }

        if FactionRepository::new(self.db)
            .find_by_id(param.faction_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest("Invalid faction".to_string()));
        }

        let min = settings.min_application_length as usize;
        let max = settings.max_application_length as usize;
        for (label, text) in [
            ("backstory", &param.backstory),
            ("description", &param.description),
        ] {
            let length = text.chars().count();
            if length < min {
                return Err(AppError::BadRequest(format!(
                    "Your {} must be at least {} characters long.",
                    label, min
                )));
            }
            if length > max {
                return Err(AppError::BadRequest(format!(
                    "Your {} must be under {} characters.",
                    label, max
                )));
            }
        }

        application_repo.create(param).await.map_err(AppError::from)
    }

    /// Accepts an application.
    ///
    /// Flips the status, whitelists the applicant, and mints a live
    /// character from the application's fields with an empty starting power
    /// block.
    ///
    /// # Returns
    /// - `Ok((application, user, character))` - Updated rows after acceptance
    /// - `Err(AppError::NotFound)` - No application with that id
    pub async fn accept(&self, id: i32) -> Result<(Application, User, Character), AppError> {
        let application_repo = ApplicationRepository::new(self.db);
        let user_repo = UserRepository::new(self.db);

        if application_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Application not found".to_string()));
        }

        let application = application_repo.set_accepted(id).await?;
        user_repo.set_whitelisted(application.user_id, true).await?;

        let character = CharacterRepository::new(self.db)
            .create(CreateCharacterParam {
                user_id: application.user_id,
                faction_id: application.faction_id,
                name: application.character_name.clone(),
                subrace: application.character_race.clone(),
                class: application.character_class.clone(),
                backstory: application.backstory.clone(),
                description: application.description.clone(),
                starting_power: json!({}),
            })
            .await?;

        let user = user_repo
            .find_by_id(application.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Applicant not found".to_string()))?;

        Ok((application, user, character))
    }

    /// Rejects an application with an optional reason.
    pub async fn reject(&self, id: i32, reason: Option<String>) -> Result<Application, AppError> {
        let application_repo = ApplicationRepository::new(self.db);

        if application_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Application not found".to_string()));
        }

        application_repo
            .set_rejected(id, reason)
            .await
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::application::ApplicationStatus;
    use crate::model::user::User as DomainUser;
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    fn settings(applications_open: bool, min: i32, max: i32) -> SiteSettings {
        SiteSettings {
            applications_open,
            can_register: true,
            join_discord_on_register: false,
            maintenance_mode: false,
            site_theme: "dark".to_string(),
            min_application_length: min,
            max_application_length: max,
            panel_api_key: None,
            panel_api_url: None,
            live_server_uuid: None,
            staging_server_uuid: None,
            fallback_server_uuid: None,
            ticket_webhook: None,
            application_webhook: None,
            general_webhook: None,
            dev_webhook: None,
        }
    }

    fn param(user_id: i32, faction_id: i32, length: usize) -> CreateApplicationParam {
        CreateApplicationParam {
            user_id,
            faction_id,
            character_name: "Aldric".to_string(),
            character_race: "Human".to_string(),
            character_class: "Warrior".to_string(),
            backstory: "b".repeat(length),
            description: "d".repeat(length),
        }
    }

    async fn domain_user(db: &sea_orm::DatabaseConnection) -> DomainUser {
        DomainUser::from_entity(factory::create_user(db).await.unwrap())
    }

    /// Tests that a valid submission creates a pending application.
    ///
    /// Expected: Ok with status pending
    #[tokio::test]
    async fn submits_when_gates_pass() {
        let test = TestBuilder::new()
            .with_application_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = domain_user(db).await;
        let faction = factory::create_faction(db).await.unwrap();

        let service = ApplicationService::new(db);
        let application = service
            .submit(&user, param(user.id, faction.id, 600), &settings(true, 500, 750))
            .await
            .unwrap();

        assert_eq!(application.status, ApplicationStatus::Pending);
    }

    /// Tests the global applications-open gate.
    ///
    /// Expected: Err when applications are closed
    #[tokio::test]
    async fn rejects_when_applications_closed() {
        let test = TestBuilder::new()
            .with_application_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = domain_user(db).await;
        let faction = factory::create_faction(db).await.unwrap();

        let service = ApplicationService::new(db);
        let result = service
            .submit(&user, param(user.id, faction.id, 600), &settings(false, 500, 750))
            .await;

        assert!(result.is_err());
    }

    /// Tests the pending-application gate.
    ///
    /// Expected: Err while an application is awaiting review
    #[tokio::test]
    async fn rejects_while_pending_exists() {
        let test = TestBuilder::new()
            .with_application_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = domain_user(db).await;
        let faction = factory::create_faction(db).await.unwrap();
        factory::create_application(db, user.id, faction.id)
            .await
            .unwrap();

        let service = ApplicationService::new(db);
        let result = service
            .submit(&user, param(user.id, faction.id, 600), &settings(true, 500, 750))
            .await;

        assert!(result.is_err());
    }

    /// Tests the resubmission cooldown.
    ///
    /// A rejected application younger than the cooldown window blocks a new
    /// one; an old rejection doesn't.
    ///
    /// Expected: Err inside the window, Ok outside it
    #[tokio::test]
    async fn enforces_cooldown_window() {
        let test = TestBuilder::new()
            .with_application_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let faction = factory::create_faction(db).await.unwrap();
        let service = ApplicationService::new(db);

        // Fresh rejection: still cooling down.
        let recent = domain_user(db).await;
        factory::application::ApplicationFactory::new(db, recent.id, faction.id)
            .status(ApplicationStatus::Rejected)
            .build()
            .await
            .unwrap();
        assert!(service
            .submit(&recent, param(recent.id, faction.id, 600), &settings(true, 500, 750))
            .await
            .is_err());

        // Rejection older than the window: allowed again.
        let waited = domain_user(db).await;
        factory::application::ApplicationFactory::new(db, waited.id, faction.id)
            .status(ApplicationStatus::Rejected)
            .updated_at(Utc::now() - Duration::days(8))
            .build()
            .await
            .unwrap();
        assert!(service
            .submit(&waited, param(waited.id, faction.id, 600), &settings(true, 500, 750))
            .await
            .is_ok());
    }

    /// Tests the length bounds from settings.
    ///
    /// Expected: Err below the minimum and above the maximum
    #[tokio::test]
    async fn enforces_length_bounds() {
        let test = TestBuilder::new()
            .with_application_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = domain_user(db).await;
        let faction = factory::create_faction(db).await.unwrap();

        let service = ApplicationService::new(db);
        let site = settings(true, 500, 750);

        assert!(service
            .submit(&user, param(user.id, faction.id, 100), &site)
            .await
            .is_err());
        assert!(service
            .submit(&user, param(user.id, faction.id, 800), &site)
            .await
            .is_err());
    }

    /// Tests acceptance side effects.
    ///
    /// Expected: Ok with the user whitelisted and a live character minted
    /// from the application fields
    #[tokio::test]
    async fn accept_whitelists_and_mints_character() {
        let test = TestBuilder::new()
            .with_application_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = domain_user(db).await;
        let faction = factory::create_faction(db).await.unwrap();
        let application = factory::create_application(db, user.id, faction.id)
            .await
            .unwrap();

        let service = ApplicationService::new(db);
        let (accepted, updated_user, character) = service.accept(application.id).await.unwrap();

        assert_eq!(accepted.status, ApplicationStatus::Accepted);
        assert!(updated_user.is_whitelisted);
        assert_eq!(character.name, application.character_name);
        assert_eq!(character.faction_id, faction.id);
        assert!(!character.is_permad);
    }

    /// Tests rejection with a reason.
    ///
    /// Expected: Ok with the reason stored and no character minted
    #[tokio::test]
    async fn reject_stores_reason() {
        let test = TestBuilder::new()
            .with_application_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = domain_user(db).await;
        let faction = factory::create_faction(db).await.unwrap();
        let application = factory::create_application(db, user.id, faction.id)
            .await
            .unwrap();

        let service = ApplicationService::new(db);
        let rejected = service
            .reject(application.id, Some("too short".to_string()))
            .await
            .unwrap();

        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("too short"));

        let has_character = CharacterRepository::new(db)
            .has_live_character(user.id)
            .await
            .unwrap();
        assert!(!has_character);
    }
}
