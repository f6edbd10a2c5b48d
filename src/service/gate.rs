//! Whitelist gate for game-server connections.
//!
//! The game servers ask the portal whether a joining player may connect.
//! The player's account must exist, not be banned, be whitelisted, and
//! have a live character. Allowed connections are recorded in the audit
//! trail, and any console commands queued for the player are drained to the
//! staging server after a grace delay.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::time::Duration;

use crate::{
    data::{
        audit_log::AuditLogRepository, character::CharacterRepository,
        command_queue::CommandQueueRepository, user::UserRepository,
    },
    error::AppError,
    model::{
        audit::{AuditAction, CreateAuditLogParam},
        settings::SiteSettings,
    },
    service::panel::PanelService,
};

/// Seconds to wait after an allowed connection before draining queued
/// commands, giving the player time to finish joining.
const COMMAND_DRAIN_DELAY_SECONDS: u64 = 30;

/// Gate decision returned to the game server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateVerdict {
    pub allow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Portal user behind the UUID, set only on allow. Not serialized;
    /// used to kick off the command drain.
    #[serde(skip)]
    pub user_id: Option<i32>,
}

impl GateVerdict {
    fn deny(msg: &str) -> Self {
        Self {
            allow: false,
            msg: Some(msg.to_string()),
            user_id: None,
        }
    }

    fn allow(user_id: i32) -> Self {
        Self {
            allow: true,
            msg: None,
            user_id: Some(user_id),
        }
    }
}

pub struct ConnectionGateService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConnectionGateService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Decides whether the player behind a Minecraft UUID may connect.
    ///
    /// Denials return a player-facing message; an allowed connection is
    /// logged as a CONNECT audit entry.
    pub async fn allow_connection(&self, minecraft_uuid: &str) -> Result<GateVerdict, AppError> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_minecraft_uuid(minecraft_uuid)
            .await?
        else {
            return Ok(GateVerdict::deny(
                "User not found. Please create an account on the portal.",
            ));
        };

        if user.is_banned {
            return Ok(GateVerdict::deny("You are banned from the server."));
        }
        if !user.is_whitelisted {
            return Ok(GateVerdict::deny("You're not whitelisted."));
        }
        if !CharacterRepository::new(self.db)
            .has_live_character(user.id)
            .await?
        {
            return Ok(GateVerdict::deny(
                "You need to make a character on your profile.",
            ));
        }

        tracing::info!(
            "User {} is whitelisted and has a character, allowing connection",
            user.username
        );
        AuditLogRepository::new(self.db)
            .create(CreateAuditLogParam {
                user_id: user.id,
                action: AuditAction::Connect,
                target_type: None,
                target_id: None,
            })
            .await?;

        Ok(GateVerdict::allow(user.id))
    }

    /// Spawns the deferred command drain for a freshly connected player.
    ///
    /// Waits out the grace delay, then sends each queued command to the
    /// staging server, deleting commands that were delivered. Failures keep
    /// the command queued for the next join.
    pub fn spawn_command_drain(
        db: DatabaseConnection,
        panel: PanelService,
        settings: SiteSettings,
        user_id: i32,
    ) {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(COMMAND_DRAIN_DELAY_SECONDS)).await;

            if let Err(e) = Self::drain_command_queue(&db, &panel, &settings, user_id).await {
                tracing::warn!("Command drain for user {} failed: {}", user_id, e);
            }
        });
    }

    async fn drain_command_queue(
        db: &DatabaseConnection,
        panel: &PanelService,
        settings: &SiteSettings,
        user_id: i32,
    ) -> Result<(), AppError> {
        let Some(server_uuid) = settings.staging_server_uuid.as_deref() else {
            tracing::debug!("No staging server configured, leaving commands queued");
            return Ok(());
        };

        let command_repo = CommandQueueRepository::new(db);
        for queued in command_repo.get_for_user(user_id).await? {
            let delivered = panel
                .send_command(settings, server_uuid, &queued.command)
                .await?;

            if delivered {
                command_repo.delete(queued.id).await?;
            } else {
                tracing::warn!(
                    "Panel rejected command '{}' for user {}",
                    queued.command,
                    user_id
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::prelude::{AuditLog, Character, Faction, User};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use test_utils::{builder::TestBuilder, factory};

    /// Tests the gate against an unknown UUID.
    ///
    /// Expected: Ok with a denial asking the player to register
    #[tokio::test]
    async fn denies_unknown_uuid() {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Faction)
            .with_table(Character)
            .with_table(AuditLog)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ConnectionGateService::new(db);
        let verdict = service
            .allow_connection("00000000-0000-0000-0000-000000000000")
            .await
            .unwrap();

        assert!(!verdict.allow);
        assert!(verdict.msg.unwrap().contains("create an account"));
    }

    /// Tests the gate against a banned account.
    ///
    /// The ban outranks the whitelist.
    ///
    /// Expected: Ok with a ban denial
    #[tokio::test]
    async fn denies_banned_user() {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Faction)
            .with_table(Character)
            .with_table(AuditLog)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::user::UserFactory::new(db)
            .minecraft("Griefer", "44444444-4444-4444-4444-444444444444")
            .whitelisted(true)
            .banned(true)
            .build()
            .await
            .unwrap();

        let service = ConnectionGateService::new(db);
        let verdict = service
            .allow_connection(user.minecraft_uuid.as_deref().unwrap())
            .await
            .unwrap();

        assert!(!verdict.allow);
        assert!(verdict.msg.unwrap().contains("banned"));
    }

    /// Tests the gate against a non-whitelisted account.
    ///
    /// Expected: Ok with a whitelist denial
    #[tokio::test]
    async fn denies_unwhitelisted_user() {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Faction)
            .with_table(Character)
            .with_table(AuditLog)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::user::UserFactory::new(db)
            .minecraft("Hopeful", "55555555-5555-5555-5555-555555555555")
            .build()
            .await
            .unwrap();

        let service = ConnectionGateService::new(db);
        let verdict = service
            .allow_connection(user.minecraft_uuid.as_deref().unwrap())
            .await
            .unwrap();

        assert!(!verdict.allow);
        assert!(verdict.msg.unwrap().contains("not whitelisted"));
    }

    /// Tests the gate against a whitelisted account with no live character.
    ///
    /// A permad character doesn't count.
    ///
    /// Expected: Ok with a character denial
    #[tokio::test]
    async fn denies_without_live_character() {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Faction)
            .with_table(Character)
            .with_table(AuditLog)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::create_whitelisted_user(db).await.unwrap();
        let faction = factory::create_faction(db).await.unwrap();
        factory::character::CharacterFactory::new(db, user.id, faction.id)
            .permad(true)
            .build()
            .await
            .unwrap();

        let service = ConnectionGateService::new(db);
        let verdict = service
            .allow_connection(user.minecraft_uuid.as_deref().unwrap())
            .await
            .unwrap();

        assert!(!verdict.allow);
        assert!(verdict.msg.unwrap().contains("character"));
    }

    /// Tests an allowed connection.
    ///
    /// Expected: Ok allowing the player and a CONNECT audit entry
    #[tokio::test]
    async fn allows_and_audits_valid_player() {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Faction)
            .with_table(Character)
            .with_table(AuditLog)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::create_whitelisted_user(db).await.unwrap();
        let faction = factory::create_faction(db).await.unwrap();
        factory::create_character(db, user.id, faction.id)
            .await
            .unwrap();

        let service = ConnectionGateService::new(db);
        let verdict = service
            .allow_connection(user.minecraft_uuid.as_deref().unwrap())
            .await
            .unwrap();

        assert!(verdict.allow);
        assert!(verdict.msg.is_none());
        assert_eq!(verdict.user_id, Some(user.id));

        let connects = AuditLog::find()
            .filter(entity::audit_log::Column::Action.eq("CONNECT"))
            .all(db)
            .await
            .unwrap();
        assert_eq!(connects.len(), 1);
        assert_eq!(connects[0].user_id, user.id);
    }
}
