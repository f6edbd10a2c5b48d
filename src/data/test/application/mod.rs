mod counts;
mod create;
mod latest_for_user;
mod pending_exists;
mod set_accepted;
mod set_rejected;

use crate::data::application::ApplicationRepository;
use crate::model::application::{ApplicationStatus, CreateApplicationParam};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Standard create param against a user/faction pair.
fn param(user_id: i32, faction_id: i32) -> CreateApplicationParam {
    CreateApplicationParam {
        user_id,
        faction_id,
        character_name: "Aldric".to_string(),
        character_race: "Human".to_string(),
        character_class: "Warrior".to_string(),
        backstory: "backstory ".repeat(60),
        description: "description ".repeat(50),
    }
}
