mod find;

use crate::data::minecraft_auth::MinecraftAuthRepository;
use entity::prelude::MinecraftAuthentication;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
