mod counts;
mod create;
mod find_by_username;
mod link_minecraft;
mod search_paginated;
mod set_password;

use crate::data::user::UserRepository;
use crate::model::user::{CreateUserParam, LinkMinecraftParam};
use entity::prelude::User;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
