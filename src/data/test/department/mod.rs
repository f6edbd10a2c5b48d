mod create;
mod delete;
mod get_available;
mod set_flags;

use crate::data::department::DepartmentRepository;
use crate::model::department::UpsertDepartmentParam;
use entity::prelude::TicketDepartment;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

fn param(name: &str) -> UpsertDepartmentParam {
    UpsertDepartmentParam {
        name: name.to_string(),
        description: "Helpdesk".to_string(),
        is_hidden: false,
        is_disabled: false,
    }
}
