mod create;
mod get_active;
mod get_for_owner;
mod record_reply;
mod set_department;

use crate::data::ticket::TicketRepository;
use crate::model::ticket::{CreateTicketParam, TicketStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

fn param(owner_id: i32, department_id: i32) -> CreateTicketParam {
    CreateTicketParam {
        owner_id,
        department_id,
        subject: "Stuck in a wall".to_string(),
        message: "Please help, I'm stuck.".to_string(),
    }
}
