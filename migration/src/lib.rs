pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_faction_table;
mod m20260105_000003_create_character_table;
mod m20260105_000004_create_application_table;
mod m20260105_000005_create_ticket_department_table;
mod m20260105_000006_create_ticket_table;
mod m20260105_000007_create_ticket_reply_table;
mod m20260106_000008_create_minecraft_authentication_table;
mod m20260106_000009_create_email_confirmation_table;
mod m20260106_000010_create_system_setting_table;
mod m20260107_000011_create_audit_log_table;
mod m20260107_000012_create_server_status_table;
mod m20260107_000013_create_command_queue_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_faction_table::Migration),
            Box::new(m20260105_000003_create_character_table::Migration),
            Box::new(m20260105_000004_create_application_table::Migration),
            Box::new(m20260105_000005_create_ticket_department_table::Migration),
            Box::new(m20260105_000006_create_ticket_table::Migration),
            Box::new(m20260105_000007_create_ticket_reply_table::Migration),
            Box::new(m20260106_000008_create_minecraft_authentication_table::Migration),
            Box::new(m20260106_000009_create_email_confirmation_table::Migration),
            Box::new(m20260106_000010_create_system_setting_table::Migration),
            Box::new(m20260107_000011_create_audit_log_table::Migration),
            Box::new(m20260107_000012_create_server_status_table::Migration),
            Box::new(m20260107_000013_create_command_queue_table::Migration),
        ]
    }
}
