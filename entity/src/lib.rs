//! SeaORM entity models for the portal database.
//!
//! Each module maps one table. Domain conversion happens in the main crate's
//! repository layer; these types stay as close to the schema as possible.

pub mod application;
pub mod audit_log;
pub mod character;
pub mod command_queue;
pub mod email_confirmation;
pub mod faction;
pub mod minecraft_authentication;
pub mod server_status;
pub mod system_setting;
pub mod ticket;
pub mod ticket_department;
pub mod ticket_reply;
pub mod user;

pub mod prelude;
