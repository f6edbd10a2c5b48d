pub use super::application::Entity as Application;
pub use super::audit_log::Entity as AuditLog;
pub use super::character::Entity as Character;
pub use super::command_queue::Entity as CommandQueue;
pub use super::email_confirmation::Entity as EmailConfirmation;
pub use super::faction::Entity as Faction;
pub use super::minecraft_authentication::Entity as MinecraftAuthentication;
pub use super::server_status::Entity as ServerStatus;
pub use super::system_setting::Entity as SystemSetting;
pub use super::ticket::Entity as Ticket;
pub use super::ticket_department::Entity as TicketDepartment;
pub use super::ticket_reply::Entity as TicketReply;
pub use super::user::Entity as User;
