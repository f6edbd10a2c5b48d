//! Factories for creating test entities with sensible defaults.

pub mod application;
pub mod character;
pub mod department;
pub mod faction;
mod helpers;
pub mod minecraft_auth;
pub mod settings;
pub mod ticket;
pub mod user;

pub use application::create_application;
pub use character::create_character;
pub use department::create_department;
pub use faction::create_faction;
pub use minecraft_auth::create_auth_code;
pub use settings::create_settings;
pub use ticket::{create_reply, create_ticket};
pub use user::{create_user, create_whitelisted_user};
