//! Domain models and operation-specific parameter types.
//!
//! Repositories convert SeaORM entities into these models at the data-layer
//! boundary; controllers convert them into DTOs (`into_dto`) for API
//! responses. Parameter structs name the inputs of each operation instead of
//! passing long argument lists around.

pub mod api;
pub mod application;
pub mod audit;
pub mod character;
pub mod department;
pub mod faction;
pub mod server_status;
pub mod settings;
pub mod ticket;
pub mod user;
