//! Business logic orchestration between controllers and the data layer.
//!
//! Services own the workflow rules (who may flip which state, what gets
//! validated, which notifications fire) and lean on repositories for the
//! actual persistence. Controllers construct services per request from
//! `AppState` parts.

pub mod account;
pub mod application;
pub mod cache;
pub mod gate;
pub mod mail;
pub mod mojang;
pub mod oauth;
pub mod panel;
pub mod password;
pub mod settings;
pub mod ticket;
pub mod token;
pub mod webhook;
