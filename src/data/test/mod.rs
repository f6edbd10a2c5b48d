mod application;
mod department;
mod minecraft_auth;
mod settings;
mod ticket;
mod user;
