// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands return DTOs
// - Commands handle error conversion for the UI
// - Commands NEVER contain business logic

pub mod catalog_commands;

pub use catalog_commands::*;
