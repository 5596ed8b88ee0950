// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between the presentation layer and the services
// - Translates store and domain state into DTOs

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
