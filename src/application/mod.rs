// src/application/mod.rs
//
// Application Layer
//
// - Boundary between callers (CLI, UI) and the services
// - Translates between DTOs and domain entities
// - Holds no business logic

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
