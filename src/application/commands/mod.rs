// src/application/commands/mod.rs
//
// Command Handlers
//
// - Commands are thin adapters between callers and services
// - Commands accept DTOs, return DTOs
// - Commands convert errors into `ErrorResponse`

pub mod client_commands;
pub mod maintenance_commands;

pub use client_commands::*;
pub use maintenance_commands::*;
