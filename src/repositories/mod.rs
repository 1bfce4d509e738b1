// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

mod sql;

pub mod client_repository;
pub mod maintenance_history_repository;
pub mod maintenance_repository;

pub use client_repository::{ClientRepository, SqliteClientRepository};
pub use maintenance_history_repository::{MaintenanceHistoryRepository, SqliteMaintenanceHistoryRepository};
pub use maintenance_repository::{MaintenanceRepository, SqliteMaintenanceRepository};

#[cfg(test)]
pub use client_repository::MockClientRepository;
#[cfg(test)]
pub use maintenance_history_repository::MockMaintenanceHistoryRepository;
#[cfg(test)]
pub use maintenance_repository::MockMaintenanceRepository;
