// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod client;
pub mod history;
pub mod maintenance;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Client Domain
pub use client::{validate_client, Client};

// Maintenance Domain
pub use maintenance::{
    add_months, days_until, next_maintenance_date, select_upcoming, validate_maintenance,
    EnrichedMaintenance, MaintenancePatch, MaintenanceRecord, DEFAULT_FREQUENCY_MONTHS,
    DEFAULT_UPCOMING_DAYS, UNSPECIFIED_TECHNICIAN,
};

// History Domain (Denormalized Data)
pub use history::HistoryEntry;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
