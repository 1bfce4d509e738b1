// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and must NOT be exported

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Client
    ClientRegistered,
    ClientUpdated,

    // Maintenance
    ConsistencyDriftDetected,
    DriftKind,
    MaintenanceDeleted,
    MaintenanceRegistered,
    MaintenanceUpdated,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
