// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ty, $name:literal) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { $name }
        }
    };
}

// ============================================================================
// MAINTENANCE EVENTS
// ============================================================================

/// Emitted after a maintenance record and its history entry were written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub maintenance_id: Uuid,
    pub client_id: String,
    pub next_maintenance_date: Option<NaiveDate>,
}

impl MaintenanceRegistered {
    pub fn new(maintenance_id: Uuid, client_id: String, next_maintenance_date: Option<NaiveDate>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            maintenance_id,
            client_id,
            next_maintenance_date,
        }
    }
}

impl_domain_event!(MaintenanceRegistered, "MaintenanceRegistered");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub maintenance_id: Uuid,
    /// True when the next date was recomputed from date/frequency
    pub schedule_recomputed: bool,
}

impl MaintenanceUpdated {
    pub fn new(maintenance_id: Uuid, schedule_recomputed: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            maintenance_id,
            schedule_recomputed,
        }
    }
}

impl_domain_event!(MaintenanceUpdated, "MaintenanceUpdated");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub maintenance_id: Uuid,
}

impl MaintenanceDeleted {
    pub fn new(maintenance_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            maintenance_id,
        }
    }
}

impl_domain_event!(MaintenanceDeleted, "MaintenanceDeleted");

/// What kind of drift between collections was observed and healed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    /// Update found no independent history entry and recreated it
    MissingHistoryEntry,
    /// Delete found no independent history entry to remove
    OrphanedRecord,
    /// A maintenance references a client absent from the directory
    UnknownClient,
}

/// Soft consistency problem detected and self-healed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyDriftDetected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub maintenance_id: Uuid,
    pub kind: DriftKind,
}

impl ConsistencyDriftDetected {
    pub fn new(maintenance_id: Uuid, kind: DriftKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            maintenance_id,
            kind,
        }
    }
}

impl_domain_event!(ConsistencyDriftDetected, "ConsistencyDriftDetected");

// ============================================================================
// CLIENT EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub client_id: String,
    pub name: String,
}

impl ClientRegistered {
    pub fn new(client_id: String, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            client_id,
            name,
        }
    }
}

impl_domain_event!(ClientRegistered, "ClientRegistered");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub client_id: String,
}

impl ClientUpdated {
    pub fn new(client_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            client_id,
        }
    }
}

impl_domain_event!(ClientUpdated, "ClientUpdated");
