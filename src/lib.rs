// src/lib.rs
// Gas Service - maintenance scheduling for gas appliance installations
//
// Architecture:
// - Domain-centric: scheduling rules and invariants live in domains
// - Paired writes: every maintenance record has exactly one history entry
// - Event-driven: services report what happened through the event bus
// - Local-first: one SQLite file per installation

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    add_months,
    days_until,
    next_maintenance_date,
    validate_client,
    validate_maintenance,
    // Client
    Client,
    DomainError,
    // Maintenance
    EnrichedMaintenance,
    // History
    HistoryEntry,
    MaintenancePatch,
    MaintenanceRecord,
    DEFAULT_FREQUENCY_MONTHS,
    DEFAULT_UPCOMING_DAYS,
};

// ============================================================================
// PUBLIC API - Error Types & Configuration
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    ClientRegistered,
    ClientUpdated,
    ConsistencyDriftDetected,
    DomainEvent,
    DriftKind,
    EventBus,
    EventLogEntry,
    MaintenanceDeleted,
    MaintenanceRegistered,
    MaintenanceUpdated,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ClientRepository,
    MaintenanceHistoryRepository,
    MaintenanceRepository,
    SqliteClientRepository,
    SqliteMaintenanceHistoryRepository,
    SqliteMaintenanceRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Client Service
    ClientService,
    CreateClientRequest,
    UpdateClientRequest,
    // Maintenance Service
    MaintenanceService,
    PairingReport,
    RegisterMaintenanceRequest,
    UpdateMaintenanceRequest,
    // Reminder Service
    MaintenanceReminder,
    ReminderService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};

pub use application::commands;
pub use application::dto;
