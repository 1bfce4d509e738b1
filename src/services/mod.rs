// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod client_service;
pub mod maintenance_service;
pub mod reminder_service;


// Re-export all services and their types
pub use client_service::{
    ClientService,
    CreateClientRequest,
    UpdateClientRequest,
};

pub use maintenance_service::{
    MaintenanceService,
    PairingReport,
    RegisterMaintenanceRequest,
    UpdateMaintenanceRequest,
    UNKNOWN_CLIENT_LABEL,
};

pub use reminder_service::{
    MaintenanceReminder,
    ReminderService,
};
