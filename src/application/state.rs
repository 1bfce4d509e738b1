// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::ConnectionPool;
use crate::events::EventBus;
use crate::repositories::{
    ClientRepository, MaintenanceHistoryRepository, MaintenanceRepository,
    SqliteClientRepository, SqliteMaintenanceHistoryRepository, SqliteMaintenanceRepository,
};
use crate::services::{ClientService, MaintenanceService, ReminderService};

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub config: AppConfig,
    pub event_bus: Arc<EventBus>,
    pub maintenance_service: Arc<MaintenanceService>,
    pub client_service: Arc<ClientService>,
    pub reminder_service: Arc<ReminderService>,
}

impl AppState {
    /// Wire repositories and services on top of an initialized pool
    pub fn new(config: AppConfig, pool: Arc<ConnectionPool>) -> Self {
        let event_bus = Arc::new(EventBus::new());

        // REPOSITORIES
        let maintenance_repo: Arc<dyn MaintenanceRepository> =
            Arc::new(SqliteMaintenanceRepository::new(pool.clone()));
        let history_repo: Arc<dyn MaintenanceHistoryRepository> =
            Arc::new(SqliteMaintenanceHistoryRepository::new(pool.clone()));
        let client_repo: Arc<dyn ClientRepository> = Arc::new(SqliteClientRepository::new(pool));

        // SERVICES
        let maintenance_service = Arc::new(
            MaintenanceService::new(
                maintenance_repo,
                history_repo,
                client_repo.clone(),
                event_bus.clone(),
            )
            .with_unknown_client_label(config.unknown_client_label.clone()),
        );
        let client_service = Arc::new(ClientService::new(client_repo, event_bus.clone()));
        let reminder_service = Arc::new(ReminderService::new(
            maintenance_service.clone(),
            config.default_country_code.clone(),
        ));

        Self {
            config,
            event_bus,
            maintenance_service,
            client_service,
            reminder_service,
        }
    }
}
