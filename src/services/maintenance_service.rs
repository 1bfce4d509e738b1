// src/services/maintenance_service.rs
//
// Independent maintenance scheduling.
//
// Owns both the maintenance collection and the independent subset of the
// shared history collection. Every mutation writes the record first and the
// history entry second; if the second write fails the first one is undone,
// so a record and its history entry are always created, updated and deleted
// together.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::domain::maintenance::require_non_empty;
use crate::domain::{
    select_upcoming, validate_maintenance, DomainError, EnrichedMaintenance, HistoryEntry,
    MaintenancePatch, MaintenanceRecord, DEFAULT_FREQUENCY_MONTHS, UNSPECIFIED_TECHNICIAN,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    ConsistencyDriftDetected, DriftKind, EventBus, MaintenanceDeleted, MaintenanceRegistered,
    MaintenanceUpdated,
};
use crate::repositories::{ClientRepository, MaintenanceHistoryRepository, MaintenanceRepository};

/// Label used when a maintenance references a client missing from the directory
pub const UNKNOWN_CLIENT_LABEL: &str = "Unknown client";

#[derive(Debug, Clone, Default)]
pub struct RegisterMaintenanceRequest {
    pub client_id: String,
    pub component_name: String,
    /// Required; `None` is rejected as a missing field
    pub maintenance_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub component_model: Option<String>,
    /// Explicit override of the derived next date
    pub next_maintenance_date: Option<NaiveDate>,
    pub frequency_months: Option<u32>,
    pub notes: Option<String>,
    pub technician_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateMaintenanceRequest {
    pub maintenance_id: Uuid,
    pub changes: MaintenancePatch,
}

/// Result of cross-checking the maintenance and history collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairingReport {
    /// Records with no independent history entry
    pub missing_history: Vec<Uuid>,
    /// Independent history entries with no record
    pub orphaned_history: Vec<Uuid>,
}

impl PairingReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_history.is_empty() && self.orphaned_history.is_empty()
    }
}

/// Contact data looked up from the client directory
#[derive(Debug, Clone)]
struct ResolvedClient {
    name: String,
    phone: Option<String>,
    found: bool,
}

pub struct MaintenanceService {
    maintenance_repo: Arc<dyn MaintenanceRepository>,
    history_repo: Arc<dyn MaintenanceHistoryRepository>,
    client_repo: Arc<dyn ClientRepository>,
    event_bus: Arc<EventBus>,
    unknown_client_label: String,
    /// Serializes the two-collection writes
    write_lock: Mutex<()>,
}

impl MaintenanceService {
    pub fn new(
        maintenance_repo: Arc<dyn MaintenanceRepository>,
        history_repo: Arc<dyn MaintenanceHistoryRepository>,
        client_repo: Arc<dyn ClientRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            maintenance_repo,
            history_repo,
            client_repo,
            event_bus,
            unknown_client_label: UNKNOWN_CLIENT_LABEL.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_unknown_client_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_client_label = label.into();
        self
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    pub fn register(&self, request: RegisterMaintenanceRequest) -> AppResult<MaintenanceRecord> {
        let client_id = request.client_id.trim().to_string();
        let component_name = request.component_name.trim().to_string();
        require_non_empty("client_id", &client_id)?;
        require_non_empty("component_name", &component_name)?;
        let maintenance_date = request
            .maintenance_date
            .ok_or(DomainError::MissingField("maintenance_date"))?;

        let mut record = MaintenanceRecord::new(client_id, component_name, maintenance_date)
            .with_frequency(request.frequency_months.unwrap_or(DEFAULT_FREQUENCY_MONTHS));
        record.address = non_blank(request.address);
        record.component_model = non_blank(request.component_model);
        record.notes = non_blank(request.notes);
        if let Some(technician_id) = non_blank(request.technician_id) {
            record.technician_id = technician_id;
        }
        if let Some(next) = request.next_maintenance_date {
            record.next_maintenance_date = Some(next);
        }

        validate_maintenance(&record)?;

        let _guard = self.lock_writes();

        let client = self.resolve_client(&record.client_id)?;
        let client_found = client.found;
        let entry = HistoryEntry::from_record(&record, client.name);

        self.maintenance_repo.save(&record)?;
        if let Err(err) = self.history_repo.save(&entry) {
            self.compensate("register", record.id, || self.maintenance_repo.delete(record.id));
            return Err(err);
        }

        if !client_found {
            self.report_drift(record.id, DriftKind::UnknownClient);
        }

        log::info!(
            "Registered maintenance {} for client {} (next: {:?})",
            record.id, record.client_id, record.next_maintenance_date
        );
        self.event_bus.emit(MaintenanceRegistered::new(
            record.id,
            record.client_id.clone(),
            record.next_maintenance_date,
        ));

        Ok(record)
    }

    pub fn update(&self, request: UpdateMaintenanceRequest) -> AppResult<MaintenanceRecord> {
        let changes = normalize_patch(request.changes);
        let schedule_recomputed = (changes.maintenance_date.is_some()
            || changes.frequency_months.is_some())
            && changes.next_maintenance_date.is_none();

        let _guard = self.lock_writes();

        let previous = self
            .maintenance_repo
            .get_by_id(request.maintenance_id)?
            .ok_or(AppError::NotFound)?;

        let mut record = previous.clone();
        record.apply_patch(changes);
        validate_maintenance(&record)?;

        let client = self.resolve_client(&record.client_id)?;
        let client_found = client.found;

        let (entry, history_missing) = match self.history_repo.get(record.id, true)? {
            Some(mut entry) => {
                entry.sync_from(&record, client.name);
                (entry, false)
            }
            None => (HistoryEntry::from_record(&record, client.name), true),
        };

        self.maintenance_repo.save(&record)?;
        if let Err(err) = self.history_repo.save(&entry) {
            self.compensate("update", record.id, || self.maintenance_repo.save(&previous));
            return Err(err);
        }

        if history_missing {
            log::warn!(
                "History entry for maintenance {} was missing; recreated it",
                record.id
            );
            self.report_drift(record.id, DriftKind::MissingHistoryEntry);
        }
        if !client_found {
            self.report_drift(record.id, DriftKind::UnknownClient);
        }

        log::info!("Updated maintenance {}", record.id);
        self.event_bus
            .emit(MaintenanceUpdated::new(record.id, schedule_recomputed));

        Ok(record)
    }

    /// Delete a record and its independent history entry.
    /// History entries of other sources sharing the id are left alone.
    pub fn delete(&self, maintenance_id: Uuid) -> AppResult<()> {
        let _guard = self.lock_writes();

        let record = self
            .maintenance_repo
            .get_by_id(maintenance_id)?
            .ok_or(AppError::NotFound)?;

        self.maintenance_repo.delete(maintenance_id)?;

        match self.history_repo.delete(maintenance_id, true) {
            Ok(true) => {}
            Ok(false) => {
                log::warn!(
                    "Maintenance {} had no independent history entry to delete",
                    maintenance_id
                );
                self.report_drift(maintenance_id, DriftKind::OrphanedRecord);
            }
            Err(err) => {
                self.compensate("delete", maintenance_id, || self.maintenance_repo.save(&record));
                return Err(err);
            }
        }

        log::info!("Deleted maintenance {}", maintenance_id);
        self.event_bus.emit(MaintenanceDeleted::new(maintenance_id));

        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn get(&self, maintenance_id: Uuid) -> AppResult<Option<MaintenanceRecord>> {
        self.maintenance_repo.get_by_id(maintenance_id)
    }

    /// All records in insertion order
    pub fn list_all(&self) -> AppResult<Vec<MaintenanceRecord>> {
        self.maintenance_repo.list_all()
    }

    pub fn list_by_client(&self, client_id: &str) -> AppResult<Vec<MaintenanceRecord>> {
        self.maintenance_repo.list_by_client(client_id)
    }

    /// Upcoming and overdue maintenance relative to the local current date
    pub fn list_upcoming(&self, days_threshold: i64) -> AppResult<Vec<EnrichedMaintenance>> {
        self.list_upcoming_at(Local::now().date_naive(), days_threshold)
    }

    /// Records whose next date is at most `days_threshold` days after `today`,
    /// overdue ones included, most urgent first. Client contact data is
    /// looked up now rather than read from the history cache.
    pub fn list_upcoming_at(
        &self,
        today: NaiveDate,
        days_threshold: i64,
    ) -> AppResult<Vec<EnrichedMaintenance>> {
        let records = self.maintenance_repo.list_all()?;
        let mut clients: HashMap<String, ResolvedClient> = HashMap::new();

        select_upcoming(records, today, days_threshold)
            .into_iter()
            .map(|(record, days_left)| -> AppResult<EnrichedMaintenance> {
                let client = match clients.get(&record.client_id) {
                    Some(client) => client.clone(),
                    None => {
                        let client = self.resolve_client(&record.client_id)?;
                        clients.insert(record.client_id.clone(), client.clone());
                        client
                    }
                };

                Ok(EnrichedMaintenance {
                    record,
                    client_name: client.name,
                    client_phone: client.phone,
                    days_left,
                })
            })
            .collect()
    }

    /// Every history entry of a client across maintenance sources, newest first
    pub fn client_history(&self, client_id: &str) -> AppResult<Vec<HistoryEntry>> {
        self.history_repo.list_by_client(client_id)
    }

    /// Cross-check records against the independent history subset
    pub fn audit_pairing(&self) -> AppResult<PairingReport> {
        let record_ids: HashSet<Uuid> = self
            .maintenance_repo
            .list_all()?
            .into_iter()
            .map(|record| record.id)
            .collect();

        let mut history_ids = HashSet::new();
        let mut report = PairingReport::default();

        for entry in self.history_repo.list_all()? {
            if !entry.is_independent {
                continue;
            }
            if !record_ids.contains(&entry.id) {
                report.orphaned_history.push(entry.id);
            }
            history_ids.insert(entry.id);
        }

        report.missing_history = record_ids
            .into_iter()
            .filter(|id| !history_ids.contains(id))
            .collect();
        report.missing_history.sort();
        report.orphaned_history.sort();

        if !report.is_consistent() {
            log::warn!(
                "Maintenance/history drift: {} missing, {} orphaned",
                report.missing_history.len(),
                report.orphaned_history.len()
            );
        }

        Ok(report)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Single place where client identity is resolved
    fn resolve_client(&self, client_id: &str) -> AppResult<ResolvedClient> {
        Ok(match self.client_repo.get_by_id(client_id)? {
            Some(client) => ResolvedClient {
                name: client.name,
                phone: client.phone,
                found: true,
            },
            None => {
                log::warn!("Client {} not found in directory", client_id);
                ResolvedClient {
                    name: self.unknown_client_label.clone(),
                    phone: None,
                    found: false,
                }
            }
        })
    }

    /// Undo the first write of a failed pair. A failed undo is logged; the
    /// original error is what the caller sees.
    fn compensate<F>(&self, operation: &str, maintenance_id: Uuid, undo: F)
    where
        F: FnOnce() -> AppResult<()>,
    {
        log::warn!(
            "History write failed during {} of maintenance {}; rolling back",
            operation, maintenance_id
        );
        if let Err(err) = undo() {
            log::error!(
                "Rollback of {} for maintenance {} failed: {}",
                operation, maintenance_id, err
            );
        }
    }

    fn report_drift(&self, maintenance_id: Uuid, kind: DriftKind) {
        self.event_bus
            .emit(ConsistencyDriftDetected::new(maintenance_id, kind));
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim text fields; blank optional text clears the field, blank technician
/// resets to the sentinel.
fn normalize_patch(mut patch: MaintenancePatch) -> MaintenancePatch {
    patch.client_id = patch.client_id.map(|v| v.trim().to_string());
    patch.component_name = patch.component_name.map(|v| v.trim().to_string());
    patch.address = patch.address.map(non_blank);
    patch.component_model = patch.component_model.map(non_blank);
    patch.notes = patch.notes.map(non_blank);
    patch.technician_id = patch
        .technician_id
        .map(|v| non_blank(Some(v)).unwrap_or_else(|| UNSPECIFIED_TECHNICIAN.to_string()));
    patch
}
