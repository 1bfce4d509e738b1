use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::maintenance::MaintenanceRecord;

/// Denormalized maintenance history row used for cross-source reporting.
///
/// The collection is shared with installation-driven maintenance; entries
/// written by the scheduler carry `is_independent = true` and the id of
/// their MaintenanceRecord. `(id, is_independent)` is the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub client_id: String,

    /// Resolved from the client directory at write time, never re-resolved
    pub client_name: String,

    pub component_name: String,
    pub component_model: Option<String>,
    pub address: Option<String>,

    /// Service date
    pub date: NaiveDate,

    pub next_maintenance_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub technician_id: String,
    pub is_independent: bool,
    pub recorded_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    /// Project a maintenance record into a fresh history entry
    pub fn from_record(record: &MaintenanceRecord, client_name: String) -> Self {
        Self {
            id: record.id,
            client_id: record.client_id.clone(),
            client_name,
            component_name: record.component_name.clone(),
            component_model: record.component_model.clone(),
            address: record.address.clone(),
            date: record.maintenance_date,
            next_maintenance_date: record.next_maintenance_date,
            notes: record.notes.clone(),
            technician_id: record.technician_id.clone(),
            is_independent: record.is_independent,
            recorded_at: record.created_at,
            updated_at: record.last_modified,
        }
    }

    /// Copy the record's current fields over this entry, keeping `recorded_at`
    pub fn sync_from(&mut self, record: &MaintenanceRecord, client_name: String) {
        let recorded_at = self.recorded_at;
        *self = Self::from_record(record, client_name);
        self.recorded_at = recorded_at;
        self.updated_at = Some(record.last_modified.unwrap_or_else(Utc::now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::maintenance::MaintenancePatch;

    #[test]
    fn test_projection_copies_record_fields() {
        let mut record = MaintenanceRecord::new(
            "c1".to_string(),
            "Boiler".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        record.address = Some("Av. Central, 200".to_string());

        let entry = HistoryEntry::from_record(&record, "Maria".to_string());

        assert_eq!(entry.id, record.id);
        assert_eq!(entry.client_name, "Maria");
        assert_eq!(entry.date, record.maintenance_date);
        assert_eq!(entry.address, record.address);
        assert!(entry.is_independent);
        assert!(entry.updated_at.is_none());
    }

    #[test]
    fn test_sync_keeps_recorded_at() {
        let mut record = MaintenanceRecord::new(
            "c1".to_string(),
            "Boiler".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        let mut entry = HistoryEntry::from_record(&record, "Maria".to_string());
        let recorded_at = entry.recorded_at;

        record.apply_patch(MaintenancePatch {
            component_name: Some("Boiler X".to_string()),
            ..Default::default()
        });
        entry.sync_from(&record, "Maria Silva".to_string());

        assert_eq!(entry.recorded_at, recorded_at);
        assert_eq!(entry.component_name, "Boiler X");
        assert_eq!(entry.client_name, "Maria Silva");
        assert!(entry.updated_at.is_some());
    }
}
