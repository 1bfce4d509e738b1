use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schedule::{next_maintenance_date, DEFAULT_FREQUENCY_MONTHS};

/// Sentinel used when no technician was assigned to a service
pub const UNSPECIFIED_TECHNICIAN: &str = "unspecified";

/// A scheduled service of a component at a client's address,
/// registered outside the installation workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Client directory key (lookup only, not owned)
    pub client_id: String,

    pub address: Option<String>,

    pub component_name: String,

    pub component_model: Option<String>,

    /// Date the service was (or will be) performed
    pub maintenance_date: NaiveDate,

    /// Months between two services, at least 1
    pub frequency_months: u32,

    /// Derived from `maintenance_date` + `frequency_months` unless overridden
    pub next_maintenance_date: Option<NaiveDate>,

    pub notes: Option<String>,

    pub technician_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, `None` until the first update
    pub last_modified: Option<DateTime<Utc>>,

    /// Always true for records owned by the maintenance scheduler
    pub is_independent: bool,
}

/// Partial update of a maintenance record.
///
/// `None` leaves a field untouched. Clearable fields use `Option<Option<_>>`.
#[derive(Debug, Clone, Default)]
pub struct MaintenancePatch {
    pub client_id: Option<String>,
    pub address: Option<Option<String>>,
    pub component_name: Option<String>,
    pub component_model: Option<Option<String>>,
    pub maintenance_date: Option<NaiveDate>,
    pub frequency_months: Option<u32>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
    pub technician_id: Option<String>,
}

impl MaintenanceRecord {
    /// Create a new record with a derived next maintenance date
    pub fn new(client_id: String, component_name: String, maintenance_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            address: None,
            component_name,
            component_model: None,
            maintenance_date,
            frequency_months: DEFAULT_FREQUENCY_MONTHS,
            next_maintenance_date: Some(next_maintenance_date(
                maintenance_date,
                DEFAULT_FREQUENCY_MONTHS,
            )),
            notes: None,
            technician_id: UNSPECIFIED_TECHNICIAN.to_string(),
            created_at: Utc::now(),
            last_modified: None,
            is_independent: true,
        }
    }

    /// Set the frequency and re-derive the next date from it
    pub fn with_frequency(mut self, frequency_months: u32) -> Self {
        self.frequency_months = frequency_months;
        self.recompute_next_date();
        self
    }

    /// Recompute `next_maintenance_date` from the current date and frequency
    pub fn recompute_next_date(&mut self) {
        self.next_maintenance_date = Some(next_maintenance_date(
            self.maintenance_date,
            self.frequency_months,
        ));
    }

    /// Merge a patch onto this record.
    ///
    /// If the patch touches the maintenance date or the frequency and carries
    /// no explicit next date, the next date is recomputed from the merged
    /// values. The creation timestamp is preserved.
    pub fn apply_patch(&mut self, patch: MaintenancePatch) {
        let schedule_changed = patch.maintenance_date.is_some() || patch.frequency_months.is_some();

        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(component_name) = patch.component_name {
            self.component_name = component_name;
        }
        if let Some(component_model) = patch.component_model {
            self.component_model = component_model;
        }
        if let Some(date) = patch.maintenance_date {
            self.maintenance_date = date;
        }
        if let Some(frequency) = patch.frequency_months {
            self.frequency_months = frequency;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(technician_id) = patch.technician_id {
            self.technician_id = technician_id;
        }

        match patch.next_maintenance_date {
            Some(next) => self.next_maintenance_date = Some(next),
            None if schedule_changed => self.recompute_next_date(),
            None => {}
        }

        self.last_modified = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_record_defaults() {
        let record = MaintenanceRecord::new("c1".into(), "Heater".into(), d("2024-01-15"));
        assert_eq!(record.frequency_months, 12);
        assert_eq!(record.next_maintenance_date, Some(d("2025-01-15")));
        assert_eq!(record.technician_id, UNSPECIFIED_TECHNICIAN);
        assert!(record.is_independent);
        assert!(record.last_modified.is_none());
    }

    #[test]
    fn test_frequency_patch_recomputes_from_merged_values() {
        let mut record =
            MaintenanceRecord::new("c1".into(), "Heater".into(), d("2024-01-15")).with_frequency(6);
        assert_eq!(record.next_maintenance_date, Some(d("2024-07-15")));

        record.apply_patch(MaintenancePatch {
            frequency_months: Some(3),
            ..Default::default()
        });

        assert_eq!(record.next_maintenance_date, Some(d("2024-04-15")));
        assert!(record.last_modified.is_some());
    }

    #[test]
    fn test_date_patch_uses_existing_frequency() {
        let mut record =
            MaintenanceRecord::new("c1".into(), "Heater".into(), d("2024-01-15")).with_frequency(6);

        record.apply_patch(MaintenancePatch {
            maintenance_date: Some(d("2024-03-01")),
            ..Default::default()
        });

        assert_eq!(record.next_maintenance_date, Some(d("2024-09-01")));
    }

    #[test]
    fn test_explicit_next_date_wins_over_recompute() {
        let mut record = MaintenanceRecord::new("c1".into(), "Heater".into(), d("2024-01-15"));

        record.apply_patch(MaintenancePatch {
            frequency_months: Some(3),
            next_maintenance_date: Some(d("2024-12-24")),
            ..Default::default()
        });

        assert_eq!(record.frequency_months, 3);
        assert_eq!(record.next_maintenance_date, Some(d("2024-12-24")));
    }

    #[test]
    fn test_unrelated_patch_keeps_override() {
        let mut record = MaintenanceRecord::new("c1".into(), "Heater".into(), d("2024-01-15"));
        record.next_maintenance_date = Some(d("2024-02-01"));

        record.apply_patch(MaintenancePatch {
            notes: Some(Some("Replaced valve".into())),
            ..Default::default()
        });

        assert_eq!(record.next_maintenance_date, Some(d("2024-02-01")));
        assert_eq!(record.notes.as_deref(), Some("Replaced valve"));
    }

    #[test]
    fn test_patch_can_clear_optional_fields() {
        let mut record = MaintenanceRecord::new("c1".into(), "Heater".into(), d("2024-01-15"));
        record.address = Some("Rua A, 10".into());

        record.apply_patch(MaintenancePatch {
            address: Some(None),
            ..Default::default()
        });

        assert!(record.address.is_none());
    }
}
