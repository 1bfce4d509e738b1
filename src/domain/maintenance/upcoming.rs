// src/domain/maintenance/upcoming.rs
//
// Upcoming / overdue selection over maintenance records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::MaintenanceRecord;
use super::schedule::days_until;

/// Default look-ahead window for the upcoming view
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;

/// A maintenance record joined with client contact data at query time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMaintenance {
    pub record: MaintenanceRecord,
    pub client_name: String,
    pub client_phone: Option<String>,
    /// Negative when overdue
    pub days_left: i64,
}

/// Records due within `days_threshold` days of `today`, most urgent first.
///
/// Records without a next date are skipped. There is no lower bound, so
/// overdue records are always included. The sort is stable: equal
/// `days_left` keep the input order.
pub fn select_upcoming(
    records: Vec<MaintenanceRecord>,
    today: NaiveDate,
    days_threshold: i64,
) -> Vec<(MaintenanceRecord, i64)> {
    let mut due: Vec<(MaintenanceRecord, i64)> = records
        .into_iter()
        .filter_map(|record| {
            let next = record.next_maintenance_date?;
            let days_left = days_until(today, next);
            (days_left <= days_threshold).then_some((record, days_left))
        })
        .collect();

    due.sort_by_key(|(_, days_left)| *days_left);
    due
}
