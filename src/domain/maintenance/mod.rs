pub mod entity;
pub mod invariants;
pub mod schedule;
pub mod upcoming;

pub use entity::{MaintenancePatch, MaintenanceRecord, UNSPECIFIED_TECHNICIAN};
pub use invariants::{require_non_empty, validate_maintenance, MAX_FREQUENCY_MONTHS};
pub use schedule::{add_months, days_until, next_maintenance_date, DEFAULT_FREQUENCY_MONTHS};
pub use upcoming::{select_upcoming, EnrichedMaintenance, DEFAULT_UPCOMING_DAYS};
