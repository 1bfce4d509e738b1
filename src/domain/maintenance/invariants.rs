use super::entity::MaintenanceRecord;
use crate::domain::{DomainError, DomainResult};

/// Longest supported interval between two services (100 years)
pub const MAX_FREQUENCY_MONTHS: u32 = 1200;

/// Validates all MaintenanceRecord invariants
pub fn validate_maintenance(record: &MaintenanceRecord) -> DomainResult<()> {
    require_non_empty("client_id", &record.client_id)?;
    require_non_empty("component_name", &record.component_name)?;
    validate_frequency(record.frequency_months)?;
    Ok(())
}

/// Required text inputs cannot be empty or whitespace-only
pub fn require_non_empty(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(())
}

fn validate_frequency(frequency_months: u32) -> DomainResult<()> {
    if frequency_months == 0 {
        return Err(DomainError::InvariantViolation(
            "Maintenance frequency must be at least 1 month".to_string(),
        ));
    }
    if frequency_months > MAX_FREQUENCY_MONTHS {
        return Err(DomainError::InvariantViolation(format!(
            "Maintenance frequency must be at most {} months, got {}",
            MAX_FREQUENCY_MONTHS, frequency_months
        )));
    }
    Ok(())
}

/// Invariants that must hold true for MaintenanceRecord:
///
/// 1. Identity (UUID) is immutable
/// 2. client_id and component_name are never empty
/// 3. 1 <= frequency_months <= MAX_FREQUENCY_MONTHS
/// 4. next_maintenance_date follows maintenance_date + frequency_months
///    unless explicitly overridden at write time
/// 5. created_at never changes; last_modified reflects the last update
/// 6. is_independent is always true

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> MaintenanceRecord {
        MaintenanceRecord::new(
            "c1".to_string(),
            "Water heater".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_valid_record() {
        assert!(validate_maintenance(&record()).is_ok());
    }

    #[test]
    fn test_blank_client_fails() {
        let mut r = record();
        r.client_id = "  ".to_string();
        assert!(matches!(
            validate_maintenance(&r),
            Err(DomainError::MissingField("client_id"))
        ));
    }

    #[test]
    fn test_empty_component_fails() {
        let mut r = record();
        r.component_name = String::new();
        assert!(matches!(
            validate_maintenance(&r),
            Err(DomainError::MissingField("component_name"))
        ));
    }

    #[test]
    fn test_zero_frequency_fails() {
        let mut r = record();
        r.frequency_months = 0;
        assert!(matches!(
            validate_maintenance(&r),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_frequency_upper_bound() {
        let mut r = record();
        r.frequency_months = MAX_FREQUENCY_MONTHS;
        assert!(validate_maintenance(&r).is_ok());

        r.frequency_months = MAX_FREQUENCY_MONTHS + 1;
        assert!(matches!(
            validate_maintenance(&r),
            Err(DomainError::InvariantViolation(_))
        ));
    }
}
