// src/domain/maintenance/schedule.rs
//
// Calendar arithmetic for maintenance schedules.

use chrono::{Datelike, Months, NaiveDate};

/// Default interval between two services of the same component
pub const DEFAULT_FREQUENCY_MONTHS: u32 = 12;

/// Shift `date` forward by `months` calendar months.
///
/// The year rolls over as needed. When the target month is shorter than the
/// base day-of-month, the result is the last valid day of the target month
/// (2024-01-31 + 1 month = 2024-02-29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    match date.checked_add_months(Months::new(months)) {
        Some(shifted) => shifted,
        None => last_representable_day(date),
    }
}

/// Next maintenance date derived from the last service and its frequency
pub fn next_maintenance_date(maintenance_date: NaiveDate, frequency_months: u32) -> NaiveDate {
    add_months(maintenance_date, frequency_months)
}

/// Signed whole days from `today` to `target`. Negative means overdue.
pub fn days_until(today: NaiveDate, target: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}

// Overflow only happens past chrono's maximum year; saturate instead of panicking.
fn last_representable_day(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(NaiveDate::MAX.year(), 12, 31).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_add_months_same_year() {
        assert_eq!(add_months(d("2024-01-15"), 6), d("2024-07-15"));
    }

    #[test]
    fn test_add_months_rolls_over_year() {
        assert_eq!(add_months(d("2024-11-10"), 3), d("2025-02-10"));
        assert_eq!(add_months(d("2024-03-01"), 24), d("2026-03-01"));
    }

    #[test]
    fn test_add_months_clamps_to_end_of_february() {
        assert_eq!(add_months(d("2024-01-31"), 1), d("2024-02-29"));
        assert_eq!(add_months(d("2023-01-31"), 1), d("2023-02-28"));
    }

    #[test]
    fn test_add_months_clamps_to_thirty_day_month() {
        assert_eq!(add_months(d("2024-03-31"), 1), d("2024-04-30"));
        assert_eq!(add_months(d("2024-08-31"), 13), d("2025-09-30"));
    }

    #[test]
    fn test_add_zero_months_is_identity() {
        assert_eq!(add_months(d("2024-05-20"), 0), d("2024-05-20"));
    }

    #[test]
    fn test_days_until_is_signed() {
        let today = d("2024-07-10");
        assert_eq!(days_until(today, d("2024-07-15")), 5);
        assert_eq!(days_until(today, d("2024-07-10")), 0);
        assert_eq!(days_until(today, d("2024-07-08")), -2);
    }
}
