// src/services/reminder_service.rs
//
// WhatsApp reminder composition for upcoming maintenance.
// Messages are only built here; delivery belongs to the messaging session.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::EnrichedMaintenance;
use crate::error::AppResult;
use crate::services::MaintenanceService;

const WHATSAPP_BASE_URL: &str = "https://wa.me/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReminder {
    pub maintenance_id: Uuid,
    pub client_name: String,
    pub client_phone: String,
    pub days_left: i64,
    pub message: String,
    /// Chat link, present when the phone has digits
    pub whatsapp_link: Option<String>,
}

pub struct ReminderService {
    maintenance_service: Arc<MaintenanceService>,
    default_country_code: String,
}

impl ReminderService {
    pub fn new(maintenance_service: Arc<MaintenanceService>, default_country_code: String) -> Self {
        Self {
            maintenance_service,
            default_country_code,
        }
    }

    pub fn build_reminders(&self, days_threshold: i64) -> AppResult<Vec<MaintenanceReminder>> {
        self.build_reminders_at(Local::now().date_naive(), days_threshold)
    }

    /// One reminder per upcoming maintenance whose client has a phone,
    /// in the same urgency order as the upcoming view.
    pub fn build_reminders_at(
        &self,
        today: NaiveDate,
        days_threshold: i64,
    ) -> AppResult<Vec<MaintenanceReminder>> {
        let upcoming = self
            .maintenance_service
            .list_upcoming_at(today, days_threshold)?;

        let reminders: Vec<MaintenanceReminder> = upcoming
            .into_iter()
            .filter_map(|item| self.reminder_for(item))
            .collect();

        log::info!("Built {} maintenance reminders", reminders.len());
        Ok(reminders)
    }

    fn reminder_for(&self, item: EnrichedMaintenance) -> Option<MaintenanceReminder> {
        let Some(phone) = item.client_phone.clone() else {
            log::debug!(
                "Skipping reminder for maintenance {}: client has no phone",
                item.record.id
            );
            return None;
        };

        let whatsapp_link = normalize_phone(&phone, &self.default_country_code)
            .map(|digits| format!("{}{}", WHATSAPP_BASE_URL, digits));

        Some(MaintenanceReminder {
            maintenance_id: item.record.id,
            message: compose_message(&item),
            client_name: item.client_name,
            client_phone: phone,
            days_left: item.days_left,
            whatsapp_link,
        })
    }
}

/// Reminder text for one upcoming maintenance
pub fn compose_message(item: &EnrichedMaintenance) -> String {
    let component = &item.record.component_name;
    let when = match item.days_left {
        d if d < 0 => format!("is overdue by {}", plural_days(-d)),
        0 => "is due today".to_string(),
        d => {
            let date = item
                .record
                .next_maintenance_date
                .map(|date| format!(" ({})", date.format("%d/%m/%Y")))
                .unwrap_or_default();
            format!("is due in {}{}", plural_days(d), date)
        }
    };

    format!(
        "Hello {}, the maintenance of your {} {}. Reply to this message to schedule a visit.",
        item.client_name, component, when
    )
}

fn plural_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Digits-only international number for WhatsApp links.
///
/// Local numbers (10 or 11 digits once trunk zeros are dropped) get the
/// default country code. Returns `None` when the phone has no digits.
pub fn normalize_phone(phone: &str, default_country_code: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_start_matches('0');

    if digits.is_empty() {
        return None;
    }

    if phone.trim_start().starts_with('+') {
        return Some(digits.to_string());
    }

    match digits.len() {
        10 | 11 => Some(format!("{}{}", default_country_code, digits)),
        _ => Some(digits.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MaintenanceRecord;
    use chrono::Duration;

    fn item(days_left: i64) -> EnrichedMaintenance {
        let today = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();
        let mut record = MaintenanceRecord::new("c1".into(), "water heater".into(), today);
        record.next_maintenance_date = Some(today + Duration::days(days_left));
        EnrichedMaintenance {
            record,
            client_name: "Paulo".to_string(),
            client_phone: Some("(11) 98765-4321".to_string()),
            days_left,
        }
    }

    #[test]
    fn test_message_for_future_maintenance() {
        let message = compose_message(&item(5));
        assert!(message.starts_with("Hello Paulo, the maintenance of your water heater"));
        assert!(message.contains("is due in 5 days (15/07/2024)"));
    }

    #[test]
    fn test_message_for_today_and_overdue() {
        assert!(compose_message(&item(0)).contains("is due today"));
        assert!(compose_message(&item(-1)).contains("is overdue by 1 day."));
        assert!(compose_message(&item(-12)).contains("is overdue by 12 days"));
    }

    #[test]
    fn test_normalize_local_number_adds_country_code() {
        assert_eq!(
            normalize_phone("(11) 98765-4321", "55").as_deref(),
            Some("5511987654321")
        );
        assert_eq!(
            normalize_phone("011 3456-7890", "55").as_deref(),
            Some("551134567890")
        );
    }

    #[test]
    fn test_normalize_international_number_is_kept() {
        assert_eq!(
            normalize_phone("+351 912 345 678", "55").as_deref(),
            Some("351912345678")
        );
    }

    #[test]
    fn test_normalize_without_digits() {
        assert_eq!(normalize_phone("n/a", "55"), None);
    }
}
