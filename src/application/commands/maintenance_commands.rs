// src/application/commands/maintenance_commands.rs
//
// Maintenance Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use uuid::Uuid;

use crate::application::dto::*;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::MaintenancePatch;
use crate::services::{MaintenanceReminder, RegisterMaintenanceRequest, UpdateMaintenanceRequest};

fn parse_maintenance_id(maintenance_id: &str) -> Result<Uuid, ErrorResponse> {
    Uuid::parse_str(maintenance_id.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid maintenance id: {}", e)))
}

/// Register an independent maintenance
pub fn register_maintenance(
    state: &AppState,
    dto: RegisterMaintenanceDto,
) -> Result<MaintenanceDto, ErrorResponse> {
    let request = RegisterMaintenanceRequest {
        client_id: dto.client_id,
        component_name: dto.component_name,
        maintenance_date: parse_optional_date("maintenance_date", dto.maintenance_date.as_deref())?,
        address: dto.address,
        component_model: dto.component_model,
        next_maintenance_date: parse_optional_date(
            "next_maintenance_date",
            dto.next_maintenance_date.as_deref(),
        )?,
        frequency_months: dto.frequency_months,
        notes: dto.notes,
        technician_id: dto.technician_id,
    };

    let record = state.maintenance_service.register(request)?;
    Ok(MaintenanceDto::from(record))
}

/// Apply a partial update to a maintenance
pub fn update_maintenance(
    state: &AppState,
    dto: UpdateMaintenanceDto,
) -> Result<MaintenanceDto, ErrorResponse> {
    let maintenance_id = parse_maintenance_id(&dto.maintenance_id)?;

    let changes = MaintenancePatch {
        client_id: dto.client_id,
        address: dto.address.map(Some),
        component_name: dto.component_name,
        component_model: dto.component_model.map(Some),
        maintenance_date: parse_optional_date("maintenance_date", dto.maintenance_date.as_deref())?,
        frequency_months: dto.frequency_months,
        next_maintenance_date: parse_optional_date(
            "next_maintenance_date",
            dto.next_maintenance_date.as_deref(),
        )?,
        notes: dto.notes.map(Some),
        technician_id: dto.technician_id,
    };

    let record = state.maintenance_service.update(UpdateMaintenanceRequest {
        maintenance_id,
        changes,
    })?;
    Ok(MaintenanceDto::from(record))
}

/// Delete a maintenance and its history entry
pub fn delete_maintenance(state: &AppState, maintenance_id: &str) -> Result<(), ErrorResponse> {
    let id = parse_maintenance_id(maintenance_id)?;
    state.maintenance_service.delete(id)?;
    Ok(())
}

/// Get a single maintenance by id
pub fn get_maintenance(
    state: &AppState,
    maintenance_id: &str,
) -> Result<Option<MaintenanceDto>, ErrorResponse> {
    let id = parse_maintenance_id(maintenance_id)?;
    let record = state.maintenance_service.get(id)?;
    Ok(record.map(MaintenanceDto::from))
}

/// List all maintenance in insertion order
pub fn list_maintenance(state: &AppState) -> Result<Vec<MaintenanceDto>, ErrorResponse> {
    let records = state.maintenance_service.list_all()?;
    Ok(records.into_iter().map(MaintenanceDto::from).collect())
}

pub fn list_client_maintenance(
    state: &AppState,
    client_id: &str,
) -> Result<Vec<MaintenanceDto>, ErrorResponse> {
    let records = state.maintenance_service.list_by_client(client_id.trim())?;
    Ok(records.into_iter().map(MaintenanceDto::from).collect())
}

/// Upcoming and overdue maintenance. Uses the configured window when
/// `days_threshold` is absent.
pub fn list_upcoming_maintenance(
    state: &AppState,
    days_threshold: Option<i64>,
) -> Result<Vec<UpcomingMaintenanceDto>, ErrorResponse> {
    let threshold = days_threshold.unwrap_or(state.config.upcoming_days);
    let items = state.maintenance_service.list_upcoming(threshold)?;
    Ok(items.into_iter().map(UpcomingMaintenanceDto::from).collect())
}

/// History entries of one client across maintenance sources
pub fn get_client_history(
    state: &AppState,
    client_id: &str,
) -> Result<Vec<HistoryEntryDto>, ErrorResponse> {
    let entries = state.maintenance_service.client_history(client_id.trim())?;
    Ok(entries.into_iter().map(HistoryEntryDto::from).collect())
}

pub fn build_maintenance_reminders(
    state: &AppState,
    days_threshold: Option<i64>,
) -> Result<Vec<MaintenanceReminder>, ErrorResponse> {
    let threshold = days_threshold.unwrap_or(state.config.upcoming_days);
    Ok(state.reminder_service.build_reminders(threshold)?)
}

/// Cross-check maintenance records against their history entries
pub fn check_maintenance_consistency(
    state: &AppState,
) -> Result<ConsistencyReportDto, ErrorResponse> {
    let report = state.maintenance_service.audit_pairing()?;
    Ok(ConsistencyReportDto::from(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::test_state;
    use crate::application::error_handling::ErrorType;

    fn heater() -> RegisterMaintenanceDto {
        RegisterMaintenanceDto {
            client_id: "c1".to_string(),
            component_name: "Heater".to_string(),
            maintenance_date: Some("2024-01-15".to_string()),
            frequency_months: Some(6),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_and_get() {
        let (_dir, state) = test_state();

        let created = register_maintenance(&state, heater()).unwrap();
        assert_eq!(created.next_maintenance_date.as_deref(), Some("2024-07-15"));

        let fetched = get_maintenance(&state, &created.id).unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(list_maintenance(&state).unwrap().len(), 1);
    }

    #[test]
    fn test_register_without_date_is_validation_error() {
        let (_dir, state) = test_state();

        let err = register_maintenance(
            &state,
            RegisterMaintenanceDto {
                maintenance_date: None,
                ..heater()
            },
        )
        .unwrap_err();

        assert_eq!(err.error_type, ErrorType::Validation);
        assert!(err.details.unwrap().contains("maintenance_date"));
    }

    #[test]
    fn test_update_clears_notes_with_empty_string() {
        let (_dir, state) = test_state();
        let created = register_maintenance(
            &state,
            RegisterMaintenanceDto {
                notes: Some("check valve".to_string()),
                ..heater()
            },
        )
        .unwrap();

        let updated = update_maintenance(
            &state,
            UpdateMaintenanceDto {
                maintenance_id: created.id.clone(),
                notes: Some(String::new()),
                frequency_months: Some(3),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(updated.notes.is_none());
        assert_eq!(updated.next_maintenance_date.as_deref(), Some("2024-04-15"));

        let history = get_client_history(&state, "c1").unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].notes.is_none());
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let (_dir, state) = test_state();

        let err = delete_maintenance(&state, &Uuid::new_v4().to_string()).unwrap_err();
        assert_eq!(err.error_type, ErrorType::NotFound);

        let err = delete_maintenance(&state, "not-a-uuid").unwrap_err();
        assert_eq!(err.error_type, ErrorType::Validation);
    }

    #[test]
    fn test_delete_then_consistency_report() {
        let (_dir, state) = test_state();
        let created = register_maintenance(&state, heater()).unwrap();

        delete_maintenance(&state, &created.id).unwrap();

        assert!(get_client_history(&state, "c1").unwrap().is_empty());
        assert!(check_maintenance_consistency(&state).unwrap().consistent);
    }

    #[test]
    fn test_upcoming_includes_overdue() {
        let (_dir, state) = test_state();
        register_maintenance(
            &state,
            RegisterMaintenanceDto {
                maintenance_date: Some("2020-01-01".to_string()),
                ..heater()
            },
        )
        .unwrap();

        let upcoming = list_upcoming_maintenance(&state, None).unwrap();

        assert_eq!(upcoming.len(), 1);
        assert!(upcoming[0].days_left < 0);
        assert_eq!(upcoming[0].client_name, state.config.unknown_client_label);
    }
}
