// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// - DTOs are UI-friendly representations
// - Dates travel as `YYYY-MM-DD` strings, timestamps as RFC 3339
// - Conversion FROM domain entities only; inbound DTOs are parsed by commands

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::application::error_handling::ErrorResponse;
use crate::domain::{Client, EnrichedMaintenance, HistoryEntry, MaintenanceRecord};
use crate::services::PairingReport;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// MAINTENANCE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceDto {
    pub id: String,
    pub client_id: String,
    pub address: Option<String>,
    pub component_name: String,
    pub component_model: Option<String>,
    pub maintenance_date: String,
    pub frequency_months: u32,
    pub next_maintenance_date: Option<String>,
    pub notes: Option<String>,
    pub technician_id: String,
    pub created_at: String,
    pub last_modified: Option<String>,
    pub is_independent: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterMaintenanceDto {
    pub client_id: String,
    pub component_name: String,
    pub maintenance_date: Option<String>,
    pub address: Option<String>,
    pub component_model: Option<String>,
    pub next_maintenance_date: Option<String>,
    pub frequency_months: Option<u32>,
    pub notes: Option<String>,
    pub technician_id: Option<String>,
}

/// Partial update. Absent fields are left untouched; an empty string
/// clears an optional text field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateMaintenanceDto {
    pub maintenance_id: String,
    pub client_id: Option<String>,
    pub address: Option<String>,
    pub component_name: Option<String>,
    pub component_model: Option<String>,
    pub maintenance_date: Option<String>,
    pub frequency_months: Option<u32>,
    pub next_maintenance_date: Option<String>,
    pub notes: Option<String>,
    pub technician_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingMaintenanceDto {
    pub maintenance: MaintenanceDto,
    pub client_name: String,
    pub client_phone: Option<String>,
    /// Negative when overdue
    pub days_left: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub component_name: String,
    pub component_model: Option<String>,
    pub address: Option<String>,
    pub date: String,
    pub next_maintenance_date: Option<String>,
    pub notes: Option<String>,
    pub technician_id: String,
    pub is_independent: bool,
    pub recorded_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyReportDto {
    pub consistent: bool,
    pub missing_history: Vec<String>,
    pub orphaned_history: Vec<String>,
}

// ============================================================================
// CLIENT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateClientDto {
    pub client_id: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateClientDto {
    pub client_id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

// ============================================================================
// PARSING HELPERS
// ============================================================================

/// Accepts a plain date or an RFC 3339 timestamp, which is truncated to its date
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ErrorResponse> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ErrorResponse::validation(format!("Invalid {}: '{}'", field, value)))
}

pub fn parse_optional_date(
    field: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ErrorResponse> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => parse_date(field, v).map(Some),
        _ => Ok(None),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

impl From<MaintenanceRecord> for MaintenanceDto {
    fn from(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            client_id: record.client_id,
            address: record.address,
            component_name: record.component_name,
            component_model: record.component_model,
            maintenance_date: format_date(record.maintenance_date),
            frequency_months: record.frequency_months,
            next_maintenance_date: record.next_maintenance_date.map(format_date),
            notes: record.notes,
            technician_id: record.technician_id,
            created_at: record.created_at.to_rfc3339(),
            last_modified: record.last_modified.map(|t| t.to_rfc3339()),
            is_independent: record.is_independent,
        }
    }
}

impl From<EnrichedMaintenance> for UpcomingMaintenanceDto {
    fn from(item: EnrichedMaintenance) -> Self {
        Self {
            maintenance: MaintenanceDto::from(item.record),
            client_name: item.client_name,
            client_phone: item.client_phone,
            days_left: item.days_left,
        }
    }
}

impl From<HistoryEntry> for HistoryEntryDto {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            client_id: entry.client_id,
            client_name: entry.client_name,
            component_name: entry.component_name,
            component_model: entry.component_model,
            address: entry.address,
            date: format_date(entry.date),
            next_maintenance_date: entry.next_maintenance_date.map(format_date),
            notes: entry.notes,
            technician_id: entry.technician_id,
            is_independent: entry.is_independent,
            recorded_at: entry.recorded_at.to_rfc3339(),
            updated_at: entry.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl From<PairingReport> for ConsistencyReportDto {
    fn from(report: PairingReport) -> Self {
        Self {
            consistent: report.is_consistent(),
            missing_history: report.missing_history.iter().map(|id| id.to_string()).collect(),
            orphaned_history: report.orphaned_history.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            phone: client.phone,
            address: client.address,
            email: client.email,
            created_at: client.created_at.to_rfc3339(),
            updated_at: client.updated_at.to_rfc3339(),
        }
    }
}
