// src/repositories/maintenance_history_repository.rs
//
// Maintenance history persistence.
// The table is shared by every maintenance source; rows are keyed by
// (id, is_independent) so sources never overwrite each other.

use std::sync::Arc;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::sql::{date_to_sql, parse_date, parse_optional_date, parse_optional_timestamp, parse_timestamp, parse_uuid};
use crate::db::ConnectionPool;
use crate::domain::HistoryEntry;
use crate::error::{AppError, AppResult};

const SELECT_COLUMNS: &str =
    "SELECT id, is_independent, client_id, client_name, component_name, component_model,
            address, date, next_maintenance_date, notes, technician_id, recorded_at, updated_at
     FROM maintenance_history";

#[cfg_attr(test, mockall::automock)]
pub trait MaintenanceHistoryRepository: Send + Sync {
    fn save(&self, entry: &HistoryEntry) -> AppResult<()>;
    fn get(&self, id: Uuid, is_independent: bool) -> AppResult<Option<HistoryEntry>>;
    fn list_all(&self) -> AppResult<Vec<HistoryEntry>>;
    /// Newest service date first
    fn list_by_client(&self, client_id: &str) -> AppResult<Vec<HistoryEntry>>;
    /// Deletes only the entry of the given source. Returns whether a row was removed.
    fn delete(&self, id: Uuid, is_independent: bool) -> AppResult<bool>;
}

pub struct SqliteMaintenanceHistoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMaintenanceHistoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &Row) -> Result<HistoryEntry, rusqlite::Error> {
        Ok(HistoryEntry {
            id: parse_uuid(&row.get::<_, String>("id")?)?,
            is_independent: row.get("is_independent")?,
            client_id: row.get("client_id")?,
            client_name: row.get("client_name")?,
            component_name: row.get("component_name")?,
            component_model: row.get("component_model")?,
            address: row.get("address")?,
            date: parse_date(&row.get::<_, String>("date")?)?,
            next_maintenance_date: parse_optional_date(row.get("next_maintenance_date")?)?,
            notes: row.get("notes")?,
            technician_id: row.get("technician_id")?,
            recorded_at: parse_timestamp(&row.get::<_, String>("recorded_at")?)?,
            updated_at: parse_optional_timestamp(row.get("updated_at")?)?,
        })
    }
}

impl MaintenanceHistoryRepository for SqliteMaintenanceHistoryRepository {
    fn save(&self, entry: &HistoryEntry) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO maintenance_history (
                id, is_independent, client_id, client_name, component_name, component_model,
                address, date, next_maintenance_date, notes, technician_id, recorded_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            ON CONFLICT(id, is_independent) DO UPDATE SET
                client_id = excluded.client_id,
                client_name = excluded.client_name,
                component_name = excluded.component_name,
                component_model = excluded.component_model,
                address = excluded.address,
                date = excluded.date,
                next_maintenance_date = excluded.next_maintenance_date,
                notes = excluded.notes,
                technician_id = excluded.technician_id,
                updated_at = excluded.updated_at",
            params![
                entry.id.to_string(),
                entry.is_independent,
                entry.client_id,
                entry.client_name,
                entry.component_name,
                entry.component_model,
                entry.address,
                date_to_sql(entry.date),
                entry.next_maintenance_date.map(date_to_sql),
                entry.notes,
                entry.technician_id,
                entry.recorded_at.to_rfc3339(),
                entry.updated_at.map(|dt| dt.to_rfc3339()),
            ]
        )?;

        Ok(())
    }

    fn get(&self, id: Uuid, is_independent: bool) -> AppResult<Option<HistoryEntry>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE id = ?1 AND is_independent = ?2",
            SELECT_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string(), is_independent], Self::row_to_entry) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<HistoryEntry>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_COLUMNS))?;

        let entries: Vec<HistoryEntry> = stmt.query_map([], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn list_by_client(&self, client_id: &str) -> AppResult<Vec<HistoryEntry>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE client_id = ?1 ORDER BY date DESC, rowid",
            SELECT_COLUMNS
        ))?;

        let entries: Vec<HistoryEntry> = stmt.query_map(params![client_id], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn delete(&self, id: Uuid, is_independent: bool) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM maintenance_history WHERE id = ?1 AND is_independent = ?2",
            params![id.to_string(), is_independent]
        )?;

        Ok(rows_affected > 0)
    }
}
