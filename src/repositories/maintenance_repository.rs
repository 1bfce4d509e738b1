// src/repositories/maintenance_repository.rs
//
// Independent maintenance persistence

use std::sync::Arc;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::sql::{date_to_sql, parse_date, parse_optional_date, parse_optional_timestamp, parse_timestamp, parse_uuid};
use crate::db::ConnectionPool;
use crate::domain::MaintenanceRecord;
use crate::error::{AppError, AppResult};

const SELECT_COLUMNS: &str =
    "SELECT id, client_id, address, component_name, component_model, maintenance_date,
            frequency_months, next_maintenance_date, notes, technician_id,
            created_at, last_modified, is_independent
     FROM independent_maintenance";

#[cfg_attr(test, mockall::automock)]
pub trait MaintenanceRepository: Send + Sync {
    /// Insert or update in place. Updates keep the original insertion position.
    fn save(&self, record: &MaintenanceRecord) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>>;
    /// All records in insertion order
    fn list_all(&self) -> AppResult<Vec<MaintenanceRecord>>;
    fn list_by_client(&self, client_id: &str) -> AppResult<Vec<MaintenanceRecord>>;
    /// Fails with `NotFound` when nothing was deleted
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteMaintenanceRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMaintenanceRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to MaintenanceRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_record(row: &Row) -> Result<MaintenanceRecord, rusqlite::Error> {
        let frequency: i64 = row.get("frequency_months")?;

        Ok(MaintenanceRecord {
            id: parse_uuid(&row.get::<_, String>("id")?)?,
            client_id: row.get("client_id")?,
            address: row.get("address")?,
            component_name: row.get("component_name")?,
            component_model: row.get("component_model")?,
            maintenance_date: parse_date(&row.get::<_, String>("maintenance_date")?)?,
            frequency_months: frequency as u32,
            next_maintenance_date: parse_optional_date(row.get("next_maintenance_date")?)?,
            notes: row.get("notes")?,
            technician_id: row.get("technician_id")?,
            created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
            last_modified: parse_optional_timestamp(row.get("last_modified")?)?,
            is_independent: row.get("is_independent")?,
        })
    }
}

impl MaintenanceRepository for SqliteMaintenanceRepository {
    fn save(&self, record: &MaintenanceRecord) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO independent_maintenance (
                id, client_id, address, component_name, component_model, maintenance_date,
                frequency_months, next_maintenance_date, notes, technician_id,
                created_at, last_modified, is_independent
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            ON CONFLICT(id) DO UPDATE SET
                client_id = excluded.client_id,
                address = excluded.address,
                component_name = excluded.component_name,
                component_model = excluded.component_model,
                maintenance_date = excluded.maintenance_date,
                frequency_months = excluded.frequency_months,
                next_maintenance_date = excluded.next_maintenance_date,
                notes = excluded.notes,
                technician_id = excluded.technician_id,
                last_modified = excluded.last_modified,
                is_independent = excluded.is_independent",
            params![
                record.id.to_string(),
                record.client_id,
                record.address,
                record.component_name,
                record.component_model,
                date_to_sql(record.maintenance_date),
                record.frequency_months as i64,
                record.next_maintenance_date.map(date_to_sql),
                record.notes,
                record.technician_id,
                record.created_at.to_rfc3339(),
                record.last_modified.map(|dt| dt.to_rfc3339()),
                record.is_independent,
            ]
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<MaintenanceRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_COLUMNS))?;

        let records: Vec<MaintenanceRecord> = stmt.query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn list_by_client(&self, client_id: &str) -> AppResult<Vec<MaintenanceRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE client_id = ?1 ORDER BY rowid",
            SELECT_COLUMNS
        ))?;

        let records: Vec<MaintenanceRecord> = stmt.query_map(params![client_id], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM independent_maintenance WHERE id = ?1",
            params![id.to_string()]
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool_at, initialize_database};
    use crate::domain::MaintenancePatch;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SqliteMaintenanceRepository) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool_at(&dir.path().join("test.db"), 2).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        (dir, SqliteMaintenanceRepository::new(Arc::new(pool)))
    }

    fn record(client: &str, component: &str) -> MaintenanceRecord {
        MaintenanceRecord::new(
            client.to_string(),
            component.to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_save_and_get_preserves_fields() {
        let (_dir, repo) = setup();
        let mut r = record("c1", "Heater").with_frequency(6);
        r.address = Some("Rua das Flores, 12".to_string());
        r.notes = Some("Annual check".to_string());

        repo.save(&r).unwrap();
        let loaded = repo.get_by_id(r.id).unwrap().unwrap();

        assert_eq!(loaded.client_id, "c1");
        assert_eq!(loaded.frequency_months, 6);
        assert_eq!(loaded.next_maintenance_date, r.next_maintenance_date);
        assert_eq!(loaded.address, r.address);
        assert_eq!(loaded.notes, r.notes);
        assert_eq!(loaded.created_at.timestamp(), r.created_at.timestamp());
        assert!(loaded.is_independent);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let (_dir, repo) = setup();
        assert!(repo.get_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_update_keeps_insertion_order() {
        let (_dir, repo) = setup();
        let mut first = record("c1", "first");
        let second = record("c1", "second");
        repo.save(&first).unwrap();
        repo.save(&second).unwrap();

        first.apply_patch(MaintenancePatch {
            notes: Some(Some("edited".to_string())),
            ..Default::default()
        });
        repo.save(&first).unwrap();

        let names: Vec<String> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| r.component_name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_list_by_client_exact_match() {
        let (_dir, repo) = setup();
        repo.save(&record("c1", "Heater")).unwrap();
        repo.save(&record("c10", "Stove")).unwrap();
        repo.save(&record("c1", "Boiler")).unwrap();

        let records = repo.list_by_client("c1").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.client_id == "c1"));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_dir, repo) = setup();
        assert!(matches!(repo.delete(Uuid::new_v4()), Err(AppError::NotFound)));
    }

    #[test]
    fn test_delete_removes_record() {
        let (_dir, repo) = setup();
        let r = record("c1", "Heater");
        repo.save(&r).unwrap();

        repo.delete(r.id).unwrap();

        assert!(repo.get_by_id(r.id).unwrap().is_none());
    }
}
