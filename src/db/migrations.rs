// src/db/migrations.rs
//
// Schema setup for the client directory, the independent maintenance
// table and the shared maintenance history table (schema.sql).
// A database written by a newer build is refused rather than downgraded.

use rusqlite::Connection;
use crate::error::{AppError, AppResult};

/// Version 1: clients, independent_maintenance, maintenance_history
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Create the maintenance tables on a fresh database and check the
/// recorded version on an existing one. Safe to call on every start.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    match get_schema_version(conn)? {
        0 => {
            apply_initial_schema(conn)?;
            set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
            log::info!("Created maintenance tables (schema version {})", CURRENT_SCHEMA_VERSION);
            Ok(())
        }
        CURRENT_SCHEMA_VERSION => Ok(()),
        found => Err(AppError::Other(format!(
            "Database schema version {} is not supported by this build (expected {})",
            found, CURRENT_SCHEMA_VERSION
        ))),
    }
}

/// 0 on a fresh file without `schema_version`
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0)
        )
        .map_err(AppError::Database)?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row(
            "SELECT MAX(version) FROM schema_version",
            [],
            |row| row.get(0)
        )
        .map_err(AppError::Database)?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version]
    ).map_err(AppError::Database)?;

    Ok(())
}

/// Apply initial schema (version 1) from the embedded schema.sql
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to create maintenance tables: {}", e)))?;

    Ok(())
}

/// `PRAGMA integrity_check` must report `ok` before the services start
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    if result != "ok" {
        return Err(AppError::Other(format!("Database integrity check failed: {}", result)));
    }

    Ok(())
}

/// Row counts per collection plus file size, logged at startup
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn
        .query_row("PRAGMA page_count", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    let page_size: i64 = conn
        .query_row("PRAGMA page_size", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    let count = |sql: &str| -> AppResult<i64> {
        conn.query_row(sql, [], |row| row.get(0)).map_err(AppError::Database)
    };

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        client_count: count("SELECT COUNT(*) FROM clients")?,
        maintenance_count: count("SELECT COUNT(*) FROM independent_maintenance")?,
        history_count: count("SELECT COUNT(*) FROM maintenance_history")?,
        independent_history_count: count(
            "SELECT COUNT(*) FROM maintenance_history WHERE is_independent = 1",
        )?,
    })
}

#[derive(Debug)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub client_count: i64,
    pub maintenance_count: i64,
    pub history_count: i64,
    pub independent_history_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        initialize_database(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 1);

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('clients', 'independent_maintenance', 'maintenance_history', 'schema_version')",
                [],
                |row| row.get(0)
            )
            .unwrap();

        assert_eq!(table_count, 4);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        set_schema_version(&conn, 2).unwrap();

        assert!(initialize_database(&conn).is_err());
    }

    #[test]
    fn test_frequency_check_constraint() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO independent_maintenance
                (id, client_id, component_name, maintenance_date, frequency_months, created_at)
             VALUES ('m1', 'c1', 'Heater', '2024-01-15', 0, datetime('now'))",
            []
        );

        assert!(result.is_err(), "Zero frequency should violate the check constraint");
    }

    #[test]
    fn test_history_key_allows_same_id_across_sources() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        for flag in [0, 1] {
            conn.execute(
                "INSERT INTO maintenance_history
                    (id, is_independent, client_id, client_name, component_name, date,
                     technician_id, recorded_at)
                 VALUES ('shared', ?1, 'c1', 'Ana', 'Heater', '2024-01-15', 'unspecified',
                     datetime('now'))",
                [flag]
            ).unwrap();
        }

        let stats = get_database_stats(&conn).unwrap();
        assert_eq!(stats.history_count, 2);
        assert_eq!(stats.independent_history_count, 1);
    }

    #[test]
    fn test_database_stats() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();

        assert!(stats.size_bytes > 0);
        assert_eq!(stats.client_count, 0);
        assert_eq!(stats.maintenance_count, 0);
        assert_eq!(stats.history_count, 0);
    }

    #[test]
    fn test_integrity_check() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
    }
}
