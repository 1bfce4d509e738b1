// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Get the default database file path
///
/// Path structure: {APP_DATA}/gasservice/gasservice.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("gasservice").join("gasservice.db"))
}

/// Create a connection pool from configuration
///
/// Uses the configured database path, or the per-user default.
pub fn create_connection_pool(config: &AppConfig) -> AppResult<ConnectionPool> {
    let db_path = match &config.database_path {
        Some(path) => path.clone(),
        None => get_database_path()?,
    };

    create_connection_pool_at(&db_path, config.pool_size)
}

/// Create a connection pool for a specific database file
///
/// - SQLite in WAL mode
/// - Foreign keys enabled
/// - Busy timeout set to avoid immediate errors
pub fn create_connection_pool_at(db_path: &Path, max_size: u32) -> AppResult<ConnectionPool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    log::debug!("Opened database pool at {}", db_path.display());

    Ok(pool)
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone in-memory connection (for testing)
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory().map_err(AppError::Database)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(AppError::Database)?;

    Ok(conn)
}
