// src/repositories/client_repository.rs
//
// Client directory persistence

use std::sync::Arc;
use rusqlite::{params, Row};

use super::sql::parse_timestamp;
use crate::db::ConnectionPool;
use crate::domain::Client;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ClientRepository: Send + Sync {
    fn save(&self, client: &Client) -> AppResult<()>;
    fn get_by_id(&self, id: &str) -> AppResult<Option<Client>>;
    /// Ordered by name
    fn list_all(&self) -> AppResult<Vec<Client>>;
}

pub struct SqliteClientRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteClientRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_client(row: &Row) -> Result<Client, rusqlite::Error> {
        Ok(Client {
            id: row.get("id")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            address: row.get("address")?,
            email: row.get("email")?,
            created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
            updated_at: parse_timestamp(&row.get::<_, String>("updated_at")?)?,
        })
    }
}

impl ClientRepository for SqliteClientRepository {
    fn save(&self, client: &Client) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO clients (id, name, phone, address, email, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                phone = excluded.phone,
                address = excluded.address,
                email = excluded.email,
                updated_at = excluded.updated_at",
            params![
                client.id,
                client.name,
                client.phone,
                client.address,
                client.email,
                client.created_at.to_rfc3339(),
                client.updated_at.to_rfc3339(),
            ]
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: &str) -> AppResult<Option<Client>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, phone, address, email, created_at, updated_at
             FROM clients WHERE id = ?1"
        )?;

        match stmt.query_row(params![id], Self::row_to_client) {
            Ok(client) => Ok(Some(client)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Client>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, phone, address, email, created_at, updated_at
             FROM clients
             ORDER BY name COLLATE NOCASE"
        )?;

        let clients: Vec<Client> = stmt.query_map([], Self::row_to_client)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(clients)
    }
}
