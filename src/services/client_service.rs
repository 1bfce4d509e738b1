// src/services/client_service.rs
use crate::domain::{validate_client, Client, DomainError};
use crate::error::{AppError, AppResult};
use crate::events::{ClientRegistered, ClientUpdated, EventBus};
use crate::repositories::ClientRepository;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CreateClientRequest {
    /// Existing directory key; generated when absent
    pub client_id: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClientRequest {
    pub client_id: String,
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub email: Option<Option<String>>,
}

/// Client directory. Maintenance history caches client names at write time,
/// so renaming a client does not rewrite existing history entries.
pub struct ClientService {
    client_repo: Arc<dyn ClientRepository>,
    event_bus: Arc<EventBus>,
}

impl ClientService {
    pub fn new(client_repo: Arc<dyn ClientRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            client_repo,
            event_bus,
        }
    }

    pub fn register_client(&self, request: CreateClientRequest) -> AppResult<Client> {
        let name = request.name.trim().to_string();
        let mut client = match request.client_id.map(|id| id.trim().to_string()) {
            Some(id) if !id.is_empty() => {
                if self.client_repo.get_by_id(&id)?.is_some() {
                    return Err(AppError::Validation(DomainError::InvariantViolation(
                        format!("Client id '{}' already exists", id),
                    )));
                }
                Client::with_id(id, name)
            }
            _ => Client::new(name),
        };

        client.update_contact(
            None,
            Some(trimmed(request.phone)),
            Some(trimmed(request.address)),
            Some(trimmed(request.email)),
        );

        validate_client(&client)?;
        self.client_repo.save(&client)?;

        log::info!("Registered client {} ({})", client.id, client.name);
        self.event_bus
            .emit(ClientRegistered::new(client.id.clone(), client.name.clone()));

        Ok(client)
    }

    pub fn update_client(&self, request: UpdateClientRequest) -> AppResult<Client> {
        let mut client = self
            .client_repo
            .get_by_id(&request.client_id)?
            .ok_or(AppError::NotFound)?;

        client.update_contact(
            request.name.map(|n| n.trim().to_string()),
            request.phone.map(trimmed),
            request.address.map(trimmed),
            request.email.map(trimmed),
        );

        validate_client(&client)?;
        self.client_repo.save(&client)?;

        self.event_bus.emit(ClientUpdated::new(client.id.clone()));
        Ok(client)
    }

    pub fn get_client(&self, client_id: &str) -> AppResult<Option<Client>> {
        self.client_repo.get_by_id(client_id)
    }

    pub fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.client_repo.list_all()
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockClientRepository;

    fn service(repo: MockClientRepository) -> ClientService {
        ClientService::new(Arc::new(repo), Arc::new(EventBus::new()))
    }

    #[test]
    fn test_register_generates_id_and_trims() {
        let mut repo = MockClientRepository::new();
        repo.expect_save().times(1).returning(|_| Ok(()));

        let client = service(repo)
            .register_client(CreateClientRequest {
                name: "  Maria Souza ".to_string(),
                phone: Some(" ".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(client.name, "Maria Souza");
        assert!(client.phone.is_none());
        assert!(!client.id.is_empty());
    }

    #[test]
    fn test_register_rejects_duplicate_id() {
        let mut repo = MockClientRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(Client::with_id(id.to_string(), "Existing".to_string()))));
        repo.expect_save().never();

        let result = service(repo).register_client(CreateClientRequest {
            client_id: Some("c1".to_string()),
            name: "New".to_string(),
            ..Default::default()
        });

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let mut repo = MockClientRepository::new();
        repo.expect_save().never();

        let result = service(repo).register_client(CreateClientRequest {
            name: "   ".to_string(),
            ..Default::default()
        });

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_missing_client_is_not_found() {
        let mut repo = MockClientRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let result = service(repo).update_client(UpdateClientRequest {
            client_id: "ghost".to_string(),
            name: Some("Nobody".to_string()),
            ..Default::default()
        });

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_update_changes_phone() {
        let mut repo = MockClientRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(Client::with_id(id.to_string(), "Ana".to_string()))));
        repo.expect_save().times(1).returning(|_| Ok(()));

        let client = service(repo)
            .update_client(UpdateClientRequest {
                client_id: "c1".to_string(),
                phone: Some(Some("(21) 99999-0000".to_string())),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(client.phone.as_deref(), Some("(21) 99999-0000"));
        assert_eq!(client.name, "Ana");
    }
}
