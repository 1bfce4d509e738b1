// src/application/commands/client_commands.rs

use crate::application::dto::*;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::services::{CreateClientRequest, UpdateClientRequest};

/// Add a client to the directory
pub fn create_client(state: &AppState, dto: CreateClientDto) -> Result<ClientDto, ErrorResponse> {
    let client = state.client_service.register_client(CreateClientRequest {
        client_id: dto.client_id,
        name: dto.name,
        phone: dto.phone,
        address: dto.address,
        email: dto.email,
    })?;
    Ok(ClientDto::from(client))
}

/// Update contact data. An empty string clears an optional field.
pub fn update_client(state: &AppState, dto: UpdateClientDto) -> Result<ClientDto, ErrorResponse> {
    let client = state.client_service.update_client(UpdateClientRequest {
        client_id: dto.client_id,
        name: dto.name,
        phone: dto.phone.map(Some),
        address: dto.address.map(Some),
        email: dto.email.map(Some),
    })?;
    Ok(ClientDto::from(client))
}

pub fn get_client(state: &AppState, client_id: &str) -> Result<Option<ClientDto>, ErrorResponse> {
    let client = state.client_service.get_client(client_id.trim())?;
    Ok(client.map(ClientDto::from))
}

pub fn list_clients(state: &AppState) -> Result<Vec<ClientDto>, ErrorResponse> {
    let clients = state.client_service.list_clients()?;
    Ok(clients.into_iter().map(ClientDto::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::maintenance_commands::{
        list_upcoming_maintenance, register_maintenance,
    };
    use crate::application::commands::test_support::test_state;
    use crate::application::error_handling::ErrorType;

    #[test]
    fn test_create_and_list_clients() {
        let (_dir, state) = test_state();

        create_client(
            &state,
            CreateClientDto {
                name: "Zilda".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        create_client(
            &state,
            CreateClientDto {
                client_id: Some("c1".to_string()),
                name: "ana".to_string(),
                phone: Some("(11) 91234-5678".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let names: Vec<String> = list_clients(&state).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["ana", "Zilda"]);
        assert!(get_client(&state, "c1").unwrap().is_some());
    }

    #[test]
    fn test_update_missing_client() {
        let (_dir, state) = test_state();

        let err = update_client(
            &state,
            UpdateClientDto {
                client_id: "ghost".to_string(),
                name: Some("Nobody".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert_eq!(err.error_type, ErrorType::NotFound);
    }

    #[test]
    fn test_client_rename_shows_in_upcoming_view() {
        let (_dir, state) = test_state();
        create_client(
            &state,
            CreateClientDto {
                client_id: Some("c1".to_string()),
                name: "Ana".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        register_maintenance(
            &state,
            RegisterMaintenanceDto {
                client_id: "c1".to_string(),
                component_name: "Stove".to_string(),
                maintenance_date: Some("2020-03-01".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        update_client(
            &state,
            UpdateClientDto {
                client_id: "c1".to_string(),
                name: Some("Ana Paula".to_string()),
                phone: Some("11 95555-4444".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let upcoming = list_upcoming_maintenance(&state, Some(0)).unwrap();
        assert_eq!(upcoming[0].client_name, "Ana Paula");
        assert_eq!(upcoming[0].client_phone.as_deref(), Some("11 95555-4444"));
    }
}
