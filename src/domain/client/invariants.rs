use super::entity::Client;
use crate::domain::maintenance::require_non_empty;
use crate::domain::{DomainError, DomainResult};

/// Validates all Client invariants
pub fn validate_client(client: &Client) -> DomainResult<()> {
    require_non_empty("id", &client.id)?;
    require_non_empty("name", &client.name)?;
    validate_phone(client.phone.as_deref())?;
    Ok(())
}

/// A phone, when present, must contain at least one digit
fn validate_phone(phone: Option<&str>) -> DomainResult<()> {
    if let Some(phone) = phone {
        if !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvariantViolation(format!(
                "Phone '{}' has no digits",
                phone
            )));
        }
    }
    Ok(())
}
