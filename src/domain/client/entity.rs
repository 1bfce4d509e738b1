use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer of the service business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Directory key referenced by maintenance records
    pub id: String,

    pub name: String,

    /// Free-form phone as typed by the user
    pub phone: Option<String>,

    pub address: Option<String>,

    pub email: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Create a client with a freshly generated id
    pub fn new(name: String) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Create a client keyed by an existing directory id
    pub fn with_id(id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            phone: None,
            address: None,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_contact(
        &mut self,
        name: Option<String>,
        phone: Option<Option<String>>,
        address: Option<Option<String>>,
        email: Option<Option<String>>,
    ) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(email) = email {
            self.email = email;
        }

        self.updated_at = Utc::now();
    }
}
