pub mod entity;
pub mod invariants;

pub use entity::Client;
pub use invariants::validate_client;
