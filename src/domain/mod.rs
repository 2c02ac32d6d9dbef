//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, DatabaseError, ValidationError};
pub use traits::ClientRepository;
pub use types::{
    Client, ClientFields, ClientId, ClientListResponse, ClientPayload, ClientResponse,
    CreatedResponse, ErrorResponse, HealthResponse, HealthStatus, MessageResponse,
};
