//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::AppError;
use super::types::{Client, ClientFields, ClientId};

/// Persistence contract for client records.
///
/// Implementations own uniqueness enforcement for `email` and `cpf`: a
/// colliding insert or update must fail with `DatabaseError::Duplicate`.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Check database connectivity
    async fn health_check(&self) -> Result<(), AppError>;

    /// All clients, most recently registered first
    async fn list_clients(&self) -> Result<Vec<Client>, AppError>;

    /// Get a single client by ID
    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, AppError>;

    /// Insert a client and return the store-assigned ID
    async fn create_client(&self, fields: &ClientFields) -> Result<ClientId, AppError>;

    /// Replace all user-supplied fields. Returns `false` when no row matched.
    async fn update_client(&self, id: ClientId, fields: &ClientFields) -> Result<bool, AppError>;

    /// Delete a client. Returns `false` when no row matched.
    async fn delete_client(&self, id: ClientId) -> Result<bool, AppError>;
}
