//! Application service layer.
//!
//! This module contains the client-registry use cases. It validates input,
//! delegates persistence to a `ClientRepository`, and turns "no row
//! matched" outcomes into not-found errors.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::{
    AppError, Client, ClientId, ClientPayload, ClientRepository, DatabaseError, HealthResponse,
    HealthStatus,
};

/// Application service containing core business logic.
///
/// Holds the repository behind a trait object so tests can swap in the
/// in-memory mock.
///
/// # Example
///
/// ```ignore
/// let db = Arc::new(SqliteClient::new(&database_url, SqliteConfig::default()).await?);
/// let service = ClientService::new(db);
///
/// let id = service.create_client(payload).await?;
/// ```
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    /// Creates a new `ClientService` instance.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    /// Lists every client, most recently registered first.
    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.repository.list_clients().await
    }

    /// Gets a client by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no client has this ID.
    #[instrument(skip(self))]
    pub async fn get_client(&self, id: ClientId) -> Result<Client, AppError> {
        self.repository
            .get_client(id)
            .await?
            .ok_or_else(|| AppError::client_not_found(id))
    }

    /// Registers a new client and returns its store-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an `AppError` if:
    /// - Any of the four fields is missing or empty
    /// - `email` or `cpf` is already registered
    /// - The database operation fails
    #[instrument(skip(self, payload))]
    pub async fn create_client(&self, payload: ClientPayload) -> Result<ClientId, AppError> {
        let fields = payload.into_fields().inspect_err(|e| {
            warn!(error = %e, "Validation failed for create client request");
        })?;

        let id = self.repository.create_client(&fields).await?;
        info!(client_id = id, "Client registered");
        Ok(id)
    }

    /// Replaces all four user-supplied fields of an existing client.
    ///
    /// Applies the same presence rules as [`create_client`](Self::create_client).
    /// A uniqueness violation is not a conflict here: it is reported as a
    /// plain storage failure carrying the driver's message.
    #[instrument(skip(self, payload))]
    pub async fn update_client(&self, id: ClientId, payload: ClientPayload) -> Result<(), AppError> {
        let fields = payload.into_fields().inspect_err(|e| {
            warn!(client_id = id, error = %e, "Validation failed for update client request");
        })?;

        let updated = self
            .repository
            .update_client(id, &fields)
            .await
            .map_err(|e| match e {
                AppError::Database(DatabaseError::Duplicate(msg)) => {
                    AppError::Database(DatabaseError::Query(msg))
                }
                other => other,
            })?;

        if !updated {
            return Err(AppError::client_not_found(id));
        }
        info!(client_id = id, "Client updated");
        Ok(())
    }

    /// Permanently removes a client.
    #[instrument(skip(self))]
    pub async fn delete_client(&self, id: ClientId) -> Result<(), AppError> {
        if !self.repository.delete_client(id).await? {
            return Err(AppError::client_not_found(id));
        }
        info!(client_id = id, "Client removed");
        Ok(())
    }

    /// Performs a health check on the database.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> HealthResponse {
        let db_health = match self.repository.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!(error = ?e, "Database health check failed");
                HealthStatus::Unhealthy
            }
        };

        HealthResponse::new(db_health)
    }
}
