//! Application state management.
//!
//! This module provides the shared application state that is
//! accessible to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::domain::ClientRepository;

use super::service::ClientService;

/// Shared application state for the Axum web server.
///
/// Holds the service wired to the one repository handle opened at
/// startup. Handlers never see the concrete repository type.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
///
/// let db = Arc::new(SqliteClient::with_defaults(&database_url).await?);
/// let state = AppState::new(db);
///
/// let router = create_router(Arc::new(state));
/// ```
#[derive(Clone)]
pub struct AppState {
    /// The application service containing business logic.
    pub service: Arc<ClientService>,
}

impl AppState {
    /// Creates a new `AppState`, wiring a `ClientService` to the repository.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self {
            service: Arc::new(ClientService::new(repository)),
        }
    }
}
