//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use super::extract::ClientBody;
use crate::app::AppState;
use crate::domain::{
    AppError, ClientId, ClientListResponse, ClientResponse, CreatedResponse, DatabaseError,
    ErrorResponse, HealthResponse, HealthStatus, MessageResponse,
};

pub const MSG_CREATED: &str = "Cliente cadastrado com sucesso";
pub const MSG_UPDATED: &str = "Cliente atualizado com sucesso";
pub const MSG_DELETED: &str = "Cliente removido com sucesso";
pub const MSG_REQUIRED_FIELDS: &str = "Todos os campos são obrigatórios";
pub const MSG_DUPLICATE: &str = "Email ou CPF já cadastrado";
pub const MSG_NOT_FOUND: &str = "Cliente não encontrado";

/// Parse the `{id}` path segment.
///
/// A segment that is not an integer can never match a row, so it is
/// reported as a missing client rather than a malformed request.
fn parse_client_id(raw: &str) -> Result<ClientId, AppError> {
    raw.trim()
        .parse::<ClientId>()
        .map_err(|_| AppError::client_not_found(raw))
}

/// List all clients, newest first
pub async fn list_clients_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClientListResponse>, AppError> {
    let clients = state.service.list_clients().await?;
    Ok(Json(ClientListResponse { clients }))
}

/// Get a single client by ID
pub async fn get_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ClientResponse>, AppError> {
    let id = parse_client_id(&id)?;
    let client = state.service.get_client(id).await?;
    Ok(Json(ClientResponse { client }))
}

/// Register a new client
pub async fn create_client_handler(
    State(state): State<Arc<AppState>>,
    ClientBody(payload): ClientBody,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = state.service.create_client(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: MSG_CREATED.to_string(),
        }),
    ))
}

/// Replace all fields of an existing client
pub async fn update_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ClientBody(payload): ClientBody,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_client_id(&id)?;
    state.service.update_client(id, payload).await?;
    Ok(Json(MessageResponse::new(MSG_UPDATED)))
}

/// Delete a client
pub async fn delete_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_client_id(&id)?;
    state.service.delete_client(id).await?;
    Ok(Json(MessageResponse::new(MSG_DELETED)))
}

/// Detailed health check
pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health_check().await;
    Json(health)
}

/// Liveness probe
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    let health = state.service.health_check().await;
    match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, MSG_REQUIRED_FIELDS.to_string()),
            AppError::Database(DatabaseError::Duplicate(_)) => {
                (StatusCode::CONFLICT, MSG_DUPLICATE.to_string())
            }
            AppError::Database(DatabaseError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, MSG_NOT_FOUND.to_string())
            }
            // Backend failures pass through with the driver's own message
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        if status.is_server_error() {
            error!(error = ?self, message = %message, "Server error");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
