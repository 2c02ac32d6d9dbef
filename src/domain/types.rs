use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use super::error::AppError;

/// Store-assigned client identifier.
pub type ClientId = i64;

/// Core domain entity representing a registered client.
///
/// Field names on the wire follow the public API (`nome`, `telefone`,
/// `cpf`, `data_cadastro`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "data_cadastro")]
    pub registered_at: DateTime<Utc>,
}

/// Request payload for creating or replacing a client.
///
/// Every field is optional at the deserialization level so that a missing
/// or `null` field is reported as a validation failure instead of a JSON
/// rejection. Numbers are accepted and stored as their decimal text, so
/// `"telefone": 11987654321` is a valid phone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClientPayload {
    #[serde(rename = "nome", default, deserialize_with = "scalar_text")]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[serde(rename = "telefone", default, deserialize_with = "scalar_text")]
    #[validate(required, length(min = 1))]
    pub phone: Option<String>,
    #[serde(rename = "cpf", default, deserialize_with = "scalar_text")]
    #[validate(required, length(min = 1))]
    pub tax_id: Option<String>,
}

/// Reads a string or number as text. Anything else counts as absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

impl ClientPayload {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        tax_id: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            tax_id: Some(tax_id.into()),
        }
    }

    /// Validates presence of all four fields and returns the values the
    /// store will persist.
    pub fn into_fields(self) -> Result<ClientFields, AppError> {
        self.validate()?;

        Ok(ClientFields {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            tax_id: self.tax_id.unwrap_or_default(),
        })
    }
}

/// Validated user-supplied fields of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
}

/// Response body for `GET /api/clientes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientListResponse {
    #[serde(rename = "clientes")]
    pub clients: Vec<Client>,
}

/// Response body for `GET /api/clientes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientResponse {
    #[serde(rename = "cliente")]
    pub client: Client,
}

/// Response body for a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: ClientId,
    pub message: String,
}

/// Response body for a successful update or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check status for services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(database: HealthStatus) -> Self {
        Self {
            status: database.clone(),
            database,
            timestamp: Utc::now(),
        }
    }
}
