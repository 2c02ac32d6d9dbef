//! Request body extractor for client payloads.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use tracing::debug;

use crate::domain::{AppError, ClientPayload, ValidationError};

/// JSON client payload whose rejections are reported as validation errors.
///
/// A missing `Content-Type`, an empty body or malformed JSON all end up as
/// the same 400 `{error}` response as a payload with missing fields.
#[derive(Debug)]
pub struct ClientBody(pub ClientPayload);

impl<S> FromRequest<S> for ClientBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<ClientPayload>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(Self(payload)),
            Err(rejection) => {
                debug!(status = %rejection.status(), "Rejected client body");
                Err(ValidationError::Body(rejection.body_text()).into())
            }
        }
    }
}
