use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Record id taken from the `{id}` path segment.
///
/// An id that is not a UUID cannot name any record, so it is rejected with
/// the same 404 as an unknown or foreign-owned id.
pub struct RecordId(pub Uuid);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound(RESOURCE_NOT_FOUND.to_string()))?;

        Uuid::parse_str(raw.trim())
            .map(RecordId)
            .map_err(|_| AppError::NotFound(RESOURCE_NOT_FOUND.to_string()))
    }
}

/// Shared 404 message so that every "cannot see this record" path looks identical
pub const RESOURCE_NOT_FOUND: &str = "Resume not found";
