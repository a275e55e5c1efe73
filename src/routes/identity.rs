//! Caller identity extractor.
//!
//! Authentication lives in the desktop shell; by the time a request reaches
//! this service the shell has already signed the user in and forwards their
//! id in the `x-user-id` header. Requests without a parseable id are rejected
//! before any handler runs.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user making the request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(format!("missing {USER_ID_HEADER} header")))?;

        let id = Uuid::parse_str(value)
            .map_err(|_| AppError::Unauthorized(format!("malformed {USER_ID_HEADER} header")))?;

        Ok(Self(id))
    }
}
