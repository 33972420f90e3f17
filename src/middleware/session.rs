use axum::{extract::FromRequestParts, http::HeaderName};

use crate::error::AppError;

pub const SESSION_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// The user id the client cached after signing in. It identifies whose
/// profile or stock a request touches; it does not authenticate anyone.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(&SESSION_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing x-user-id header".into()))?;

        let user_id = value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .ok_or_else(|| AppError::BadRequest("Invalid x-user-id header".into()))?;

        Ok(SessionUser { user_id })
    }
}
