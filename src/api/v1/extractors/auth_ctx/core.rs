use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::AuthCtx;

/// The caller's `AuthCtx`, as set by the access middleware.
///
/// Only meaningful on routes wrapped by `middleware::auth::access`. On any
/// other route there is no context and the extractor rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthCtx);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                tracing::error!("no auth context; is the access middleware mounted on this route?");
                AppError::Unauthorized
            })
    }
}
