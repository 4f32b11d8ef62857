/*
 * Responsibility
 * - endpoints that read the caller's identity from the auth context
 * - no store access here: the middleware already resolved the user
 */
use axum::Json;

use crate::{
    api::v1::{
        dto::user::{SessionResponse, UserBody},
        extractors::CurrentUser,
    },
    error::AppError,
    services::auth::Identity,
};

/// GET /user (auth required)
pub async fn current_user(CurrentUser(ctx): CurrentUser) -> Result<Json<UserBody>, AppError> {
    match ctx.current_identity() {
        Identity::User(user) => Ok(Json(UserBody { user: user.into() })),
        // A token for subject 0 passes the middleware as anonymous.
        Identity::Anonymous => Err(AppError::Unauthorized),
    }
}

/// GET /session (auth optional)
pub async fn session(CurrentUser(ctx): CurrentUser) -> Json<SessionResponse> {
    Json(SessionResponse::from(&ctx))
}
