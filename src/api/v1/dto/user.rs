/*
 * Responsibility
 * - response DTOs for the current-user endpoints
 * - field names follow the Conduit API (`{"user": {...}}`)
 */
use serde::Serialize;

use crate::services::auth::{AuthCtx, Identity, UserRecord};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl From<&UserRecord> for UserResponse {
    fn from(u: &UserRecord) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            bio: u.bio.clone(),
            image: u.image.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: UserResponse,
}

/// What an optionally-authenticated route knows about its caller.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: u64,
    pub authenticated: bool,
    pub username: Option<String>,
}

impl From<&AuthCtx> for SessionResponse {
    fn from(ctx: &AuthCtx) -> Self {
        let username = match ctx.current_identity() {
            Identity::User(user) => Some(user.username.clone()),
            Identity::Anonymous => None,
        };
        Self {
            id: ctx.current_subject_id(),
            authenticated: !ctx.is_anonymous(),
            username,
        }
    }
}
