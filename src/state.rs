/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 * - cheap to clone: everything inside is behind an Arc
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}
