/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, IdentityResolver, IdentityStore, TokenValidator};

pub fn build_auth_service(config: &Config, store: Arc<dyn IdentityStore>) -> Arc<AuthService> {
    let validator = TokenValidator::new(config.jwt_secret.as_bytes(), config.jwt_leeway_seconds);
    let resolver = IdentityResolver::new(store, config.identity_lookup_timeout);

    Arc::new(AuthService::new(validator, resolver))
}
