use axum::http::HeaderMap;

use super::{
    AuthCtx, AuthError, IdentityResolver, TokenValidator, extract::extract_credential,
    identity::subject_id,
};

/// The authentication pipeline: extract → validate → resolve.
///
/// Shared by every request behind an `Arc`; holds no per-request state.
/// Policy (reject vs. anonymous) is applied by the caller.
#[derive(Clone, Debug)]
pub struct AuthService {
    validator: TokenValidator,
    resolver: IdentityResolver,
}

impl AuthService {
    pub fn new(validator: TokenValidator, resolver: IdentityResolver) -> Self {
        Self {
            validator,
            resolver,
        }
    }

    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
        query: Option<&str>,
    ) -> Result<AuthCtx, AuthError> {
        let credential = extract_credential(headers, query)?;
        let claims = self.validator.validate(credential.as_str())?;
        let subject_id = subject_id(claims.subject())?;
        self.resolver.resolve(subject_id).await
    }
}
