use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde_json::Value;

use super::{AuthCtx, AuthError, LookupError, UserRecord};
use crate::repos::error::RepoError;

// 2^53: from here on, integral floats no longer name a single integer.
const EXACT_FLOAT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Where identities live.
///
/// `Ok(None)` means "no such record" and is not an error; `Err` means the
/// store itself could not answer. Implementations must be shareable across
/// request tasks.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, RepoError>;
}

/// Coerce the raw `id` claim into a subject id.
///
/// Accepts JSON integers in `u64` range and integral floats (`42.0`) below
/// 2^53. Strings, booleans, fractions, negatives and larger floats are
/// rejected.
pub fn subject_id(claim: &Value) -> Result<u64, AuthError> {
    let Value::Number(n) = claim else {
        return Err(AuthError::InvalidSubject);
    };
    if let Some(id) = n.as_u64() {
        return Ok(id);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < EXACT_FLOAT_LIMIT => {
            Ok(f as u64)
        }
        _ => Err(AuthError::InvalidSubject),
    }
}

#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn IdentityStore>,
    lookup_timeout: Duration,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("lookup_timeout", &self.lookup_timeout)
            .finish_non_exhaustive()
    }
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn IdentityStore>, lookup_timeout: Duration) -> Self {
        Self {
            store,
            lookup_timeout,
        }
    }

    /// Map a subject id to a context.
    ///
    /// - `0` is anonymous and never touches the store
    /// - otherwise exactly one lookup, bounded by `lookup_timeout`
    /// - a missing record is `UnknownSubject`, not anonymous
    pub async fn resolve(&self, subject_id: u64) -> Result<AuthCtx, AuthError> {
        if subject_id == 0 {
            return Ok(AuthCtx::anonymous());
        }

        let found = tokio::time::timeout(self.lookup_timeout, self.store.find_by_id(subject_id))
            .await
            .map_err(|_| AuthError::LookupFailure(LookupError::TimedOut(self.lookup_timeout)))?
            .map_err(|e| AuthError::LookupFailure(LookupError::Store(e)))?;

        match found {
            Some(user) => Ok(AuthCtx::authenticated(subject_id, user)),
            None => Err(AuthError::UnknownSubject(subject_id)),
        }
    }
}
