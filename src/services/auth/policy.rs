use tracing::{debug, error, warn};

use super::{AuthCtx, AuthError};

/// Whether a route insists on an authenticated caller.
///
/// - `required()`: recoverable failures reject the request (401)
/// - `optional()`: recoverable failures continue as anonymous
///
/// Lookup failures reject the request under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    enforce_required: bool,
}

impl AuthPolicy {
    pub const fn required() -> Self {
        Self {
            enforce_required: true,
        }
    }

    pub const fn optional() -> Self {
        Self {
            enforce_required: false,
        }
    }

    pub fn enforce_required(&self) -> bool {
        self.enforce_required
    }

    /// Turn the pipeline outcome into the context to publish, or the
    /// reason to abort.
    pub fn decide(&self, outcome: Result<AuthCtx, AuthError>) -> Result<AuthCtx, AuthError> {
        let err = match outcome {
            Ok(ctx) => return Ok(ctx),
            Err(err) => err,
        };

        if err.is_fatal() {
            error!(error = ?err, "identity store unavailable; aborting request");
            return Err(err);
        }

        if self.enforce_required {
            warn!(error = %err, "authentication required but failed");
            Err(err)
        } else {
            debug!(error = %err, "authentication failed; continuing as anonymous");
            Ok(AuthCtx::anonymous())
        }
    }
}
