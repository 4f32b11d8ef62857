use std::time::Duration;

use thiserror::Error;

use crate::repos::error::RepoError;

/// Every way authenticating a request can fail.
///
/// All variants except `LookupFailure` are recoverable: the policy either
/// rejects the request with 401 or continues anonymously. A lookup failure
/// means the identity store could not answer, and is never downgraded.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credential in Authorization header or access_token query")]
    NoCredential,

    #[error("malformed token: {0}")]
    Parse(&'static str),

    #[error("token signature rejected")]
    InvalidSignature,

    #[error("invalid token claims: {0}")]
    InvalidClaims(&'static str),

    #[error("'id' claim is not a non-negative integer")]
    InvalidSubject,

    #[error("token subject {0} has no identity record")]
    UnknownSubject(u64),

    #[error("identity lookup failed: {0}")]
    LookupFailure(#[source] LookupError),
}

impl AuthError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::LookupFailure(_))
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Store(#[from] RepoError),

    #[error("identity store did not answer within {0:?}")]
    TimedOut(Duration),
}
