//! Locating the raw credential in a request.
//!
//! Precedence:
//! 1. `Authorization` header, with an optional `Token ` scheme marker
//! 2. `access_token` query parameter (taken verbatim)
//!
//! Nothing here judges whether the credential is well formed; that is the
//! validator's job.

use axum::http::{HeaderMap, header};

use super::AuthError;

const SCHEME_PREFIX: &str = "TOKEN ";
const QUERY_PARAM: &str = "access_token";

/// Raw credential as submitted, scheme marker already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn extract_credential(headers: &HeaderMap, query: Option<&str>) -> Result<Credential, AuthError> {
    // Any non-empty header wins; bytes outside visible ASCII are left for
    // the validator to reject.
    let from_header = headers
        .get(header::AUTHORIZATION)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .filter(|v| !v.is_empty());

    if let Some(value) = from_header {
        return Ok(Credential(strip_scheme_prefix(&value).to_string()));
    }

    query
        .and_then(query_token)
        .map(Credential)
        .ok_or(AuthError::NoCredential)
}

/// Removes one leading `TOKEN ` (any case) when something follows it.
///
/// A value that is exactly the marker is returned untouched.
pub fn strip_scheme_prefix(value: &str) -> &str {
    match (value.get(..SCHEME_PREFIX.len()), value.get(SCHEME_PREFIX.len()..)) {
        (Some(prefix), Some(rest)) if !rest.is_empty() && prefix.eq_ignore_ascii_case(SCHEME_PREFIX) => {
            rest
        }
        _ => value,
    }
}

fn query_token(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
