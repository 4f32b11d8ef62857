use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::AuthError;

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Claim mapping of a token whose signature has been verified.
///
/// Construction guarantees a non-null `id` claim; whether it is a usable
/// subject id is decided by the identity resolver.
#[derive(Debug, Clone)]
pub struct Claims(Map<String, Value>);

impl Claims {
    fn from_map(all: Map<String, Value>) -> Result<Self, AuthError> {
        match all.get("id") {
            None | Some(Value::Null) => Err(AuthError::InvalidClaims("missing 'id' claim")),
            Some(_) => Ok(Self(all)),
        }
    }

    /// Raw `id` claim.
    pub fn subject(&self) -> &Value {
        self.get("id").unwrap_or(&Value::Null)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

#[derive(Deserialize)]
struct JoseHeader {
    alg: String,
}

/// HMAC-only JWT verifier.
///
/// Built once at startup from the shared secret; the key never changes
/// for the lifetime of the process.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    leeway_seconds: u64,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenValidator")
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenValidator {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            leeway_seconds,
        }
    }

    /// Verify the signature and decode the claims.
    ///
    /// The header is inspected before any cryptography so that a token
    /// announcing a non-HMAC algorithm (including `none`) is reported as a
    /// signature failure rather than a parse failure.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let alg = hmac_algorithm(token)?;

        let mut validation = Validation::new(alg);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // `exp`/`nbf` are checked when present but not demanded.
        validation.required_spec_claims = HashSet::new();
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = self.leeway_seconds;

        let data = jsonwebtoken::decode::<Map<String, Value>>(token, &self.decoding_key, &validation)
            .map_err(|e| classify(e.kind()))?;

        Claims::from_map(data.claims)
    }
}

fn hmac_algorithm(token: &str) -> Result<Algorithm, AuthError> {
    let encoded = token.split('.').next().unwrap_or_default();
    let raw = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| AuthError::Parse("header is not base64url"))?;
    let header: JoseHeader =
        serde_json::from_slice(&raw).map_err(|_| AuthError::Parse("header is not a JOSE object"))?;

    match header.alg.as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(AuthError::InvalidSignature),
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::InvalidClaims("token expired"),
        ErrorKind::ImmatureSignature => AuthError::InvalidClaims("token not yet valid"),
        ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims("required claim missing"),
        ErrorKind::InvalidClaimFormat(_) => AuthError::InvalidClaims("exp/nbf is not a timestamp"),
        ErrorKind::InvalidToken => AuthError::Parse("token is not three dot-separated segments"),
        ErrorKind::Base64(_) => AuthError::Parse("segment is not base64url"),
        ErrorKind::Json(_) | ErrorKind::Utf8(_) => AuthError::Parse("payload is not a JSON object"),
        _ => AuthError::Parse("token could not be decoded"),
    }
}
