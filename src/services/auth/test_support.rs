//! Fixtures shared by the auth tests: token minting and an in-memory store.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

use super::{AuthService, IdentityResolver, IdentityStore, TokenValidator, UserRecord};
use crate::repos::error::RepoError;

pub const SECRET: &[u8] = b"conduit-test-secret";

pub fn sign(claims: &Value) -> String {
    sign_with(SECRET, Algorithm::HS256, claims)
}

pub fn sign_with(secret: &[u8], alg: Algorithm, claims: &Value) -> String {
    jsonwebtoken::encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret))
        .expect("HMAC signing cannot fail")
}

/// Hand-assembled token for headers `jsonwebtoken` refuses to produce.
pub fn raw_token(header: &Value, claims: &Value, signature: &str) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string()),
        signature
    )
}

pub fn jake() -> UserRecord {
    UserRecord {
        id: 42,
        username: "jake".to_string(),
        email: "jake@jake.jake".to_string(),
        bio: Some("I work at statefarm".to_string()),
        image: None,
    }
}

#[derive(Debug, Default, Clone, Copy)]
enum Behavior {
    #[default]
    Answer,
    Fail,
    Hang,
}

/// `IdentityStore` double that records every lookup.
#[derive(Debug, Default)]
pub struct MockStore {
    users: HashMap<u64, UserRecord>,
    behavior: Behavior,
    lookups: Mutex<Vec<u64>>,
}

impl MockStore {
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id as u64, u)).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            behavior: Behavior::Hang,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> Vec<u64> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityStore for MockStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, RepoError> {
        self.lookups.lock().unwrap().push(id);
        match self.behavior {
            Behavior::Answer => Ok(self.users.get(&id).cloned()),
            Behavior::Fail => Err(RepoError::Db(sqlx::Error::PoolTimedOut)),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

/// A service over `store` with the test secret; the store handle is
/// returned for lookup assertions.
pub fn auth_service(store: MockStore) -> (Arc<AuthService>, Arc<MockStore>) {
    let store = Arc::new(store);
    let resolver = IdentityResolver::new(store.clone(), Duration::from_millis(200));
    let service = AuthService::new(TokenValidator::new(SECRET, 0), resolver);
    (Arc::new(service), store)
}
