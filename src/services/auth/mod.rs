pub mod context;
pub mod error;
pub mod extract;
pub mod factory;
pub mod identity;
pub mod policy;
pub mod service;
pub mod token_validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{AuthCtx, Identity, UserRecord};
pub use error::{AuthError, LookupError};
pub use factory::build_auth_service;
pub use identity::{IdentityResolver, IdentityStore};
pub use policy::AuthPolicy;
pub use service::AuthService;
pub use token_validator::TokenValidator;
