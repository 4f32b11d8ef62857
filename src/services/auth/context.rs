//! The per-request authentication context.
//!
//! The middleware builds exactly one `AuthCtx` per request and inserts it
//! into the request extensions; handlers read it through the `CurrentUser`
//! extractor. Fields are private so the subject id and the identity can
//! only be set together.

use crate::repos::user_repo::UserRow;

pub type UserRecord = UserRow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    User(UserRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    subject_id: u64,
    identity: Identity,
}

impl AuthCtx {
    pub fn anonymous() -> Self {
        Self {
            subject_id: 0,
            identity: Identity::Anonymous,
        }
    }

    pub(crate) fn authenticated(subject_id: u64, user: UserRecord) -> Self {
        Self {
            subject_id,
            identity: Identity::User(user),
        }
    }

    /// 0 means anonymous.
    pub fn current_subject_id(&self) -> u64 {
        self.subject_id
    }

    pub fn current_identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self.identity, Identity::Anonymous)
    }
}

impl Default for AuthCtx {
    fn default() -> Self {
        Self::anonymous()
    }
}
