//! Trait definition(s) for authentication

use async_trait::async_trait;

/// Identity resolved by a successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    name: String,
}

impl Principal {
    /// Creates a new [`Principal`]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the authenticated name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Failure of the asynchronous verification step
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The verification operation was canceled before reaching a result
    #[error("Verification was canceled")]
    Canceled,

    /// The verification operation failed
    #[error("Verification failed: {0}")]
    Fault(String),
}

/// Validates an identity and credential pair against an identity store.
///
/// Verification may complete on an arbitrary thread at an arbitrary later
/// time. Policy such as password hashing, directory lookups or rate
/// limiting belongs entirely to the implementation; the mechanism only
/// performs structural parsing before dispatching here.
#[async_trait]
pub trait PlainAuthenticator: Send + Sync {
    /// Resolves the principal for the given identity and credential
    async fn authenticate(&self, identity: &str, credential: &str)
        -> Result<Principal, AuthError>;
}
