//! Driven port for the identity store.
//!
//! The coordinator only ever reads user records: identity and role for
//! authorization, plus name and email for the requester snapshot.

use async_trait::async_trait;

use crate::domain::{User, UserId};

/// Errors raised by identity store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityStoreError {
    /// The store could not be reached.
    #[error("identity store unavailable: {message}")]
    Unavailable { message: String },
    /// A lookup failed during execution.
    #[error("identity store query failed: {message}")]
    Query { message: String },
}

/// Read-only access to user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user by id. Returns `None` when the user does not exist.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, IdentityStoreError>;
}
