//! In-memory storage adapters.
//!
//! These adapters implement the driven ports over `RwLock`-guarded maps.
//! They honour the same contracts a database adapter must: the
//! pending-unique index on matches, conditional status updates, and
//! `match_id`-scoped payment listings.

mod directory;
mod matches;
mod payments;

pub use self::directory::{InMemorySkillCatalogue, InMemoryUserDirectory};
pub use self::matches::InMemoryMatchRepository;
pub use self::payments::InMemoryPaymentRepository;

use crate::domain::ports::{
    IdentityStoreError, MatchRepositoryError, PaymentRepositoryError, SkillStoreError,
};

/// Error raised when a lock guard was poisoned by a panicking writer.
pub(crate) trait LockPoisoned {
    fn lock_poisoned() -> Self;
}

pub(crate) fn poisoned_lock<E: LockPoisoned>() -> E {
    E::lock_poisoned()
}

impl LockPoisoned for MatchRepositoryError {
    fn lock_poisoned() -> Self {
        Self::Unavailable {
            message: "match store lock poisoned".to_owned(),
        }
    }
}

impl LockPoisoned for PaymentRepositoryError {
    fn lock_poisoned() -> Self {
        Self::Unavailable {
            message: "payment store lock poisoned".to_owned(),
        }
    }
}

impl LockPoisoned for IdentityStoreError {
    fn lock_poisoned() -> Self {
        Self::Unavailable {
            message: "user directory lock poisoned".to_owned(),
        }
    }
}

impl LockPoisoned for SkillStoreError {
    fn lock_poisoned() -> Self {
        Self::Unavailable {
            message: "skill catalogue lock poisoned".to_owned(),
        }
    }
}
