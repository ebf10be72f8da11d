//! Driven port for match persistence.
//!
//! Adapters must apply every status change as a conditional update keyed by
//! record id and expected current status, and must enforce the uniqueness
//! invariant for in-flight matches per `(skill_id, requester_id)` at the
//! storage layer so concurrent duplicate creations surface as
//! [`MatchRepositoryError::DuplicateInFlight`] rather than a generic
//! failure.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Match, MatchStatus, PaymentStatus, UserId};

/// Errors raised by match repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchRepositoryError {
    /// The store could not be reached.
    #[error("match repository unavailable: {message}")]
    Unavailable { message: String },
    /// A query or mutation failed during execution.
    #[error("match repository query failed: {message}")]
    Query { message: String },
    /// No match exists with the given id.
    #[error("match not found")]
    NotFound,
    /// The in-flight uniqueness index refused the insert.
    #[error("an in-flight match already exists for this skill and requester")]
    DuplicateInFlight,
    /// The conditional status update found a different current status.
    #[error("match status changed concurrently; now {current}")]
    StaleStatus { current: MatchStatus },
}

/// Persistence port for match records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Insert a freshly created match.
    ///
    /// Fails with [`MatchRepositoryError::DuplicateInFlight`] when another
    /// match for the same `(skill_id, requester_id)` is `Pending`; this is
    /// the serialization point for concurrent duplicate creations.
    async fn insert(&self, record: &Match) -> Result<(), MatchRepositoryError>;

    /// Fetch a match by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Match>, MatchRepositoryError>;

    /// Fetch the in-flight (`Pending` or `Accepted`) match for a skill and
    /// requester pair, if one exists.
    async fn find_in_flight(
        &self,
        skill_id: &Uuid,
        requester_id: &UserId,
    ) -> Result<Option<Match>, MatchRepositoryError>;

    /// List matches where the given user is the skill owner, newest first.
    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<Match>, MatchRepositoryError>;

    /// List every match, newest first.
    async fn list_all(&self) -> Result<Vec<Match>, MatchRepositoryError>;

    /// Atomically move a match from `expected` to `next`.
    ///
    /// Fails with [`MatchRepositoryError::StaleStatus`] when the stored
    /// status is no longer `expected`, so exactly one of two racing
    /// transitions wins. Returns the updated record.
    async fn set_status(
        &self,
        id: &Uuid,
        expected: MatchStatus,
        next: MatchStatus,
    ) -> Result<Match, MatchRepositoryError>;

    /// Overwrite the coarse payment bookkeeping flag. Independent of the
    /// lifecycle status and of payment records.
    async fn set_payment_status(
        &self,
        id: &Uuid,
        status: PaymentStatus,
    ) -> Result<Match, MatchRepositoryError>;
}
