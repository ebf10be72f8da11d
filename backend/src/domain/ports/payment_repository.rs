//! Driven port for payment persistence.
//!
//! Payment records are keyed by id with a secondary index on `match_id`.
//! Status changes are single-record overwrites applied by admin review;
//! records are never deleted.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Payment, PaymentReviewStatus};

/// Errors raised by payment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentRepositoryError {
    /// The store could not be reached.
    #[error("payment repository unavailable: {message}")]
    Unavailable { message: String },
    /// A query or mutation failed during execution.
    #[error("payment repository query failed: {message}")]
    Query { message: String },
    /// No payment exists with the given id.
    #[error("payment not found")]
    NotFound,
}

/// Persistence port for payment records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a submitted payment.
    async fn insert(&self, record: &Payment) -> Result<(), PaymentRepositoryError>;

    /// List every payment bound to a match, oldest first.
    async fn list_for_match(&self, match_id: &Uuid)
    -> Result<Vec<Payment>, PaymentRepositoryError>;

    /// List every payment with the given review status, newest first.
    async fn list_with_status(
        &self,
        status: PaymentReviewStatus,
    ) -> Result<Vec<Payment>, PaymentRepositoryError>;

    /// Overwrite a payment's review status and return the updated record.
    async fn set_status(
        &self,
        id: &Uuid,
        status: PaymentReviewStatus,
    ) -> Result<Payment, PaymentRepositoryError>;
}
