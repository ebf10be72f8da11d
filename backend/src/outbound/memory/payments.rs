//! In-memory payment repository.
//!
//! Map-backed store with a scan standing in for the `match_id` secondary
//! index. Status overwrites run under the write lock, matching the single
//! conditional update a database adapter would issue.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{PaymentRepository, PaymentRepositoryError};
use crate::domain::{Payment, PaymentReviewStatus};

use super::poisoned_lock;

/// Map-backed payment store.
#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    rows: RwLock<HashMap<Uuid, Payment>>,
}

impl InMemoryPaymentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert(&self, record: &Payment) -> Result<(), PaymentRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| poisoned_lock::<PaymentRepositoryError>())?;
        rows.insert(record.id, record.clone());
        Ok(())
    }

    async fn list_for_match(
        &self,
        match_id: &Uuid,
    ) -> Result<Vec<Payment>, PaymentRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| poisoned_lock::<PaymentRepositoryError>())?;
        let mut result: Vec<Payment> = rows
            .values()
            .filter(|payment| payment.match_id == *match_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn list_with_status(
        &self,
        status: PaymentReviewStatus,
    ) -> Result<Vec<Payment>, PaymentRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| poisoned_lock::<PaymentRepositoryError>())?;
        let mut result: Vec<Payment> = rows
            .values()
            .filter(|payment| payment.status == status)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn set_status(
        &self,
        id: &Uuid,
        status: PaymentReviewStatus,
    ) -> Result<Payment, PaymentRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| poisoned_lock::<PaymentRepositoryError>())?;
        let record = rows.get_mut(id).ok_or(PaymentRepositoryError::NotFound)?;

        record.status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}
