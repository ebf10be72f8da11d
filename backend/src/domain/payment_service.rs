//! Payment submission, review, and the reconciliation rule.
//!
//! A match settles once both participants have an approved payment. The
//! rule encoded here is count based, as the workflow has always behaved:
//! exactly two payment records for the match and every one approved. It
//! does not verify the two payers are distinct participants, and nothing
//! caps how many payments one payer may submit; with a third record the
//! exactly-two check never fires. Both behaviours are deliberate
//! preservations, isolated in [`PaymentService::reconcile`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    EarningsEntry, EarningsReport, MatchRepository, MatchRepositoryError, PaymentCommand,
    PaymentQuery, PaymentRepository, PaymentRepositoryError, ReviewDecision, SubmitPaymentRequest,
};
use crate::domain::{
    self, Error, MatchStatus, Payment, PaymentReviewStatus, Principal,
};

fn map_payment_repo_error(error: PaymentRepositoryError) -> Error {
    match error {
        PaymentRepositoryError::NotFound => Error::not_found("payment not found"),
        other => Error::internal(format!("payment repository failure: {other}")),
    }
}

fn map_match_repo_error(error: MatchRepositoryError) -> Error {
    match error {
        MatchRepositoryError::NotFound => Error::not_found("match not found"),
        other => Error::internal(format!("match repository failure: {other}")),
    }
}

/// Payment service implementing the command and query driving ports.
#[derive(Clone)]
pub struct PaymentService<M, P> {
    matches: Arc<M>,
    payments: Arc<P>,
}

impl<M, P> PaymentService<M, P> {
    /// Create a new service over the match and payment stores.
    pub fn new(matches: Arc<M>, payments: Arc<P>) -> Self {
        Self { matches, payments }
    }
}

impl<M, P> PaymentService<M, P>
where
    M: MatchRepository,
    P: PaymentRepository,
{
    /// Promote the match to `PaymentCompleted` once its payment conditions
    /// hold: exactly two records, all approved.
    ///
    /// Runs eagerly after every approval. Idempotent without a lock: the
    /// promotion is a conditional `Accepted -> PaymentCompleted` update, so
    /// of two racing approvals one performs the transition and the other
    /// observes a stale status and does nothing.
    async fn reconcile(&self, match_id: Uuid) -> Result<(), Error> {
        let records = self
            .payments
            .list_for_match(&match_id)
            .await
            .map_err(map_payment_repo_error)?;

        let all_approved = records
            .iter()
            .all(|payment| payment.status == PaymentReviewStatus::Approved);
        if records.len() != 2 || !all_approved {
            debug!(
                match_id = %match_id,
                payments = records.len(),
                "payment conditions not met; match left unchanged"
            );
            return Ok(());
        }

        match self
            .matches
            .set_status(&match_id, MatchStatus::Accepted, MatchStatus::PaymentCompleted)
            .await
        {
            Ok(_) => {
                info!(match_id = %match_id, "match promoted to PaymentCompleted");
                Ok(())
            }
            Err(MatchRepositoryError::StaleStatus { current }) => {
                // Already promoted by a concurrent approval, or the match
                // never reached Accepted; either way the promotion does not
                // apply now.
                if current == MatchStatus::PaymentCompleted {
                    debug!(match_id = %match_id, "match already settled");
                } else {
                    warn!(match_id = %match_id, status = %current, "payments approved for a match that is not accepted");
                }
                Ok(())
            }
            Err(other) => Err(map_match_repo_error(other)),
        }
    }
}

#[async_trait]
impl<M, P> PaymentCommand for PaymentService<M, P>
where
    M: MatchRepository,
    P: PaymentRepository,
{
    async fn submit_payment(
        &self,
        principal: &Principal,
        request: SubmitPaymentRequest,
    ) -> Result<Payment, Error> {
        let record = self
            .matches
            .find_by_id(&request.match_id)
            .await
            .map_err(map_match_repo_error)?
            .ok_or_else(|| Error::not_found("match not found"))?;

        domain::authorize(
            principal,
            &[],
            Some(|p: &Principal| record.is_participant(&p.user_id)),
        )?;

        let payment = Payment::submit(
            record.id,
            principal.user_id.clone(),
            request.draft,
            Utc::now(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.payments
            .insert(&payment)
            .await
            .map_err(map_payment_repo_error)?;

        info!(payment_id = %payment.id, match_id = %record.id, "payment submitted");
        Ok(payment)
    }

    async fn review_payment(
        &self,
        principal: &Principal,
        payment_id: Uuid,
        decision: ReviewDecision,
    ) -> Result<Payment, Error> {
        domain::require_admin(principal)?;

        let status = match decision {
            ReviewDecision::Approve => PaymentReviewStatus::Approved,
            ReviewDecision::Reject => PaymentReviewStatus::Rejected,
        };

        let payment = self
            .payments
            .set_status(&payment_id, status)
            .await
            .map_err(map_payment_repo_error)?;

        info!(payment_id = %payment.id, status = ?payment.status, "payment reviewed");

        // Rejections never settle a match, so only approvals re-evaluate it.
        if decision == ReviewDecision::Approve {
            self.reconcile(payment.match_id).await?;
        }

        Ok(payment)
    }
}

#[async_trait]
impl<M, P> PaymentQuery for PaymentService<M, P>
where
    M: MatchRepository,
    P: PaymentRepository,
{
    async fn pending_payments(&self, principal: &Principal) -> Result<Vec<Payment>, Error> {
        domain::require_admin(principal)?;

        self.payments
            .list_with_status(PaymentReviewStatus::Pending)
            .await
            .map_err(map_payment_repo_error)
    }

    async fn payments_for_match(
        &self,
        principal: &Principal,
        match_id: Uuid,
    ) -> Result<Vec<Payment>, Error> {
        domain::require_admin(principal)?;

        self.payments
            .list_for_match(&match_id)
            .await
            .map_err(map_payment_repo_error)
    }

    async fn approved_earnings(&self, principal: &Principal) -> Result<EarningsReport, Error> {
        domain::require_admin(principal)?;

        let approved = self
            .payments
            .list_with_status(PaymentReviewStatus::Approved)
            .await
            .map_err(map_payment_repo_error)?;

        let total_earnings = approved.iter().map(|payment| payment.amount).sum();
        let payment_details = approved
            .into_iter()
            .map(|payment| EarningsEntry {
                amount: payment.amount,
                payer_id: payment.payer_id,
                payer_name: payment.full_name,
                match_id: payment.match_id,
                transaction_id: payment.transaction_id,
                recorded_at: payment.updated_at,
            })
            .collect();

        Ok(EarningsReport {
            total_earnings,
            payment_details,
        })
    }
}

#[cfg(test)]
#[path = "payment_service_tests.rs"]
mod tests;
