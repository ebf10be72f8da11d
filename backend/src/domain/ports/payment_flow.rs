//! Driving ports for payment submission, review, and projections.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Payment, PaymentDraft, Principal, UserId};

/// Request to submit a payment against a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaymentRequest {
    pub match_id: Uuid,
    pub draft: PaymentDraft,
}

/// Admin decision over a pending payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// One approved payment row in the earnings report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsEntry {
    pub amount: i64,
    pub payer_id: UserId,
    pub payer_name: String,
    pub match_id: Uuid,
    pub transaction_id: String,
    pub recorded_at: DateTime<Utc>,
}

/// Earnings projection over all approved payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReport {
    pub total_earnings: i64,
    pub payment_details: Vec<EarningsEntry>,
}

/// Driving port for payment mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentCommand: Send + Sync {
    /// Submit a payment for a match the principal participates in.
    async fn submit_payment(
        &self,
        principal: &Principal,
        request: SubmitPaymentRequest,
    ) -> Result<Payment, Error>;

    /// Approve or reject a pending payment. Admin only. Approval triggers
    /// reconciliation of the payment's match.
    async fn review_payment(
        &self,
        principal: &Principal,
        payment_id: Uuid,
        decision: ReviewDecision,
    ) -> Result<Payment, Error>;
}

/// Driving port for payment projections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentQuery: Send + Sync {
    /// Every payment awaiting review, newest first. Admin only.
    async fn pending_payments(&self, principal: &Principal) -> Result<Vec<Payment>, Error>;

    /// Payments bound to one match, oldest first. Admin only.
    async fn payments_for_match(
        &self,
        principal: &Principal,
        match_id: Uuid,
    ) -> Result<Vec<Payment>, Error>;

    /// Sum of all approved payment amounts plus per-payment detail. Admin
    /// only.
    async fn approved_earnings(&self, principal: &Principal) -> Result<EarningsReport, Error>;
}
