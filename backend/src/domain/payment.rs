//! Payment records and submission validation.
//!
//! Only status bookkeeping happens here; nothing in this crate talks to a
//! payment gateway. A participant submits a payment against a match, an
//! admin approves or rejects it, and approvals feed the reconciliation rule
//! in the payment service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;

/// Payment channel declared by the payer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentMethod {
    Bkash,
    Nagad,
    Card,
}

/// Self-declared payer category carried as submission metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PayerCategory {
    Student,
    Teacher,
}

/// Review state of a payment record. Mutated only by admin review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PaymentReviewStatus {
    Pending,
    Approved,
    Rejected,
}

/// Validation errors raised when constructing a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentValidationError {
    /// A required text field was missing or blank once trimmed.
    EmptyField { name: &'static str },
    /// The amount must be a positive number of currency units.
    NonPositiveAmount,
}

impl fmt::Display for PaymentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { name } => write!(f, "{name} must not be empty"),
            Self::NonPositiveAmount => write!(f, "amount must be greater than zero"),
        }
    }
}

impl std::error::Error for PaymentValidationError {}

/// Validated submission details supplied by the payer.
///
/// Every field is required; inbound adapters reject absent fields before a
/// draft is built, and [`Payment::submit`] rejects blank ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    pub full_name: String,
    pub email: String,
    pub whatsapp_number: String,
    /// Amount in whole currency units.
    pub amount: i64,
    pub transaction_id: String,
    pub payment_method: PaymentMethod,
    pub payer_category: PayerCategory,
    pub country: String,
    pub educational_field: String,
    pub institution: String,
    pub department: String,
}

/// Payment record bound to a match and a payer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub match_id: Uuid,
    pub payer_id: UserId,
    pub full_name: String,
    pub email: String,
    pub whatsapp_number: String,
    pub amount: i64,
    pub transaction_id: String,
    pub payment_method: PaymentMethod,
    pub payer_category: PayerCategory,
    pub country: String,
    pub educational_field: String,
    pub institution: String,
    pub department: String,
    pub status: PaymentReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn require_text(name: &'static str, value: &str) -> Result<String, PaymentValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PaymentValidationError::EmptyField { name });
    }
    Ok(trimmed.to_owned())
}

impl Payment {
    /// Build a `Pending` payment from a validated draft.
    pub fn submit(
        match_id: Uuid,
        payer_id: UserId,
        draft: PaymentDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, PaymentValidationError> {
        if draft.amount <= 0 {
            return Err(PaymentValidationError::NonPositiveAmount);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            match_id,
            payer_id,
            full_name: require_text("fullName", &draft.full_name)?,
            email: require_text("email", &draft.email)?,
            whatsapp_number: require_text("whatsappNumber", &draft.whatsapp_number)?,
            amount: draft.amount,
            transaction_id: require_text("transactionId", &draft.transaction_id)?,
            payment_method: draft.payment_method,
            payer_category: draft.payer_category,
            country: require_text("country", &draft.country)?,
            educational_field: require_text("educationalField", &draft.educational_field)?,
            institution: require_text("institution", &draft.institution)?,
            department: require_text("department", &draft.department)?,
            status: PaymentReviewStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}
