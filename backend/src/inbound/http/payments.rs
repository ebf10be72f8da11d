//! Payment workflow HTTP handlers.
//!
//! ```text
//! POST /api/v1/payments
//! GET  /api/v1/payments/pending
//! GET  /api/v1/payments/earnings
//! GET  /api/v1/payments/{match_id}
//! PUT  /api/v1/payments/{payment_id}/approve
//! PUT  /api/v1/payments/{payment_id}/reject
//! ```
//!
//! Route registration order matters: `pending` and `earnings` are literal
//! segments and must be registered before the `{match_id}` capture.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{EarningsEntry, EarningsReport, ReviewDecision, SubmitPaymentRequest};
use crate::domain::{Payment, PaymentDraft, PaymentMethod, PaymentReviewStatus, PayerCategory};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Request payload for submitting a payment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct SubmitPaymentBody {
    pub match_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub whatsapp_number: Option<String>,
    /// Amount in whole currency units.
    pub amount: Option<i64>,
    pub transaction_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub payer_category: Option<PayerCategory>,
    pub country: Option<String>,
    pub educational_field: Option<String>,
    pub institution: Option<String>,
    pub department: Option<String>,
}

impl SubmitPaymentBody {
    /// Check field presence and assemble the domain request.
    fn into_request(self) -> ApiResult<SubmitPaymentRequest> {
        Ok(SubmitPaymentRequest {
            match_id: require_field(self.match_id, "matchId")?,
            draft: PaymentDraft {
                full_name: require_field(self.full_name, "fullName")?,
                email: require_field(self.email, "email")?,
                whatsapp_number: require_field(self.whatsapp_number, "whatsappNumber")?,
                amount: require_field(self.amount, "amount")?,
                transaction_id: require_field(self.transaction_id, "transactionId")?,
                payment_method: require_field(self.payment_method, "paymentMethod")?,
                payer_category: require_field(self.payer_category, "payerCategory")?,
                country: require_field(self.country, "country")?,
                educational_field: require_field(self.educational_field, "educationalField")?,
                institution: require_field(self.institution, "institution")?,
                department: require_field(self.department, "department")?,
            },
        })
    }
}

/// Response payload for a payment record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub match_id: String,
    pub payer_id: String,
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(value: Payment) -> Self {
        Self {
            id: value.id.to_string(),
            match_id: value.match_id.to_string(),
            payer_id: value.payer_id.to_string(),
            full_name: value.full_name,
            email: value.email,
            whatsapp_number: value.whatsapp_number,
            amount: value.amount,
            transaction_id: value.transaction_id,
            payment_method: value.payment_method,
            payer_category: value.payer_category,
            country: value.country,
            educational_field: value.educational_field,
            institution: value.institution,
            department: value.department,
            status: value.status,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// One row of the earnings report.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarningsEntryResponse {
    pub amount: i64,
    pub payer_id: String,
    pub payer_name: String,
    pub match_id: String,
    pub transaction_id: String,
    pub recorded_at: String,
}

impl From<EarningsEntry> for EarningsEntryResponse {
    fn from(value: EarningsEntry) -> Self {
        Self {
            amount: value.amount,
            payer_id: value.payer_id.to_string(),
            payer_name: value.payer_name,
            match_id: value.match_id.to_string(),
            transaction_id: value.transaction_id,
            recorded_at: value.recorded_at.to_rfc3339(),
        }
    }
}

/// Response payload for the earnings report.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarningsResponse {
    pub total_earnings: i64,
    pub payment_details: Vec<EarningsEntryResponse>,
}

impl From<EarningsReport> for EarningsResponse {
    fn from(value: EarningsReport) -> Self {
        Self {
            total_earnings: value.total_earnings,
            payment_details: value.payment_details.into_iter().map(Into::into).collect(),
        }
    }
}

/// Submit a payment against an accepted match.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = SubmitPaymentBody,
    responses(
        (status = 201, description = "Payment recorded as Pending", body = PaymentResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a match participant", body = ErrorSchema),
        (status = 404, description = "Match not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "submitPayment"
)]
#[post("/payments")]
pub async fn submit_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<SubmitPaymentBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let request = body.into_inner().into_request()?;

    let payment = state
        .payment_command
        .submit_payment(&principal, request)
        .await?;
    Ok(HttpResponse::Created().json(PaymentResponse::from(payment)))
}

/// List payments awaiting review, newest first. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/payments/pending",
    responses(
        (status = 200, description = "Pending payments, newest first", body = [PaymentResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "pendingPayments"
)]
#[get("/payments/pending")]
pub async fn pending_payments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payments = state.payment_query.pending_payments(&principal).await?;
    let payload: Vec<PaymentResponse> = payments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(payload))
}

/// Report total approved earnings with per-payment detail. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/payments/earnings",
    responses(
        (status = 200, description = "Approved earnings report", body = EarningsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "approvedEarnings"
)]
#[get("/payments/earnings")]
pub async fn approved_earnings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let report = state.payment_query.approved_earnings(&principal).await?;
    Ok(HttpResponse::Ok().json(EarningsResponse::from(report)))
}

/// List the payments recorded against one match, oldest first. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/payments/{match_id}",
    params(("match_id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 200, description = "Payments for the match, oldest first", body = [PaymentResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "paymentsForMatch"
)]
#[get("/payments/{match_id}")]
pub async fn payments_for_match(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payments = state
        .payment_query
        .payments_for_match(&principal, path.into_inner())
        .await?;
    let payload: Vec<PaymentResponse> = payments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(payload))
}

/// Approve a pending payment and reconcile its match. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/payments/{payment_id}/approve",
    params(("payment_id" = Uuid, Path, description = "Payment identifier")),
    responses(
        (status = 200, description = "Payment approved", body = PaymentResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Payment not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "approvePayment"
)]
#[put("/payments/{payment_id}/approve")]
pub async fn approve_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payment = state
        .payment_command
        .review_payment(&principal, path.into_inner(), ReviewDecision::Approve)
        .await?;
    Ok(HttpResponse::Ok().json(PaymentResponse::from(payment)))
}

/// Reject a pending payment. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/payments/{payment_id}/reject",
    params(("payment_id" = Uuid, Path, description = "Payment identifier")),
    responses(
        (status = 200, description = "Payment rejected", body = PaymentResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Payment not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "rejectPayment"
)]
#[put("/payments/{payment_id}/reject")]
pub async fn reject_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payment = state
        .payment_command
        .review_payment(&principal, path.into_inner(), ReviewDecision::Reject)
        .await?;
    Ok(HttpResponse::Ok().json(PaymentResponse::from(payment)))
}

#[cfg(test)]
#[path = "payments_tests.rs"]
mod tests;
