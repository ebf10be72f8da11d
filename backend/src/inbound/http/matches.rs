//! Match workflow HTTP handlers.
//!
//! ```text
//! POST /api/v1/matches/request
//! GET  /api/v1/matches/received
//! GET  /api/v1/matches
//! POST /api/v1/matches/{match_id}/accept
//! POST /api/v1/matches/{match_id}/reject
//! PUT  /api/v1/matches/{match_id}/payment-status
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateMatchRequest, MatchWithPayments};
use crate::domain::{Match, MatchStatus, PaymentStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payments::PaymentResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Request payload for opening a match.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CreateMatchBody {
    pub skill_id: Option<Uuid>,
}

/// Request payload for the admin payment bookkeeping flag.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PaymentStatusBody {
    pub status: Option<PaymentStatus>,
}

/// Response payload for a match record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: String,
    pub skill_id: String,
    pub requester_id: String,
    pub requester_name: String,
    pub requester_email: String,
    pub skill_owner_id: String,
    pub status: MatchStatus,
    pub payment_status: PaymentStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Match> for MatchResponse {
    fn from(value: Match) -> Self {
        Self {
            id: value.id.to_string(),
            skill_id: value.skill_id.to_string(),
            requester_id: value.requester_id.to_string(),
            requester_name: value.requester_name,
            requester_email: value.requester_email,
            skill_owner_id: value.skill_owner_id.to_string(),
            status: value.status,
            payment_status: value.payment_status,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Response payload pairing a match with its payment records.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchWithPaymentsResponse {
    #[serde(rename = "match")]
    pub record: MatchResponse,
    pub payments: Vec<PaymentResponse>,
}

impl From<MatchWithPayments> for MatchWithPaymentsResponse {
    fn from(value: MatchWithPayments) -> Self {
        Self {
            record: value.record.into(),
            payments: value.payments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Open a match request against a skill.
#[utoipa::path(
    post,
    path = "/api/v1/matches/request",
    request_body = CreateMatchBody,
    responses(
        (status = 201, description = "Match created in Pending", body = MatchResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Skill or requester not found", body = ErrorSchema),
        (status = 409, description = "Duplicate in-flight match", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "createMatch"
)]
#[post("/matches/request")]
pub async fn create_match(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<CreateMatchBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let skill_id = require_field(body.into_inner().skill_id, "skillId")?;

    let record = state
        .match_command
        .create_match(&principal, CreateMatchRequest { skill_id })
        .await?;
    Ok(HttpResponse::Created().json(MatchResponse::from(record)))
}

/// List match requests received by the caller as skill owner.
#[utoipa::path(
    get,
    path = "/api/v1/matches/received",
    responses(
        (status = 200, description = "Received match requests, newest first", body = [MatchResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "receivedMatches"
)]
#[get("/matches/received")]
pub async fn received_matches(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let records = state.match_query.received_matches(&principal).await?;
    let payload: Vec<MatchResponse> = records.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(payload))
}

/// List every match with its payments. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/matches",
    responses(
        (status = 200, description = "All matches with payments", body = [MatchWithPaymentsResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "listMatches"
)]
#[get("/matches")]
pub async fn list_matches(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let records = state.match_query.list_matches(&principal).await?;
    let payload: Vec<MatchWithPaymentsResponse> = records.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(payload))
}

/// Accept a pending match. Skill owner only.
#[utoipa::path(
    post,
    path = "/api/v1/matches/{match_id}/accept",
    params(("match_id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 200, description = "Match accepted", body = MatchResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not the skill owner", body = ErrorSchema),
        (status = 404, description = "Match not found", body = ErrorSchema),
        (status = 409, description = "Match is no longer pending", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "acceptMatch"
)]
#[post("/matches/{match_id}/accept")]
pub async fn accept_match(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let record = state
        .match_command
        .accept_match(&principal, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MatchResponse::from(record)))
}

/// Reject a pending match. Skill owner only.
#[utoipa::path(
    post,
    path = "/api/v1/matches/{match_id}/reject",
    params(("match_id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 200, description = "Match rejected", body = MatchResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not the skill owner", body = ErrorSchema),
        (status = 404, description = "Match not found", body = ErrorSchema),
        (status = 409, description = "Match is no longer pending", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "rejectMatch"
)]
#[post("/matches/{match_id}/reject")]
pub async fn reject_match(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let record = state
        .match_command
        .reject_match(&principal, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MatchResponse::from(record)))
}

/// Overwrite the coarse payment bookkeeping flag. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/matches/{match_id}/payment-status",
    params(("match_id" = Uuid, Path, description = "Match identifier")),
    request_body = PaymentStatusBody,
    responses(
        (status = 200, description = "Flag updated", body = MatchResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Match not found", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "setMatchPaymentStatus"
)]
#[put("/matches/{match_id}/payment-status")]
pub async fn set_match_payment_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    body: web::Json<PaymentStatusBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let status = require_field(body.into_inner().status, "status")?;

    let record = state
        .match_command
        .set_match_payment_status(&principal, path.into_inner(), status)
        .await?;
    Ok(HttpResponse::Ok().json(MatchResponse::from(record)))
}

#[cfg(test)]
#[path = "matches_tests.rs"]
mod tests;
