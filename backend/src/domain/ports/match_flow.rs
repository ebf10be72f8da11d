//! Driving ports for the match lifecycle.
//!
//! HTTP handlers depend on these traits as `Arc<dyn _>` so they stay
//! testable without real stores. Every operation receives the verified
//! principal; the services behind the ports run the authorization gate and
//! the lifecycle rules.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Match, Payment, PaymentStatus, Principal};

/// Request to open a match against a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub skill_id: Uuid,
}

/// Admin projection of a match together with its payment records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchWithPayments {
    #[serde(rename = "match")]
    pub record: Match,
    pub payments: Vec<Payment>,
}

/// Driving port for match mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchCommand: Send + Sync {
    /// Open a match request in `Pending` for the principal.
    async fn create_match(
        &self,
        principal: &Principal,
        request: CreateMatchRequest,
    ) -> Result<Match, Error>;

    /// Accept a pending match. Skill owner only.
    async fn accept_match(&self, principal: &Principal, match_id: Uuid) -> Result<Match, Error>;

    /// Reject a pending match. Skill owner only.
    async fn reject_match(&self, principal: &Principal, match_id: Uuid) -> Result<Match, Error>;

    /// Overwrite the coarse payment bookkeeping flag on a match. Admin only.
    async fn set_match_payment_status(
        &self,
        principal: &Principal,
        match_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Match, Error>;
}

/// Driving port for match projections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchQuery: Send + Sync {
    /// Matches where the principal is the skill owner, newest first.
    async fn received_matches(&self, principal: &Principal) -> Result<Vec<Match>, Error>;

    /// Every match with its payments attached, newest first. Admin only.
    async fn list_matches(&self, principal: &Principal) -> Result<Vec<MatchWithPayments>, Error>;
}
