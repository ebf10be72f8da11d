//! Match aggregate and its status state machine.
//!
//! A match tracks one user's request to exchange against another user's
//! skill. Status moves along `Pending -> {Accepted, Rejected}` and
//! `Accepted -> PaymentCompleted`; `Rejected` and `PaymentCompleted` are
//! terminal. The coarser `payment_status` field is bookkeeping updated by a
//! separate admin action; it is never derived from payment records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Skill, User, UserId};

/// Lifecycle state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MatchStatus {
    /// Awaiting a decision from the skill owner.
    Pending,
    /// Approved by the skill owner; payments may now settle it.
    Accepted,
    /// Declined by the skill owner. Terminal.
    Rejected,
    /// Both payment conditions satisfied. Terminal.
    PaymentCompleted,
}

impl MatchStatus {
    /// Whether no further status transition is permitted.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::PaymentCompleted)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted)
                | (Self::Pending, Self::Rejected)
                | (Self::Accepted, Self::PaymentCompleted)
        )
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::PaymentCompleted => "PaymentCompleted",
        };
        f.write_str(label)
    }
}

/// Coarse payment bookkeeping flag on the match record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

/// Validation errors raised when constructing a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchValidationError {
    /// The requester owns the referenced skill.
    SelfMatch,
}

impl fmt::Display for MatchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfMatch => write!(f, "requester cannot be the skill owner"),
        }
    }
}

impl std::error::Error for MatchValidationError {}

/// Match record tracked through the approval and payment workflow.
///
/// ## Invariants
/// - `requester_id != skill_owner_id`, enforced by [`Match::request`].
/// - `requester_name`/`requester_email` are a snapshot captured at creation
///   time and may go stale if the requester's profile changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub skill_id: Uuid,
    pub requester_id: UserId,
    pub requester_name: String,
    pub requester_email: String,
    pub skill_owner_id: UserId,
    pub status: MatchStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Open a new match request in `Pending`, capturing the requester
    /// snapshot from the resolved user record.
    pub fn request(
        requester: &User,
        skill: &Skill,
        now: DateTime<Utc>,
    ) -> Result<Self, MatchValidationError> {
        if requester.id == skill.owner_id {
            return Err(MatchValidationError::SelfMatch);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            skill_id: skill.id,
            requester_id: requester.id.clone(),
            requester_name: requester.name.clone(),
            requester_email: requester.email.clone(),
            skill_owner_id: skill.owner_id.clone(),
            status: MatchStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether the given user is the requester or the skill owner.
    pub fn is_participant(&self, user_id: &UserId) -> bool {
        &self.requester_id == user_id || &self.skill_owner_id == user_id
    }

    /// Whether the given user owns the skill and may accept or reject.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.skill_owner_id == user_id
    }

    /// Whether the match still counts as in flight for the duplicate check:
    /// a second request for the same skill and requester is refused while
    /// one is `Pending` or `Accepted`.
    pub fn is_in_flight(&self) -> bool {
        matches!(self.status, MatchStatus::Pending | MatchStatus::Accepted)
    }
}
