//! Match lifecycle services.
//!
//! [`MatchCommandService`] owns every decision that mutates a match short of
//! reconciliation: opening a request, the owner's accept/reject, and the
//! admin bookkeeping flag. [`MatchQueryService`] serves the read
//! projections. Both are stateless over snapshots of the stores; every
//! transition lands as a conditional update so concurrent callers serialize
//! at the repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    CreateMatchRequest, MatchCommand, MatchQuery, MatchRepository, MatchRepositoryError,
    MatchWithPayments, PaymentRepository, SkillCatalogue, UserDirectory,
};
use crate::domain::{
    self, Error, IdentityStoreError, Match, MatchStatus, PaymentRepositoryError, PaymentStatus,
    Principal, SkillStoreError,
};

fn map_identity_error(error: IdentityStoreError) -> Error {
    Error::internal(format!("identity store failure: {error}"))
}

fn map_skill_error(error: SkillStoreError) -> Error {
    Error::internal(format!("skill store failure: {error}"))
}

fn map_match_repo_error(error: MatchRepositoryError) -> Error {
    match error {
        MatchRepositoryError::NotFound => Error::not_found("match not found"),
        MatchRepositoryError::DuplicateInFlight => {
            Error::conflict("match request already exists")
        }
        MatchRepositoryError::StaleStatus { current } => {
            Error::invalid_state(format!("match is no longer pending; now {current}"))
        }
        other => Error::internal(format!("match repository failure: {other}")),
    }
}

fn map_payment_repo_error(error: PaymentRepositoryError) -> Error {
    Error::internal(format!("payment repository failure: {error}"))
}

/// Match service implementing the command driving port.
#[derive(Clone)]
pub struct MatchCommandService<U, S, M> {
    users: Arc<U>,
    skills: Arc<S>,
    matches: Arc<M>,
}

impl<U, S, M> MatchCommandService<U, S, M> {
    /// Create a new command service over the identity, skill, and match
    /// stores.
    pub fn new(users: Arc<U>, skills: Arc<S>, matches: Arc<M>) -> Self {
        Self {
            users,
            skills,
            matches,
        }
    }
}

impl<U, S, M> MatchCommandService<U, S, M>
where
    U: UserDirectory,
    S: SkillCatalogue,
    M: MatchRepository,
{
    /// Shared accept/reject path: owner-only, and only out of `Pending`.
    ///
    /// The record is validated against a snapshot first so callers get the
    /// precise error kind; the conditional update then ensures that of two
    /// racing decisions exactly one wins and the loser observes
    /// `InvalidState`.
    async fn decide(
        &self,
        principal: &Principal,
        match_id: Uuid,
        next: MatchStatus,
    ) -> Result<Match, Error> {
        let record = self
            .matches
            .find_by_id(&match_id)
            .await
            .map_err(map_match_repo_error)?
            .ok_or_else(|| Error::not_found("match not found"))?;

        domain::authorize(
            principal,
            &[],
            Some(|p: &Principal| record.is_owner(&p.user_id)),
        )?;

        if !record.status.can_transition_to(next) {
            return Err(Error::invalid_state(format!(
                "match is {}; cannot move to {next}",
                record.status,
            )));
        }

        let updated = self
            .matches
            .set_status(&match_id, MatchStatus::Pending, next)
            .await
            .map_err(map_match_repo_error)?;

        info!(match_id = %match_id, status = %updated.status, "match decision recorded");
        Ok(updated)
    }
}

#[async_trait]
impl<U, S, M> MatchCommand for MatchCommandService<U, S, M>
where
    U: UserDirectory,
    S: SkillCatalogue,
    M: MatchRepository,
{
    async fn create_match(
        &self,
        principal: &Principal,
        request: CreateMatchRequest,
    ) -> Result<Match, Error> {
        let requester = self
            .users
            .find_user(&principal.user_id)
            .await
            .map_err(map_identity_error)?
            .ok_or_else(|| Error::not_found("requester not found"))?;

        let skill = self
            .skills
            .find_skill(&request.skill_id)
            .await
            .map_err(map_skill_error)?
            .ok_or_else(|| Error::not_found("skill not found"))?;

        let record = Match::request(&requester, &skill, Utc::now())
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        // Pre-flight duplicate check for a friendly error; the repository's
        // uniqueness index remains the serialization point under races.
        if self
            .matches
            .find_in_flight(&skill.id, &requester.id)
            .await
            .map_err(map_match_repo_error)?
            .is_some()
        {
            return Err(Error::conflict("match request already exists"));
        }

        self.matches
            .insert(&record)
            .await
            .map_err(map_match_repo_error)?;

        info!(match_id = %record.id, skill_id = %skill.id, "match requested");
        Ok(record)
    }

    async fn accept_match(&self, principal: &Principal, match_id: Uuid) -> Result<Match, Error> {
        self.decide(principal, match_id, MatchStatus::Accepted)
            .await
    }

    async fn reject_match(&self, principal: &Principal, match_id: Uuid) -> Result<Match, Error> {
        self.decide(principal, match_id, MatchStatus::Rejected)
            .await
    }

    async fn set_match_payment_status(
        &self,
        principal: &Principal,
        match_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Match, Error> {
        domain::require_admin(principal)?;

        self.matches
            .set_payment_status(&match_id, status)
            .await
            .map_err(map_match_repo_error)
    }
}

/// Match service implementing the query driving port.
#[derive(Clone)]
pub struct MatchQueryService<M, P> {
    matches: Arc<M>,
    payments: Arc<P>,
}

impl<M, P> MatchQueryService<M, P> {
    /// Create a new query service over the match and payment stores.
    pub fn new(matches: Arc<M>, payments: Arc<P>) -> Self {
        Self { matches, payments }
    }
}

#[async_trait]
impl<M, P> MatchQuery for MatchQueryService<M, P>
where
    M: MatchRepository,
    P: PaymentRepository,
{
    async fn received_matches(&self, principal: &Principal) -> Result<Vec<Match>, Error> {
        self.matches
            .list_for_owner(&principal.user_id)
            .await
            .map_err(map_match_repo_error)
    }

    async fn list_matches(&self, principal: &Principal) -> Result<Vec<MatchWithPayments>, Error> {
        domain::require_admin(principal)?;

        let records = self.matches.list_all().await.map_err(map_match_repo_error)?;

        let mut result = Vec::with_capacity(records.len());
        for record in records {
            let payments = self
                .payments
                .list_for_match(&record.id)
                .await
                .map_err(map_payment_repo_error)?;
            result.push(MatchWithPayments { record, payments });
        }
        Ok(result)
    }
}

#[cfg(test)]
#[path = "match_service_tests.rs"]
mod tests;
