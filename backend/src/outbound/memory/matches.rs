//! In-memory match repository.
//!
//! Backs the match store with a `RwLock`-guarded map. The write lock is the
//! transaction boundary: the pending-unique scan plus insert, and the
//! status compare-and-swap, each run under one guard so concurrent callers
//! serialize exactly as a database unique index and conditional update
//! would.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{MatchRepository, MatchRepositoryError};
use crate::domain::{Match, MatchStatus, PaymentStatus, UserId};

use super::poisoned_lock;

/// Map-backed match store enforcing the pending-unique index.
#[derive(Debug, Default)]
pub struct InMemoryMatchRepository {
    rows: RwLock<HashMap<Uuid, Match>>,
}

impl InMemoryMatchRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut rows: Vec<Match>) -> Vec<Match> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn insert(&self, record: &Match) -> Result<(), MatchRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| poisoned_lock::<MatchRepositoryError>())?;

        let duplicate = rows.values().any(|existing| {
            existing.skill_id == record.skill_id
                && existing.requester_id == record.requester_id
                && existing.status == MatchStatus::Pending
        });
        if duplicate {
            return Err(MatchRepositoryError::DuplicateInFlight);
        }

        rows.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Match>, MatchRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| poisoned_lock::<MatchRepositoryError>())?;
        Ok(rows.get(id).cloned())
    }

    async fn find_in_flight(
        &self,
        skill_id: &Uuid,
        requester_id: &UserId,
    ) -> Result<Option<Match>, MatchRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| poisoned_lock::<MatchRepositoryError>())?;
        Ok(rows
            .values()
            .find(|record| {
                record.skill_id == *skill_id
                    && record.requester_id == *requester_id
                    && record.is_in_flight()
            })
            .cloned())
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<Match>, MatchRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| poisoned_lock::<MatchRepositoryError>())?;
        Ok(newest_first(
            rows.values()
                .filter(|record| record.skill_owner_id == *owner_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Match>, MatchRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| poisoned_lock::<MatchRepositoryError>())?;
        Ok(newest_first(rows.values().cloned().collect()))
    }

    async fn set_status(
        &self,
        id: &Uuid,
        expected: MatchStatus,
        next: MatchStatus,
    ) -> Result<Match, MatchRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| poisoned_lock::<MatchRepositoryError>())?;
        let record = rows.get_mut(id).ok_or(MatchRepositoryError::NotFound)?;

        if record.status != expected {
            return Err(MatchRepositoryError::StaleStatus {
                current: record.status,
            });
        }

        record.status = next;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn set_payment_status(
        &self,
        id: &Uuid,
        status: PaymentStatus,
    ) -> Result<Match, MatchRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| poisoned_lock::<MatchRepositoryError>())?;
        let record = rows.get_mut(id).ok_or(MatchRepositoryError::NotFound)?;

        record.payment_status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;

    use super::*;
    use crate::domain::{Role, Skill, User, UserStatus};

    fn user(name: &str) -> User {
        User {
            id: UserId::random(),
            name: name.to_owned(),
            email: format!("{name}@example.com"),
            role: Role::User,
            status: UserStatus::Active,
        }
    }

    fn match_for(requester: &User, owner: &User, skill_id: Uuid) -> Match {
        let skill = Skill {
            id: skill_id,
            owner_id: owner.id.clone(),
            name: "guitar".to_owned(),
            level: "Intermediate".to_owned(),
            description: String::new(),
            created_at: Utc::now(),
        };
        Match::request(requester, &skill, Utc::now()).expect("valid fixture match")
    }

    #[tokio::test]
    async fn pending_unique_index_refuses_duplicates() {
        let requester = user("rosa");
        let owner = user("omar");
        let skill_id = Uuid::new_v4();
        let repo = InMemoryMatchRepository::new();

        let first = match_for(&requester, &owner, skill_id);
        repo.insert(&first).await.expect("first insert");

        let second = match_for(&requester, &owner, skill_id);
        let err = repo.insert(&second).await.expect_err("duplicate refused");
        assert_eq!(err, MatchRepositoryError::DuplicateInFlight);
    }

    #[tokio::test]
    async fn accepted_matches_free_the_pending_index_but_stay_in_flight() {
        let requester = user("rosa");
        let owner = user("omar");
        let skill_id = Uuid::new_v4();
        let repo = InMemoryMatchRepository::new();

        let first = match_for(&requester, &owner, skill_id);
        repo.insert(&first).await.expect("first insert");
        repo.set_status(&first.id, MatchStatus::Pending, MatchStatus::Accepted)
            .await
            .expect("accept");

        // The unique index only covers Pending, so the insert succeeds...
        let second = match_for(&requester, &owner, skill_id);
        repo.insert(&second).await.expect("index is pending-only");

        // ...while the in-flight lookup still reports the accepted match for
        // the service-level duplicate check.
        let in_flight = repo
            .find_in_flight(&skill_id, &requester.id)
            .await
            .expect("lookup succeeds")
            .expect("one in-flight match");
        assert!(in_flight.is_in_flight());
    }

    #[tokio::test]
    async fn status_cas_lets_exactly_one_transition_win() {
        let requester = user("rosa");
        let owner = user("omar");
        let repo = InMemoryMatchRepository::new();
        let record = match_for(&requester, &owner, Uuid::new_v4());
        repo.insert(&record).await.expect("insert");

        repo.set_status(&record.id, MatchStatus::Pending, MatchStatus::Accepted)
            .await
            .expect("first transition wins");

        let err = repo
            .set_status(&record.id, MatchStatus::Pending, MatchStatus::Rejected)
            .await
            .expect_err("second transition loses");
        assert_eq!(
            err,
            MatchRepositoryError::StaleStatus {
                current: MatchStatus::Accepted,
            }
        );
    }

    #[tokio::test]
    async fn missing_ids_surface_not_found() {
        let repo = InMemoryMatchRepository::new();
        let err = repo
            .set_status(&Uuid::new_v4(), MatchStatus::Pending, MatchStatus::Accepted)
            .await
            .expect_err("missing match");
        assert_eq!(err, MatchRepositoryError::NotFound);
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let owner = user("omar");
        let repo = InMemoryMatchRepository::new();

        let mut older = match_for(&user("rosa"), &owner, Uuid::new_v4());
        older.created_at = Utc::now() - chrono::Duration::minutes(5);
        let newer = match_for(&user("uma"), &owner, Uuid::new_v4());

        repo.insert(&older).await.expect("insert older");
        repo.insert(&newer).await.expect("insert newer");

        let inbox = repo.list_for_owner(&owner.id).await.expect("listing");
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].id, newer.id);
        assert_eq!(inbox[1].id, older.id);
    }
}
