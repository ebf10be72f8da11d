//! In-memory identity and skill store adapters.
//!
//! The coordinator treats both stores as read-only collaborators, so these
//! adapters only need seeding plus lookup. The binary seeds them at
//! startup; tests seed them per scenario.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    IdentityStoreError, SkillCatalogue, SkillStoreError, UserDirectory,
};
use crate::domain::{Skill, User, UserId};

use super::poisoned_lock;

/// Map-backed user directory.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    rows: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record, replacing any existing record with the same id.
    pub fn seed(&self, user: User) {
        if let Ok(mut rows) = self.rows.write() {
            rows.insert(user.id.clone(), user);
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, IdentityStoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| poisoned_lock::<IdentityStoreError>())?;
        Ok(rows.get(id).cloned())
    }
}

/// Map-backed skill catalogue.
#[derive(Debug, Default)]
pub struct InMemorySkillCatalogue {
    rows: RwLock<HashMap<Uuid, Skill>>,
}

impl InMemorySkillCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a skill record, replacing any existing record with the same id.
    pub fn seed(&self, skill: Skill) {
        if let Ok(mut rows) = self.rows.write() {
            rows.insert(skill.id, skill);
        }
    }
}

#[async_trait]
impl SkillCatalogue for InMemorySkillCatalogue {
    async fn find_skill(&self, id: &Uuid) -> Result<Option<Skill>, SkillStoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| poisoned_lock::<SkillStoreError>())?;
        Ok(rows.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;

    use super::*;
    use crate::domain::{Role, UserStatus};

    #[tokio::test]
    async fn seeded_users_resolve_and_others_do_not() {
        let directory = InMemoryUserDirectory::new();
        let user = User {
            id: UserId::random(),
            name: "rosa".to_owned(),
            email: "rosa@example.com".to_owned(),
            role: Role::User,
            status: UserStatus::Active,
        };
        directory.seed(user.clone());

        let found = directory.find_user(&user.id).await.expect("lookup");
        assert_eq!(found, Some(user));

        let missing = directory.find_user(&UserId::random()).await.expect("lookup");
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn seeded_skills_resolve_with_owner() {
        let catalogue = InMemorySkillCatalogue::new();
        let skill = Skill {
            id: Uuid::new_v4(),
            owner_id: UserId::random(),
            name: "guitar".to_owned(),
            level: "Beginner".to_owned(),
            description: String::new(),
            created_at: Utc::now(),
        };
        catalogue.seed(skill.clone());

        let found = catalogue.find_skill(&skill.id).await.expect("lookup");
        assert_eq!(found, Some(skill));
    }
}
