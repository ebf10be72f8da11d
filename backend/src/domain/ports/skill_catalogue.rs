//! Driven port for the skill store.
//!
//! Match creation resolves a skill to learn its owner. Search and ranking
//! of skills live outside this crate.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Skill;

/// Errors raised by skill store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillStoreError {
    /// The store could not be reached.
    #[error("skill store unavailable: {message}")]
    Unavailable { message: String },
    /// A lookup failed during execution.
    #[error("skill store query failed: {message}")]
    Query { message: String },
}

/// Read-only access to skill records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillCatalogue: Send + Sync {
    /// Resolve a skill by id. Returns `None` when the skill does not exist.
    async fn find_skill(&self, id: &Uuid) -> Result<Option<Skill>, SkillStoreError>;
}
