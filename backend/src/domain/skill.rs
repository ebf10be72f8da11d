//! Skill records consumed at match creation.
//!
//! Skills are owned by the skill store. The coordinator only resolves a
//! skill to learn who owns it; listing and searching skills stay outside
//! this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Skill record as exposed by the skill store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub owner_id: UserId,
    pub name: String,
    pub level: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
