//! Caller identity.
//!
//! RULE: There is no ambient "current user". Every operation that needs
//! identity or privileges takes an [`Actor`] argument, which makes
//! authorization failures reproducible in tests without global setup.

use crate::types::{BlockId, EntityId};
use serde::{Deserialize, Serialize};

/// A denormalized reference to a portal user, exactly as records carry it
/// (complaint.student, announcement.created_by, complaint.resolved_by).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
}

/// The identity a caller presents. Built by the (out-of-scope) session
/// layer and passed into every privileged engine call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub user: UserRef,
    pub role: Role,
    pub hostel_block: Option<BlockId>,
    pub room_number: Option<String>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
