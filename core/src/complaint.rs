//! Complaint records and their vocabulary.
//!
//! A complaint is filed by a student, then lives entirely under
//! administrator control: status, priority, and remark move through the
//! transition engine; everything else is frozen at creation. Complaints
//! are never deleted.

use crate::{
    actor::UserRef,
    error::{PortalError, PortalResult},
    types::{BlockId, EntityId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Vocabulary enums ─────────────────────────────────────────────────────────
//
// Labels are the canonical wire/storage form. They appear verbatim in the
// database, in JSON payloads, and in the runner's summary output.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Plumbing,
    Electrical,
    Furniture,
    Cleaning,
    #[serde(rename = "Internet/WiFi")]
    InternetWifi,
    #[serde(rename = "Pest Control")]
    PestControl,
    Security,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Plumbing,
        Category::Electrical,
        Category::Furniture,
        Category::Cleaning,
        Category::InternetWifi,
        Category::PestControl,
        Category::Security,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Plumbing => "Plumbing",
            Category::Electrical => "Electrical",
            Category::Furniture => "Furniture",
            Category::Cleaning => "Cleaning",
            Category::InternetWifi => "Internet/WiFi",
            Category::PestControl => "Pest Control",
            Category::Security => "Security",
            Category::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        Category::from_label(s).ok_or_else(|| PortalError::validation(format!("category: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn from_label(label: &str) -> Option<Priority> {
        Priority::ALL.iter().copied().find(|p| p.as_str() == label)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        Priority::from_label(s).ok_or_else(|| PortalError::validation(format!("priority: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Rejected,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Resolved,
        Status::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
            Status::Rejected => "Rejected",
        }
    }

    pub fn from_label(label: &str) -> Option<Status> {
        Status::ALL.iter().copied().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        Status::from_label(s).ok_or_else(|| PortalError::validation(format!("status: {s}")))
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

/// A persisted complaint.
///
/// Invariants: `resolved_at` and `resolved_by` are Some exactly while
/// `status == Resolved`, and `created_at <= resolved_at` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub complaint_id: EntityId,
    pub student: UserRef,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub admin_remark: Option<String>,
    pub hostel_block: BlockId,
    pub room_number: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<UserRef>,
}

/// What a student submits. Everything else on the record is derived from
/// the actor and the clock at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
}

impl NewComplaint {
    /// Title and description must be non-blank. Category and priority are
    /// already enforced by the type; string boundaries (the runner, row
    /// mappers) report bad labels through `FromStr` instead.
    pub fn validate(&self) -> PortalResult<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::validation("title"));
        }
        if self.description.trim().is_empty() {
            return Err(PortalError::validation("description"));
        }
        Ok(())
    }
}

/// An administrator's edit. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplaintPatch {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub admin_remark: Option<String>,
}

/// Admin-side listing filter. All criteria are conjunctive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplaintFilter {
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub limit: Option<usize>,
}
