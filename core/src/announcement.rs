//! Announcement records, vocabulary, and the visibility filter.
//!
//! Announcements are administrator-authored notices, optionally scoped to
//! one hostel block and optionally time-limited. Students only ever see
//! live announcements for their block; administrators see everything with
//! expired records flagged rather than hidden.

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnouncementCategory {
    General,
    Water,
    Electricity,
    Mess,
    Inspection,
}

impl AnnouncementCategory {
    pub const ALL: [AnnouncementCategory; 5] = [
        AnnouncementCategory::General,
        AnnouncementCategory::Water,
        AnnouncementCategory::Electricity,
        AnnouncementCategory::Mess,
        AnnouncementCategory::Inspection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementCategory::General => "General",
            AnnouncementCategory::Water => "Water",
            AnnouncementCategory::Electricity => "Electricity",
            AnnouncementCategory::Mess => "Mess",
            AnnouncementCategory::Inspection => "Inspection",
        }
    }

    pub fn from_label(label: &str) -> Option<AnnouncementCategory> {
        AnnouncementCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == label)
    }
}

impl fmt::Display for AnnouncementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementCategory {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        AnnouncementCategory::from_label(s)
            .ok_or_else(|| PortalError::validation(format!("category: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnouncementPriority {
    Normal,
    Important,
    Urgent,
}

impl AnnouncementPriority {
    pub const ALL: [AnnouncementPriority; 3] = [
        AnnouncementPriority::Normal,
        AnnouncementPriority::Important,
        AnnouncementPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementPriority::Normal => "Normal",
            AnnouncementPriority::Important => "Important",
            AnnouncementPriority::Urgent => "Urgent",
        }
    }

    pub fn from_label(label: &str) -> Option<AnnouncementPriority> {
        AnnouncementPriority::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == label)
    }
}

impl fmt::Display for AnnouncementPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementPriority {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        AnnouncementPriority::from_label(s)
            .ok_or_else(|| PortalError::validation(format!("priority: {s}")))
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    pub announcement_id: EntityId,
    pub title: String,
    pub description: String,
    pub category: AnnouncementCategory,
    pub priority: AnnouncementPriority,
    /// None targets every block.
    pub target_block: Option<BlockId>,
    /// None never expires.
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
}

impl AnnouncementRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry < now,
            None => false,
        }
    }

    /// Block targeting only; expiry is checked separately so the admin
    /// view can show expired records.
    pub fn targets_block(&self, block: Option<&str>) -> bool {
        match (&self.target_block, block) {
            (None, _) => true,
            (Some(target), Some(viewer)) => target == viewer,
            (Some(_), None) => false,
        }
    }
}

/// The full editable field set — used for both create and update, since
/// an edit replaces every administrator-controlled field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub description: String,
    pub category: AnnouncementCategory,
    pub priority: AnnouncementPriority,
    pub target_block: Option<BlockId>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl NewAnnouncement {
    pub fn validate(&self) -> PortalResult<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::validation("title"));
        }
        if self.description.trim().is_empty() {
            return Err(PortalError::validation("description"));
        }
        Ok(())
    }

    /// An empty or blank target block means "all blocks".
    pub fn normalized_target_block(&self) -> Option<BlockId> {
        self.target_block
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(String::from)
    }
}

/// An announcement as the admin listing returns it: the record plus its
/// expiry flag, evaluated against a single "now" for the whole listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementView {
    pub announcement: AnnouncementRecord,
    pub expired: bool,
}

// ── Visibility filter ────────────────────────────────────────────────────────

/// Student view: live announcements for the viewer's block (or untargeted
/// ones), newest first. A viewer without a block sees only untargeted
/// announcements.
pub fn visible_to_student(
    mut announcements: Vec<AnnouncementRecord>,
    block: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<AnnouncementRecord> {
    announcements.retain(|a| a.targets_block(block) && !a.is_expired(now));
    announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    announcements
}

/// Admin view: every announcement, newest first, expired ones flagged.
pub fn admin_view(
    mut announcements: Vec<AnnouncementRecord>,
    now: DateTime<Utc>,
) -> Vec<AnnouncementView> {
    announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    announcements
        .into_iter()
        .map(|a| {
            let expired = a.is_expired(now);
            AnnouncementView {
                announcement: a,
                expired,
            }
        })
        .collect()
}
