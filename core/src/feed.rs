//! Activity feed merger.
//!
//! Folds the most recent complaints and announcements into one
//! time-ordered feed for the dashboard. The merger is a pure function
//! over the windows it is handed — it never queries storage, and the
//! facade decides how wide those windows are.

use crate::{
    announcement::{AnnouncementCategory, AnnouncementPriority, AnnouncementRecord},
    complaint::{Category, ComplaintRecord, Status},
    types::EntityId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard feed length.
pub const FEED_LIMIT: usize = 8;

/// How many recent records of each kind the facade feeds the merger.
pub const RECENT_WINDOW: usize = 5;

/// One feed entry, carrying exactly what uniform rendering needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityItem {
    Complaint {
        id: EntityId,
        title: String,
        category: Category,
        status: Status,
        created_at: DateTime<Utc>,
    },
    Announcement {
        id: EntityId,
        title: String,
        category: AnnouncementCategory,
        priority: AnnouncementPriority,
        created_at: DateTime<Utc>,
    },
}

impl ActivityItem {
    pub fn id(&self) -> &str {
        match self {
            ActivityItem::Complaint { id, .. } => id,
            ActivityItem::Announcement { id, .. } => id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            ActivityItem::Complaint { created_at, .. } => *created_at,
            ActivityItem::Announcement { created_at, .. } => *created_at,
        }
    }

    /// Tie-break rank at equal timestamps: announcements lead.
    fn kind_rank(&self) -> u8 {
        match self {
            ActivityItem::Announcement { .. } => 0,
            ActivityItem::Complaint { .. } => 1,
        }
    }
}

impl From<&ComplaintRecord> for ActivityItem {
    fn from(c: &ComplaintRecord) -> Self {
        ActivityItem::Complaint {
            id: c.complaint_id.clone(),
            title: c.title.clone(),
            category: c.category,
            status: c.status,
            created_at: c.created_at,
        }
    }
}

impl From<&AnnouncementRecord> for ActivityItem {
    fn from(a: &AnnouncementRecord) -> Self {
        ActivityItem::Announcement {
            id: a.announcement_id.clone(),
            title: a.title.clone(),
            category: a.category,
            priority: a.priority,
            created_at: a.created_at,
        }
    }
}

/// Merge both streams into one feed: newest first, and at equal
/// timestamps announcements before complaints, then ascending id — a
/// total order, so the feed is deterministic for any input.
pub fn merge_activity(
    complaints: &[ComplaintRecord],
    announcements: &[AnnouncementRecord],
    limit: usize,
) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = complaints
        .iter()
        .map(ActivityItem::from)
        .chain(announcements.iter().map(ActivityItem::from))
        .collect();

    items.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.kind_rank().cmp(&b.kind_rank()))
            .then_with(|| a.id().cmp(b.id()))
    });
    items.truncate(limit);
    items
}
