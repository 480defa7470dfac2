//! The portal facade — every request/response operation in one place.
//!
//! RULES:
//!   - Authorization happens here, against the explicit `Actor` argument.
//!     Engines below this layer never see roles.
//!   - Stores return raw records; the pure engines (transition, feed,
//!     stats, leaderboard, visibility) transform them; nothing is cached.
//!   - An update either fully applies or not at all. No retries.

use crate::{
    actor::Actor,
    announcement::{self, AnnouncementRecord, AnnouncementView, NewAnnouncement},
    clock::Clock,
    complaint::{ComplaintFilter, ComplaintPatch, ComplaintRecord, NewComplaint, Status},
    error::{PortalError, PortalResult},
    feed::{self, ActivityItem},
    leaderboard::{self, LeaderboardReport},
    stats::{self, ComplaintStats},
    store::PortalStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whose complaints a stats request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsScope {
    /// Every complaint in the system. Administrator-only.
    All,
    /// The requesting actor's own complaints.
    Own,
}

pub struct Portal {
    pub store: PortalStore,
    pub clock: Clock,
}

impl Portal {
    pub fn new(store: PortalStore, clock: Clock) -> Self {
        Self { store, clock }
    }

    fn require_admin(actor: &Actor, action: &'static str) -> PortalResult<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            log::warn!("{} denied: actor {} is not an administrator", action, actor.user.id);
            Err(PortalError::Unauthorized { action })
        }
    }

    // ── Complaints ─────────────────────────────────────────────────

    /// File a new complaint. Status starts Pending; the student picks the
    /// priority; block and room come from the actor's profile.
    pub fn submit_complaint(
        &self,
        actor: &Actor,
        new: NewComplaint,
    ) -> PortalResult<ComplaintRecord> {
        new.validate()?;

        let record = ComplaintRecord {
            complaint_id: Uuid::new_v4().to_string(),
            student: actor.user.clone(),
            title: new.title.trim().to_string(),
            description: new.description.trim().to_string(),
            category: new.category,
            priority: new.priority,
            status: Status::Pending,
            admin_remark: None,
            hostel_block: actor.hostel_block.clone().unwrap_or_default(),
            room_number: actor.room_number.clone().unwrap_or_default(),
            created_at: self.clock.now(),
            resolved_at: None,
            resolved_by: None,
        };
        self.store.insert_complaint(&record)?;
        log::info!(
            "complaint {} filed by {} ({})",
            record.complaint_id,
            record.student.id,
            record.category,
        );
        Ok(record)
    }

    /// The actor's own complaints, newest first.
    pub fn my_complaints(&self, actor: &Actor) -> PortalResult<Vec<ComplaintRecord>> {
        self.store.complaints_for_student(&actor.user.id)
    }

    /// Admin listing across all students, filterable, newest first.
    pub fn list_complaints(
        &self,
        actor: &Actor,
        filter: &ComplaintFilter,
    ) -> PortalResult<Vec<ComplaintRecord>> {
        Self::require_admin(actor, "list complaints")?;
        self.store.complaints_filtered(filter)
    }

    /// Apply an administrator's status/priority/remark patch.
    pub fn update_complaint(
        &self,
        actor: &Actor,
        complaint_id: &str,
        patch: &ComplaintPatch,
    ) -> PortalResult<ComplaintRecord> {
        Self::require_admin(actor, "update complaint")?;

        let mut record =
            self.store
                .get_complaint(complaint_id)?
                .ok_or_else(|| PortalError::NotFound {
                    entity: "complaint",
                    id: complaint_id.to_string(),
                })?;

        let prior_status = record.status;
        crate::transition::apply_patch(&mut record, patch, &actor.user, self.clock.now());
        self.store.update_complaint(&record)?;

        if record.status != prior_status {
            log::info!(
                "complaint {} moved {} -> {} by {}",
                record.complaint_id,
                prior_status,
                record.status,
                actor.user.id,
            );
        }
        Ok(record)
    }

    // ── Analytics ──────────────────────────────────────────────────

    /// Dashboard statistics over the requested scope.
    pub fn complaint_stats(
        &self,
        actor: &Actor,
        scope: StatsScope,
    ) -> PortalResult<ComplaintStats> {
        let complaints = match scope {
            StatsScope::All => {
                Self::require_admin(actor, "read system stats")?;
                self.store.all_complaints()?
            }
            StatsScope::Own => self.store.complaints_for_student(&actor.user.id)?,
        };
        Ok(stats::aggregate(&complaints))
    }

    /// Staff and block rankings over the whole complaint set.
    pub fn leaderboard(&self) -> PortalResult<LeaderboardReport> {
        let complaints = self.store.all_complaints()?;
        Ok(LeaderboardReport {
            staff: leaderboard::staff_leaderboard(&complaints),
            blocks: leaderboard::block_leaderboard(&complaints),
        })
    }

    /// The merged recent-activity feed for dashboard widgets.
    ///
    /// This is a non-critical read path: on store failure it degrades to
    /// an empty feed (logged) instead of surfacing the error to the
    /// viewer.
    pub fn activity_feed(&self, limit: usize) -> Vec<ActivityItem> {
        let window = feed::RECENT_WINDOW;
        let complaints = match self.store.recent_complaints(window) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("activity feed degraded, complaint read failed: {e}");
                return Vec::new();
            }
        };
        let announcements = match self.store.recent_announcements(window) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("activity feed degraded, announcement read failed: {e}");
                return Vec::new();
            }
        };
        feed::merge_activity(&complaints, &announcements, limit)
    }

    // ── Announcements ──────────────────────────────────────────────

    /// Announcements the acting student may see: live, targeted at their
    /// block or at everyone, newest first.
    pub fn announcements_for(&self, actor: &Actor) -> PortalResult<Vec<AnnouncementRecord>> {
        let all = self.store.all_announcements()?;
        Ok(announcement::visible_to_student(
            all,
            actor.hostel_block.as_deref(),
            self.clock.now(),
        ))
    }

    /// The full announcement list with expiry flags. Administrator-only.
    pub fn announcements_admin(&self, actor: &Actor) -> PortalResult<Vec<AnnouncementView>> {
        Self::require_admin(actor, "list all announcements")?;
        let all = self.store.all_announcements()?;
        Ok(announcement::admin_view(all, self.clock.now()))
    }

    pub fn publish_announcement(
        &self,
        actor: &Actor,
        new: NewAnnouncement,
    ) -> PortalResult<AnnouncementRecord> {
        Self::require_admin(actor, "publish announcement")?;
        new.validate()?;

        let record = AnnouncementRecord {
            announcement_id: Uuid::new_v4().to_string(),
            title: new.title.trim().to_string(),
            description: new.description.trim().to_string(),
            category: new.category,
            priority: new.priority,
            target_block: new.normalized_target_block(),
            expiry_date: new.expiry_date,
            created_by: actor.user.clone(),
            created_at: self.clock.now(),
        };
        self.store.insert_announcement(&record)?;
        log::info!(
            "announcement {} published by {} (target: {})",
            record.announcement_id,
            record.created_by.id,
            record.target_block.as_deref().unwrap_or("all blocks"),
        );
        Ok(record)
    }

    /// Replace an announcement's editable fields; authorship and creation
    /// time stay as they were.
    pub fn update_announcement(
        &self,
        actor: &Actor,
        announcement_id: &str,
        new: NewAnnouncement,
    ) -> PortalResult<AnnouncementRecord> {
        Self::require_admin(actor, "update announcement")?;
        new.validate()?;

        let mut record = self
            .store
            .get_announcement(announcement_id)?
            .ok_or_else(|| PortalError::NotFound {
                entity: "announcement",
                id: announcement_id.to_string(),
            })?;

        record.title = new.title.trim().to_string();
        record.description = new.description.trim().to_string();
        record.category = new.category;
        record.priority = new.priority;
        record.target_block = new.normalized_target_block();
        record.expiry_date = new.expiry_date;

        self.store.update_announcement(&record)?;
        Ok(record)
    }

    pub fn delete_announcement(&self, actor: &Actor, announcement_id: &str) -> PortalResult<()> {
        Self::require_admin(actor, "delete announcement")?;
        if self.store.delete_announcement(announcement_id)? {
            log::info!("announcement {announcement_id} deleted by {}", actor.user.id);
            Ok(())
        } else {
            Err(PortalError::NotFound {
                entity: "announcement",
                id: announcement_id.to_string(),
            })
        }
    }
}
