//! Status transition engine.
//!
//! Applies an administrator's patch to a complaint and keeps the
//! resolution bookkeeping consistent: entering Resolved stamps
//! `resolved_at`/`resolved_by`, leaving it clears both.
//!
//! The transition table is deliberately permissive — any status may be set
//! from any other, including out of Resolved and Rejected. There is no
//! re-open action; an administrator simply sets the status back.

use crate::{
    actor::UserRef,
    complaint::{ComplaintPatch, ComplaintRecord, Status},
};
use chrono::{DateTime, Utc};

/// Apply `patch` to `complaint` in place. Pure with respect to storage;
/// the caller persists the result (or doesn't, on error upstream).
///
/// Only status, priority, and remark are reachable from here. Category,
/// title, description, and the filing student are frozen at creation.
pub fn apply_patch(
    complaint: &mut ComplaintRecord,
    patch: &ComplaintPatch,
    admin: &UserRef,
    now: DateTime<Utc>,
) {
    if let Some(new_status) = patch.status {
        let was_resolved = complaint.status == Status::Resolved;
        let is_resolved = new_status == Status::Resolved;

        if is_resolved && !was_resolved {
            complaint.resolved_at = Some(now);
            complaint.resolved_by = Some(admin.clone());
        } else if was_resolved && !is_resolved {
            complaint.resolved_at = None;
            complaint.resolved_by = None;
        }
        complaint.status = new_status;
    }

    if let Some(new_priority) = patch.priority {
        complaint.priority = new_priority;
    }

    if let Some(remark) = &patch.admin_remark {
        complaint.admin_remark = Some(remark.clone());
    }
}
