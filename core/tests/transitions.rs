//! Status transition engine tests — resolution bookkeeping and the
//! permissive transition table.

use chrono::{DateTime, Utc};
use hosteldesk_core::{
    actor::{Actor, Role, UserRef},
    clock::Clock,
    complaint::{Category, ComplaintPatch, NewComplaint, Priority, Status},
    error::PortalError,
    portal::Portal,
    store::PortalStore,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn portal_at(now: DateTime<Utc>) -> Portal {
    let store = PortalStore::in_memory().unwrap();
    store.migrate().unwrap();
    Portal::new(store, Clock::Fixed(now))
}

fn student(id: &str, block: &str) -> Actor {
    Actor {
        user: UserRef {
            id: id.to_string(),
            name: format!("Student {id}"),
        },
        role: Role::Student,
        hostel_block: Some(block.to_string()),
        room_number: Some(format!("{block}-101")),
    }
}

fn admin(id: &str, name: &str) -> Actor {
    Actor {
        user: UserRef {
            id: id.to_string(),
            name: name.to_string(),
        },
        role: Role::Admin,
        hostel_block: None,
        room_number: None,
    }
}

fn leaky_tap() -> NewComplaint {
    NewComplaint {
        title: "Leaking tap".to_string(),
        description: "Tap in the washroom drips constantly.".to_string(),
        category: Category::Plumbing,
        priority: Priority::Medium,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// A fresh complaint starts Pending with no resolution bookkeeping, and
/// inherits block/room from the filing student.
#[test]
fn submission_starts_pending() {
    let portal = portal_at(ts("2026-03-01T09:00:00Z"));
    let filed = portal
        .submit_complaint(&student("s1", "A"), leaky_tap())
        .unwrap();

    assert_eq!(filed.status, Status::Pending);
    assert_eq!(filed.resolved_at, None);
    assert_eq!(filed.resolved_by, None);
    assert_eq!(filed.hostel_block, "A");
    assert_eq!(filed.created_at, ts("2026-03-01T09:00:00Z"));
}

/// Resolving a pending complaint stamps the resolution time, records the
/// resolving admin, and keeps the supplied remark.
#[test]
fn resolving_stamps_time_and_resolver() {
    let mut portal = portal_at(ts("2026-03-01T09:00:00Z"));
    let filed = portal
        .submit_complaint(&student("s1", "A"), leaky_tap())
        .unwrap();

    portal.clock = Clock::Fixed(ts("2026-03-02T10:00:00Z"));
    let warden = admin("w1", "Asha Verma");
    let updated = portal
        .update_complaint(
            &warden,
            &filed.complaint_id,
            &ComplaintPatch {
                status: Some(Status::Resolved),
                admin_remark: Some("Fixed".to_string()),
                ..ComplaintPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.status, Status::Resolved);
    assert_eq!(updated.resolved_at, Some(ts("2026-03-02T10:00:00Z")));
    assert_eq!(updated.resolved_by.as_ref().unwrap().id, "w1");
    assert_eq!(updated.admin_remark.as_deref(), Some("Fixed"));
    assert!(updated.created_at <= updated.resolved_at.unwrap());
}

/// Moving a complaint out of Resolved clears both resolution fields —
/// the record must never claim a resolution time while unresolved.
#[test]
fn leaving_resolved_clears_bookkeeping() {
    let mut portal = portal_at(ts("2026-03-01T09:00:00Z"));
    let filed = portal
        .submit_complaint(&student("s1", "A"), leaky_tap())
        .unwrap();
    let warden = admin("w1", "Asha Verma");

    portal.clock = Clock::Fixed(ts("2026-03-02T10:00:00Z"));
    portal
        .update_complaint(
            &warden,
            &filed.complaint_id,
            &ComplaintPatch {
                status: Some(Status::Resolved),
                ..ComplaintPatch::default()
            },
        )
        .unwrap();

    portal.clock = Clock::Fixed(ts("2026-03-03T08:00:00Z"));
    let reopened = portal
        .update_complaint(
            &warden,
            &filed.complaint_id,
            &ComplaintPatch {
                status: Some(Status::InProgress),
                ..ComplaintPatch::default()
            },
        )
        .unwrap();

    assert_eq!(reopened.status, Status::InProgress);
    assert_eq!(reopened.resolved_at, None);
    assert_eq!(reopened.resolved_by, None);
}

/// The transition table is permissive: a terminal-looking status like
/// Rejected can move straight back to In Progress.
#[test]
fn any_status_reachable_from_any_other() {
    let mut portal = portal_at(ts("2026-03-01T09:00:00Z"));
    let filed = portal
        .submit_complaint(&student("s1", "A"), leaky_tap())
        .unwrap();
    let warden = admin("w1", "Asha Verma");

    for status in [
        Status::Rejected,
        Status::InProgress,
        Status::Resolved,
        Status::Pending,
        Status::Resolved,
    ] {
        portal.clock = Clock::Fixed(ts("2026-03-05T12:00:00Z"));
        let updated = portal
            .update_complaint(
                &warden,
                &filed.complaint_id,
                &ComplaintPatch {
                    status: Some(status),
                    ..ComplaintPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, status);
        assert_eq!(updated.resolved_at.is_some(), status == Status::Resolved);
    }
}

/// Omitted patch fields leave the record untouched: a priority-only
/// patch must not move the status or drop the remark.
#[test]
fn partial_patch_leaves_other_fields() {
    let mut portal = portal_at(ts("2026-03-01T09:00:00Z"));
    let filed = portal
        .submit_complaint(&student("s1", "A"), leaky_tap())
        .unwrap();
    let warden = admin("w1", "Asha Verma");

    portal
        .update_complaint(
            &warden,
            &filed.complaint_id,
            &ComplaintPatch {
                status: Some(Status::InProgress),
                admin_remark: Some("Plumber scheduled".to_string()),
                ..ComplaintPatch::default()
            },
        )
        .unwrap();

    portal.clock = Clock::Fixed(ts("2026-03-02T09:00:00Z"));
    let updated = portal
        .update_complaint(
            &warden,
            &filed.complaint_id,
            &ComplaintPatch {
                priority: Some(Priority::Urgent),
                ..ComplaintPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.priority, Priority::Urgent);
    assert_eq!(updated.status, Status::InProgress);
    assert_eq!(updated.admin_remark.as_deref(), Some("Plumber scheduled"));
    assert_eq!(updated.category, Category::Plumbing, "category is immutable");
}

/// A non-administrator cannot update anything, and the stored record is
/// left exactly as it was.
#[test]
fn student_update_is_unauthorized() {
    let portal = portal_at(ts("2026-03-01T09:00:00Z"));
    let filer = student("s1", "A");
    let filed = portal.submit_complaint(&filer, leaky_tap()).unwrap();

    let err = portal
        .update_complaint(
            &filer,
            &filed.complaint_id,
            &ComplaintPatch {
                status: Some(Status::Resolved),
                ..ComplaintPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, PortalError::Unauthorized { .. }));

    let stored = portal
        .store
        .get_complaint(&filed.complaint_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, Status::Pending, "record must be unchanged");
    assert_eq!(stored.resolved_at, None);
}

/// Updating a nonexistent id reports NotFound, not a silent no-op.
#[test]
fn update_missing_complaint_is_not_found() {
    let portal = portal_at(ts("2026-03-01T09:00:00Z"));
    let err = portal
        .update_complaint(
            &admin("w1", "Asha Verma"),
            "no-such-id",
            &ComplaintPatch::default(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PortalError::NotFound {
            entity: "complaint",
            ..
        }
    ));
}

/// Blank titles and descriptions are rejected before anything is stored.
#[test]
fn blank_fields_fail_validation() {
    let portal = portal_at(ts("2026-03-01T09:00:00Z"));
    let filer = student("s1", "A");

    let blank_title = NewComplaint {
        title: "   ".to_string(),
        ..leaky_tap()
    };
    assert!(matches!(
        portal.submit_complaint(&filer, blank_title).unwrap_err(),
        PortalError::Validation { ref field } if field == "title"
    ));

    let blank_description = NewComplaint {
        description: String::new(),
        ..leaky_tap()
    };
    assert!(matches!(
        portal
            .submit_complaint(&filer, blank_description)
            .unwrap_err(),
        PortalError::Validation { ref field } if field == "description"
    ));

    assert_eq!(portal.my_complaints(&filer).unwrap().len(), 0);
}
