//! Deterministic demo data seeding.
//!
//! Fills a fresh database with a believable month-and-a-half of hostel
//! life: students filing complaints across blocks, staff resolving a
//! share of them at varying speeds, and a handful of announcements in
//! different states of expiry. Same seed = same data, so summaries and
//! IPC sessions are reproducible.

use anyhow::Result;
use chrono::{Duration, Utc};
use hosteldesk_core::{
    actor::UserRef,
    announcement::{AnnouncementCategory, AnnouncementPriority, AnnouncementRecord},
    complaint::{Category, ComplaintRecord, Priority, Status},
    portal::Portal,
};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Small deterministic RNG for seeding. All demo randomness flows
/// through this; nothing touches a platform RNG.
pub struct DemoRng {
    inner: Pcg64Mcg,
}

impl DemoRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    pub fn below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    pub fn chance(&mut self, p: f64) -> bool {
        let bits = self.inner.next_u64();
        ((bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)) < p
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

const STUDENT_NAMES: &[&str] = &[
    "Aarav Sharma",
    "Diya Patel",
    "Ishaan Reddy",
    "Meera Iyer",
    "Kabir Singh",
    "Ananya Das",
    "Rohan Gupta",
    "Sneha Pillai",
    "Arjun Nair",
    "Tanvi Joshi",
    "Vikram Rao",
    "Nisha Kulkarni",
];

const STAFF_NAMES: &[&str] = &["Asha Verma", "Rohit Menon", "Priya Nair"];

const BLOCKS: &[&str] = &["A", "B", "C", "D"];

/// Category and title pairs so seeded complaints read coherently.
const COMPLAINT_SEEDS: &[(Category, &str, &str)] = &[
    (
        Category::Plumbing,
        "Leaking tap in washroom",
        "The tap near the last sink has been dripping all week.",
    ),
    (
        Category::Plumbing,
        "No hot water on second floor",
        "Geyser runs but the water stays cold in the mornings.",
    ),
    (
        Category::Electrical,
        "Tube light flickering",
        "The corridor light flickers constantly after 7pm.",
    ),
    (
        Category::Electrical,
        "Power socket sparking",
        "Socket next to the study table sparks when plugging in.",
    ),
    (
        Category::Furniture,
        "Broken chair leg",
        "Chair collapsed, one leg has split at the joint.",
    ),
    (
        Category::Furniture,
        "Cupboard hinge loose",
        "Door won't close; hinge screws have come out.",
    ),
    (
        Category::Cleaning,
        "Corridor not cleaned",
        "Third floor corridor has not been swept for days.",
    ),
    (
        Category::Cleaning,
        "Garbage piling at stairwell",
        "Bags accumulating near the back stairs, bad smell.",
    ),
    (
        Category::InternetWifi,
        "WiFi keeps dropping",
        "Connection drops every few minutes in the evening.",
    ),
    (
        Category::InternetWifi,
        "No signal in room",
        "Router signal does not reach the corner rooms at all.",
    ),
    (
        Category::PestControl,
        "Cockroaches in pantry",
        "Spotted several near the pantry shelves at night.",
    ),
    (
        Category::PestControl,
        "Ant trail along window",
        "Steady ant trail coming in through the window frame.",
    ),
    (
        Category::Security,
        "Broken latch on main door",
        "Wing entrance latch does not lock properly.",
    ),
    (
        Category::Security,
        "Streetlight out near gate",
        "Area by the cycle stand is completely dark.",
    ),
    (
        Category::Other,
        "Water cooler not chilling",
        "Cooler on the ground floor dispenses warm water.",
    ),
    (
        Category::Other,
        "Notice board glass cracked",
        "Glass pane of the wing notice board is cracked.",
    ),
];

const ANNOUNCEMENT_SEEDS: &[(AnnouncementCategory, AnnouncementPriority, &str, &str)] = &[
    (
        AnnouncementCategory::Water,
        AnnouncementPriority::Urgent,
        "Water supply interruption",
        "Maintenance on the overhead tank; supply off 10am-2pm tomorrow.",
    ),
    (
        AnnouncementCategory::Electricity,
        AnnouncementPriority::Important,
        "Scheduled power shutdown",
        "Transformer servicing on Saturday morning, expect a 2 hour outage.",
    ),
    (
        AnnouncementCategory::Mess,
        AnnouncementPriority::Normal,
        "Revised mess timings",
        "Dinner now served 7:30-9:30pm on weekdays.",
    ),
    (
        AnnouncementCategory::Inspection,
        AnnouncementPriority::Important,
        "Room inspection drive",
        "Warden rounds next week; keep rooms accessible 4-6pm.",
    ),
    (
        AnnouncementCategory::General,
        AnnouncementPriority::Normal,
        "Lost and found desk",
        "Unclaimed items will be displayed at the office this Friday.",
    ),
    (
        AnnouncementCategory::General,
        AnnouncementPriority::Urgent,
        "Fire drill notice",
        "Mandatory fire drill Thursday 5pm; assemble at the quadrangle.",
    ),
];

#[derive(Debug, Default)]
pub struct DemoCounts {
    pub complaints: usize,
    pub resolved: usize,
    pub announcements: usize,
}

/// Seed `count` complaints and the full announcement set. Records are
/// inserted directly through the store so their timestamps can span the
/// past weeks instead of clustering at "now".
pub fn seed(portal: &Portal, seed: u64, count: usize) -> Result<DemoCounts> {
    let mut rng = DemoRng::new(seed);
    let now = Utc::now();
    let mut counts = DemoCounts::default();

    let staff: Vec<UserRef> = STAFF_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| UserRef {
            id: format!("staff-{i:02}"),
            name: (*name).to_string(),
        })
        .collect();

    let students: Vec<(UserRef, String, String)> = STUDENT_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let block = rng.pick(BLOCKS).to_string();
            let room = format!("{}-{}", block, 100 + rng.below(40));
            (
                UserRef {
                    id: format!("student-{i:02}"),
                    name: (*name).to_string(),
                },
                block,
                room,
            )
        })
        .collect();

    for _ in 0..count {
        let (student, block, room) = rng.pick(&students).clone();
        let (category, title, description) = *rng.pick(COMPLAINT_SEEDS);
        let created_at = now - Duration::hours(rng.below(45 * 24) as i64 + 1);

        // Roughly half the backlog gets resolved; the rest spreads over
        // the remaining statuses.
        let roll = rng.below(100);
        let status = match roll {
            0..=49 => Status::Resolved,
            50..=69 => Status::Pending,
            70..=84 => Status::InProgress,
            _ => Status::Rejected,
        };

        let (resolved_at, resolved_by) = if status == Status::Resolved {
            let elapsed = Duration::hours(rng.below(120) as i64 + 2);
            (Some(created_at + elapsed), Some(rng.pick(&staff).clone()))
        } else {
            (None, None)
        };

        let priority = *rng.pick(&[
            Priority::Low,
            Priority::Medium,
            Priority::Medium,
            Priority::High,
            Priority::Urgent,
        ]);

        let admin_remark = match status {
            Status::Resolved => Some("Fixed and verified.".to_string()),
            Status::Rejected => Some("Not a maintenance issue.".to_string()),
            _ => None,
        };

        let record = ComplaintRecord {
            complaint_id: format!("cmp-{:016x}", rng.next_u64()),
            student,
            title: title.to_string(),
            description: description.to_string(),
            category,
            priority,
            status,
            admin_remark,
            hostel_block: block,
            room_number: room,
            created_at,
            resolved_at,
            resolved_by,
        };
        portal.store.insert_complaint(&record)?;
        counts.complaints += 1;
        if status == Status::Resolved {
            counts.resolved += 1;
        }
    }

    for (category, priority, title, description) in ANNOUNCEMENT_SEEDS {
        let created_at = now - Duration::hours(rng.below(14 * 24) as i64 + 1);
        // A third of notices are block-scoped; one in four has already
        // expired so the admin view has something to flag.
        let target_block = if rng.chance(0.33) {
            Some(rng.pick(BLOCKS).to_string())
        } else {
            None
        };
        let expiry_date = if rng.chance(0.25) {
            Some(now - Duration::hours(rng.below(48) as i64 + 1))
        } else if rng.chance(0.5) {
            Some(now + Duration::days(rng.below(14) as i64 + 1))
        } else {
            None
        };

        let record = AnnouncementRecord {
            announcement_id: format!("ann-{:016x}", rng.next_u64()),
            title: (*title).to_string(),
            description: (*description).to_string(),
            category: *category,
            priority: *priority,
            target_block,
            expiry_date,
            created_by: rng.pick(&staff).clone(),
            created_at,
        };
        portal.store.insert_announcement(&record)?;
        counts.announcements += 1;
    }

    log::info!(
        "demo seed {seed}: {} complaints ({} resolved), {} announcements",
        counts.complaints,
        counts.resolved,
        counts.announcements,
    );
    Ok(counts)
}
