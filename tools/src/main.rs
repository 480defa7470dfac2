//! portal-runner: headless runner for the HostelDesk portal engine.
//!
//! Usage:
//!   portal-runner --db portal.db --demo --seed 42
//!   portal-runner --db portal.db --ipc-mode
//!
//! Without --ipc-mode, prints a one-shot dashboard summary (stats,
//! leaderboards, recent activity). With it, serves the portal operations
//! as newline-delimited JSON over stdin/stdout for an external UI.

mod demo;

use anyhow::Result;
use hosteldesk_core::{
    actor::{Actor, Role, UserRef},
    announcement::NewAnnouncement,
    clock::Clock,
    complaint::{ComplaintFilter, ComplaintPatch, NewComplaint},
    error::PortalError,
    feed::{ActivityItem, FEED_LIMIT},
    portal::{Portal, StatsScope},
    store::PortalStore,
};
use serde::Serialize;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    MyComplaints {
        actor: Actor,
    },
    ListComplaints {
        actor: Actor,
        #[serde(default)]
        filter: ComplaintFilter,
    },
    SubmitComplaint {
        actor: Actor,
        complaint: NewComplaint,
    },
    UpdateComplaint {
        actor: Actor,
        complaint_id: String,
        #[serde(default)]
        patch: ComplaintPatch,
    },
    GetStats {
        actor: Actor,
        scope: StatsScope,
    },
    GetLeaderboard,
    GetActivityFeed {
        #[serde(default)]
        limit: Option<usize>,
    },
    ListAnnouncements {
        actor: Actor,
    },
    ListAllAnnouncements {
        actor: Actor,
    },
    CreateAnnouncement {
        actor: Actor,
        announcement: NewAnnouncement,
    },
    UpdateAnnouncement {
        actor: Actor,
        announcement_id: String,
        announcement: NewAnnouncement,
    },
    DeleteAnnouncement {
        actor: Actor,
        announcement_id: String,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let demo_count = parse_arg(&args, "--demo-count", 30usize);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let demo_mode = args.iter().any(|a| a == "--demo");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");

    if !ipc_mode {
        println!("HostelDesk — portal-runner");
        println!("  db:   {db}");
        if demo_mode {
            println!("  seed: {seed}");
        }
        println!();
    }

    let store = if db == ":memory:" {
        PortalStore::in_memory()?
    } else {
        PortalStore::open(db)?
    };
    store.migrate()?;
    let portal = Portal::new(store, Clock::System);

    if demo_mode {
        let counts = demo::seed(&portal, seed, demo_count)?;
        if !ipc_mode {
            println!(
                "Seeded {} complaints ({} resolved) and {} announcements.",
                counts.complaints, counts.resolved, counts.announcements,
            );
            println!();
        }
    }

    if ipc_mode {
        run_ipc_loop(&portal)?;
    } else {
        print_summary(&portal)?;
    }

    Ok(())
}

fn run_ipc_loop(portal: &Portal) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json =
                    serde_json::json!({ "error": { "kind": "validation", "message": e.to_string() } });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        let response = handle_command(portal, cmd);
        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(portal: &Portal, cmd: IpcCommand) -> serde_json::Value {
    match cmd {
        IpcCommand::MyComplaints { actor } => respond(portal.my_complaints(&actor)),
        IpcCommand::ListComplaints { actor, filter } => {
            respond(portal.list_complaints(&actor, &filter))
        }
        IpcCommand::SubmitComplaint { actor, complaint } => {
            respond(portal.submit_complaint(&actor, complaint))
        }
        IpcCommand::UpdateComplaint {
            actor,
            complaint_id,
            patch,
        } => respond(portal.update_complaint(&actor, &complaint_id, &patch)),
        IpcCommand::GetStats { actor, scope } => respond(portal.complaint_stats(&actor, scope)),
        IpcCommand::GetLeaderboard => respond(portal.leaderboard()),
        IpcCommand::GetActivityFeed { limit } => {
            ok_json(&portal.activity_feed(limit.unwrap_or(FEED_LIMIT)))
        }
        IpcCommand::ListAnnouncements { actor } => respond(portal.announcements_for(&actor)),
        IpcCommand::ListAllAnnouncements { actor } => respond(portal.announcements_admin(&actor)),
        IpcCommand::CreateAnnouncement {
            actor,
            announcement,
        } => respond(portal.publish_announcement(&actor, announcement)),
        IpcCommand::UpdateAnnouncement {
            actor,
            announcement_id,
            announcement,
        } => respond(portal.update_announcement(&actor, &announcement_id, announcement)),
        IpcCommand::DeleteAnnouncement {
            actor,
            announcement_id,
        } => respond(portal.delete_announcement(&actor, &announcement_id)),
        IpcCommand::Quit => unreachable!("Quit is handled by the loop"),
    }
}

fn respond<T: Serialize>(result: Result<T, PortalError>) -> serde_json::Value {
    match result {
        Ok(value) => ok_json(&value),
        Err(e) => serde_json::json!({
            "error": { "kind": error_kind(&e), "message": e.to_string() }
        }),
    }
}

fn ok_json<T: Serialize>(value: &T) -> serde_json::Value {
    match serde_json::to_value(value) {
        Ok(v) => serde_json::json!({ "ok": v }),
        Err(e) => serde_json::json!({
            "error": { "kind": "internal", "message": e.to_string() }
        }),
    }
}

fn error_kind(err: &PortalError) -> &'static str {
    match err {
        PortalError::Validation { .. } => "validation",
        PortalError::Unauthorized { .. } => "unauthorized",
        PortalError::NotFound { .. } => "not_found",
        PortalError::Unavailable(_) => "unavailable",
        PortalError::Serialization(_) => "serialization",
        PortalError::Other(_) => "internal",
    }
}

/// Synthetic administrator identity for the local console.
fn ops_actor() -> Actor {
    Actor {
        user: UserRef {
            id: "ops-console".to_string(),
            name: "Ops Console".to_string(),
        },
        role: Role::Admin,
        hostel_block: None,
        room_number: None,
    }
}

fn print_summary(portal: &Portal) -> Result<()> {
    let ops = ops_actor();

    let stats = portal.complaint_stats(&ops, StatsScope::All)?;
    println!("=== COMPLAINTS ===");
    println!("  total:       {}", stats.total);
    println!("  pending:     {}", stats.pending);
    println!("  in progress: {}", stats.in_progress);
    println!("  resolved:    {}", stats.resolved);
    println!("  rejected:    {}", stats.rejected);
    if !stats.by_category.is_empty() {
        println!();
        println!("  by category:");
        for slice in &stats.by_category {
            println!(
                "    {:<14} {:>3}  ({:>3}%)",
                slice.category.as_str(),
                slice.count,
                slice.percentage,
            );
        }
    }

    let report = portal.leaderboard()?;
    println!();
    println!("=== STAFF LEADERBOARD ===");
    if report.staff.is_empty() {
        println!("  (no resolution data yet)");
    } else {
        for (i, entry) in report.staff.iter().enumerate() {
            println!(
                "  {}. {:<14} {:>2} resolved, avg {}{}",
                i + 1,
                entry.staff.name,
                entry.total_resolved,
                entry.avg_resolution_time,
                if entry.champion { "  [top performer]" } else { "" },
            );
        }
    }

    println!();
    println!("=== BLOCK LEADERBOARD ===");
    if report.blocks.is_empty() {
        println!("  (no block data yet)");
    } else {
        for (i, entry) in report.blocks.iter().enumerate() {
            println!(
                "  {}. Block {:<3} {:>2}/{} resolved",
                i + 1,
                entry.block,
                entry.resolved_count,
                entry.total_complaints,
            );
        }
    }

    println!();
    println!("=== RECENT ACTIVITY ===");
    let feed = portal.activity_feed(FEED_LIMIT);
    if feed.is_empty() {
        println!("  (nothing yet)");
    } else {
        for item in &feed {
            match item {
                ActivityItem::Complaint {
                    title,
                    category,
                    status,
                    created_at,
                    ..
                } => println!(
                    "  [complaint]    {} — {} ({}, {})",
                    created_at.format("%Y-%m-%d %H:%M"),
                    title,
                    category,
                    status,
                ),
                ActivityItem::Announcement {
                    title,
                    category,
                    priority,
                    created_at,
                    ..
                } => println!(
                    "  [announcement] {} — {} ({}, {})",
                    created_at.format("%Y-%m-%d %H:%M"),
                    title,
                    category,
                    priority,
                ),
            }
        }
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
