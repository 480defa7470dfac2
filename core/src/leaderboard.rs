//! Leaderboard engine.
//!
//! Two rankings over a complaint collection: resolving staff by volume
//! then speed, and hostel blocks by resolution volume. Both recompute
//! from the current snapshot on every request; empty input yields empty
//! lists and callers render a "no data" state.

use crate::{
    actor::UserRef,
    complaint::{ComplaintRecord, Status},
    types::BlockId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffLeaderboardEntry {
    pub staff: UserRef,
    pub total_resolved: usize,
    pub avg_resolution_secs: i64,
    /// Human form of the average, e.g. "2d 4h".
    pub avg_resolution_time: String,
    /// True on the top-ranked entry only.
    pub champion: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockLeaderboardEntry {
    pub block: BlockId,
    pub resolved_count: usize,
    pub total_complaints: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardReport {
    pub staff: Vec<StaffLeaderboardEntry>,
    pub blocks: Vec<BlockLeaderboardEntry>,
}

/// Rank resolving staff: most resolved first, faster average first on
/// ties, then name for a stable order. Only complaints that are Resolved
/// with a recorded resolver and resolution time count.
pub fn staff_leaderboard(complaints: &[ComplaintRecord]) -> Vec<StaffLeaderboardEntry> {
    struct Tally {
        staff: UserRef,
        resolved: usize,
        total_secs: i64,
    }

    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for c in complaints {
        if c.status != Status::Resolved {
            continue;
        }
        let (Some(resolver), Some(resolved_at)) = (&c.resolved_by, c.resolved_at) else {
            continue;
        };
        let elapsed = (resolved_at - c.created_at).num_seconds().max(0);
        let tally = tallies.entry(resolver.id.as_str()).or_insert_with(|| Tally {
            staff: resolver.clone(),
            resolved: 0,
            total_secs: 0,
        });
        tally.resolved += 1;
        tally.total_secs += elapsed;
    }

    let mut entries: Vec<StaffLeaderboardEntry> = tallies
        .into_values()
        .map(|t| {
            let avg_secs = t.total_secs / t.resolved as i64;
            StaffLeaderboardEntry {
                staff: t.staff,
                total_resolved: t.resolved,
                avg_resolution_secs: avg_secs,
                avg_resolution_time: format_duration(avg_secs),
                champion: false,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_resolved
            .cmp(&a.total_resolved)
            .then_with(|| a.avg_resolution_secs.cmp(&b.avg_resolution_secs))
            .then_with(|| a.staff.name.cmp(&b.staff.name))
    });
    if let Some(first) = entries.first_mut() {
        first.champion = true;
    }
    entries
}

/// Rank hostel blocks: most resolutions first, block label ascending on
/// ties. Every complaint counts toward its block's total.
pub fn block_leaderboard(complaints: &[ComplaintRecord]) -> Vec<BlockLeaderboardEntry> {
    let mut tallies: HashMap<&str, (usize, usize)> = HashMap::new();
    for c in complaints {
        let (resolved, total) = tallies.entry(c.hostel_block.as_str()).or_insert((0, 0));
        if c.status == Status::Resolved {
            *resolved += 1;
        }
        *total += 1;
    }

    let mut entries: Vec<BlockLeaderboardEntry> = tallies
        .into_iter()
        .map(|(block, (resolved_count, total_complaints))| BlockLeaderboardEntry {
            block: block.to_string(),
            resolved_count,
            total_complaints,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.resolved_count
            .cmp(&a.resolved_count)
            .then_with(|| a.block.cmp(&b.block))
    });
    entries
}

/// Render a duration in the portal's human form: "2d 4h" past a day,
/// "3h 12m" past an hour, "45m" below that.
pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
