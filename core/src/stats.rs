//! Dashboard statistics aggregator.
//!
//! Single pass over a complaint collection: per-status counts plus a
//! category breakdown with rounded percentages. Callers choose the scope
//! (one student's complaints vs. the whole system) by choosing the input.

use crate::complaint::{Category, ComplaintRecord, Status};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: Category,
    pub count: usize,
    /// round(count / total * 100). Each slice rounds independently, so
    /// the percentages of a breakdown may not sum to exactly 100.
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
    /// Categories actually present, count descending, name ascending on
    /// ties.
    pub by_category: Vec<CategorySlice>,
}

/// Aggregate a complaint collection. Empty input yields zeroes and an
/// empty breakdown, never an error.
pub fn aggregate(complaints: &[ComplaintRecord]) -> ComplaintStats {
    let total = complaints.len();
    let mut by_status: HashMap<Status, usize> = HashMap::new();
    let mut category_counts: HashMap<Category, usize> = HashMap::new();

    for c in complaints {
        *by_status.entry(c.status).or_default() += 1;
        *category_counts.entry(c.category).or_default() += 1;
    }

    let mut by_category: Vec<CategorySlice> = category_counts
        .into_iter()
        .map(|(category, count)| CategorySlice {
            category,
            count,
            percentage: if total > 0 {
                ((count as f64 / total as f64) * 100.0).round() as u32
            } else {
                0
            },
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    ComplaintStats {
        total,
        pending: by_status.get(&Status::Pending).copied().unwrap_or(0),
        in_progress: by_status.get(&Status::InProgress).copied().unwrap_or(0),
        resolved: by_status.get(&Status::Resolved).copied().unwrap_or(0),
        rejected: by_status.get(&Status::Rejected).copied().unwrap_or(0),
        by_category,
    }
}
