//! Date -> center assignment.
//!
//! # Algorithm
//!
//! 1. A preferred center that is available on every requested date takes
//!    all of them.
//! 2. Otherwise the first center, in (name, id) order, available on every
//!    date takes all of them.
//! 3. Otherwise greedy set cover: repeatedly pick the center covering the
//!    most still-unassigned dates (ties go to the earlier center in
//!    (name, id) order) and give it every date it covers.
//! 4. Stop when nothing remains, or when the best center covers no
//!    remaining date; those dates are reported as unassignable.
//!
//! This is a greedy approximation to minimum-set-cover, not optimal in all
//! cases; that is an accepted design trade-off for predictable, explainable
//! assignment rather than exhaustive search. Replacing it with an exact
//! solver changes which centers get picked for ambiguous inputs.
//!
//! # Complexity
//! O(d * c * k) where d=dates, c=centers, k=greedy rounds (k <= c).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use uuid::Uuid;

use super::availability::{AvailabilityMatrix, CenterSchedule};
use crate::models::booking::AssignmentSummary;

/// Which rule produced an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStrategy {
    PreferredCenter,
    SingleCenter,
    GreedyCover,
}

/// Result of the optimizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub strategy: AssignmentStrategy,
    /// Assigned dates, ascending
    pub days: BTreeMap<NaiveDate, Uuid>,
    /// Dates no candidate center can serve, ascending
    pub unassignable: Vec<NaiveDate>,
}

impl Assignment {
    fn whole(strategy: AssignmentStrategy, center_id: Uuid, dates: &[NaiveDate]) -> Self {
        Self {
            strategy,
            days: dates.iter().map(|&date| (date, center_id)).collect(),
            unassignable: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.unassignable.is_empty()
    }

    pub fn centers_used(&self) -> usize {
        self.days.values().collect::<BTreeSet<_>>().len()
    }

    /// Assigned day count per center id
    pub fn day_counts(&self) -> BTreeMap<Uuid, usize> {
        let mut counts = BTreeMap::new();
        for center_id in self.days.values() {
            *counts.entry(*center_id).or_insert(0) += 1;
        }
        counts
    }

    /// Summary keyed by center name
    pub fn summary(&self, centers: &[CenterSchedule]) -> AssignmentSummary {
        let mut center_breakdown = BTreeMap::new();
        for (center_id, count) in self.day_counts() {
            let name = centers
                .iter()
                .find(|c| c.id == center_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| center_id.to_string());
            *center_breakdown.entry(name).or_insert(0) += count;
        }

        AssignmentSummary {
            total_days: self.days.len(),
            centers_used: self.centers_used(),
            center_breakdown,
        }
    }
}

/// Assign every date of the matrix to a center.
///
/// `preferred` is ignored unless it is one of the matrix's centers.
pub fn assign(matrix: &AvailabilityMatrix, preferred: Option<Uuid>) -> Assignment {
    let dates = matrix.dates();

    if let Some(center_id) = preferred {
        if matrix.contains_center(center_id) && matrix.covers_all(center_id) {
            tracing::debug!(%center_id, "preferred center covers every requested date");
            return Assignment::whole(AssignmentStrategy::PreferredCenter, center_id, dates);
        }
    }

    if let Some(center_id) = matrix.center_ids().find(|&id| matrix.covers_all(id)) {
        tracing::debug!(%center_id, "single center covers every requested date");
        return Assignment::whole(AssignmentStrategy::SingleCenter, center_id, dates);
    }

    greedy_cover(matrix)
}

fn greedy_cover(matrix: &AvailabilityMatrix) -> Assignment {
    let mut remaining: BTreeSet<NaiveDate> = matrix.dates().iter().copied().collect();
    let mut days = BTreeMap::new();

    while !remaining.is_empty() {
        let mut best: Option<(Uuid, Vec<NaiveDate>)> = None;

        for center_id in matrix.center_ids() {
            let covered: Vec<NaiveDate> = remaining
                .iter()
                .copied()
                .filter(|&date| matrix.is_available(center_id, date))
                .collect();

            // Strictly greater keeps the earlier center on ties
            if best.as_ref().map_or(true, |(_, b)| covered.len() > b.len()) {
                best = Some((center_id, covered));
            }
        }

        let Some((center_id, covered)) = best.filter(|(_, covered)| !covered.is_empty()) else {
            break;
        };

        tracing::debug!(%center_id, covered = covered.len(), "greedy round picked center");
        for date in covered {
            remaining.remove(&date);
            days.insert(date, center_id);
        }
    }

    Assignment {
        strategy: AssignmentStrategy::GreedyCover,
        days,
        unassignable: remaining.into_iter().collect(),
    }
}
