//! Per-(center, date) availability
//!
//! A center is available on a date when the date's ISO weekday is in its
//! operating pattern and no exception closes that exact date. Capacity is
//! consulted through [`CapacityPolicy`]; the default policy admits every
//! open day, so capacity overrides are carried but do not gate anything yet.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use uuid::Uuid;

use super::calendar::{iso_weekday, weekday_name};
use crate::models::center::CenterScheduleSummary;

/// Date-specific override of a center's weekly pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionRule {
    pub is_closed: bool,
    pub capacity_override: Option<i32>,
}

/// Everything the engine needs to know about one candidate center
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterSchedule {
    pub id: Uuid,
    pub name: String,
    pub daily_capacity: i32,
    /// ISO weekdays (1..=7)
    pub operating_days: BTreeSet<u8>,
    pub exceptions: BTreeMap<NaiveDate, ExceptionRule>,
}

impl CenterSchedule {
    pub fn new(id: Uuid, name: impl Into<String>, daily_capacity: i32) -> Self {
        Self {
            id,
            name: name.into(),
            daily_capacity,
            operating_days: BTreeSet::new(),
            exceptions: BTreeMap::new(),
        }
    }

    pub fn with_operating_days(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.operating_days.extend(days);
        self
    }

    pub fn with_exception(mut self, date: NaiveDate, rule: ExceptionRule) -> Self {
        self.exceptions.insert(date, rule);
        self
    }

    /// Weekly pattern membership, ignoring exceptions
    pub fn operates_on(&self, date: NaiveDate) -> bool {
        self.operating_days.contains(&iso_weekday(date))
    }

    /// True when an exception closes this exact date
    pub fn is_closed_on(&self, date: NaiveDate) -> bool {
        self.exceptions.get(&date).is_some_and(|rule| rule.is_closed)
    }

    pub fn is_open(&self, date: NaiveDate) -> bool {
        self.operates_on(date) && !self.is_closed_on(date)
    }

    /// Capacity in force on a date: the exception override, else the daily capacity
    pub fn effective_capacity(&self, date: NaiveDate) -> i32 {
        self.exceptions
            .get(&date)
            .and_then(|rule| rule.capacity_override)
            .unwrap_or(self.daily_capacity)
    }

    /// Caller-facing schedule, used when some dates cannot be served
    pub fn summary(&self, requested: &[NaiveDate]) -> CenterScheduleSummary {
        CenterScheduleSummary {
            name: self.name.clone(),
            operating_days: self
                .operating_days
                .iter()
                .map(|&day| weekday_name(day).to_string())
                .collect(),
            closed_dates: requested
                .iter()
                .copied()
                .filter(|&date| self.is_closed_on(date))
                .collect(),
        }
    }
}

/// Extension point for capacity enforcement.
///
/// Called only for days the center is open; returning `false` removes the
/// day from the center's availability.
pub trait CapacityPolicy: Send + Sync {
    fn admits(&self, center: &CenterSchedule, date: NaiveDate) -> bool;
}

/// Capacity is advisory: every open day is admitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvisoryCapacity;

impl CapacityPolicy for AdvisoryCapacity {
    fn admits(&self, _center: &CenterSchedule, _date: NaiveDate) -> bool {
        true
    }
}

/// `available[center][date]` over a fixed center order and date list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityMatrix {
    dates: Vec<NaiveDate>,
    /// Centers sorted by (name, id), each with one flag per date
    rows: Vec<(Uuid, Vec<bool>)>,
}

impl AvailabilityMatrix {
    /// Compute availability for every (center, date) pair.
    ///
    /// Rows are ordered by center name, then id, independently of the
    /// input order.
    pub fn build(
        centers: &[CenterSchedule],
        dates: &[NaiveDate],
        capacity: &dyn CapacityPolicy,
    ) -> Self {
        let mut ordered: Vec<&CenterSchedule> = centers.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let rows = ordered
            .into_iter()
            .map(|center| {
                let flags = dates
                    .iter()
                    .map(|&date| center.is_open(date) && capacity.admits(center, date))
                    .collect();
                (center.id, flags)
            })
            .collect();

        Self {
            dates: dates.to_vec(),
            rows,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Center ids in stable (name, id) order
    pub fn center_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.rows.iter().map(|(id, _)| *id)
    }

    pub fn contains_center(&self, center_id: Uuid) -> bool {
        self.rows.iter().any(|(id, _)| *id == center_id)
    }

    pub fn is_available(&self, center_id: Uuid, date: NaiveDate) -> bool {
        let Some(col) = self.dates.iter().position(|d| *d == date) else {
            return false;
        };
        self.row(center_id).is_some_and(|flags| flags[col])
    }

    /// Dates of the matrix the center can serve, ascending
    pub fn available_dates(&self, center_id: Uuid) -> Vec<NaiveDate> {
        match self.row(center_id) {
            Some(flags) => self
                .dates
                .iter()
                .zip(flags)
                .filter_map(|(date, open)| open.then_some(*date))
                .collect(),
            None => Vec::new(),
        }
    }

    /// True when the center can serve every date of the matrix
    pub fn covers_all(&self, center_id: Uuid) -> bool {
        self.row(center_id)
            .is_some_and(|flags| flags.iter().all(|open| *open))
    }

    fn row(&self, center_id: Uuid) -> Option<&[bool]> {
        self.rows
            .iter()
            .find(|(id, _)| *id == center_id)
            .map(|(_, flags)| flags.as_slice())
    }
}
