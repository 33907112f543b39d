//! Worker and rule models.
//!
//! Workers are the people assigned to shifts. Each worker has a set of
//! availability windows, a set of qualifications, optional preference
//! weights per shift and a reference to a named [`Rule`].
//!
//! Rules are shared by many workers and bound how much a worker may be
//! scheduled: shift count limits and minimum rest between two shifts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{TimeWindow, MS_PER_HOUR};
use crate::availability::merge_adjacent;

/// Default maximum number of shifts per worker when a rule leaves it open.
///
/// Large enough to act as "unbounded" for any realistic horizon.
pub const DEFAULT_MAX_SHIFTS: i64 = 1000;

/// A worker that can be assigned to shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Windows during which the worker can work (unordered, may touch).
    pub availability: Vec<TimeWindow>,
    /// Qualification labels held by the worker.
    pub qualifications: Vec<String>,
    /// Preference weight per shift id (missing = 0).
    pub preferences: HashMap<String, f64>,
    /// Identifier of the rule this worker follows.
    pub rule_id: String,
}

impl Worker {
    /// Creates a worker following the given rule.
    pub fn new(id: impl Into<String>, rule_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            availability: Vec::new(),
            qualifications: Vec::new(),
            preferences: HashMap::new(),
            rule_id: rule_id.into(),
        }
    }

    /// Adds an availability window.
    pub fn with_availability(mut self, start_ms: i64, end_ms: i64) -> Self {
        self.availability.push(TimeWindow::new(start_ms, end_ms));
        self
    }

    /// Adds a qualification.
    pub fn with_qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualifications.push(qualification.into());
        self
    }

    /// Sets the preference weight for a shift.
    pub fn with_preference(mut self, shift_id: impl Into<String>, weight: f64) -> Self {
        self.preferences.insert(shift_id.into(), weight);
        self
    }

    /// Whether this worker holds a qualification.
    ///
    /// The empty qualification means "unrestricted" and is always held.
    pub fn is_qualified_for(&self, qualification: &str) -> bool {
        qualification.is_empty() || self.qualifications.iter().any(|q| q == qualification)
    }

    /// Preference weight for a shift (0.0 if not specified).
    pub fn preference(&self, shift_id: &str) -> f64 {
        self.preferences.get(shift_id).copied().unwrap_or(0.0)
    }

    /// Availability with touching windows merged (see [`merge_adjacent`]).
    pub fn merged_availability(&self) -> Vec<TimeWindow> {
        merge_adjacent(&self.availability)
    }
}

/// Scheduling rule shared by workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier.
    pub id: String,
    /// Minimum number of shifts per worker (default: 0).
    pub min_shifts: i64,
    /// Maximum number of shifts per worker (default: [`DEFAULT_MAX_SHIFTS`]).
    pub max_shifts: i64,
    /// Minimum rest between the end of one shift and the start of the next (ms).
    pub min_rest_ms: i64,
}

impl Rule {
    /// Creates a rule with default limits and no rest requirement.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            min_shifts: 0,
            max_shifts: DEFAULT_MAX_SHIFTS,
            min_rest_ms: 0,
        }
    }

    /// Sets the minimum shift count.
    pub fn with_min_shifts(mut self, min_shifts: i64) -> Self {
        self.min_shifts = min_shifts;
        self
    }

    /// Sets the maximum shift count.
    pub fn with_max_shifts(mut self, max_shifts: i64) -> Self {
        self.max_shifts = max_shifts;
        self
    }

    /// Sets the minimum rest time (ms).
    pub fn with_min_rest(mut self, min_rest_ms: i64) -> Self {
        self.min_rest_ms = min_rest_ms;
        self
    }

    /// Sets the minimum rest time in hours.
    pub fn with_min_rest_hours(self, hours: f64) -> Self {
        self.with_min_rest((hours * MS_PER_HOUR as f64).round() as i64)
    }
}
