//! Coverage period decomposition.
//!
//! Splits the demand curve of each qualification into atomic periods in
//! which both the set of active demands and the set of covering shifts
//! are constant. One coverage constraint per period then encodes the
//! whole demand curve exactly.
//!
//! # Algorithm
//! Per distinct demand qualification (in order of first appearance):
//! 1. Collect the start and end of every demand and every shift of that
//!    qualification; sort and deduplicate.
//! 2. Each adjacent pair of points forms a candidate period.
//! 3. Shifts and demands are attached by full containment.
//! 4. Candidates without a demand are dropped.
//!
//! # Complexity
//! O(P × (S + D)) per qualification for P boundary points.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ConcreteShift, Demand, TimeWindow};

/// An atomic slice of the demand curve of one qualification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    /// Qualification of the demands in this period.
    pub qualification: String,
    /// The slice.
    pub window: TimeWindow,
    /// Indices of shifts fully containing the slice.
    pub covering_shifts: Vec<usize>,
    /// Indices of demands fully containing the slice (never empty).
    pub demands: Vec<usize>,
    /// Sum of the contributing demand counts.
    pub required: i64,
}

impl CoveragePeriod {
    /// Length of the period in hours.
    pub fn hours(&self) -> f64 {
        self.window.hours()
    }

    /// Worker-hours demanded in this period.
    pub fn required_hours(&self) -> f64 {
        self.required as f64 * self.hours()
    }
}

/// The ordered periods of one qualification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationPeriods {
    /// Qualification ("" = none).
    pub qualification: String,
    /// Periods ordered by start.
    pub periods: Vec<CoveragePeriod>,
}

/// Decomposes demands into coverage periods per qualification.
///
/// A shift can only cover demands of exactly its own qualification.
/// Qualifications without any demand produce no group.
pub fn decompose_periods(shifts: &[ConcreteShift], demands: &[Demand]) -> Vec<QualificationPeriods> {
    let mut qualifications: Vec<&str> = Vec::new();
    for d in demands {
        if !qualifications.contains(&d.qualification.as_str()) {
            qualifications.push(&d.qualification);
        }
    }

    let groups: Vec<QualificationPeriods> = qualifications
        .into_iter()
        .map(|q| QualificationPeriods {
            qualification: q.to_string(),
            periods: decompose_qualification(q, shifts, demands),
        })
        .collect();

    debug!(
        qualifications = groups.len(),
        periods = groups.iter().map(|g| g.periods.len()).sum::<usize>(),
        "demand coverage periods decomposed"
    );
    groups
}

fn decompose_qualification(
    qualification: &str,
    shifts: &[ConcreteShift],
    demands: &[Demand],
) -> Vec<CoveragePeriod> {
    let group_demands: Vec<(usize, &Demand)> = demands
        .iter()
        .enumerate()
        .filter(|(_, d)| d.qualification == qualification)
        .collect();
    let group_shifts: Vec<(usize, &ConcreteShift)> = shifts
        .iter()
        .enumerate()
        .filter(|(_, s)| s.qualification == qualification)
        .collect();

    let mut points: Vec<i64> = group_demands
        .iter()
        .flat_map(|(_, d)| [d.window.start_ms, d.window.end_ms])
        .chain(
            group_shifts
                .iter()
                .flat_map(|(_, s)| [s.window.start_ms, s.window.end_ms]),
        )
        .collect();
    points.sort_unstable();
    points.dedup();

    let mut periods = Vec::new();
    for pair in points.windows(2) {
        let window = TimeWindow::new(pair[0], pair[1]);

        let contributing: Vec<usize> = group_demands
            .iter()
            .filter(|(_, d)| d.window.covers(&window))
            .map(|(i, _)| *i)
            .collect();
        if contributing.is_empty() {
            continue;
        }

        let covering = group_shifts
            .iter()
            .filter(|(_, s)| s.window.covers(&window))
            .map(|(i, _)| *i)
            .collect();
        let required = contributing.iter().map(|&i| demands[i].count).sum();

        periods.push(CoveragePeriod {
            qualification: qualification.to_string(),
            window,
            covering_shifts: covering,
            demands: contributing,
            required,
        });
    }
    periods
}
