//! Outcome (solution) models.
//!
//! Solver values mapped back onto domain objects: worker × shift
//! assignments for the assignment problem, planned counts per concrete
//! shift for the planning problem. Both carry the solver status
//! unchanged, so infeasible or unbounded runs produce an empty outcome
//! with the corresponding status rather than an error.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::TimeWindow;
use crate::mip::SolveStatus;

/// A worker assigned to a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedShift {
    /// Assigned worker ID.
    pub worker_id: String,
    /// Assigned shift ID.
    pub shift_id: String,
    /// Shift time (denormalized for query convenience).
    pub window: TimeWindow,
}

/// Result of solving a shift-assignment problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// Solver status.
    pub status: SolveStatus,
    /// Objective value, if a solution was found.
    pub value: Option<f64>,
    /// Worker-shift assignments (empty without a solution).
    pub assigned_shifts: Vec<AssignedShift>,
    /// Number of workers in the problem.
    pub total_workers: usize,
}

impl AssignmentOutcome {
    /// Creates an outcome without assignments.
    pub fn empty(status: SolveStatus, total_workers: usize) -> Self {
        Self {
            status,
            value: None,
            assigned_shifts: Vec::new(),
            total_workers,
        }
    }

    /// Number of distinct workers with at least one shift.
    pub fn active_workers(&self) -> usize {
        self.assigned_shifts
            .iter()
            .map(|a| a.worker_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// All shifts assigned to a worker.
    pub fn shifts_for_worker(&self, worker_id: &str) -> Vec<&AssignedShift> {
        self.assigned_shifts
            .iter()
            .filter(|a| a.worker_id == worker_id)
            .collect()
    }

    /// All workers assigned to a shift.
    pub fn workers_for_shift(&self, shift_id: &str) -> Vec<&AssignedShift> {
        self.assigned_shifts
            .iter()
            .filter(|a| a.shift_id == shift_id)
            .collect()
    }
}

/// A concrete shift planned a positive number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedShift {
    /// Concrete shift ID.
    pub id: String,
    /// Source template ID.
    pub template_id: String,
    /// Source time slot ID.
    pub slot_id: String,
    /// Shift time.
    pub window: TimeWindow,
    /// Required qualification ("" = none).
    pub qualification: String,
    /// How many workers are planned.
    pub count: i64,
}

/// Result of solving a shift-planning problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningOutcome {
    /// Solver status.
    pub status: SolveStatus,
    /// Objective value, if a solution was found.
    pub value: Option<f64>,
    /// Shifts planned at least once (empty without a solution).
    pub planned_shifts: Vec<PlannedShift>,
    /// Total shift running cost.
    pub shift_cost: f64,
    /// Hours of demand left uncovered.
    pub under_supply: f64,
    /// Planned hours beyond the required hours.
    pub over_supply: f64,
    /// `under_supply` times its configured cost.
    pub under_supply_cost: f64,
    /// `over_supply` times its configured cost.
    pub over_supply_cost: f64,
}

impl PlanningOutcome {
    /// Sum of planned counts across all shifts.
    pub fn planned_count(&self) -> i64 {
        self.planned_shifts.iter().map(|p| p.count).sum()
    }

    /// Planned count for a concrete shift (0 if not planned).
    pub fn count_for(&self, shift_id: &str) -> i64 {
        self.planned_shifts
            .iter()
            .find(|p| p.id == shift_id)
            .map(|p| p.count)
            .unwrap_or(0)
    }
}
