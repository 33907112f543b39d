//! Shift assignment: which worker works which shift.
//!
//! [`compile_assignment`] resolves rules, merges availability and derives
//! eligibility, rest conflicts and preference weights.
//! [`AssignmentModel`] turns the result into a [`MipModel`] and decodes
//! solver answers. [`AssignmentProblem`] bundles both steps.
//!
//! # Example
//! ```
//! use u_workforce::assignment::AssignmentProblem;
//! use u_workforce::models::{Rule, Shift, Worker, MS_PER_HOUR};
//!
//! let h = MS_PER_HOUR;
//! let problem = AssignmentProblem::new()
//!     .with_rule(Rule::new("default").with_min_rest_hours(2.0))
//!     .with_worker(Worker::new("ana", "default").with_availability(0, 24 * h))
//!     .with_shift(Shift::new("morning", 9 * h, 13 * h, 1))
//!     .with_shift(Shift::new("afternoon", 14 * h, 18 * h, 1));
//!
//! let model = problem.compile().unwrap();
//! // One worker cannot take both shifts with only 1h between them.
//! assert!(model.model().constraint("Rest_ana_morning_afternoon").is_some());
//! ```
//!
//! [`MipModel`]: crate::mip::MipModel

mod compile;
mod model;

pub use compile::{
    compile_assignment, within_rest, CompiledAssignment, EligibilityMask, PreferenceWeight,
    ResolvedWorker, RestConflict,
};
pub use model::AssignmentModel;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::mip::{MipSolver, SolveOptions};
use crate::models::{AssignmentOutcome, Rule, Shift, Worker};

/// A complete shift-assignment problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentProblem {
    /// Available workers.
    pub workers: Vec<Worker>,
    /// Shifts to staff.
    pub shifts: Vec<Shift>,
    /// Rules referenced by workers.
    pub rules: Vec<Rule>,
}

impl AssignmentProblem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a worker.
    pub fn with_worker(mut self, worker: Worker) -> Self {
        self.workers.push(worker);
        self
    }

    /// Adds a shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shifts.push(shift);
        self
    }

    /// Adds a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Compiles and builds the MIP model.
    pub fn compile(&self) -> Result<AssignmentModel> {
        let compiled = compile_assignment(&self.workers, &self.shifts, &self.rules)?;
        Ok(AssignmentModel::build(compiled))
    }

    /// Compiles, solves and decodes.
    ///
    /// Solver statuses (infeasible, unbounded, ...) are reported in the
    /// outcome, not as errors.
    pub fn solve<S: MipSolver>(&self, solver: &S, options: &SolveOptions) -> Result<AssignmentOutcome> {
        let model = self.compile()?;
        if solver.backend() != options.backend {
            warn!(
                requested = %options.backend,
                actual = %solver.backend(),
                "solver backend differs from requested backend"
            );
        }
        let solution = solver.solve(model.model(), options);
        Ok(model.decode(&solution))
    }
}
