//! Shift planning: how many workers to plan on each shift occurrence.
//!
//! Templates are expanded into concrete shifts ([`expand_templates`]), the
//! demand curve is cut into coverage periods ([`decompose_periods`]) and
//! a [`PlanningModel`] is built over both.
//!
//! # Example
//! ```
//! use u_workforce::models::{Demand, ShiftTemplate, TimeSlot, MS_PER_HOUR};
//! use u_workforce::planning::PlanningProblem;
//!
//! let h = MS_PER_HOUR;
//! let problem = PlanningProblem::new()
//!     .with_template(
//!         ShiftTemplate::new("day")
//!             .with_cost(100.0)
//!             .with_time(TimeSlot::new("am", 8 * h, 14 * h))
//!             .with_time(TimeSlot::new("pm", 14 * h, 20 * h)),
//!     )
//!     .with_demand(Demand::new(8 * h, 20 * h, 3));
//!
//! let model = problem.compile().unwrap();
//! assert_eq!(model.shifts().len(), 2);
//! assert_eq!(model.periods()[0].periods.len(), 2);
//! ```
//!
//! # Reference
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

mod expand;
mod model;
mod periods;

pub use expand::expand_templates;
pub use model::{PlanningModel, PlanningOptions};
pub use periods::{decompose_periods, CoveragePeriod, QualificationPeriods};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CompileError, Result};
use crate::mip::{MipSolver, SolveOptions};
use crate::models::{Demand, PlanningOutcome, ShiftTemplate};
use crate::validation::validate_planning_input;

/// A complete shift-planning problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningProblem {
    /// Shift templates with their occurrences.
    pub templates: Vec<ShiftTemplate>,
    /// Demand curve.
    pub demands: Vec<Demand>,
    /// Objective configuration.
    #[serde(default)]
    pub options: PlanningOptions,
}

impl PlanningProblem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shift template.
    pub fn with_template(mut self, template: ShiftTemplate) -> Self {
        self.templates.push(template);
        self
    }

    /// Adds a demand entry.
    pub fn with_demand(mut self, demand: Demand) -> Self {
        self.demands.push(demand);
        self
    }

    /// Sets the objective configuration.
    pub fn with_options(mut self, options: PlanningOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates, expands, decomposes and builds the MIP model.
    pub fn compile(&self) -> Result<PlanningModel> {
        debug!(
            templates = self.templates.len(),
            demands = self.demands.len(),
            "compiling shift planning"
        );
        validate_planning_input(&self.templates, &self.demands).map_err(CompileError::InvalidInput)?;

        let shifts = expand_templates(&self.templates)?;
        let groups = decompose_periods(&shifts, &self.demands);
        Ok(PlanningModel::build(shifts, groups, self.options.clone()))
    }

    /// Compiles, solves and decodes.
    ///
    /// Solver statuses (infeasible, unbounded, ...) are reported in the
    /// outcome, not as errors.
    pub fn solve<S: MipSolver>(&self, solver: &S, options: &SolveOptions) -> Result<PlanningOutcome> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mip::testing::FixedSolver;
    use crate::mip::SolveStatus;
    use crate::models::{TimeSlot, MS_PER_HOUR};

    const H: i64 = MS_PER_HOUR;

    fn problem() -> PlanningProblem {
        PlanningProblem::new()
            .with_template(
                ShiftTemplate::new("day")
                    .with_cost(100.0)
                    .with_time(TimeSlot::new("am", 8 * H, 14 * H))
                    .with_time(TimeSlot::new("pm", 14 * H, 20 * H).with_cost(120.0)),
            )
            .with_template(
                ShiftTemplate::new("ward")
                    .with_cost(150.0)
                    .with_qualification("nurse")
                    .with_time(TimeSlot::new("all", 8 * H, 20 * H)),
            )
            .with_demand(Demand::new(8 * H, 20 * H, 3))
            .with_demand(Demand::new(10 * H, 12 * H, 1).with_qualification("nurse"))
    }

    #[test]
    fn test_compile() {
        let model = problem().compile().unwrap();
        let ids: Vec<_> = model.shifts().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["day_am", "day_pm", "ward_all"]);

        let groups = model.periods();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].qualification, "");
        assert_eq!(groups[0].periods.len(), 2);
        assert_eq!(groups[1].qualification, "nurse");
        assert_eq!(groups[1].periods.len(), 1);
        assert_eq!(groups[1].periods[0].covering_shifts, vec![2]);

        // 3 planned + ShiftCost; 3 covers + ShiftCost
        assert_eq!(model.model().variable_count(), 4);
        assert_eq!(model.model().constraint_count(), 4);
        assert!((model.required_hours() - 38.0).abs() < 1e-10);
    }

    #[test]
    fn test_compile_missing_cost() {
        let problem = PlanningProblem::new()
            .with_template(ShiftTemplate::new("free").with_time(TimeSlot::new("a", 0, H)));
        assert!(matches!(
            problem.compile().unwrap_err(),
            CompileError::MissingCost { .. }
        ));
    }

    #[test]
    fn test_compile_invalid_input() {
        let problem = PlanningProblem::new().with_demand(Demand::new(H, 0, 1));
        let err = problem.compile().unwrap_err();
        assert!(matches!(err, CompileError::InvalidInput(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_compile_rejects_colliding_shift_ids() {
        let problem = PlanningProblem::new()
            .with_template(
                ShiftTemplate::new("a_b")
                    .with_cost(1.0)
                    .with_time(TimeSlot::new("c", 0, H)),
            )
            .with_template(
                ShiftTemplate::new("a")
                    .with_cost(1.0)
                    .with_time(TimeSlot::new("b_c", 0, H)),
            );
        let err = problem.compile().unwrap_err();
        assert!(matches!(err, CompileError::InvalidInput(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("a_b_c"));
    }

    #[test]
    fn test_solve_decodes() {
        let problem = problem();
        let model = problem.compile().unwrap();
        let mut values = vec![0.0; model.model().variable_count()];
        values[model.planned_var(0).0] = 3.0;
        values[model.planned_var(1).0] = 3.0;
        values[model.planned_var(2).0] = 1.0;
        values[model.model().var_by_name("ShiftCost").unwrap().0] = 810.0;

        let solver = FixedSolver::optimal(values, 810.0);
        let outcome = problem.solve(&solver, &SolveOptions::default()).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.planned_count(), 7);
        assert_eq!(outcome.count_for("ward_all"), 1);
        assert!((outcome.shift_cost - 810.0).abs() < 1e-10);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let problem: PlanningProblem =
            serde_json::from_str(r#"{"templates": [], "demands": []}"#).unwrap();
        assert_eq!(problem.options, PlanningOptions::default());
    }
}
