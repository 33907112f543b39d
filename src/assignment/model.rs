//! Shift-assignment MIP formulation.
//!
//! # Formulation
//! One binary `Assignment_{worker}_{shift}` per (worker, shift) pair.
//!
//! - `Shift_{s}`: `sum_w x[w,s] == count(s)`
//! - `WorkerMin_{w}`: `sum_s x[w,s] >= min_shifts(w)`
//! - `WorkerMax_{w}`: `sum_s x[w,s] <= max_shifts(w)`
//! - `Rest_{w}_{s1}_{s2}`: `x[w,s1] + x[w,s2] <= 1` per rest conflict
//! - ineligible pairs are fixed to 0
//!
//! Objective: maximize `sum(preference * x)` over positive preferences.

use tracing::{debug, info};

use super::compile::CompiledAssignment;
use crate::mip::{LinearExpr, MipModel, MipSolution, ObjectiveSense, Sense, VarId, VarKind};
use crate::models::{AssignedShift, AssignmentOutcome};

/// A built assignment model, ready for a solver.
#[derive(Debug, Clone)]
pub struct AssignmentModel {
    compiled: CompiledAssignment,
    model: MipModel,
    /// Row-major by worker.
    vars: Vec<VarId>,
}

impl AssignmentModel {
    /// Builds the MIP model from a compiled problem.
    pub fn build(compiled: CompiledAssignment) -> Self {
        let mut model = MipModel::new("shift_assignment");
        let n_shifts = compiled.shifts.len();

        let mut vars = Vec::with_capacity(compiled.workers.len() * n_shifts);
        for (wi, w) in compiled.workers.iter().enumerate() {
            for (si, s) in compiled.shifts.iter().enumerate() {
                let var = model.add_var(
                    format!("Assignment_{}_{}", w.id(), s.id),
                    VarKind::Binary,
                    0.0,
                    Some(1.0),
                );
                if !compiled.eligibility.is_eligible(wi, si) {
                    model.fix_var(var, 0.0);
                }
                vars.push(var);
            }
        }

        for (si, s) in compiled.shifts.iter().enumerate() {
            let expr = LinearExpr::sum((0..compiled.workers.len()).map(|wi| vars[wi * n_shifts + si]));
            model.add_constraint(format!("Shift_{}", s.id), expr, Sense::Eq, s.count as f64);
        }

        for (wi, w) in compiled.workers.iter().enumerate() {
            let row = &vars[wi * n_shifts..(wi + 1) * n_shifts];
            model.add_constraint(
                format!("WorkerMin_{}", w.id()),
                LinearExpr::sum(row.iter().copied()),
                Sense::Ge,
                w.rule.min_shifts as f64,
            );
            model.add_constraint(
                format!("WorkerMax_{}", w.id()),
                LinearExpr::sum(row.iter().copied()),
                Sense::Le,
                w.rule.max_shifts as f64,
            );
        }

        for c in &compiled.rest_conflicts {
            let first = &compiled.shifts[c.first];
            let second = &compiled.shifts[c.second];
            model.add_constraint(
                format!(
                    "Rest_{}_{}_{}",
                    compiled.workers[c.worker].id(),
                    first.id,
                    second.id
                ),
                LinearExpr::sum([
                    vars[c.worker * n_shifts + c.first],
                    vars[c.worker * n_shifts + c.second],
                ]),
                Sense::Le,
                1.0,
            );
        }

        let mut objective = LinearExpr::new();
        for p in &compiled.preferences {
            objective.add_term(vars[p.worker * n_shifts + p.shift], p.weight);
        }
        model.set_objective(ObjectiveSense::Maximize, objective);

        debug!(
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            "assignment model built"
        );

        Self {
            compiled,
            model,
            vars,
        }
    }

    /// The solver-agnostic model.
    pub fn model(&self) -> &MipModel {
        &self.model
    }

    /// The compiled problem the model was built from.
    pub fn compiled(&self) -> &CompiledAssignment {
        &self.compiled
    }

    /// Decision variable of a (worker, shift) pair, by index.
    pub fn var(&self, worker: usize, shift: usize) -> VarId {
        self.vars[worker * self.compiled.shifts.len() + shift]
    }

    /// Maps a solver result back onto workers and shifts.
    ///
    /// A pair is assigned when its value exceeds 0.5. Without a solution
    /// the outcome has no assignments and carries the solver status.
    pub fn decode(&self, solution: &MipSolution) -> AssignmentOutcome {
        let total = self.compiled.workers.len();
        let mut outcome = AssignmentOutcome::empty(solution.status, total);

        if !solution.is_solution_found() {
            info!(status = %solution.status, "no assignment found");
            return outcome;
        }
        outcome.value = solution.objective_value;

        for (wi, w) in self.compiled.workers.iter().enumerate() {
            for (si, s) in self.compiled.shifts.iter().enumerate() {
                if solution.value(self.var(wi, si)) > 0.5 {
                    outcome.assigned_shifts.push(AssignedShift {
                        worker_id: w.id().to_string(),
                        shift_id: s.id.clone(),
                        window: s.window,
                    });
                }
            }
        }

        info!(
            status = %solution.status,
            value = ?outcome.value,
            assigned = outcome.assigned_shifts.len(),
            active_workers = outcome.active_workers(),
            total_workers = total,
            "assignment decoded"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::compile_assignment;
    use crate::mip::{MipSolver, SolveOptions, SolveStatus};
    use crate::mip::testing::{BruteForceSolver, FixedSolver};
    use crate::models::{Rule, Shift, Worker, MS_PER_HOUR};

    const H: i64 = MS_PER_HOUR;

    fn build(workers: &[Worker], shifts: &[Shift], rules: &[Rule]) -> AssignmentModel {
        AssignmentModel::build(compile_assignment(workers, shifts, rules).unwrap())
    }

    #[test]
    fn test_model_shape() {
        let workers = vec![
            Worker::new("w1", "r1").with_availability(0, 24 * H),
            Worker::new("w2", "r1").with_availability(0, 24 * H),
        ];
        let shifts = vec![
            Shift::new("A", 9 * H, 13 * H, 1),
            Shift::new("B", 14 * H, 18 * H, 1),
        ];
        let rules = vec![Rule::new("r1").with_min_rest_hours(2.0)];
        let am = build(&workers, &shifts, &rules);
        let m = am.model();

        assert_eq!(m.variable_count(), 4);
        // 2 shift + 2×2 worker bounds + 2 rest
        assert_eq!(m.constraint_count(), 8);
        assert!(m.var_by_name("Assignment_w2_B").is_some());
        assert!(m.constraint("Rest_w1_A_B").is_some());
        assert!(m.constraint("Rest_w2_A_B").is_some());
        let shift_a = m.constraint("Shift_A").unwrap();
        assert_eq!(shift_a.sense, Sense::Eq);
        assert!((shift_a.rhs - 1.0).abs() < 1e-10);
        let max = m.constraint("WorkerMax_w1").unwrap();
        assert!((max.rhs - 1000.0).abs() < 1e-10);
    }

    #[test]
    fn test_ineligible_pair_fixed_despite_preference() {
        let workers = vec![Worker::new("w1", "r1")
            .with_availability(0, 10 * H)
            .with_preference("late", 10.0)];
        let shifts = vec![Shift::new("late", 12 * H, 16 * H, 0)];
        let am = build(&workers, &shifts, &[Rule::new("r1")]);

        let var = am.model().var(am.var(0, 0)).unwrap();
        assert!(var.is_fixed());
        assert_eq!(var.upper, Some(0.0));
        // The preference still appears in the objective, but cannot be realized
        assert!((am.model().objective.expr.coefficient(am.var(0, 0)) - 10.0).abs() < 1e-10);
        assert_eq!(am.model().objective.sense, ObjectiveSense::Maximize);
    }

    #[test]
    fn test_solve_respects_rest_and_preferences() {
        let workers = vec![
            Worker::new("w1", "r1")
                .with_availability(0, 24 * H)
                .with_preference("A", 3.0)
                .with_preference("B", 1.0),
            Worker::new("w2", "r1")
                .with_availability(0, 24 * H)
                .with_preference("B", 2.0),
        ];
        let shifts = vec![
            Shift::new("A", 9 * H, 13 * H, 1),
            Shift::new("B", 14 * H, 18 * H, 1),
        ];
        let rules = vec![Rule::new("r1").with_min_rest_hours(2.0)];
        let am = build(&workers, &shifts, &rules);

        let solution = BruteForceSolver.solve(am.model(), &SolveOptions::default());
        let outcome = am.decode(&solution);

        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert!((outcome.value.unwrap() - 5.0).abs() < 1e-10);
        assert_eq!(outcome.shifts_for_worker("w1")[0].shift_id, "A");
        assert_eq!(outcome.shifts_for_worker("w2")[0].shift_id, "B");
        assert_eq!(outcome.active_workers(), 2);
        assert_eq!(outcome.total_workers, 2);
    }

    #[test]
    fn test_rest_conflict_makes_single_worker_infeasible() {
        let workers = vec![Worker::new("w1", "r1").with_availability(0, 24 * H)];
        let shifts = vec![
            Shift::new("A", 9 * H, 13 * H, 1),
            Shift::new("B", 14 * H, 18 * H, 1),
        ];
        let rules = vec![Rule::new("r1").with_min_rest_hours(2.0)];
        let am = build(&workers, &shifts, &rules);

        let outcome = am.decode(&BruteForceSolver.solve(am.model(), &SolveOptions::default()));
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.assigned_shifts.is_empty());
        assert_eq!(outcome.total_workers, 1);
    }

    #[test]
    fn test_decode_threshold() {
        let workers = vec![Worker::new("w1", "r1").with_availability(0, 24 * H)];
        let shifts = vec![Shift::new("A", 0, H, 1), Shift::new("B", 2 * H, 3 * H, 0)];
        let am = build(&workers, &shifts, &[Rule::new("r1")]);

        let solver = FixedSolver::optimal(vec![0.9999, 0.4], 0.0);
        let outcome = am.decode(&solver.solve(am.model(), &SolveOptions::default()));
        assert_eq!(outcome.assigned_shifts.len(), 1);
        assert_eq!(outcome.assigned_shifts[0].shift_id, "A");
        assert_eq!(outcome.assigned_shifts[0].window, shifts[0].window);
    }

    #[test]
    fn test_decode_without_solution() {
        let workers = vec![Worker::new("w1", "r1").with_availability(0, 24 * H)];
        let shifts = vec![Shift::new("A", 0, H, 1)];
        let am = build(&workers, &shifts, &[Rule::new("r1")]);

        let outcome = am.decode(&FixedSolver::status(SolveStatus::Unknown).solution);
        assert_eq!(outcome.status, SolveStatus::Unknown);
        assert!(outcome.value.is_none());
        assert_eq!(outcome.active_workers(), 0);
    }
}
