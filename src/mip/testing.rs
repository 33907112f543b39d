//! Solver stubs for unit tests.

use super::{
    Backend, MipModel, MipSolution, MipSolver, ObjectiveSense, SolveOptions, SolveStatus, VarKind,
};

/// Returns a fixed solution regardless of the model.
pub struct FixedSolver {
    pub solution: MipSolution,
}

impl FixedSolver {
    pub fn optimal(values: Vec<f64>, objective: f64) -> Self {
        Self {
            solution: MipSolution {
                status: SolveStatus::Optimal,
                objective_value: Some(objective),
                values,
            },
        }
    }

    pub fn status(status: SolveStatus) -> Self {
        Self {
            solution: MipSolution::without_values(status),
        }
    }
}

impl MipSolver for FixedSolver {
    fn backend(&self) -> Backend {
        Backend::Scip
    }

    fn solve(&self, _model: &MipModel, _options: &SolveOptions) -> MipSolution {
        self.solution.clone()
    }
}

/// Enumerates all 0/1 assignments of a pure binary model.
///
/// Only usable for a handful of free variables.
pub struct BruteForceSolver;

impl MipSolver for BruteForceSolver {
    fn backend(&self) -> Backend {
        Backend::Cbc
    }

    fn solve(&self, model: &MipModel, _options: &SolveOptions) -> MipSolution {
        if model.variables.iter().any(|v| v.kind != VarKind::Binary) {
            return MipSolution::without_values(SolveStatus::Error);
        }
        let free: Vec<usize> = model
            .variables
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_fixed())
            .map(|(i, _)| i)
            .collect();
        assert!(free.len() <= 20, "too many free variables to enumerate");

        let mut best: Option<(f64, Vec<f64>)> = None;
        for mask in 0u32..(1 << free.len()) {
            let mut values: Vec<f64> = model.variables.iter().map(|v| v.lower).collect();
            for (bit, &idx) in free.iter().enumerate() {
                values[idx] = f64::from((mask >> bit) & 1);
            }
            if !model.violations(&values, 1e-9).is_empty() {
                continue;
            }
            let obj = model.objective.expr.evaluate(&values);
            let better = match &best {
                None => true,
                Some((b, _)) => match model.objective.sense {
                    ObjectiveSense::Maximize => obj > *b + 1e-9,
                    ObjectiveSense::Minimize => obj < *b - 1e-9,
                },
            };
            if better {
                best = Some((obj, values));
            }
        }

        match best {
            Some((obj, values)) => MipSolution {
                status: SolveStatus::Optimal,
                objective_value: Some(obj),
                values,
            },
            None => MipSolution::without_values(SolveStatus::Infeasible),
        }
    }
}
