//! Solver seam: backends, options, statuses and solutions.
//!
//! The crate never solves a model itself. An adapter for a concrete
//! engine implements [`MipSolver`]; the problem façades hand it a
//! [`MipModel`] and decode the returned [`MipSolution`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{MipModel, VarId};
use crate::error::CompileError;

/// Supported solver engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// COIN-OR CBC.
    Cbc,
    /// GNU Linear Programming Kit.
    Glpk,
    /// SCIP Optimization Suite.
    #[default]
    Scip,
    /// HiGHS.
    Highs,
}

impl Backend {
    /// All supported backends.
    pub const ALL: [Backend; 4] = [Backend::Cbc, Backend::Glpk, Backend::Scip, Backend::Highs];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Cbc => "cbc",
            Backend::Glpk => "glpk",
            Backend::Scip => "scip",
            Backend::Highs => "highs",
        }
    }

    /// Name of the engine option carrying the time limit (seconds).
    pub fn time_limit_option(&self) -> &'static str {
        match self {
            Backend::Cbc => "sec",
            Backend::Glpk => "tmlim",
            Backend::Scip => "limits/time",
            Backend::Highs => "time_limit",
        }
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|b| b.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = CompileError;

    /// Parses a backend identifier (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == wanted)
            .ok_or_else(|| CompileError::UnsupportedBackend {
                requested: s.to_string(),
                supported: Self::supported_list(),
            })
    }
}

/// Options passed through to the solver adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Engine to use.
    pub backend: Backend,
    /// Time budget for the solver call (seconds).
    pub duration_secs: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            duration_secs: 30,
        }
    }
}

impl SolveOptions {
    /// Creates default options (SCIP, 30 s).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Parses and sets the backend from its identifier.
    pub fn with_backend_name(self, name: &str) -> Result<Self, CompileError> {
        Ok(self.with_backend(name.parse()?))
    }

    /// Sets the time budget.
    pub fn with_duration_secs(mut self, secs: u64) -> Self {
        self.duration_secs = secs;
        self
    }
}

/// Termination status reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    /// Proven optimal solution.
    Optimal,
    /// Feasible solution without optimality proof.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// Objective is unbounded.
    Unbounded,
    /// The engine failed.
    Error,
    /// Any termination condition not listed above.
    #[default]
    Unknown,
}

impl SolveStatus {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "suboptimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Error => "error",
            SolveStatus::Unknown => "unknown",
        }
    }

    /// Maps an engine termination label to a status.
    ///
    /// Unrecognized labels map to [`SolveStatus::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "optimal" => SolveStatus::Optimal,
            "feasible" | "suboptimal" => SolveStatus::Feasible,
            "infeasible" => SolveStatus::Infeasible,
            "unbounded" => SolveStatus::Unbounded,
            "error" => SolveStatus::Error,
            _ => SolveStatus::Unknown,
        }
    }

    /// Whether variable values are available.
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a solver call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MipSolution {
    /// Termination status.
    pub status: SolveStatus,
    /// Objective value, when a solution exists.
    pub objective_value: Option<f64>,
    /// Variable values indexed by [`VarId`] (empty without a solution).
    pub values: Vec<f64>,
}

impl MipSolution {
    /// A solution carrying only a status.
    pub fn without_values(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
        }
    }

    /// Value of a variable (0.0 when absent).
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.0).copied().unwrap_or(0.0)
    }

    /// Whether variable values are available.
    pub fn is_solution_found(&self) -> bool {
        self.status.has_solution() && !self.values.is_empty()
    }
}

/// An adapter for an external MIP engine.
pub trait MipSolver {
    /// The engine behind this adapter.
    fn backend(&self) -> Backend;

    /// Solves a model within the options' time budget.
    ///
    /// Engine failures are reported as [`SolveStatus::Error`].
    fn solve(&self, model: &MipModel, options: &SolveOptions) -> MipSolution;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("cbc".parse::<Backend>().unwrap(), Backend::Cbc);
        assert_eq!("SCIP".parse::<Backend>().unwrap(), Backend::Scip);
        assert_eq!(" HiGHS ".parse::<Backend>().unwrap(), Backend::Highs);
    }

    #[test]
    fn test_unsupported_backend() {
        let err = "cplex".parse::<Backend>().unwrap_err();
        match err {
            CompileError::UnsupportedBackend { requested, supported } => {
                assert_eq!(requested, "cplex");
                assert_eq!(supported, "cbc, glpk, scip, highs");
            }
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn test_time_limit_option() {
        assert_eq!(Backend::Cbc.time_limit_option(), "sec");
        assert_eq!(Backend::Glpk.time_limit_option(), "tmlim");
        assert_eq!(Backend::Scip.time_limit_option(), "limits/time");
    }

    #[test]
    fn test_solve_options() {
        let opts = SolveOptions::default();
        assert_eq!(opts.backend, Backend::Scip);
        assert_eq!(opts.duration_secs, 30);

        let opts = SolveOptions::new()
            .with_backend_name("glpk")
            .unwrap()
            .with_duration_secs(5);
        assert_eq!(opts.backend, Backend::Glpk);
        assert_eq!(opts.duration_secs, 5);

        assert!(SolveOptions::new().with_backend_name("gurobi").is_err());
    }

    #[test]
    fn test_solve_options_deserialize() {
        let opts: SolveOptions = serde_json::from_str(r#"{"backend": "cbc"}"#).unwrap();
        assert_eq!(opts.backend, Backend::Cbc);
        assert_eq!(opts.duration_secs, 30);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SolveStatus::Feasible.label(), "suboptimal");
        assert_eq!(SolveStatus::from_label("optimal"), SolveStatus::Optimal);
        assert_eq!(SolveStatus::from_label("feasible"), SolveStatus::Feasible);
        assert_eq!(SolveStatus::from_label("maxTimeLimit"), SolveStatus::Unknown);
        assert!(SolveStatus::Optimal.has_solution());
        assert!(SolveStatus::Feasible.has_solution());
        assert!(!SolveStatus::Infeasible.has_solution());
        assert!(!SolveStatus::Unknown.has_solution());
    }

    #[test]
    fn test_solution_value_lookup() {
        let sol = MipSolution {
            status: SolveStatus::Optimal,
            objective_value: Some(1.0),
            values: vec![1.0, 0.0],
        };
        assert!(sol.is_solution_found());
        assert!((sol.value(VarId(0)) - 1.0).abs() < 1e-10);
        assert!((sol.value(VarId(9)) - 0.0).abs() < 1e-10);
        assert!(!MipSolution::without_values(SolveStatus::Infeasible).is_solution_found());
    }
}
