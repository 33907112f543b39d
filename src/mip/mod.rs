//! Solver-agnostic mixed-integer model layer.
//!
//! The compilers in [`crate::assignment`] and [`crate::planning`] emit a
//! [`MipModel`]: variables with bounds and type, named linear constraints
//! and a linear objective. An external engine, reached through the
//! [`MipSolver`] trait, solves it and returns a [`MipSolution`].
//!
//! # Reference
//! - Wolsey (2020), "Integer Programming", Ch. 1

mod model;
mod solver;
#[cfg(test)]
pub(crate) mod testing;

pub use model::{
    Constraint, LinearExpr, MipModel, Objective, ObjectiveSense, Sense, VarId, VarKind, Variable,
};
pub use solver::{Backend, MipSolution, MipSolver, SolveOptions, SolveStatus};
