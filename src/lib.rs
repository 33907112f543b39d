//! Workforce-scheduling model compiler.
//!
//! Turns two workforce-scheduling problems into solver-agnostic
//! mixed-integer models and maps solver answers back onto the domain:
//!
//! - **Shift assignment**: which worker works which shift, given
//!   availability, qualifications, shift-count rules, minimum rest and
//!   preferences.
//! - **Shift planning**: how many workers to plan on each occurrence of a
//!   shift template so that a time-varying demand curve is covered.
//!
//! Solving is delegated to an external engine behind [`mip::MipSolver`].
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Worker`, `Rule`, `Shift`, `ShiftTemplate`,
//!   `Demand`, outcomes
//! - **`availability`**: Merging of touching availability windows
//! - **`assignment`**: Conflict compiler and assignment model
//! - **`planning`**: Template expansion, coverage periods, planning model
//! - **`mip`**: Model description, solver seam, statuses
//! - **`input`**: Raw JSON-shaped records with RFC 3339 timestamps
//! - **`validation`**: Input integrity checks (duplicate IDs, windows, limits)
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Van den Bergh et al. (2013), "Personnel scheduling: A literature review"

pub mod assignment;
pub mod availability;
pub mod error;
pub mod input;
pub mod mip;
pub mod models;
pub mod planning;
pub mod validation;

pub use error::{CompileError, Result};
