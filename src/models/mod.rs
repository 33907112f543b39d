//! Workforce scheduling domain models.
//!
//! Provides the data types for representing shift-assignment and
//! shift-planning problems and their solutions.
//!
//! # Problem Mappings
//!
//! | u-workforce | Shift assignment | Shift planning |
//! |-------------|------------------|----------------|
//! | Worker + Rule | who can work, how often | - |
//! | Shift | fixed staffing need | - |
//! | ShiftTemplate + TimeSlot | - | candidate shift occurrences |
//! | Demand | - | time-varying staffing curve |
//! | Outcome | worker × shift assignments | planned count per shift |

mod demand;
mod outcome;
mod shift;
mod window;
mod worker;

pub use demand::Demand;
pub use outcome::{AssignedShift, AssignmentOutcome, PlannedShift, PlanningOutcome};
pub use shift::{ConcreteShift, Shift, ShiftTemplate, TimeSlot};
pub use window::{TimeWindow, MS_PER_HOUR};
pub use worker::{Rule, Worker, DEFAULT_MAX_SHIFTS};
