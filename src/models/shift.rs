//! Shift models.
//!
//! Two shapes of shift exist:
//!
//! - [`Shift`]: a concrete shift of the assignment problem, with a fixed
//!   number of workers that must staff it.
//! - [`ShiftTemplate`] + [`TimeSlot`]: a recurring shift of the planning
//!   problem. Expanding a template over its time slots yields one
//!   [`ConcreteShift`] per slot.
//!
//! # Default Resolution
//! Template and slot fields are optional. A concrete shift resolves each
//! field as: time slot value → template value → global default. Cost has
//! no global default. See [`crate::planning::expand_templates`].

use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// A concrete shift in the assignment problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier.
    pub id: String,
    /// When the shift takes place.
    pub window: TimeWindow,
    /// Exact number of workers required.
    pub count: i64,
    /// Required qualification ("" = none).
    pub qualification: String,
}

impl Shift {
    /// Creates a shift requiring `count` workers and no qualification.
    pub fn new(id: impl Into<String>, start_ms: i64, end_ms: i64, count: i64) -> Self {
        Self {
            id: id.into(),
            window: TimeWindow::new(start_ms, end_ms),
            count,
            qualification: String::new(),
        }
    }

    /// Sets the required qualification.
    pub fn with_qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualification = qualification.into();
        self
    }
}

/// A recurring shift definition for the planning problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// Unique template identifier.
    pub id: String,
    /// Default minimum worker count for all slots.
    pub min_workers: Option<i64>,
    /// Default maximum worker count for all slots (`None` = unbounded).
    pub max_workers: Option<i64>,
    /// Default cost per planned worker.
    pub cost: Option<f64>,
    /// Qualification required by every occurrence.
    pub qualification: Option<String>,
    /// Occurrences of this template.
    pub times: Vec<TimeSlot>,
}

impl ShiftTemplate {
    /// Creates a template with no defaults and no occurrences.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            min_workers: None,
            max_workers: None,
            cost: None,
            qualification: None,
            times: Vec::new(),
        }
    }

    /// Sets the default minimum worker count.
    pub fn with_min_workers(mut self, min: i64) -> Self {
        self.min_workers = Some(min);
        self
    }

    /// Sets the default maximum worker count.
    pub fn with_max_workers(mut self, max: i64) -> Self {
        self.max_workers = Some(max);
        self
    }

    /// Sets the default cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Sets the required qualification.
    pub fn with_qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualification = Some(qualification.into());
        self
    }

    /// Adds an occurrence.
    pub fn with_time(mut self, slot: TimeSlot) -> Self {
        self.times.push(slot);
        self
    }
}

/// One occurrence of a [`ShiftTemplate`], optionally overriding its defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot identifier (unique within its template).
    pub id: String,
    /// When this occurrence takes place.
    pub window: TimeWindow,
    /// Overrides the template's minimum worker count.
    pub min_workers: Option<i64>,
    /// Overrides the template's maximum worker count.
    pub max_workers: Option<i64>,
    /// Overrides the template's cost.
    pub cost: Option<f64>,
}

impl TimeSlot {
    /// Creates a slot without overrides.
    pub fn new(id: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            id: id.into(),
            window: TimeWindow::new(start_ms, end_ms),
            min_workers: None,
            max_workers: None,
            cost: None,
        }
    }

    /// Overrides the minimum worker count.
    pub fn with_min_workers(mut self, min: i64) -> Self {
        self.min_workers = Some(min);
        self
    }

    /// Overrides the maximum worker count.
    pub fn with_max_workers(mut self, max: i64) -> Self {
        self.max_workers = Some(max);
        self
    }

    /// Overrides the cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }
}

/// A fully resolved, schedulable occurrence of a shift template.
///
/// Created once per (template, slot) pair and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteShift {
    /// `template_id + "_" + slot_id`.
    pub id: String,
    /// Source template.
    pub template_id: String,
    /// Source time slot.
    pub slot_id: String,
    /// When the shift takes place.
    pub window: TimeWindow,
    /// Minimum number of times the shift must be planned.
    pub min_workers: i64,
    /// Maximum number of times the shift may be planned (`None` = unbounded).
    pub max_workers: Option<i64>,
    /// Cost per planned worker.
    pub cost: f64,
    /// Required qualification ("" = none).
    pub qualification: String,
}

impl ConcreteShift {
    /// Paid hours of one planned worker on this shift.
    #[inline]
    pub fn hours(&self) -> f64 {
        self.window.hours()
    }
}
