//! Raw input records.
//!
//! JSON-shaped input with RFC 3339 timestamps, as accepted by the
//! scheduling applications. [`AssignmentInput::into_problem`] and
//! [`PlanningInput::into_problem`] convert them into typed problems:
//!
//! - timestamps become Unix milliseconds (naive timestamps are UTC)
//! - rule defaults are applied (`min_shifts` 0, `max_shifts` 1000, no rest)
//! - rest time is given in hours
//! - a `max_workers` of -1 means unbounded
//!
//! # Example
//! ```
//! use u_workforce::input::AssignmentInput;
//!
//! let raw: AssignmentInput = serde_json::from_str(r#"{
//!     "workers": [{
//!         "id": "ana",
//!         "rules": "default",
//!         "availability": [{"start_time": "2024-05-01T08:00:00Z", "end_time": "2024-05-01T18:00:00Z"}]
//!     }],
//!     "shifts": [{"id": "early", "start_time": "2024-05-01T08:00:00Z", "end_time": "2024-05-01T12:00:00Z", "count": 1}],
//!     "rules": [{"id": "default", "min_rest_hours_between_shifts": 8}]
//! }"#).unwrap();
//!
//! let problem = raw.into_problem().unwrap();
//! assert_eq!(problem.rules[0].max_shifts, 1000);
//! ```

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::assignment::AssignmentProblem;
use crate::error::{CompileError, Result};
use crate::models::{Demand, Rule, Shift, ShiftTemplate, TimeSlot, TimeWindow, Worker};
use crate::planning::{PlanningOptions, PlanningProblem};

/// A raw `[start_time, end_time)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWindow {
    /// Window start (RFC 3339).
    pub start_time: String,
    /// Window end (RFC 3339, exclusive).
    pub end_time: String,
}

impl RawWindow {
    fn parse(&self) -> Result<TimeWindow> {
        Ok(TimeWindow::new(
            parse_timestamp(&self.start_time)?,
            parse_timestamp(&self.end_time)?,
        ))
    }
}

/// Raw shift-assignment input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentInput {
    /// Available workers.
    #[serde(default)]
    pub workers: Vec<RawWorker>,
    /// Shifts to staff.
    #[serde(default)]
    pub shifts: Vec<RawShift>,
    /// Rules referenced by workers.
    #[serde(default)]
    pub rules: Vec<RawRule>,
}

/// A raw worker record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWorker {
    /// Unique worker identifier.
    pub id: String,
    /// Rule id.
    pub rules: String,
    /// Windows during which the worker can work.
    #[serde(default)]
    pub availability: Vec<RawWindow>,
    /// Qualification labels held by the worker.
    #[serde(default)]
    pub qualifications: Vec<String>,
    /// Preference weight per shift id.
    #[serde(default)]
    pub preferences: HashMap<String, f64>,
}

/// A raw assignment shift record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawShift {
    /// Unique shift identifier.
    pub id: String,
    /// Shift start (RFC 3339).
    pub start_time: String,
    /// Shift end (RFC 3339, exclusive).
    pub end_time: String,
    /// Exact number of workers required.
    pub count: i64,
    /// Required qualification ("" = none).
    #[serde(default)]
    pub qualification: String,
}

/// A raw rule record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRule {
    /// Unique rule identifier.
    pub id: String,
    /// Minimum shifts per worker (default 0).
    pub min_shifts: Option<i64>,
    /// Maximum shifts per worker (default 1000).
    pub max_shifts: Option<i64>,
    /// Minimum rest between two shifts, in hours.
    #[serde(default)]
    pub min_rest_hours_between_shifts: f64,
}

impl AssignmentInput {
    /// Converts the raw records into a typed problem.
    ///
    /// # Errors
    /// [`CompileError::InvalidTimestamp`] for unparsable timestamps.
    pub fn into_problem(self) -> Result<AssignmentProblem> {
        let workers = self
            .workers
            .into_iter()
            .map(|w| {
                let availability = w
                    .availability
                    .iter()
                    .map(RawWindow::parse)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Worker {
                    id: w.id,
                    availability,
                    qualifications: w.qualifications,
                    preferences: w.preferences,
                    rule_id: w.rules,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let shifts = self
            .shifts
            .into_iter()
            .map(|s| {
                Ok(Shift {
                    window: TimeWindow::new(
                        parse_timestamp(&s.start_time)?,
                        parse_timestamp(&s.end_time)?,
                    ),
                    id: s.id,
                    count: s.count,
                    qualification: s.qualification,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let rules = self
            .rules
            .into_iter()
            .map(|r| {
                let mut rule = Rule::new(r.id).with_min_rest_hours(r.min_rest_hours_between_shifts);
                if let Some(min) = r.min_shifts {
                    rule = rule.with_min_shifts(min);
                }
                if let Some(max) = r.max_shifts {
                    rule = rule.with_max_shifts(max);
                }
                rule
            })
            .collect();

        Ok(AssignmentProblem {
            workers,
            shifts,
            rules,
        })
    }
}

/// Raw shift-planning input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningInput {
    /// Shift templates.
    #[serde(default)]
    pub shifts: Vec<RawShiftTemplate>,
    /// Demand curve.
    #[serde(default)]
    pub demands: Vec<RawDemand>,
    /// Objective configuration.
    #[serde(default)]
    pub options: PlanningOptions,
}

/// A raw shift template record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawShiftTemplate {
    /// Unique template identifier.
    pub id: String,
    /// Default minimum worker count.
    pub min_workers: Option<i64>,
    /// Default maximum worker count (-1 = unbounded).
    pub max_workers: Option<i64>,
    /// Default cost per planned worker.
    pub cost: Option<f64>,
    /// Required qualification.
    pub qualification: Option<String>,
    /// Occurrences of the template.
    #[serde(default)]
    pub times: Vec<RawTimeSlot>,
}

/// A raw time slot record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTimeSlot {
    /// Slot identifier (unique within its template).
    pub id: String,
    /// Slot start (RFC 3339).
    pub start_time: String,
    /// Slot end (RFC 3339, exclusive).
    pub end_time: String,
    /// Overrides the template's minimum worker count.
    pub min_workers: Option<i64>,
    /// Overrides the template's maximum worker count (-1 = unbounded).
    pub max_workers: Option<i64>,
    /// Overrides the template's cost.
    pub cost: Option<f64>,
}

/// A raw demand record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDemand {
    /// Optional label.
    pub id: Option<String>,
    /// Required qualification ("" = none).
    #[serde(default)]
    pub qualification: String,
    /// Demand start (RFC 3339).
    pub start_time: String,
    /// Demand end (RFC 3339, exclusive).
    pub end_time: String,
    /// Number of workers needed.
    pub count: i64,
}

impl PlanningInput {
    /// Converts the raw records into a typed problem.
    ///
    /// # Errors
    /// [`CompileError::InvalidTimestamp`] for unparsable timestamps.
    pub fn into_problem(self) -> Result<PlanningProblem> {
        let templates = self
            .shifts
            .into_iter()
            .map(|t| {
                let times = t
                    .times
                    .into_iter()
                    .map(|slot| {
                        Ok(TimeSlot {
                            window: TimeWindow::new(
                                parse_timestamp(&slot.start_time)?,
                                parse_timestamp(&slot.end_time)?,
                            ),
                            id: slot.id,
                            min_workers: slot.min_workers,
                            max_workers: slot.max_workers,
                            cost: slot.cost,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ShiftTemplate {
                    id: t.id,
                    min_workers: t.min_workers,
                    max_workers: t.max_workers,
                    cost: t.cost,
                    qualification: t.qualification,
                    times,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let demands = self
            .demands
            .into_iter()
            .map(|d| {
                Ok(Demand {
                    window: TimeWindow::new(
                        parse_timestamp(&d.start_time)?,
                        parse_timestamp(&d.end_time)?,
                    ),
                    id: d.id,
                    qualification: d.qualification,
                    count: d.count,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PlanningProblem {
            templates,
            demands,
            options: self.options,
        })
    }
}

/// Parses an RFC 3339 timestamp into Unix milliseconds.
///
/// Timestamps without an offset are read as UTC. A space may separate
/// date and time.
pub fn parse_timestamp(value: &str) -> Result<i64> {
    let text = value.trim();
    match DateTime::parse_from_rfc3339(text) {
        Ok(t) => Ok(t.timestamp_millis()),
        Err(err) => ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|t| t.and_utc().timestamp_millis())
            .ok_or_else(|| CompileError::InvalidTimestamp {
                value: value.to_string(),
                reason: err.to_string(),
            }),
    }
}
