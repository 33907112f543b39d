//! Shift-planning MIP formulation.
//!
//! # Formulation
//! One integer `Planned_{shift}` per concrete shift, bounded by the
//! shift's `[min_workers, max_workers]`.
//!
//! - `DemandCover_{period}`: `sum(covering planned) [+ UnderSupply_{period}] == required(period)`
//! - `UnderSupply`: `UnderSupply == sum(UnderSupply_{period} * hours(period))`
//! - `OverSupply`: `OverSupply >= sum(planned * hours) - required_hours`
//! - `ShiftCost`: `ShiftCost == sum(planned * cost)`
//!
//! Under-supply variables exist only when an under-supply cost is
//! configured; likewise for over-supply. `OverSupply` is bounded below by
//! zero, so under a positive cost it settles at the surplus worker-hours
//! or 0 when the plan falls short.
//!
//! Objective: minimize `ShiftCost + under_cost * UnderSupply + over_cost * OverSupply`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::periods::{CoveragePeriod, QualificationPeriods};
use crate::mip::{LinearExpr, MipModel, MipSolution, ObjectiveSense, Sense, VarId, VarKind};
use crate::models::{ConcreteShift, PlannedShift, PlanningOutcome};

/// Cost configuration of the planning objective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningOptions {
    /// Cost per uncovered worker-hour. `None` makes demand cover exact.
    pub under_supply_cost: Option<f64>,
    /// Cost per planned worker-hour beyond the demand. `None` disables
    /// over-supply tracking.
    pub over_supply_cost: Option<f64>,
}

impl PlanningOptions {
    /// Creates options with exact cover and no over-supply tracking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows uncovered demand at the given cost per worker-hour.
    pub fn with_under_supply_cost(mut self, cost: f64) -> Self {
        self.under_supply_cost = Some(cost);
        self
    }

    /// Tracks over-supply at the given cost per worker-hour.
    pub fn with_over_supply_cost(mut self, cost: f64) -> Self {
        self.over_supply_cost = Some(cost);
        self
    }
}

/// A built planning model, ready for a solver.
#[derive(Debug, Clone)]
pub struct PlanningModel {
    shifts: Vec<ConcreteShift>,
    groups: Vec<QualificationPeriods>,
    options: PlanningOptions,
    model: MipModel,
    planned: Vec<VarId>,
    shift_cost: VarId,
    under_supply: Option<VarId>,
    over_supply: Option<VarId>,
}

impl PlanningModel {
    /// Builds the MIP model from expanded shifts and decomposed periods.
    ///
    /// `groups` must be decomposed from `shifts` (shift indices refer to it).
    pub fn build(
        shifts: Vec<ConcreteShift>,
        groups: Vec<QualificationPeriods>,
        options: PlanningOptions,
    ) -> Self {
        let mut model = MipModel::new("shift_planning");

        let planned: Vec<VarId> = shifts
            .iter()
            .map(|s| {
                model.add_var(
                    format!("Planned_{}", s.id),
                    VarKind::Integer,
                    s.min_workers as f64,
                    s.max_workers.map(|m| m as f64),
                )
            })
            .collect();

        let periods: Vec<&CoveragePeriod> = groups.iter().flat_map(|g| &g.periods).collect();
        let required_hours: f64 = periods.iter().map(|p| p.required_hours()).sum();

        let slack: Option<Vec<VarId>> = options.under_supply_cost.map(|_| {
            periods
                .iter()
                .map(|p| {
                    model.add_var(
                        format!("UnderSupply_{}", period_label(p)),
                        VarKind::Continuous,
                        0.0,
                        None,
                    )
                })
                .collect()
        });
        let under_supply = slack
            .as_ref()
            .map(|_| model.add_var("UnderSupply", VarKind::Continuous, 0.0, None));
        let over_supply = options
            .over_supply_cost
            .map(|_| model.add_var("OverSupply", VarKind::Continuous, 0.0, None));
        let shift_cost = model.add_var("ShiftCost", VarKind::Continuous, 0.0, None);

        let mut objective = LinearExpr::new().with_term(shift_cost, 1.0);
        if let (Some(var), Some(cost)) = (under_supply, options.under_supply_cost) {
            objective.add_term(var, cost);
        }
        if let (Some(var), Some(cost)) = (over_supply, options.over_supply_cost) {
            objective.add_term(var, cost);
        }
        model.set_objective(ObjectiveSense::Minimize, objective);

        for (pi, p) in periods.iter().enumerate() {
            let mut expr = LinearExpr::sum(p.covering_shifts.iter().map(|&s| planned[s]));
            if let Some(slack) = &slack {
                expr.add_term(slack[pi], 1.0);
            }
            model.add_constraint(
                format!("DemandCover_{}", period_label(p)),
                expr,
                Sense::Eq,
                p.required as f64,
            );
        }

        if let (Some(total), Some(slack)) = (under_supply, &slack) {
            let mut expr = LinearExpr::new().with_term(total, 1.0);
            for (pi, p) in periods.iter().enumerate() {
                expr.add_term(slack[pi], -p.hours());
            }
            model.add_constraint("UnderSupply", expr, Sense::Eq, 0.0);
        }

        if let Some(total) = over_supply {
            let mut expr = LinearExpr::new().with_term(total, 1.0);
            for (s, &var) in shifts.iter().zip(&planned) {
                expr.add_term(var, -s.hours());
            }
            model.add_constraint("OverSupply", expr, Sense::Ge, -required_hours);
        }

        let mut cost_expr = LinearExpr::new().with_term(shift_cost, 1.0);
        for (s, &var) in shifts.iter().zip(&planned) {
            cost_expr.add_term(var, -s.cost);
        }
        model.add_constraint("ShiftCost", cost_expr, Sense::Eq, 0.0);

        debug!(
            concrete_shifts = shifts.len(),
            periods = periods.len(),
            required_hours,
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            "planning model built"
        );

        Self {
            shifts,
            groups,
            options,
            model,
            planned,
            shift_cost,
            under_supply,
            over_supply,
        }
    }

    /// The solver-agnostic model.
    pub fn model(&self) -> &MipModel {
        &self.model
    }

    /// Concrete shifts, in expansion order.
    pub fn shifts(&self) -> &[ConcreteShift] {
        &self.shifts
    }

    /// Coverage periods per qualification.
    pub fn periods(&self) -> &[QualificationPeriods] {
        &self.groups
    }

    /// Variable holding the planned count of a shift (by index).
    pub fn planned_var(&self, shift: usize) -> VarId {
        self.planned[shift]
    }

    /// Total worker-hours demanded across all periods.
    pub fn required_hours(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|g| &g.periods)
            .map(|p| p.required_hours())
            .sum()
    }

    /// Maps a solver result back onto concrete shifts.
    ///
    /// A shift is planned when its value exceeds 0.5; its count is the
    /// value rounded to the nearest integer.
    pub fn decode(&self, solution: &MipSolution) -> PlanningOutcome {
        let mut outcome = PlanningOutcome {
            status: solution.status,
            ..PlanningOutcome::default()
        };
        if !solution.is_solution_found() {
            info!(status = %solution.status, "no shift plan found");
            return outcome;
        }

        outcome.value = solution.objective_value;
        outcome.planned_shifts = self
            .shifts
            .iter()
            .zip(&self.planned)
            .filter_map(|(s, &var)| {
                let value = solution.value(var);
                (value > 0.5).then(|| PlannedShift {
                    id: s.id.clone(),
                    template_id: s.template_id.clone(),
                    slot_id: s.slot_id.clone(),
                    window: s.window,
                    qualification: s.qualification.clone(),
                    count: value.round() as i64,
                })
            })
            .collect();
        outcome.shift_cost = solution.value(self.shift_cost);
        if let (Some(var), Some(cost)) = (self.under_supply, self.options.under_supply_cost) {
            outcome.under_supply = solution.value(var);
            outcome.under_supply_cost = outcome.under_supply * cost;
        }
        if let (Some(var), Some(cost)) = (self.over_supply, self.options.over_supply_cost) {
            outcome.over_supply = solution.value(var);
            outcome.over_supply_cost = outcome.over_supply * cost;
        }

        info!(
            status = %outcome.status,
            value = ?outcome.value,
            planned_shifts = outcome.planned_shifts.len(),
            planned_count = outcome.planned_count(),
            shift_cost = outcome.shift_cost,
            under_supply = outcome.under_supply,
            over_supply = outcome.over_supply,
            "shift plan decoded"
        );
        outcome
    }
}

/// `{start}_{end}_{qualification}` with RFC 3339 UTC instants.
fn period_label(period: &CoveragePeriod) -> String {
    format!(
        "{}_{}_{}",
        format_instant(period.window.start_ms),
        format_instant(period.window.end_ms),
        period.qualification
    )
}

fn format_instant(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| ms.to_string())
}
