//! Assignment conflict compiler.
//!
//! Turns workers, shifts and rules into the structures the assignment
//! model is built from: resolved workers, the eligibility mask, the
//! rest-conflict pairs and the positive preference weights.
//!
//! # Eligibility
//! Worker *w* may work shift *s* iff one of *w*'s merged availability
//! windows fully contains *s*, and *s* requires no qualification or one
//! *w* holds. Ineligible pairs stay in the mask (as `false`) so the
//! model still has one decision per (worker, shift) pair.
//!
//! # Rest Conflicts
//! Two shifts conflict for a worker when they are closer together than
//! the worker's minimum rest, overlap included. A gap exactly equal to
//! the rest time is allowed.
//!
//! # Complexity
//! O(W × S) for eligibility and O(W × S²) for rest conflicts. Shift
//! counts are expected in the tens to low hundreds.

use tracing::debug;

use crate::availability::covers_any;
use crate::error::{CompileError, Result};
use crate::models::{Rule, Shift, TimeWindow, Worker};
use crate::validation::validate_assignment_input;

/// A worker with merged availability and its rule resolved.
#[derive(Debug, Clone)]
pub struct ResolvedWorker {
    /// The worker as given.
    pub worker: Worker,
    /// Availability after merging adjacent windows.
    pub availability: Vec<TimeWindow>,
    /// The rule the worker follows.
    pub rule: Rule,
}

impl ResolvedWorker {
    /// Worker identifier.
    pub fn id(&self) -> &str {
        &self.worker.id
    }

    /// Whether the worker may work the shift.
    pub fn can_work(&self, shift: &Shift) -> bool {
        covers_any(&self.availability, &shift.window)
            && self.worker.is_qualified_for(&shift.qualification)
    }
}

/// Eligibility of every (worker, shift) pair, row-major by worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityMask {
    shift_count: usize,
    cells: Vec<bool>,
}

impl EligibilityMask {
    /// Whether `worker` may be assigned to `shift` (by index).
    #[inline]
    pub fn is_eligible(&self, worker: usize, shift: usize) -> bool {
        self.cells[worker * self.shift_count + shift]
    }

    /// Eligibility of all shifts for one worker.
    pub fn row(&self, worker: usize) -> &[bool] {
        let start = worker * self.shift_count;
        &self.cells[start..start + self.shift_count]
    }

    /// Number of eligible pairs.
    pub fn eligible_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Number of (worker, shift) pairs.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the mask has no pairs at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A pair of shifts one worker must not both work.
///
/// `first < second` (shift indices); each unordered pair appears once
/// per worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestConflict {
    /// Worker index.
    pub worker: usize,
    /// Index of the earlier-listed shift.
    pub first: usize,
    /// Index of the later-listed shift.
    pub second: usize,
}

/// A strictly positive preference of a worker for a shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceWeight {
    /// Worker index.
    pub worker: usize,
    /// Shift index.
    pub shift: usize,
    /// Weight (> 0).
    pub weight: f64,
}

/// Everything the assignment model is built from.
#[derive(Debug, Clone)]
pub struct CompiledAssignment {
    /// Workers in input order, resolved.
    pub workers: Vec<ResolvedWorker>,
    /// Shifts in input order.
    pub shifts: Vec<Shift>,
    /// Which pairs may be assigned.
    pub eligibility: EligibilityMask,
    /// Mutually exclusive shift pairs per worker.
    pub rest_conflicts: Vec<RestConflict>,
    /// Objective weights (only > 0).
    pub preferences: Vec<PreferenceWeight>,
}

impl CompiledAssignment {
    /// Rest conflicts of one worker.
    pub fn conflicts_for_worker(&self, worker: usize) -> impl Iterator<Item = &RestConflict> {
        self.rest_conflicts.iter().filter(move |c| c.worker == worker)
    }
}

/// Whether two shift windows are closer together than `rest_ms`.
///
/// Overlapping windows are always too close. A gap of exactly `rest_ms`
/// is not.
pub fn within_rest(a: &TimeWindow, b: &TimeWindow, rest_ms: i64) -> bool {
    !(a.end_ms + rest_ms <= b.start_ms || b.end_ms + rest_ms <= a.start_ms)
}

/// Compiles a shift-assignment problem.
///
/// # Errors
/// - [`CompileError::InvalidInput`] if validation fails
/// - [`CompileError::UndefinedRule`] if a worker's rule is not defined
/// - [`CompileError::DuplicateRule`] if a worker's rule is defined twice
///
/// No partial result is produced on error.
pub fn compile_assignment(
    workers: &[Worker],
    shifts: &[Shift],
    rules: &[Rule],
) -> Result<CompiledAssignment> {
    debug!(
        shifts = shifts.len(),
        workers = workers.len(),
        rules = rules.len(),
        "compiling shift assignment"
    );
    validate_assignment_input(workers, shifts, rules).map_err(CompileError::InvalidInput)?;

    let resolved = workers
        .iter()
        .map(|w| {
            Ok(ResolvedWorker {
                worker: w.clone(),
                availability: w.merged_availability(),
                rule: resolve_rule(w, rules)?.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut cells = Vec::with_capacity(resolved.len() * shifts.len());
    for w in &resolved {
        cells.extend(shifts.iter().map(|s| w.can_work(s)));
    }
    let eligibility = EligibilityMask {
        shift_count: shifts.len(),
        cells,
    };

    let mut rest_conflicts = Vec::new();
    for (wi, w) in resolved.iter().enumerate() {
        let rest = w.rule.min_rest_ms;
        for (i, s1) in shifts.iter().enumerate() {
            for (j, s2) in shifts.iter().enumerate().skip(i + 1) {
                if within_rest(&s1.window, &s2.window, rest) {
                    rest_conflicts.push(RestConflict {
                        worker: wi,
                        first: i,
                        second: j,
                    });
                }
            }
        }
    }

    let mut preferences = Vec::new();
    for (wi, w) in resolved.iter().enumerate() {
        for (si, s) in shifts.iter().enumerate() {
            let weight = w.worker.preference(&s.id);
            if weight > 0.0 {
                preferences.push(PreferenceWeight {
                    worker: wi,
                    shift: si,
                    weight,
                });
            }
        }
    }

    debug!(
        eligible_pairs = eligibility.eligible_count(),
        total_pairs = eligibility.len(),
        rest_conflicts = rest_conflicts.len(),
        preferences = preferences.len(),
        "shift assignment compiled"
    );

    Ok(CompiledAssignment {
        workers: resolved,
        shifts: shifts.to_vec(),
        eligibility,
        rest_conflicts,
        preferences,
    })
}

fn resolve_rule<'a>(worker: &Worker, rules: &'a [Rule]) -> Result<&'a Rule> {
    let mut matching = rules.iter().filter(|r| r.id == worker.rule_id);
    match (matching.next(), matching.next()) {
        (Some(rule), None) => Ok(rule),
        (None, _) => Err(CompileError::UndefinedRule {
            worker_id: worker.id.clone(),
            rule_id: worker.rule_id.clone(),
        }),
        (Some(_), Some(_)) => Err(CompileError::DuplicateRule {
            worker_id: worker.id.clone(),
            rule_id: worker.rule_id.clone(),
        }),
    }
}
