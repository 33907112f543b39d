//! Input validation for workforce scheduling problems.
//!
//! Checks structural integrity of workers, rules, shifts, templates and
//! demands before compilation. Detects:
//! - Duplicate IDs
//! - Empty or inverted time windows
//! - Negative counts and inconsistent min/max limits
//!
//! Rule references are resolved (and reported) by the assignment
//! compiler itself, since resolution is where they are needed.

use crate::models::{Demand, Rule, Shift, ShiftTemplate, Worker};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A time window is empty or ends before it starts.
    InvalidWindow,
    /// A count, limit or duration is negative.
    NegativeValue,
    /// A minimum exceeds its maximum.
    InconsistentLimits,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a shift-assignment problem.
///
/// Checks:
/// 1. No duplicate worker IDs
/// 2. No duplicate shift IDs
/// 3. Shift windows are non-empty, shift counts non-negative
/// 4. Availability windows are non-empty
/// 5. Rules have non-negative limits, `min_shifts <= max_shifts`, and
///    non-negative rest
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_assignment_input(
    workers: &[Worker],
    shifts: &[Shift],
    rules: &[Rule],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut worker_ids = HashSet::new();
    for w in workers {
        if !worker_ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker ID: {}", w.id),
            ));
        }
        for a in &w.availability {
            if a.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWindow,
                    format!(
                        "Worker '{}' has an empty availability window [{}, {})",
                        w.id, a.start_ms, a.end_ms
                    ),
                ));
            }
        }
    }

    let mut shift_ids = HashSet::new();
    for s in shifts {
        if !shift_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {}", s.id),
            ));
        }
        if s.window.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWindow,
                format!("Shift '{}' has an empty window", s.id),
            ));
        }
        if s.count < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("Shift '{}' requires a negative worker count ({})", s.id, s.count),
            ));
        }
    }

    for r in rules {
        if r.min_shifts < 0 || r.max_shifts < 0 || r.min_rest_ms < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("Rule '{}' has a negative limit", r.id),
            ));
        }
        if r.min_shifts > r.max_shifts {
            errors.push(ValidationError::new(
                ValidationErrorKind::InconsistentLimits,
                format!(
                    "Rule '{}' has min_shifts {} > max_shifts {}",
                    r.id, r.min_shifts, r.max_shifts
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the input of a shift-planning problem.
///
/// Checks:
/// 1. No duplicate template IDs
/// 2. No duplicate slot IDs within a template, and no two concrete shift
///    IDs (`template_id + "_" + slot_id`) equal across templates
/// 3. Slot and demand windows are non-empty
/// 4. Worker limits and demand counts are non-negative (a negative
///    maximum means "unbounded" and is accepted)
/// 5. Explicit minimum does not exceed explicit maximum after defaults
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_planning_input(templates: &[ShiftTemplate], demands: &[Demand]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut template_ids = HashSet::new();
    let mut concrete_ids = HashSet::new();
    for t in templates {
        if !template_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift template ID: {}", t.id),
            ));
        }

        let mut slot_ids = HashSet::new();
        for slot in &t.times {
            if !slot_ids.insert(slot.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate time ID '{}' in shift template '{}'", slot.id, t.id),
                ));
            } else if !concrete_ids.insert(format!("{}_{}", t.id, slot.id)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!(
                        "Shift '{}' time '{}' yields duplicate concrete shift ID '{}_{}'",
                        t.id, slot.id, t.id, slot.id
                    ),
                ));
            }
            if slot.window.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWindow,
                    format!("Shift '{}' time '{}' has an empty window", t.id, slot.id),
                ));
            }

            let min = slot.min_workers.or(t.min_workers).unwrap_or(0);
            let max = slot.max_workers.or(t.max_workers).filter(|m| *m >= 0);
            if min < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!("Shift '{}' time '{}' has negative min_workers", t.id, slot.id),
                ));
            }
            if let Some(max) = max {
                if min > max {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InconsistentLimits,
                        format!(
                            "Shift '{}' time '{}' has min_workers {} > max_workers {}",
                            t.id, slot.id, min, max
                        ),
                    ));
                }
            }
        }
    }

    for (i, d) in demands.iter().enumerate() {
        let label = d.id.clone().unwrap_or_else(|| format!("#{i}"));
        if d.window.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWindow,
                format!("Demand '{label}' has an empty window"),
            ));
        }
        if d.count < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("Demand '{label}' has a negative count ({})", d.count),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
