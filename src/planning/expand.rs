//! Shift template expansion.
//!
//! Flattens templates × time slots into [`ConcreteShift`]s, resolving each
//! field as time slot → template → global default.

use tracing::debug;

use crate::error::{CompileError, Result};
use crate::models::{ConcreteShift, ShiftTemplate};

/// Expands shift templates into concrete shifts.
///
/// Output order is template order, then slot order within a template.
///
/// | Field | Default |
/// |---|---|
/// | `min_workers` | 0 |
/// | `max_workers` | unbounded (also for negative values) |
/// | `qualification` | `""` |
/// | `cost` | none: [`CompileError::MissingCost`] |
pub fn expand_templates(templates: &[ShiftTemplate]) -> Result<Vec<ConcreteShift>> {
    let mut shifts = Vec::with_capacity(templates.iter().map(|t| t.times.len()).sum());

    for template in templates {
        for slot in &template.times {
            let cost = slot
                .cost
                .or(template.cost)
                .ok_or_else(|| CompileError::MissingCost {
                    template_id: template.id.clone(),
                    slot_id: slot.id.clone(),
                })?;

            shifts.push(ConcreteShift {
                id: format!("{}_{}", template.id, slot.id),
                template_id: template.id.clone(),
                slot_id: slot.id.clone(),
                window: slot.window,
                min_workers: slot.min_workers.or(template.min_workers).unwrap_or(0),
                max_workers: slot
                    .max_workers
                    .or(template.max_workers)
                    .filter(|max| *max >= 0),
                cost,
                qualification: template.qualification.clone().unwrap_or_default(),
            });
        }
    }

    debug!(
        templates = templates.len(),
        concrete_shifts = shifts.len(),
        "shift templates expanded"
    );
    Ok(shifts)
}
