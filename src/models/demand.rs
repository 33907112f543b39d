//! Demand model.
//!
//! A demand states how many workers with a given qualification are
//! needed during a time window. Demands may overlap; overlapping
//! demands of the same qualification add up.

use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// Required staffing over a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    /// Optional label, used only for diagnostics.
    pub id: Option<String>,
    /// Required qualification ("" = none).
    pub qualification: String,
    /// When the workers are needed.
    pub window: TimeWindow,
    /// Number of workers needed.
    pub count: i64,
}

impl Demand {
    /// Creates an unqualified demand.
    pub fn new(start_ms: i64, end_ms: i64, count: i64) -> Self {
        Self {
            id: None,
            qualification: String::new(),
            window: TimeWindow::new(start_ms, end_ms),
            count,
        }
    }

    /// Sets the label.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the required qualification.
    pub fn with_qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualification = qualification.into();
        self
    }
}
