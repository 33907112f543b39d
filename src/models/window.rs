//! Half-open time windows.
//!
//! Every time range in the crate (availability, shifts, time slots,
//! demands, coverage periods) is a [`TimeWindow`].
//!
//! # Time Model
//! Instants are milliseconds since the Unix epoch (UTC). Durations are
//! plain millisecond counts. The `input` module converts RFC 3339
//! timestamps into this representation.

use serde::{Deserialize, Serialize};

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (ms, inclusive).
    pub start_ms: i64,
    /// Interval end (ms, exclusive).
    pub end_ms: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Duration of this window (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Duration of this window in (fractional) hours.
    #[inline]
    pub fn hours(&self) -> f64 {
        self.duration_ms() as f64 / MS_PER_HOUR as f64
    }

    /// Whether the window is empty or inverted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end_ms <= self.start_ms
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start_ms && time_ms < self.end_ms
    }

    /// Whether `other` lies entirely within this window.
    ///
    /// Boundaries are inclusive on both sides: a window covers itself.
    #[inline]
    pub fn covers(&self, other: &Self) -> bool {
        self.start_ms <= other.start_ms && self.end_ms >= other.end_ms
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: i64 = MS_PER_HOUR;

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(100, 200);
        assert_eq!(w.duration_ms(), 100);
        assert!(w.contains(100));
        assert!(w.contains(199));
        assert!(!w.contains(200)); // exclusive end
        assert!(!w.contains(50));
    }

    #[test]
    fn test_time_window_overlap() {
        let a = TimeWindow::new(0, 100);
        let b = TimeWindow::new(50, 150);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeWindow::new(100, 200); // touching but not overlapping
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_covers() {
        let day = TimeWindow::new(8 * H, 16 * H);
        assert!(day.covers(&TimeWindow::new(9 * H, 13 * H)));
        assert!(day.covers(&day));
        assert!(!day.covers(&TimeWindow::new(7 * H, 9 * H)));
        assert!(!day.covers(&TimeWindow::new(15 * H, 17 * H)));
    }

    #[test]
    fn test_hours() {
        let w = TimeWindow::new(0, 90 * 60 * 1000);
        assert!((w.hours() - 1.5).abs() < 1e-10);
        // Spanning more than one day counts every hour
        let long = TimeWindow::new(0, 30 * H);
        assert!((long.hours() - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_is_empty() {
        assert!(TimeWindow::new(5, 5).is_empty());
        assert!(TimeWindow::new(6, 5).is_empty());
        assert!(!TimeWindow::new(5, 6).is_empty());
    }
}
