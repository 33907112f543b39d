//! Availability normalization.
//!
//! Workers often submit availability as consecutive blocks
//! (`08:00-12:00`, `12:00-16:00`). A shift spanning the boundary fits
//! neither block on its own, so touching windows are merged before
//! eligibility is computed.
//!
//! # Merge Rule
//! Only exact adjacency merges (`end_i == start_{i+1}`). Windows separated
//! by a gap stay apart, and so do windows that truly overlap: overlapping
//! windows are kept as separate, redundant entries. Containment checks
//! against the result are still correct either way.

use crate::models::TimeWindow;

/// Sorts windows by start and merges exactly adjacent neighbours.
///
/// # Algorithm
/// 1. Stable sort by `start_ms`.
/// 2. Single scan: while the current window ends exactly where the next
///    one starts, extend the current window and drop the next.
///
/// The result is sorted by start. Merging is idempotent: merging the
/// output again yields the same output.
///
/// # Complexity
/// O(n log n) for the sort, O(n) for the scan.
///
/// # Example
/// ```
/// use u_workforce::availability::merge_adjacent;
/// use u_workforce::models::TimeWindow;
///
/// let merged = merge_adjacent(&[
///     TimeWindow::new(12, 16),
///     TimeWindow::new(8, 12),
///     TimeWindow::new(18, 20),
/// ]);
/// assert_eq!(merged, vec![TimeWindow::new(8, 16), TimeWindow::new(18, 20)]);
/// ```
pub fn merge_adjacent(windows: &[TimeWindow]) -> Vec<TimeWindow> {
    let mut sorted = windows.to_vec();
    sorted.sort_by_key(|w| w.start_ms);

    let mut merged: Vec<TimeWindow> = Vec::with_capacity(sorted.len());
    for window in sorted {
        match merged.last_mut() {
            Some(last) if last.end_ms == window.start_ms => last.end_ms = window.end_ms,
            _ => merged.push(window),
        }
    }
    merged
}

/// Whether any window fully contains `target`.
pub fn covers_any(windows: &[TimeWindow], target: &TimeWindow) -> bool {
    windows.iter().any(|w| w.covers(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MS_PER_HOUR;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const H: i64 = MS_PER_HOUR;
    const M: i64 = 60_000;

    #[test]
    fn test_adjacent_windows_merge() {
        let merged = merge_adjacent(&[
            TimeWindow::new(8 * H, 12 * H),
            TimeWindow::new(12 * H, 16 * H),
        ]);
        assert_eq!(merged, vec![TimeWindow::new(8 * H, 16 * H)]);
    }

    #[test]
    fn test_gap_keeps_windows_apart() {
        let merged = merge_adjacent(&[
            TimeWindow::new(8 * H, 12 * H),
            TimeWindow::new(12 * H + 30 * M, 16 * H),
        ]);
        assert_eq!(
            merged,
            vec![
                TimeWindow::new(8 * H, 12 * H),
                TimeWindow::new(12 * H + 30 * M, 16 * H),
            ]
        );
    }

    #[test]
    fn test_overlap_is_not_merged() {
        let merged = merge_adjacent(&[TimeWindow::new(10, 30), TimeWindow::new(0, 20)]);
        assert_eq!(merged, vec![TimeWindow::new(0, 20), TimeWindow::new(10, 30)]);
    }

    #[test]
    fn test_chain_merges_into_one() {
        let merged = merge_adjacent(&[
            TimeWindow::new(20, 30),
            TimeWindow::new(0, 10),
            TimeWindow::new(10, 20),
            TimeWindow::new(30, 40),
        ]);
        assert_eq!(merged, vec![TimeWindow::new(0, 40)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_adjacent(&[]).is_empty());
    }

    #[test]
    fn test_covers_any() {
        let windows = merge_adjacent(&[
            TimeWindow::new(8 * H, 12 * H),
            TimeWindow::new(12 * H, 16 * H),
        ]);
        // Spans the original block boundary
        assert!(covers_any(&windows, &TimeWindow::new(10 * H, 14 * H)));
        assert!(!covers_any(&windows, &TimeWindow::new(15 * H, 17 * H)));
        assert!(!covers_any(&[], &TimeWindow::new(0, 1)));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let n = rng.random_range(0..12);
            let windows: Vec<TimeWindow> = (0..n)
                .map(|_| {
                    // Coarse grid so adjacency and overlap both happen often
                    let start = rng.random_range(0..20) * 5;
                    let len = rng.random_range(1..6) * 5;
                    TimeWindow::new(start, start + len)
                })
                .collect();

            let once = merge_adjacent(&windows);
            let twice = merge_adjacent(&once);
            assert_eq!(once, twice, "input: {windows:?}");
            assert!(once.windows(2).all(|p| p[0].start_ms <= p[1].start_ms));
        }
    }
}
