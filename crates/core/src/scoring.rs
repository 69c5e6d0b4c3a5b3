//! Scoring module - line clear points, level progression and drop cadence
//!
//! - A clear of `n` lines scores `LINE_SCORES[n] * level`.
//! - Level is `lines / 10 + 1`.
//! - The automatic drop interval shrinks by 100ms per level, floored at 200ms.

use std::time::Duration;

use crate::types::{BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS};

/// Points for clearing `lines` rows at once at `level`.
///
/// Clears larger than four (only possible on unusual board shapes) score
/// as a four-line clear.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Automatic drop interval at `level`: `max(200ms, 1000ms - (level - 1) * 100ms)`
pub fn drop_interval(level: u32) -> Duration {
    let reduction = u64::from(level.saturating_sub(1)).saturating_mul(DROP_STEP_MS);
    Duration::from_millis(BASE_DROP_MS.saturating_sub(reduction).max(MIN_DROP_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_scales_with_level() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 2), 1000);
        assert_eq!(calculate_line_score(4, 3), 2400);
        assert_eq!(calculate_line_score(5, 1), 800);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(25), 3);
    }

    #[test]
    fn test_drop_interval_curve() {
        assert_eq!(drop_interval(1), Duration::from_millis(1000));
        assert_eq!(drop_interval(2), Duration::from_millis(900));
        assert_eq!(drop_interval(5), Duration::from_millis(600));
        assert_eq!(drop_interval(9), Duration::from_millis(200));
        assert_eq!(drop_interval(10), Duration::from_millis(200));
        assert_eq!(drop_interval(u32::MAX), Duration::from_millis(200));
    }

    #[test]
    fn test_drop_interval_level_zero_is_base() {
        assert_eq!(drop_interval(0), Duration::from_millis(1000));
    }
}
