//! Progression module - score, level and speed lookups
//!
//! All three are pure lookups into the fixed tables in `blocktris_types`.

use crate::error::CoreError;
use crate::types::{
    HARD_DROP_POINTS_PER_ROW, LEVEL_LINE_THRESHOLDS, LEVEL_SPEEDS_MS, LINE_CLEAR_SCORES,
    SPEED_FLOOR_MS,
};

/// Bonus for clearing `lines` rows with a single lock
pub fn score_for_cleared_lines(lines: usize) -> Result<u32, CoreError> {
    LINE_CLEAR_SCORES
        .get(lines)
        .copied()
        .ok_or(CoreError::UnscoredLineClear(lines))
}

/// Tick interval (ms) for a level; levels past the table use the floor
pub fn speed_for_level(level: u32) -> u32 {
    let index = level.saturating_sub(1) as usize;
    LEVEL_SPEEDS_MS.get(index).copied().unwrap_or(SPEED_FLOOR_MS)
}

/// Level reached after clearing `total_lines` rows in total.
///
/// Past the last threshold the level stays at the table length.
pub fn level_for_lines(total_lines: u32) -> u32 {
    LEVEL_LINE_THRESHOLDS
        .iter()
        .position(|&threshold| total_lines < threshold)
        .unwrap_or(LEVEL_LINE_THRESHOLDS.len()) as u32
}

/// Points for a hard drop that descended `rows` rows
pub fn hard_drop_score(rows: u32) -> u32 {
    rows * HARD_DROP_POINTS_PER_ROW
}
