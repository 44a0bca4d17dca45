//! Error type for the few fallible core lookups.

use crate::types::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A color lookup was given something other than a shape cell value.
    #[error("wrong color index {0} (must be between 1 and 7)")]
    OutOfRangeColor(Cell),

    /// A draw or peek found no piece left to hand out.
    #[error("piece supply exhausted")]
    SupplyUnderrun,

    /// The line-clear score table has no entry for this many rows.
    #[error("no line-clear score defined for {0} rows")]
    UnscoredLineClear(usize),
}
