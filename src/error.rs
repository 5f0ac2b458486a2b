use thiserror::Error;

/// Errors raised by the puzzle engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("slot index {index} is out of bounds for a grid of {len} slots")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("expected {expected} slots, got {actual}")]
    SlotCountMismatch { expected: usize, actual: usize },
    #[error("layout has no empty slot")]
    NoEmptySlot,
    #[error("layout has more than one empty slot")]
    MultipleEmptySlots,
    #[error("tile {0} is missing, duplicated or out of range")]
    InvalidTile(usize),
    #[error("a drag is already in progress on tile {0}")]
    DragInProgress(usize),
}
