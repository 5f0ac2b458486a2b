//! One play-through of a puzzle, driven by drag gestures.

use log::{debug, info};
use rand::Rng;

use crate::error::PuzzleError;
use crate::puzzle::{Move, Puzzle, TileMetrics, Translation};

/// How a finished drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Committed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { tile: usize, offset: Translation },
}

/// A shuffled puzzle plus the drag currently in progress, if any.
///
/// Only one tile can be dragged at a time. The renderer reads [`Session::puzzle`] and
/// [`Session::drag_offset_for`] after every call.
#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Puzzle,
    metrics: TileMetrics,
    drag: DragState,
}

impl Session {
    /// Start a session on a freshly shuffled `size × size` grid.
    pub fn new(size: usize, metrics: TileMetrics) -> Result<Self, PuzzleError> {
        let mut puzzle = Puzzle::new(size)?;
        puzzle.shuffle();
        info!("new {size}x{size} session");
        Ok(Self::from_puzzle(puzzle, metrics))
    }

    /// Like [`Session::new`], shuffling with the given generator.
    pub fn with_rng<R: Rng + ?Sized>(
        size: usize,
        metrics: TileMetrics,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let mut puzzle = Puzzle::new(size)?;
        puzzle.shuffle_with(rng);
        info!("new {size}x{size} session");
        Ok(Self::from_puzzle(puzzle, metrics))
    }

    pub fn from_puzzle(puzzle: Puzzle, metrics: TileMetrics) -> Self {
        Self {
            puzzle,
            metrics,
            drag: DragState::Idle,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn metrics(&self) -> &TileMetrics {
        &self.metrics
    }

    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved()
    }

    pub fn dragged_tile(&self) -> Option<usize> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging { tile, .. } => Some(tile),
        }
    }

    pub fn begin_drag(&mut self, tile: usize) -> Result<(), PuzzleError> {
        if let DragState::Dragging { tile: current, .. } = self.drag {
            return Err(PuzzleError::DragInProgress(current));
        }
        self.puzzle.tile_at(tile)?;
        self.drag = DragState::Dragging {
            tile,
            offset: Translation::ZERO,
        };
        Ok(())
    }

    /// Without an active drag this is a no-op returning zero.
    pub fn update_drag(&mut self, raw: Translation) -> Result<Translation, PuzzleError> {
        let DragState::Dragging { tile, .. } = self.drag else {
            return Ok(Translation::ZERO);
        };
        let offset = self.puzzle.constrained_offset(tile, raw, &self.metrics)?;
        self.drag = DragState::Dragging { tile, offset };
        Ok(offset)
    }

    pub fn end_drag(&mut self, raw: Translation) -> Result<GestureOutcome, PuzzleError> {
        let DragState::Dragging { tile, .. } = self.drag else {
            return Ok(GestureOutcome::Cancelled);
        };
        self.drag = DragState::Idle;

        let offset = self.puzzle.constrained_offset(tile, raw, &self.metrics)?;
        let outcome = if self
            .puzzle
            .commit_if_threshold_crossed(tile, offset, &self.metrics)?
        {
            GestureOutcome::Committed
        } else {
            GestureOutcome::Cancelled
        };

        if outcome == GestureOutcome::Committed && self.puzzle.is_solved() {
            info!("puzzle solved");
        }
        Ok(outcome)
    }

    pub fn cancel_drag(&mut self) {
        if let DragState::Dragging { tile, .. } = self.drag {
            debug!("drag on tile {tile} interrupted");
        }
        self.drag = DragState::Idle;
    }

    pub fn drag_offset_for(&self, index: usize) -> Translation {
        match self.drag {
            DragState::Dragging { tile, offset } if tile == index => offset,
            _ => Translation::ZERO,
        }
    }

    /// Slide a tile with a single key press. Ignored while a drag is active.
    pub fn slide(&mut self, direction: Move) -> bool {
        if self.drag != DragState::Idle {
            return false;
        }
        let moved = self.puzzle.slide(direction);
        if moved && self.puzzle.is_solved() {
            info!("puzzle solved");
        }
        moved
    }

    /// Throw away the current grid and start over with a new size.
    pub fn restart(&mut self, size: usize, metrics: TileMetrics) -> Result<(), PuzzleError> {
        *self = Self::new(size, metrics)?;
        Ok(())
    }
}
