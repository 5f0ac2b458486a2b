use log::debug;
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::fmt;

use crate::error::PuzzleError;

/// Number of random legal moves applied by [`Puzzle::shuffle`].
pub const SHUFFLE_MOVES: usize = 1000;

/// Side length of the on-screen board, in points.
pub const BOARD_EXTENT: f64 = 356.0;

/// Gap between neighbouring tiles, in points.
pub const TILE_SPACING: f64 = 2.0;

/// Direction a tile slides to reach the empty slot.
///
/// This names the tile's own movement, not the movement of the gap: a tile sitting
/// directly above the gap slides [`Move::Down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
            Move::Down => (1, 0),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Move::Up | Move::Down)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One piece of the source image, identified by its row-major index in the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile(pub usize);

impl Tile {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub width: f64,
    pub height: f64,
}

impl Translation {
    pub const ZERO: Translation = Translation {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// On-screen tile geometry used to constrain drags and decide commits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMetrics {
    pub tile_size: f64,
    pub spacing: f64,
}

impl TileMetrics {
    pub fn new(tile_size: f64, spacing: f64) -> Self {
        Self { tile_size, spacing }
    }

    /// Metrics for a square board of `extent` points split into `size` columns.
    pub fn for_board(extent: f64, size: usize) -> Self {
        Self::new(extent / size.max(1) as f64, TILE_SPACING)
    }

    pub fn travel(&self) -> f64 {
        self.tile_size + self.spacing
    }

    /// A drag must go strictly further than this to commit.
    pub fn commit_threshold(&self) -> f64 {
        self.tile_size * 0.5
    }
}

impl Default for TileMetrics {
    fn default() -> Self {
        Self::for_board(BOARD_EXTENT, 3)
    }
}

// Non-finite drag samples count as no movement.
fn clamped(value: f64, lower: f64, upper: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.min(upper).max(lower)
}

/// The puzzle grid: `size * size` slots in row-major order, exactly one of them empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    size: usize,
    slots: Vec<Option<Tile>>,
    empty: usize,
}

impl Puzzle {
    /// Build the solved layout, with the gap in the bottom-right corner.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        let len = size * size;
        let mut slots: Vec<Option<Tile>> = (0..len - 1).map(|i| Some(Tile(i))).collect();
        slots.push(None); // The gap replaces the last piece of the image

        Ok(Self {
            size,
            slots,
            empty: len - 1,
        })
    }

    /// Build a puzzle from an existing layout.
    ///
    /// The layout must hold exactly one empty slot, and its tiles must be a permutation
    /// of `0..size * size - 1`.
    pub fn from_slots(size: usize, slots: Vec<Option<Tile>>) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        let len = size * size;
        if slots.len() != len {
            return Err(PuzzleError::SlotCountMismatch {
                expected: len,
                actual: slots.len(),
            });
        }

        let empties: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect();
        let empty = match empties.as_slice() {
            [] => return Err(PuzzleError::NoEmptySlot),
            [index] => *index,
            _ => return Err(PuzzleError::MultipleEmptySlots),
        };

        let mut seen = vec![false; len - 1];
        for tile in slots.iter().flatten() {
            match seen.get_mut(tile.0) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(PuzzleError::InvalidTile(tile.0)),
            }
        }

        Ok(Self { size, slots, empty })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn slots(&self) -> &[Option<Tile>] {
        &self.slots
    }

    pub fn empty_index(&self) -> usize {
        self.empty
    }

    pub fn tile_at(&self, index: usize) -> Result<Option<Tile>, PuzzleError> {
        self.check_index(index)?;
        Ok(self.slots[index])
    }

    fn check_index(&self, index: usize) -> Result<(), PuzzleError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(PuzzleError::IndexOutOfBounds {
                index,
                len: self.slots.len(),
            })
        }
    }

    fn position(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    pub fn adjacent_indices(&self, index: usize) -> Result<Vec<usize>, PuzzleError> {
        self.check_index(index)?;
        Ok(self.neighbours(index))
    }

    fn neighbours(&self, index: usize) -> Vec<usize> {
        let (row, col) = self.position(index);
        let mut adjacent = Vec::with_capacity(4);

        if row > 0 {
            adjacent.push(index - self.size);
        }
        if row < self.size - 1 {
            adjacent.push(index + self.size);
        }
        if col > 0 {
            adjacent.push(index - 1);
        }
        if col < self.size - 1 {
            adjacent.push(index + 1);
        }

        adjacent
    }

    fn swap_with_empty(&mut self, index: usize) {
        self.slots.swap(index, self.empty);
        self.empty = index;
    }

    pub fn shuffle(&mut self) {
        let mut rng = thread_rng();
        self.shuffle_with(&mut rng);
    }

    /// Same as [`Puzzle::shuffle`], drawing from the given generator.
    ///
    /// Every step swaps the gap with one of its neighbours, so the result can always be
    /// solved by sliding tiles back.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..SHUFFLE_MOVES {
            let possible_moves = self.neighbours(self.empty);
            if let Some(&target) = possible_moves.choose(rng) {
                self.swap_with_empty(target);
            }
        }
        debug!(
            "shuffled {}x{} grid, gap now at {}",
            self.size, self.size, self.empty
        );
    }

    /// Direction the tile at `tile_index` may slide, or `None` when it is not next to
    /// the gap.
    pub fn valid_move_direction(&self, tile_index: usize) -> Result<Option<Move>, PuzzleError> {
        self.check_index(tile_index)?;
        if !self.neighbours(self.empty).contains(&tile_index) {
            return Ok(None);
        }

        let (tile_row, tile_col) = self.position(tile_index);
        let (empty_row, empty_col) = self.position(self.empty);

        let direction = if tile_row == empty_row {
            if tile_col < empty_col {
                Move::Right
            } else {
                Move::Left
            }
        } else if tile_row < empty_row {
            Move::Down
        } else {
            Move::Up
        };
        Ok(Some(direction))
    }

    pub fn constrained_offset(
        &self,
        tile_index: usize,
        raw: Translation,
        metrics: &TileMetrics,
    ) -> Result<Translation, PuzzleError> {
        let Some(direction) = self.valid_move_direction(tile_index)? else {
            return Ok(Translation::ZERO);
        };

        let travel = metrics.travel();
        let offset = match direction {
            Move::Up => Translation::new(0.0, clamped(raw.height, -travel, 0.0)),
            Move::Down => Translation::new(0.0, clamped(raw.height, 0.0, travel)),
            Move::Left => Translation::new(clamped(raw.width, -travel, 0.0), 0.0),
            Move::Right => Translation::new(clamped(raw.width, 0.0, travel), 0.0),
        };
        Ok(offset)
    }

    /// Swap the tile into the gap if the constrained drag went past half a tile.
    pub fn commit_if_threshold_crossed(
        &mut self,
        tile_index: usize,
        constrained: Translation,
        metrics: &TileMetrics,
    ) -> Result<bool, PuzzleError> {
        let Some(direction) = self.valid_move_direction(tile_index)? else {
            return Ok(false);
        };

        let distance = if direction.is_vertical() {
            constrained.height.abs()
        } else {
            constrained.width.abs()
        };

        if distance > metrics.commit_threshold() {
            debug!("tile at {tile_index} slides {direction} into {}", self.empty);
            self.swap_with_empty(tile_index);
            Ok(true)
        } else {
            debug!("drag of {distance} on tile {tile_index} snapped back");
            Ok(false)
        }
    }

    /// Slide whichever tile can move in `direction` into the gap.
    pub fn slide(&mut self, direction: Move) -> bool {
        let (dr, dc) = direction.as_offset();
        let (row, col) = self.position(self.empty);

        let tile_row = row as isize - dr;
        let tile_col = col as isize - dc;
        let size = self.size as isize;

        if tile_row >= 0 && tile_row < size && tile_col >= 0 && tile_col < size {
            let index = tile_row as usize * self.size + tile_col as usize;
            self.swap_with_empty(index);
            true
        } else {
            false
        }
    }

    pub fn is_solved(&self) -> bool {
        let last = self.slots.len() - 1;
        self.slots.iter().enumerate().all(|(i, slot)| match slot {
            Some(tile) => tile.0 == i,
            None => i == last,
        })
    }

    pub fn is_solvable(&self) -> bool {
        let inversions = self.count_inversions();
        let (empty_row, _) = self.position(self.empty);

        if self.size % 2 == 1 {
            // Odd width: solvable if inversions count is even
            inversions % 2 == 0
        } else {
            // Even width: the gap's row from the top breaks the tie
            (inversions + empty_row) % 2 == 1
        }
    }

    fn count_inversions(&self) -> usize {
        let tiles: Vec<usize> = self.slots.iter().flatten().map(|tile| tile.0).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
            .sum()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.slots.chunks(self.size) {
            for slot in row {
                match slot {
                    Some(tile) => write!(f, "{:2} ", tile.0 + 1)?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
