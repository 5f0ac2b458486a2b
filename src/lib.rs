//! Sliding-tile photo puzzle engine.
//!
//! A photo is split into a `size × size` grid, the last tile is removed, and the
//! remaining tiles are scrambled by a random walk of legal moves. [`Puzzle`] owns the
//! layout; [`Session`] drives one drag gesture at a time against it.

pub mod error;
pub mod puzzle;
pub mod session;
pub mod split;

pub use error::PuzzleError;
pub use puzzle::{Move, Puzzle, Tile, TileMetrics, Translation};
pub use session::{GestureOutcome, Session};
pub use split::{GridSize, Rect};
