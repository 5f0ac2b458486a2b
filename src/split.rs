//! Geometry for cutting a photo into puzzle tiles.
//!
//! Pixel work is left to the caller; these helpers only say which rectangle of the
//! source image each [`Tile`](crate::Tile) covers.

use clap::ValueEnum;
use std::fmt;

/// Grid sizes offered to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum GridSize {
    #[default]
    Small,
    Medium,
    Large,
    Epic,
    Gigantic,
}

impl GridSize {
    pub const ALL: [GridSize; 5] = [
        GridSize::Small,
        GridSize::Medium,
        GridSize::Large,
        GridSize::Epic,
        GridSize::Gigantic,
    ];

    /// Number of tiles along one side.
    pub fn dimension(self) -> usize {
        match self {
            GridSize::Small => 3,
            GridSize::Medium => 4,
            GridSize::Large => 5,
            GridSize::Epic => 6,
            GridSize::Gigantic => 7,
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            GridSize::Small => "Small",
            GridSize::Medium => "Medium",
            GridSize::Large => "Large",
            GridSize::Epic => "Epic",
            GridSize::Gigantic => "Gigantic",
        };
        write!(f, "{} ({n}x{n})", s, n = self.dimension())
    }
}

/// Axis-aligned rectangle in source image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Largest square centred in a `width × height` image.
pub fn crop_to_square(width: f64, height: f64) -> Rect {
    let side = width.min(height);
    let x = (width - side) / 2.0;
    let y = (height - side) / 2.0;
    Rect::new(x, y, side, side)
}

/// Cut `square` into `size * size` cells, row by row.
pub fn tile_rects(square: Rect, size: usize) -> Vec<Rect> {
    if size == 0 {
        return Vec::new();
    }
    let piece = square.width / size as f64;

    (0..size)
        .flat_map(|row| (0..size).map(move |col| (row, col)))
        .map(|(row, col)| {
            Rect::new(
                square.x + col as f64 * piece,
                square.y + row as f64 * piece,
                piece,
                piece,
            )
        })
        .collect()
}

/// Source rectangles for the tiles of a puzzle built from a `width × height` photo.
///
/// The bottom-right cell becomes the gap, so only `size * size - 1` rectangles are
/// returned; entry `i` belongs to `Tile(i)`.
pub fn puzzle_tile_rects(width: f64, height: f64, size: usize) -> Vec<Rect> {
    let mut rects = tile_rects(crop_to_square(width, height), size);
    rects.pop();
    rects
}
