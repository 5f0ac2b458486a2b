//! Terminal front-end: draws the board and turns mouse drags into gestures.
//!
//! A tile is drawn 6 columns wide and 3 rows tall. Terminal rows are about twice as
//! tall as columns are wide, so one row counts as 2 points and one column as 1 point.

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use log::debug;
use std::error::Error;
use std::io::{self, Stdout, Write};

use photo_finish::{GestureOutcome, GridSize, Move, Session, TileMetrics, Translation};

pub const METRICS: TileMetrics = TileMetrics {
    tile_size: 6.0,
    spacing: 2.0,
};

const TILE_COLS: u16 = 6;
const TILE_ROWS: u16 = 3;
const GAP_COLS: u16 = 2;
const GAP_ROWS: u16 = 1;
const ORIGIN_COL: u16 = 2;
const ORIGIN_ROW: u16 = 2;
const POINTS_PER_ROW: f64 = 2.0;

/// Raw mode, alternate screen and mouse capture, undone on drop.
struct Screen {
    out: Stdout,
}

impl Screen {
    fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self { out })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Where the pointer went down for the current drag.
#[derive(Debug, Clone, Copy)]
struct Grab {
    column: u16,
    row: u16,
}

impl Grab {
    fn translation(&self, column: u16, row: u16) -> Translation {
        Translation::new(
            f64::from(column) - f64::from(self.column),
            (f64::from(row) - f64::from(self.row)) * POINTS_PER_ROW,
        )
    }
}

fn cell_origin(index: usize, size: usize) -> (u16, u16) {
    let row = (index / size) as u16;
    let col = (index % size) as u16;
    (
        ORIGIN_COL + col * (TILE_COLS + GAP_COLS),
        ORIGIN_ROW + row * (TILE_ROWS + GAP_ROWS),
    )
}

/// Slot index under a screen position, if the position is inside a cell.
fn hit_test(column: u16, row: u16, size: usize) -> Option<usize> {
    let x = column.checked_sub(ORIGIN_COL)?;
    let y = row.checked_sub(ORIGIN_ROW)?;
    let col = usize::from(x / (TILE_COLS + GAP_COLS));
    let line = usize::from(y / (TILE_ROWS + GAP_ROWS));

    let inside = x % (TILE_COLS + GAP_COLS) < TILE_COLS && y % (TILE_ROWS + GAP_ROWS) < TILE_ROWS;
    (inside && col < size && line < size).then_some(line * size + col)
}

fn shifted(base: u16, delta: f64) -> u16 {
    (i32::from(base) + delta.round() as i32).max(0) as u16
}

fn draw_tile(out: &mut Stdout, column: u16, row: u16, label: usize) -> io::Result<()> {
    let edge = format!("+{}+", "-".repeat(usize::from(TILE_COLS - 2)));
    let body = format!("|{:^width$}|", label, width = usize::from(TILE_COLS - 2));
    queue!(
        out,
        cursor::MoveTo(column, row),
        Print(&edge),
        cursor::MoveTo(column, row + 1),
        Print(&body),
        cursor::MoveTo(column, row + 2),
        Print(&edge)
    )
}

fn draw(out: &mut Stdout, session: &Session, grid: GridSize) -> io::Result<()> {
    let puzzle = session.puzzle();
    let size = puzzle.size();

    queue!(
        out,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print(format!("PhotoFinish - {grid}"))
    )?;

    // The dragged tile goes last so it stays on top.
    let dragged = session.dragged_tile();
    let order = (0..puzzle.slots().len())
        .filter(|&i| Some(i) != dragged)
        .chain(dragged);

    for index in order {
        let Some(tile) = puzzle.slots()[index] else {
            continue;
        };
        let (column, row) = cell_origin(index, size);
        let offset = session.drag_offset_for(index);
        draw_tile(
            out,
            shifted(column, offset.width),
            shifted(row, offset.height / POINTS_PER_ROW),
            tile.index() + 1,
        )?;
    }

    let footer = ORIGIN_ROW + size as u16 * (TILE_ROWS + GAP_ROWS);
    let status = if session.is_solved() {
        "Solved!"
    } else {
        "Drag a tile into the gap, or use the arrow keys."
    };
    queue!(
        out,
        cursor::MoveTo(0, footer),
        Print(status),
        cursor::MoveTo(0, footer + 1),
        Print("[r] reshuffle  [+/-] grid size  [q] quit")
    )?;
    out.flush()
}

fn next_size(grid: GridSize, step: isize) -> GridSize {
    let all = GridSize::ALL;
    let current = all.iter().position(|&g| g == grid).unwrap_or(0) as isize;
    let next = (current + step).clamp(0, all.len() as isize - 1);
    all[next as usize]
}

fn handle_mouse(
    session: &mut Session,
    grab: &mut Option<Grab>,
    mouse: MouseEvent,
) -> Result<(), Box<dyn Error>> {
    let size = session.puzzle().size();
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            session.cancel_drag();
            *grab = None;
            if let Some(index) = hit_test(mouse.column, mouse.row, size) {
                session.begin_drag(index)?;
                *grab = Some(Grab {
                    column: mouse.column,
                    row: mouse.row,
                });
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(grab) = grab {
                session.update_drag(grab.translation(mouse.column, mouse.row))?;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(grab) = grab.take() {
                let outcome = session.end_drag(grab.translation(mouse.column, mouse.row))?;
                if outcome == GestureOutcome::Cancelled {
                    debug!("drag released short of the gap");
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// Run the interactive board until the player quits.
pub fn run(session: &mut Session, mut grid: GridSize) -> Result<(), Box<dyn Error>> {
    let mut screen = Screen::enter()?;
    let mut grab: Option<Grab> = None;

    loop {
        draw(&mut screen.out, session, grid)?;

        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('r') => {
                    grab = None;
                    session.restart(grid.dimension(), METRICS)?;
                }
                KeyCode::Char('+') | KeyCode::Char('-') => {
                    let step = if key.code == KeyCode::Char('+') { 1 } else { -1 };
                    grid = next_size(grid, step);
                    grab = None;
                    session.restart(grid.dimension(), METRICS)?;
                }
                KeyCode::Up => {
                    session.slide(Move::Up);
                }
                KeyCode::Down => {
                    session.slide(Move::Down);
                }
                KeyCode::Left => {
                    session.slide(Move::Left);
                }
                KeyCode::Right => {
                    session.slide(Move::Right);
                }
                _ => {}
            },
            Event::Mouse(mouse) => handle_mouse(session, &mut grab, mouse)?,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_cells_and_skips_gutters() {
        assert_eq!(hit_test(ORIGIN_COL, ORIGIN_ROW, 3), Some(0));
        assert_eq!(hit_test(ORIGIN_COL + 5, ORIGIN_ROW + 2, 3), Some(0));
        assert_eq!(hit_test(ORIGIN_COL + 6, ORIGIN_ROW, 3), None);
        assert_eq!(hit_test(ORIGIN_COL + 8, ORIGIN_ROW + 4, 3), Some(4));
        assert_eq!(hit_test(ORIGIN_COL + 24, ORIGIN_ROW, 3), None);
        assert_eq!(hit_test(0, 0, 3), None);
    }

    #[test]
    fn one_cell_of_travel_matches_metrics() {
        let grab = Grab { column: 10, row: 10 };
        let across = grab.translation(10 + TILE_COLS + GAP_COLS, 10);
        let down = grab.translation(10, 10 + TILE_ROWS + GAP_ROWS);
        assert_eq!(across.width, METRICS.travel());
        assert_eq!(down.height, METRICS.travel());
    }

    #[test]
    fn grid_size_steps_stop_at_the_ends() {
        assert_eq!(next_size(GridSize::Small, -1), GridSize::Small);
        assert_eq!(next_size(GridSize::Small, 1), GridSize::Medium);
        assert_eq!(next_size(GridSize::Gigantic, 1), GridSize::Gigantic);
    }
}
