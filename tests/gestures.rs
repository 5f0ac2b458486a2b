use photo_finish::puzzle::{BOARD_EXTENT, SHUFFLE_MOVES};
use photo_finish::split::puzzle_tile_rects;
use photo_finish::{
    GestureOutcome, GridSize, Move, Puzzle, PuzzleError, Session, Tile, TileMetrics, Translation,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::{HashMap, VecDeque};

const MOVES: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

fn layout(size: usize, empty: usize) -> Puzzle {
    let mut slots: Vec<Option<Tile>> = (0..size * size - 1).map(|i| Some(Tile(i))).collect();
    slots.insert(empty, None);
    Puzzle::from_slots(size, slots).unwrap()
}

#[test]
fn drag_onto_gap_from_the_top() {
    let metrics = TileMetrics::new(100.0, 2.0);
    let mut session = Session::from_puzzle(layout(3, 4), metrics);

    assert_eq!(
        session.puzzle().valid_move_direction(1).unwrap(),
        Some(Move::Down)
    );

    session.begin_drag(1).unwrap();
    session.update_drag(Translation::new(0.0, 40.0)).unwrap();
    assert_eq!(
        session.end_drag(Translation::new(0.0, 40.0)).unwrap(),
        GestureOutcome::Cancelled
    );
    assert_eq!(session.puzzle().empty_index(), 4);

    session.begin_drag(1).unwrap();
    session.update_drag(Translation::new(0.0, 60.0)).unwrap();
    assert_eq!(
        session.end_drag(Translation::new(0.0, 60.0)).unwrap(),
        GestureOutcome::Committed
    );
    assert_eq!(session.puzzle().slots()[4], Some(Tile(1)));
    assert_eq!(session.puzzle().empty_index(), 1);
}

#[test]
fn far_tile_cannot_be_dragged() {
    let metrics = TileMetrics::new(100.0, 2.0);
    let mut session = Session::from_puzzle(layout(3, 0), metrics);
    let before = session.puzzle().clone();

    session.begin_drag(5).unwrap();
    assert_eq!(
        session.update_drag(Translation::new(-250.0, 90.0)).unwrap(),
        Translation::ZERO
    );
    assert_eq!(
        session.end_drag(Translation::new(-250.0, 90.0)).unwrap(),
        GestureOutcome::Cancelled
    );
    assert_eq!(session.puzzle(), &before);
}

#[test]
fn overshooting_drag_is_capped_at_one_cell() {
    let metrics = TileMetrics::for_board(BOARD_EXTENT, 4);
    let puzzle = layout(4, 5);

    let offset = puzzle
        .constrained_offset(6, Translation::new(-1000.0, 12.0), &metrics)
        .unwrap();
    assert_eq!(offset, Translation::new(-(metrics.tile_size + 2.0), 0.0));
}

#[test]
fn slides_undo_in_reverse_order() {
    let mut rng = StdRng::seed_from_u64(2025);
    let mut puzzle = Puzzle::new(5).unwrap();
    let mut history = Vec::new();

    for _ in 0..SHUFFLE_MOVES {
        let direction = *MOVES.choose(&mut rng).unwrap();
        if puzzle.slide(direction) {
            history.push(direction);
        }
    }
    assert!(puzzle.is_solvable());

    for direction in history.into_iter().rev() {
        assert!(puzzle.slide(direction.opposite()));
    }
    assert!(puzzle.is_solved());
}

type Slots = Vec<Option<Tile>>;

/// Shortest list of slides that brings `start` back to the solved layout.
fn solve_by_search(start: &Puzzle) -> Option<Vec<Move>> {
    let mut parents: HashMap<Slots, Option<(Slots, Move)>> = HashMap::new();
    let mut queue = VecDeque::new();
    parents.insert(start.slots().to_vec(), None);
    queue.push_back(start.clone());

    while let Some(puzzle) = queue.pop_front() {
        if puzzle.is_solved() {
            let mut moves = Vec::new();
            let mut key = puzzle.slots().to_vec();
            while let Some(Some((prev, direction))) = parents.get(&key) {
                moves.push(*direction);
                key = prev.clone();
            }
            moves.reverse();
            return Some(moves);
        }
        for direction in MOVES {
            let mut next = puzzle.clone();
            if next.slide(direction) && !parents.contains_key(next.slots()) {
                parents.insert(
                    next.slots().to_vec(),
                    Some((puzzle.slots().to_vec(), direction)),
                );
                queue.push_back(next);
            }
        }
    }
    None
}

#[test]
fn shuffled_small_grids_slide_back_to_solved() {
    for seed in 0..6 {
        let mut puzzle = Puzzle::new(2).unwrap();
        puzzle.shuffle_with(&mut StdRng::seed_from_u64(seed));

        let moves = solve_by_search(&puzzle).expect("2x2 shuffle must be solvable");
        for direction in moves {
            assert!(puzzle.slide(direction));
        }
        assert!(puzzle.is_solved());
    }

    let mut puzzle = Puzzle::new(3).unwrap();
    puzzle.shuffle_with(&mut StdRng::seed_from_u64(11));
    assert!(!puzzle.is_solved());

    let moves = solve_by_search(&puzzle).expect("3x3 shuffle must be solvable");
    assert!(!moves.is_empty());
    for direction in moves {
        assert!(puzzle.slide(direction));
    }
    assert!(puzzle.is_solved());
}

#[test]
fn every_preset_yields_one_tile_per_rect() {
    for grid in GridSize::ALL {
        let size = grid.dimension();
        let metrics = TileMetrics::for_board(BOARD_EXTENT, size);
        let session = Session::new(size, metrics).unwrap();
        let rects = puzzle_tile_rects(4032.0, 3024.0, size);

        let tiles = session.puzzle().slots().iter().flatten().count();
        assert_eq!(tiles, rects.len());
        assert!(session.puzzle().is_solvable());
    }
}

#[test]
fn zero_sized_grid_is_rejected() {
    assert_eq!(
        Session::new(0, TileMetrics::default()).unwrap_err(),
        PuzzleError::EmptyGrid
    );
}
