//! Sliding puzzle integration tests.
//!
//! These tests verify shuffle solvability, slide validation and the
//! solved-board freeze across grid sizes.

use proptest::prelude::*;

use valentine_engine::core::{GameRng, PuzzleConfig};
use valentine_engine::puzzle::{
    is_solvable, neighbors_of, solve, SlideOutcome, SlideRejection, TileBoard, TilePuzzleEngine,
};

fn engine(grid_size: usize) -> TilePuzzleEngine {
    TilePuzzleEngine::new(PuzzleConfig::default().with_grid_size(grid_size)).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

/// 2x2 board `[2, 0, 1, 3]`: the blank sits at index 3.
#[test]
fn test_2x2_scenario() {
    let engine = engine(2);
    let mut board = TileBoard::from_tiles(2, vec![2, 0, 1, 3]).unwrap();
    assert_eq!(board.blank_index(), 3);

    // Index 0 is diagonal to the blank.
    assert_eq!(
        engine.attempt_slide(&mut board, 0),
        SlideOutcome::Rejected(SlideRejection::NotAdjacent)
    );
    assert_eq!(board.tiles(), &[2, 0, 1, 3]);
    assert_eq!(board.move_count(), 0);

    assert_eq!(engine.attempt_slide(&mut board, 1), SlideOutcome::Moved);
    assert_eq!(board.tiles(), &[2, 3, 1, 0]);
    assert_eq!(board.blank_index(), 1);
    assert_eq!(board.move_count(), 1);
}

/// A full game on the default board ends solved and frozen.
#[test]
fn test_play_to_completion() {
    let engine = engine(3);
    let mut board = engine.initialize(&mut GameRng::new(2024)).unwrap();
    let path = solve(&board, 200_000).expect("3x3 boards are always within budget");

    for target in path {
        assert!(engine.attempt_slide(&mut board, target).is_accepted());
    }
    assert!(board.is_solved());

    let moves = board.move_count();
    for target in 0..9 {
        assert_eq!(
            engine.attempt_slide(&mut board, target),
            SlideOutcome::Rejected(SlideRejection::AlreadySolved)
        );
    }
    assert_eq!(board.move_count(), moves);
}

/// Different seeds produce different boards.
#[test]
fn test_shuffle_varies_with_seed() {
    let engine = engine(4);
    let boards: Vec<_> = (0..5)
        .map(|seed| engine.initialize(&mut GameRng::new(seed)).unwrap())
        .collect();
    assert!(boards.windows(2).any(|w| w[0] != w[1]));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn shuffled_boards_are_solvable(grid_size in 2usize..=6, seed in any::<u64>(), moves in 0usize..200) {
        let engine = TilePuzzleEngine::new(
            PuzzleConfig::default().with_grid_size(grid_size).with_shuffle_moves(moves),
        ).unwrap();
        let board = engine.initialize(&mut GameRng::new(seed)).unwrap();

        prop_assert!(!board.is_solved());
        prop_assert!(is_solvable(grid_size, board.tiles()));
        prop_assert_eq!(board.tiles()[board.blank_index()], grid_size * grid_size - 1);
    }

    #[test]
    fn small_boards_solve_by_search(seed in any::<u64>()) {
        let engine = engine(2);
        let board = engine.initialize(&mut GameRng::new(seed)).unwrap();
        prop_assert!(solve(&board, 100).is_some());
    }

    #[test]
    fn non_adjacent_slides_change_nothing(seed in any::<u64>(), target in 0usize..20) {
        let engine = engine(3);
        let mut board = engine.initialize(&mut GameRng::new(seed)).unwrap();
        prop_assume!(!neighbors_of(board.blank_index(), 3).contains(&target));

        let before = board.clone();
        let outcome = engine.attempt_slide(&mut board, target);
        prop_assert!(!outcome.is_accepted());
        prop_assert_eq!(board, before);
    }

    #[test]
    fn adjacent_slides_swap_exactly_two_cells(seed in any::<u64>(), pick in 0usize..4) {
        let engine = engine(3);
        let mut board = engine.initialize(&mut GameRng::new(seed)).unwrap();
        let movable = board.movable();
        let target = movable[pick % movable.len()];
        let blank = board.blank_index();
        let before = board.clone();

        prop_assert!(engine.attempt_slide(&mut board, target).is_accepted());
        prop_assert_eq!(board.move_count(), before.move_count() + 1);
        prop_assert_eq!(board.blank_index(), target);
        prop_assert_eq!(board.tiles()[blank], before.tiles()[target]);
        prop_assert_eq!(board.tiles()[target], before.tiles()[blank]);

        let changed = board
            .tiles()
            .iter()
            .zip(before.tiles())
            .filter(|(a, b)| a != b)
            .count();
        prop_assert_eq!(changed, 2);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn three_by_three_boards_solve_by_search(seed in any::<u64>()) {
        let engine = engine(3);
        let board = engine.initialize(&mut GameRng::new(seed)).unwrap();
        prop_assert!(solve(&board, 200_000).is_some());
    }
}
