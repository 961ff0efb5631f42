//! Tile puzzle engine: configured entry point for the puzzle stage.

use crate::core::{EngineResult, PuzzleConfig, RandomSource};

use super::board::{SlideOutcome, TileBoard};
use super::solver;

/// State budget for hints. Covers every 3x3 layout.
pub const HINT_STATE_BUDGET: usize = 200_000;

/// Creates shuffled boards and applies player slides.
///
/// ```
/// use valentine_engine::core::{GameRng, PuzzleConfig};
/// use valentine_engine::puzzle::TilePuzzleEngine;
///
/// let engine = TilePuzzleEngine::new(PuzzleConfig::default().with_grid_size(3)).unwrap();
/// let mut rng = GameRng::new(1);
/// let mut board = engine.initialize(&mut rng).unwrap();
/// assert!(!board.is_solved());
///
/// let target = board.movable()[0];
/// assert!(engine.attempt_slide(&mut board, target).is_accepted());
/// assert_eq!(board.move_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TilePuzzleEngine {
    config: PuzzleConfig,
}

impl TilePuzzleEngine {
    /// Create an engine, rejecting unusable configurations.
    pub fn new(config: PuzzleConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// A freshly shuffled, solvable, unsolved board.
    pub fn initialize<R: RandomSource>(&self, rng: &mut R) -> EngineResult<TileBoard> {
        TileBoard::shuffled(self.config.grid_size, self.config.shuffle_moves, rng)
    }

    /// Slide the tile at `target` into the blank, if legal.
    pub fn attempt_slide(&self, board: &mut TileBoard, target: usize) -> SlideOutcome {
        board.attempt_slide(target)
    }

    /// Next tile to click towards the solution.
    #[must_use]
    pub fn hint(&self, board: &TileBoard) -> Option<usize> {
        solver::hint(board, HINT_STATE_BUDGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineError, GameRng};

    #[test]
    fn test_rejects_degenerate_grid() {
        let result = TilePuzzleEngine::new(PuzzleConfig::default().with_grid_size(1));
        assert!(matches!(result, Err(EngineError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_initialize_deterministic() {
        let engine = TilePuzzleEngine::new(PuzzleConfig::default().with_grid_size(3)).unwrap();
        let a = engine.initialize(&mut GameRng::new(8)).unwrap();
        let b = engine.initialize(&mut GameRng::new(8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hint_moves_towards_solution() {
        let engine = TilePuzzleEngine::new(PuzzleConfig::default()).unwrap();
        let mut board = engine.initialize(&mut GameRng::new(4)).unwrap();

        while !board.is_solved() {
            let target = engine.hint(&board).unwrap();
            assert!(engine.attempt_slide(&mut board, target).is_accepted());
        }
        assert!(board.move_count() > 0);
    }
}
