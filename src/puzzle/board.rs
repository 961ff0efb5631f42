//! Sliding tile board.
//!
//! Tiles are stored row-major. The tile whose value is `n - 1` is the blank;
//! a board is solved when every position holds its own index.
//!
//! A board can only be created from the solved layout by legal slides, or
//! from an explicit layout that passes the parity check, so every board in
//! existence is solvable.

use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{EngineError, EngineResult, RandomSource};

/// Orthogonal neighbours of a cell, at most four.
pub type Neighbors = SmallVec<[usize; 4]>;

/// Orthogonally adjacent cells of `index`, in up, down, left, right order.
///
/// Returns an empty list for an index outside the grid.
#[must_use]
pub fn neighbors_of(index: usize, grid_size: usize) -> Neighbors {
    let mut out = Neighbors::new();
    if grid_size == 0 || index >= grid_size * grid_size {
        return out;
    }

    let row = index / grid_size;
    let col = index % grid_size;

    if row > 0 {
        out.push(index - grid_size);
    }
    if row + 1 < grid_size {
        out.push(index + grid_size);
    }
    if col > 0 {
        out.push(index - 1);
    }
    if col + 1 < grid_size {
        out.push(index + 1);
    }
    out
}

/// Whether a layout can be solved by legal slides.
///
/// Standard inversion parity rule: on odd-width grids the number of
/// inversions among non-blank tiles must be even; on even-width grids the
/// inversions plus the blank's row counted from the bottom (1-based) must
/// be odd.
#[must_use]
pub fn is_solvable(grid_size: usize, tiles: &[usize]) -> bool {
    let n = tiles.len();
    if grid_size < 2 || n != grid_size * grid_size {
        return false;
    }
    let blank = n - 1;

    let mut inversions = 0usize;
    for (i, &a) in tiles.iter().enumerate() {
        if a == blank {
            continue;
        }
        inversions += tiles[i + 1..]
            .iter()
            .filter(|&&b| b != blank && b < a)
            .count();
    }

    if grid_size % 2 == 1 {
        inversions % 2 == 0
    } else {
        let Some(blank_index) = tiles.iter().position(|&t| t == blank) else {
            return false;
        };
        let row_from_bottom = grid_size - blank_index / grid_size;
        (inversions + row_from_bottom) % 2 == 1
    }
}

/// Why a slide did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SlideRejection {
    /// The board is already solved; it no longer accepts moves.
    AlreadySolved,
    /// The target is not orthogonally adjacent to the blank.
    NotAdjacent,
}

/// Result of a slide attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SlideOutcome {
    /// The tile moved into the blank.
    Moved,
    /// The tile moved and completed the picture.
    Solved,
    /// Nothing changed.
    Rejected(SlideRejection),
}

impl SlideOutcome {
    /// Did the board change?
    #[must_use]
    pub fn is_accepted(self) -> bool {
        !matches!(self, SlideOutcome::Rejected(_))
    }
}

/// A sliding puzzle board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileBoard {
    tiles: Vec<usize>,
    blank_index: usize,
    grid_size: usize,
    move_count: u32,
    solved: bool,
}

impl TileBoard {
    /// The solved board of the given size.
    pub fn solved(grid_size: usize) -> EngineResult<Self> {
        check_grid_size(grid_size)?;
        let n = grid_size * grid_size;
        Ok(Self {
            tiles: (0..n).collect(),
            blank_index: n - 1,
            grid_size,
            move_count: 0,
            solved: true,
        })
    }

    /// A board shuffled by `shuffle_moves` random legal slides from solved.
    ///
    /// If the walk happens to end on the solved layout, it keeps walking
    /// until it does not, so the player never receives a finished puzzle.
    pub fn shuffled<R: RandomSource>(
        grid_size: usize,
        shuffle_moves: usize,
        rng: &mut R,
    ) -> EngineResult<Self> {
        let mut board = Self::solved(grid_size)?;
        for _ in 0..shuffle_moves {
            board.random_slide(rng);
        }
        while board.tiles_in_place() {
            board.random_slide(rng);
        }
        board.solved = false;

        debug!(
            grid_size,
            shuffle_moves,
            misplaced = board.misplaced_tiles(),
            "shuffled tile board"
        );
        Ok(board)
    }

    /// A board with an explicit layout.
    ///
    /// The layout must be a permutation of `0..grid_size²` that is reachable
    /// from the solved layout.
    pub fn from_tiles(grid_size: usize, tiles: Vec<usize>) -> EngineResult<Self> {
        check_grid_size(grid_size)?;
        let n = grid_size * grid_size;
        if tiles.len() != n {
            return Err(EngineError::invalid(format!(
                "expected {n} tiles for a {grid_size}x{grid_size} grid, got {}",
                tiles.len()
            )));
        }

        let mut seen = vec![false; n];
        for &tile in &tiles {
            if tile >= n || seen[tile] {
                return Err(EngineError::invalid(format!(
                    "tiles must be a permutation of 0..{n}"
                )));
            }
            seen[tile] = true;
        }

        if !is_solvable(grid_size, &tiles) {
            return Err(EngineError::invalid("tile layout is not solvable"));
        }

        let blank_index = tiles.iter().position(|&t| t == n - 1).unwrap_or(n - 1);
        let mut board = Self {
            tiles,
            blank_index,
            grid_size,
            move_count: 0,
            solved: false,
        };
        board.solved = board.tiles_in_place();
        Ok(board)
    }

    /// Tile values by position.
    #[must_use]
    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    /// Position of the blank.
    #[must_use]
    pub fn blank_index(&self) -> usize {
        self.blank_index
    }

    /// Value used for the blank tile.
    #[must_use]
    pub fn blank_value(&self) -> usize {
        self.tiles.len() - 1
    }

    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of accepted slides.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Does the tile at `index` show the blank?
    #[must_use]
    pub fn is_blank(&self, index: usize) -> bool {
        index == self.blank_index
    }

    /// Home (row, column) of a tile value, i.e. which fragment of the
    /// picture it shows.
    #[must_use]
    pub fn home_of(&self, tile: usize) -> (usize, usize) {
        (tile / self.grid_size, tile % self.grid_size)
    }

    /// Non-blank tiles not on their home position.
    #[must_use]
    pub fn misplaced_tiles(&self) -> usize {
        let blank = self.blank_value();
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, &t)| t != blank && t != i)
            .count()
    }

    /// Cells that may currently slide into the blank.
    #[must_use]
    pub fn movable(&self) -> Neighbors {
        neighbors_of(self.blank_index, self.grid_size)
    }

    /// Slide the tile at `target` into the blank.
    ///
    /// Accepted only when `target` is adjacent to the blank and the board
    /// is not solved; otherwise the board is left untouched.
    pub fn attempt_slide(&mut self, target: usize) -> SlideOutcome {
        if self.solved {
            trace!(target, "slide ignored, board already solved");
            return SlideOutcome::Rejected(SlideRejection::AlreadySolved);
        }
        if !self.movable().contains(&target) {
            trace!(target, blank = self.blank_index, "slide ignored, not adjacent");
            return SlideOutcome::Rejected(SlideRejection::NotAdjacent);
        }

        self.swap_with_blank(target);
        self.move_count += 1;
        self.solved = self.tiles_in_place();

        if self.solved {
            debug!(moves = self.move_count, "tile puzzle solved");
            SlideOutcome::Solved
        } else {
            SlideOutcome::Moved
        }
    }

    fn random_slide<R: RandomSource>(&mut self, rng: &mut R) {
        let neighbors = self.movable();
        let pick = neighbors[rng.gen_index(neighbors.len()).min(neighbors.len() - 1)];
        self.swap_with_blank(pick);
    }

    fn swap_with_blank(&mut self, target: usize) {
        self.tiles.swap(self.blank_index, target);
        self.blank_index = target;
    }

    fn tiles_in_place(&self) -> bool {
        self.tiles.iter().enumerate().all(|(i, &t)| t == i)
    }
}

fn check_grid_size(grid_size: usize) -> EngineResult<()> {
    if grid_size < 2 {
        return Err(EngineError::invalid(format!(
            "grid size must be at least 2, got {grid_size}"
        )));
    }
    if grid_size.checked_mul(grid_size).is_none() {
        return Err(EngineError::invalid("grid size overflows tile count"));
    }
    Ok(())
}
