//! Breadth-first solver for small boards.
//!
//! Powers the "show hint" button: the first element of the returned path
//! is the tile the player should click next.

use rustc_hash::FxHashMap;

use super::board::{neighbors_of, TileBoard};

/// Shortest sequence of tile positions to click to solve `board`.
///
/// Returns `Some(vec![])` for a solved board and `None` if the search would
/// visit more than `max_states` layouts. A 3x3 board has 181,440 reachable
/// layouts, so anything larger should be given a budget.
#[must_use]
pub fn solve(board: &TileBoard, max_states: usize) -> Option<Vec<usize>> {
    if board.is_solved() {
        return Some(Vec::new());
    }

    let grid_size = board.grid_size();
    let goal: Vec<usize> = (0..board.tiles().len()).collect();

    // Each visited layout stores (parent, clicked cell).
    let mut layouts: Vec<(Vec<usize>, usize)> = vec![(board.tiles().to_vec(), board.blank_index())];
    let mut parents: Vec<Option<(usize, usize)>> = vec![None];
    let mut seen: FxHashMap<Vec<usize>, usize> = FxHashMap::default();
    seen.insert(board.tiles().to_vec(), 0);

    let mut head = 0;
    while head < layouts.len() {
        let (tiles, blank) = layouts[head].clone();
        for target in neighbors_of(blank, grid_size) {
            let mut next = tiles.clone();
            next.swap(blank, target);
            if seen.contains_key(&next) {
                continue;
            }
            if seen.len() >= max_states {
                return None;
            }

            let id = layouts.len();
            seen.insert(next.clone(), id);
            parents.push(Some((head, target)));
            let reached_goal = next == goal;
            layouts.push((next, target));

            if reached_goal {
                return Some(unwind(&parents, id));
            }
        }
        head += 1;
    }
    None
}

/// The next tile to click, if a solution is found within the budget.
#[must_use]
pub fn hint(board: &TileBoard, max_states: usize) -> Option<usize> {
    solve(board, max_states).and_then(|path| path.first().copied())
}

fn unwind(parents: &[Option<(usize, usize)>], mut id: usize) -> Vec<usize> {
    let mut path = Vec::new();
    while let Some((parent, clicked)) = parents[id] {
        path.push(clicked);
        id = parent;
    }
    path.reverse();
    path
}
