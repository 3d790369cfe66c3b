use tracing::{debug, warn};

use crate::constants::MATCH_MIN;
use crate::game::board::{Cell, Grid, Token, Vegetable};
use crate::game::matcher::find_matches;
use crate::game::tokens::TokenSource;

/// Builds a `rows x cols` grid with no run of three identical fruit.
///
/// Every attempt fills the whole board from `source`; a board containing a
/// match is thrown away and generated again from scratch. After
/// `max_attempts` failures the last board is repaired in place instead, by
/// turning each cell that completes a run into a vegetable.
pub fn generate<S: TokenSource + ?Sized>(
    rows: usize,
    cols: usize,
    source: &mut S,
    max_attempts: u32,
) -> Grid {
    let mut grid = Grid::filled(rows, cols, Token::Empty);

    for attempt in 1..=max_attempts.max(1) {
        fill(&mut grid, source);
        if find_matches(&grid).is_empty() {
            debug!(attempt, rows, cols, "generated board");
            return grid;
        }
    }

    let repaired = break_runs(&mut grid);
    warn!(max_attempts, repaired, "board generation hit the attempt cap, repaired runs");
    debug_assert!(find_matches(&grid).is_empty());
    grid
}

fn fill<S: TokenSource + ?Sized>(grid: &mut Grid, source: &mut S) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            grid.set(Cell::new(row, col), source.next_token());
        }
    }
}

/// Row-major pass replacing any fruit that completes a run with the previous
/// two cells in its row or column. Vegetables never match, so no replacement
/// can start a new run.
fn break_runs(grid: &mut Grid) -> usize {
    let mut repaired = 0;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell = Cell::new(row, col);
            let Some(fruit) = grid[cell].fruit() else {
                continue;
            };
            let same = |c: Cell| grid[c] == Token::Fruit(fruit);
            let back = MATCH_MIN - 1;
            let completes_row = col >= back && (1..=back).all(|d| same(Cell::new(row, col - d)));
            let completes_col = row >= back && (1..=back).all(|d| same(Cell::new(row - d, col)));
            if completes_row || completes_col {
                grid.set(cell, Token::Vegetable(Vegetable::ALL[(row + col) % Vegetable::ALL.len()]));
                repaired += 1;
            }
        }
    }

    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tokens::{RandomTokens, ScriptedTokens};

    #[test]
    fn generated_board_has_no_matches() {
        let mut source = RandomTokens::seeded(2024, 0.6);
        for _ in 0..20 {
            let grid = generate(8, 8, &mut source, 10_000);
            assert_eq!(grid.rows(), 8);
            assert_eq!(grid.cols(), 8);
            assert!(!grid.has_empty());
            assert!(find_matches(&grid).is_empty());
        }
    }

    #[test]
    fn regenerates_whole_board_after_a_match() {
        // First board (2x3) is "AAA/xyz" which matches; second is clean.
        let mut source = ScriptedTokens::from_symbols("AAAxyz AOBxyz").unwrap();
        let grid = generate(2, 3, &mut source, 10);
        assert_eq!(grid.to_string(), "AOB\nxyz");
        assert_eq!(source.drawn(), 12);
    }

    #[test]
    fn attempt_cap_falls_back_to_repair() {
        let mut source = ScriptedTokens::from_symbols("A").unwrap();
        let grid = generate(4, 4, &mut source, 3);
        assert_eq!(source.drawn(), 48);
        assert!(find_matches(&grid).is_empty());
        assert!(!grid.has_empty());
    }
}
