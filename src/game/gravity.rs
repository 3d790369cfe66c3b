use tracing::trace;

use crate::game::board::{Cell, Grid, Token};
use crate::game::tokens::TokenSource;

/// Lets tokens fall into empty cells below them. Works column by column from
/// the bottom row up; each empty cell pulls down the nearest token above it.
/// Returns true if any token moved.
pub fn collapse(grid: &mut Grid) -> bool {
    let mut moved = false;

    for col in 0..grid.cols() {
        for row in (1..grid.rows()).rev() {
            let cell = Cell::new(row, col);
            if !grid[cell].is_empty() {
                continue;
            }
            let source = (0..row)
                .rev()
                .map(|above| Cell::new(above, col))
                .find(|&above| !grid[above].is_empty());
            if let Some(above) = source {
                grid.swap(cell, above);
                moved = true;
            }
        }
        debug_assert!(column_is_compacted(grid, col));
    }

    moved
}

/// Fills every empty cell from `source`, column by column, top to bottom.
/// New tokens are not checked against existing runs. Returns the number of
/// cells filled.
pub fn refill<S: TokenSource + ?Sized>(grid: &mut Grid, source: &mut S) -> usize {
    let mut filled = 0;

    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            let cell = Cell::new(row, col);
            if grid[cell].is_empty() {
                grid.set(cell, source.next_token());
                filled += 1;
            }
        }
    }

    filled
}

/// One gravity step: collapse, then top up from `source`. Returns true if
/// anything fell or was refilled.
pub fn collapse_and_refill<S: TokenSource + ?Sized>(grid: &mut Grid, source: &mut S) -> bool {
    let moved = collapse(grid);
    let filled = refill(grid, source);
    if moved || filled > 0 {
        trace!(moved, filled, "collapsed and refilled");
    }
    moved || filled > 0
}

fn column_is_compacted(grid: &Grid, col: usize) -> bool {
    let column: Vec<Token> = (0..grid.rows()).map(|row| grid[Cell::new(row, col)]).collect();
    let first_token = column.iter().position(|t| !t.is_empty()).unwrap_or(column.len());
    column[first_token..].iter().all(|t| !t.is_empty())
}
