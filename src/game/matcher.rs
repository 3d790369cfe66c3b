use std::collections::BTreeSet;

use tracing::trace;

use crate::constants::MATCH_MIN;
use crate::game::board::{Cell, Fruit, Grid, Token};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A maximal run of identical fruit. `anchor` is the leftmost (horizontal)
/// or topmost (vertical) cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Match {
    pub orientation: Orientation,
    pub anchor: Cell,
    pub len: usize,
    pub fruit: Fruit,
}

impl Match {
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let Match {
            orientation,
            anchor,
            len,
            ..
        } = *self;
        (0..len).map(move |i| match orientation {
            Orientation::Horizontal => Cell::new(anchor.row, anchor.col + i),
            Orientation::Vertical => Cell::new(anchor.row + i, anchor.col),
        })
    }
}

/// Scans rows left to right, then columns top to bottom. Within a line the
/// scan resumes right after each run it reports, so runs never overlap in
/// one direction; a cell may still appear in one horizontal and one vertical
/// match.
pub fn find_matches(grid: &Grid) -> Vec<Match> {
    let mut matches = Vec::new();

    for row in 0..grid.rows() {
        scan_line(grid.cols(), |i| grid[Cell::new(row, i)], |start, len, fruit| {
            matches.push(Match {
                orientation: Orientation::Horizontal,
                anchor: Cell::new(row, start),
                len,
                fruit,
            });
        });
    }

    for col in 0..grid.cols() {
        scan_line(grid.rows(), |i| grid[Cell::new(i, col)], |start, len, fruit| {
            matches.push(Match {
                orientation: Orientation::Vertical,
                anchor: Cell::new(start, col),
                len,
                fruit,
            });
        });
    }

    matches
}

fn scan_line<T, F>(len: usize, token_at: T, mut on_run: F)
where
    T: Fn(usize) -> Token,
    F: FnMut(usize, usize, Fruit),
{
    let mut start = 0;
    while start + MATCH_MIN <= len {
        let Some(fruit) = token_at(start).fruit() else {
            start += 1;
            continue;
        };

        let run = (start..len)
            .take_while(|&i| token_at(i) == Token::Fruit(fruit))
            .count();
        if run >= MATCH_MIN {
            on_run(start, run, fruit);
            start += run;
        } else {
            start += 1;
        }
    }
}

/// Clears every matched cell plus any vegetable orthogonally touching a
/// matched cell. The removal set is computed against the grid as passed in,
/// before anything is cleared; destroyed vegetables do not chain further.
pub fn resolve(grid: &mut Grid, matches: &[Match]) -> BTreeSet<Cell> {
    let mut removed = BTreeSet::new();

    for m in matches {
        for cell in m.cells() {
            removed.insert(cell);
            removed.extend(grid.neighbors(cell).filter(|n| grid[*n].is_vegetable()));
        }
    }

    for &cell in &removed {
        grid.set(cell, Token::Empty);
    }

    trace!(matches = matches.len(), removed = removed.len(), "resolved matches");
    removed
}
