use fruitswap::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDirection {
    Up,
    Down,
    Left,
    Right,
}

impl InputDirection {
    /// The neighbouring cell in this direction, if it is on a `rows x cols`
    /// board.
    pub fn step(self, cell: Cell, rows: usize, cols: usize) -> Option<Cell> {
        let Cell { row, col } = cell;
        let next = match self {
            InputDirection::Up => Cell::new(row.checked_sub(1)?, col),
            InputDirection::Down => Cell::new(row + 1, col),
            InputDirection::Left => Cell::new(row, col.checked_sub(1)?),
            InputDirection::Right => Cell::new(row, col + 1),
        };
        (next.row < rows && next.col < cols).then_some(next)
    }
}
