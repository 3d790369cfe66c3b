use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Fruit {
    Apple,
    Orange,
    Banana,
}

impl Fruit {
    pub const ALL: [Fruit; 3] = [Fruit::Apple, Fruit::Orange, Fruit::Banana];

    pub fn symbol(self) -> char {
        match self {
            Fruit::Apple => 'A',
            Fruit::Orange => 'O',
            Fruit::Banana => 'B',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Fruit::Apple => "Apple",
            Fruit::Orange => "Orange",
            Fruit::Banana => "Banana",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Vegetable {
    Broccoli,
    Eggplant,
    Radish,
}

impl Vegetable {
    pub const ALL: [Vegetable; 3] = [Vegetable::Broccoli, Vegetable::Eggplant, Vegetable::Radish];

    pub fn symbol(self) -> char {
        match self {
            Vegetable::Broccoli => 'x',
            Vegetable::Eggplant => 'y',
            Vegetable::Radish => 'z',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Vegetable::Broccoli => "Broccoli",
            Vegetable::Eggplant => "Eggplant",
            Vegetable::Radish => "Radish",
        }
    }
}

/// Content of one board cell. `Empty` only exists between a clear and the
/// following collapse + refill.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Token {
    #[default]
    Empty,
    Fruit(Fruit),
    Vegetable(Vegetable),
}

impl Token {
    pub fn is_empty(self) -> bool {
        self == Token::Empty
    }

    pub fn is_vegetable(self) -> bool {
        matches!(self, Token::Vegetable(_))
    }

    pub fn fruit(self) -> Option<Fruit> {
        match self {
            Token::Fruit(fruit) => Some(fruit),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Token::Empty => '.',
            Token::Fruit(fruit) => fruit.symbol(),
            Token::Vegetable(veg) => veg.symbol(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Token> {
        if symbol == '.' {
            return Some(Token::Empty);
        }
        Fruit::ALL
            .into_iter()
            .find(|f| f.symbol() == symbol)
            .map(Token::Fruit)
            .or_else(|| {
                Vegetable::ALL
                    .into_iter()
                    .find(|v| v.symbol() == symbol)
                    .map(Token::Vegetable)
            })
    }
}

/// A board coordinate. Ordered row-major.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when the two cells share an edge (Manhattan distance 1).
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid has no cells"),
            GridError::Ragged { row, expected, found } => {
                write!(f, "row {row} has {found} cells, expected {expected}")
            }
            GridError::UnknownSymbol { row, col, symbol } => {
                write!(f, "unknown token symbol {symbol:?} at ({row}, {col})")
            }
        }
    }
}

impl Error for GridError {}

/// Fixed-size token grid, row 0 at the top. Stored flat, row-major.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Token>,
}

impl Grid {
    pub fn filled(rows: usize, cols: usize, token: Token) -> Self {
        Self {
            rows,
            cols,
            cells: vec![token; rows * cols],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Token>>) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(GridError::Empty);
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(height * cols);
        for (row, tokens) in rows.into_iter().enumerate() {
            if tokens.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: tokens.len(),
                });
            }
            cells.extend(tokens);
        }

        Ok(Self {
            rows: height,
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn get(&self, cell: Cell) -> Option<Token> {
        self.contains(cell).then(|| self.cells[self.offset(cell)])
    }

    pub fn set(&mut self, cell: Cell, token: Token) {
        let idx = self.offset(cell);
        self.cells[idx] = token;
    }

    pub fn swap(&mut self, a: Cell, b: Cell) {
        let (ia, ib) = (self.offset(a), self.offset(b));
        self.cells.swap(ia, ib);
    }

    pub fn row(&self, row: usize) -> &[Token] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(|t| t.is_empty())
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|t| t.is_empty()).count()
    }

    /// In-bounds orthogonal neighbours: up, down, left, right.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let Cell { row, col } = cell;
        [
            row.checked_sub(1).map(|r| Cell::new(r, col)),
            Some(Cell::new(row + 1, col)),
            col.checked_sub(1).map(|c| Cell::new(row, c)),
            Some(Cell::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |n| self.contains(*n))
    }

    fn offset(&self, cell: Cell) -> usize {
        assert!(self.contains(cell), "cell {cell} outside {}x{}", self.rows, self.cols);
        cell.row * self.cols + cell.col
    }
}

impl Index<Cell> for Grid {
    type Output = Token;

    fn index(&self, cell: Cell) -> &Token {
        &self.cells[self.offset(cell)]
    }
}

impl IndexMut<Cell> for Grid {
    fn index_mut(&mut self, cell: Cell) -> &mut Token {
        let idx = self.offset(cell);
        &mut self.cells[idx]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for token in self.row(row) {
                write!(f, "{}", token.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// One row per whitespace-separated word, e.g. `"AOB\nxyz\n..."`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split_whitespace()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, symbol)| {
                        Token::from_symbol(symbol).ok_or(GridError::UnknownSymbol { row, col, symbol })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Grid::from_rows(rows)
    }
}
