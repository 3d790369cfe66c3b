use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use fruitswap::Cell;

use crate::app::App;
use crate::input::direction::InputDirection;

/// Cursor plus the at-most-one pending tile waiting for a swap partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub cursor: Cell,
    pub selected: Option<Cell>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            cursor: Cell::new(0, 0),
            selected: None,
        }
    }

    pub fn move_cursor(&mut self, dir: InputDirection, rows: usize, cols: usize) {
        if let Some(next) = dir.step(self.cursor, rows, cols) {
            self.cursor = next;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

/// Tap-then-tap selection: the first pick is remembered, an adjacent second
/// pick swaps, anything else moves the selection. A failed swap keeps the
/// first tile selected.
pub fn select_cell(app: &mut App, cell: Cell) {
    if app.session.is_settling() {
        return;
    }

    match app.input_state.selected {
        None => app.input_state.selected = Some(cell),
        Some(selected) if selected == cell => {}
        Some(selected) if selected.is_adjacent(cell) => {
            if app.try_swap(selected, cell) {
                app.input_state.selected = None;
            }
        }
        Some(_) => app.input_state.selected = Some(cell),
    }
}

/// Swipe-style move: swaps the cursor tile with its neighbour.
fn swipe(app: &mut App, dir: InputDirection) {
    if app.session.is_settling() {
        return;
    }
    let grid = app.session.grid();
    let from = app.input_state.cursor;
    if let Some(to) = dir.step(from, grid.rows(), grid.cols()) {
        if app.try_swap(from, to) {
            app.input_state.cursor = to;
            app.input_state.selected = None;
        }
    }
}

fn direction_for(code: KeyCode) -> Option<InputDirection> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(InputDirection::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(InputDirection::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(InputDirection::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(InputDirection::Right),
        _ => None,
    }
}

pub fn handle_input(app: &mut App, key_code: KeyCode, kind: KeyEventKind, modifiers: KeyModifiers) {
    if kind == KeyEventKind::Release {
        return;
    }

    if let Some(dir) = direction_for(key_code) {
        if modifiers.contains(KeyModifiers::SHIFT) {
            if kind == KeyEventKind::Press {
                swipe(app, dir);
            }
        } else {
            let grid = app.session.grid();
            let (rows, cols) = (grid.rows(), grid.cols());
            app.input_state.move_cursor(dir, rows, cols);
        }
        return;
    }

    if kind != KeyEventKind::Press {
        return;
    }

    match key_code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            let cursor = app.input_state.cursor;
            select_cell(app, cursor);
        }
        KeyCode::Esc => {
            app.input_state.clear_selection();
        }
        _ => {}
    }
}
