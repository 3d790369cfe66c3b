use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use fruitswap::game::{Fruit, Vegetable};
use fruitswap::{Cell, Phase, Token};

use crate::app::App;

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.size();
    let grid = app.session.grid();

    let board_height = grid.rows() as u16 + 2; // rows + borders
    let board_width = grid.cols() as u16 * 2 + 2; // 2 chars per tile + borders

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(board_height.max(14)),
            Constraint::Min(1),
        ])
        .split(size);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(20),          // Stats panel
            Constraint::Length(board_width), // Board
            Constraint::Length(22),          // Legend + help
            Constraint::Min(1),
        ])
        .split(vertical_chunks[1]);

    let board_area = Rect {
        height: board_height.min(horizontal_chunks[2].height),
        ..horizontal_chunks[2]
    };

    render_stats(f, app, horizontal_chunks[1]);
    render_board(f, app, board_area);
    render_help(f, horizontal_chunks[3]);
}

fn fruit_color(fruit: Fruit) -> Color {
    match fruit {
        Fruit::Apple => Color::Red,
        Fruit::Orange => Color::LightRed,
        Fruit::Banana => Color::Yellow,
    }
}

fn vegetable_color(veg: Vegetable) -> Color {
    match veg {
        Vegetable::Broccoli => Color::Green,
        Vegetable::Eggplant => Color::Magenta,
        Vegetable::Radish => Color::LightMagenta,
    }
}

fn tile_span(token: Token, checker: bool) -> Span<'static> {
    match token {
        Token::Empty => {
            if checker {
                Span::styled("░░", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw("  ")
            }
        }
        Token::Fruit(fruit) => Span::styled("██", Style::default().fg(fruit_color(fruit))),
        Token::Vegetable(veg) => Span::styled("▓▓", Style::default().fg(vegetable_color(veg))),
    }
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let grid = app.session.grid();
    let mut board_lines = Vec::with_capacity(grid.rows());

    for row in 0..grid.rows() {
        let mut line_spans = Vec::with_capacity(grid.cols());
        for col in 0..grid.cols() {
            let cell = Cell::new(row, col);
            let mut span = tile_span(grid[cell], (row + col) % 2 == 0);
            if app.flash.contains(&cell) && grid[cell].is_empty() {
                span = Span::styled("··", Style::default().fg(Color::White));
            }
            if app.input_state.selected == Some(cell) {
                span.style = span.style.add_modifier(Modifier::REVERSED);
            }
            if app.input_state.cursor == cell {
                span.style = span.style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            line_spans.push(span);
        }
        board_lines.push(Line::from(line_spans));
    }

    let title = match app.session.phase() {
        Phase::Idle => "fruitswap",
        Phase::Settling => "settling…",
    };
    let board_widget = Paragraph::new(board_lines).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(board_widget, area);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let stats_text = vec![
        Line::from(vec![Span::styled("SCORE", Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw(session.score().to_string())]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw(format!("Moves  {}", session.moves()))]),
        Line::from(vec![Span::raw(format!("Chain  {}", session.chain()))]),
        Line::from(vec![Span::raw(format!("Best   {}", session.best_chain()))]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled(app.status.clone(), Style::default().fg(Color::Yellow))]),
    ];

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(stats_widget, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let mut help_lines = Vec::new();

    for fruit in Fruit::ALL {
        help_lines.push(Line::from(vec![
            tile_span(Token::Fruit(fruit), false),
            Span::raw(format!(" {}", fruit.name())),
        ]));
    }
    for veg in Vegetable::ALL {
        help_lines.push(Line::from(vec![
            tile_span(Token::Vegetable(veg), false),
            Span::raw(format!(" {}", veg.name())),
        ]));
    }

    help_lines.push(Line::from(vec![Span::raw("")]));
    help_lines.push(Line::from(vec![Span::raw("←↑→↓  move")]));
    help_lines.push(Line::from(vec![Span::raw("SPACE pick/swap")]));
    help_lines.push(Line::from(vec![Span::raw("⇧+←↑→↓ swipe")]));
    help_lines.push(Line::from(vec![Span::raw("R restart  Q quit")]));

    let help_widget = Paragraph::new(help_lines).block(Block::default().borders(Borders::ALL).title("Tiles"));

    f.render_widget(help_widget, area);
}
