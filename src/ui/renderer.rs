use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::constants::*;
use crate::game::board::{Cell, EMPTY};
use crate::game::jeweled::{Jeweled, Pos};
use crate::game::pong::{Pong, Side};
use crate::game::puzzle::Puzzle;
use crate::game::snake::{Point, Snake};
use crate::game::tetris::{Piece, Tetris};
use crate::game::{Arcade, GameKind, Simulation};

const SIDE_PANEL_WIDTH: u16 = 18;

// Jeweled cells are drawn 4 columns by 2 rows so they make decent click targets.
const GEM_WIDTH: u16 = 4;
const GEM_HEIGHT: u16 = 2;
const JEWELED_BOARD_WIDTH: u16 = JEWELED_COLS as u16 * GEM_WIDTH + 2;
const JEWELED_BOARD_HEIGHT: u16 = JEWELED_ROWS as u16 * GEM_HEIGHT + 2;

const TILE_WIDTH: u16 = 7;
const TILE_HEIGHT: u16 = 3;

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.size();
    match &app.screen {
        Screen::Menu => render_menu(f, app.menu_index, size),
        Screen::Playing(arcade) => render_arcade(f, arcade, size),
    }
}

fn render_arcade(f: &mut Frame, arcade: &Arcade, size: Rect) {
    let (play_area, footer) = split_footer(size);
    let kind = arcade.kind();

    match arcade {
        Arcade::Tetris(game) => render_tetris(f, game, play_area),
        Arcade::Snake(game) => render_snake(f, game, play_area),
        Arcade::Pong(game) => render_pong(f, game, play_area),
        Arcade::Puzzle(game) => render_puzzle(f, game, play_area),
        Arcade::Jeweled(game) => render_jeweled(f, game, play_area),
    }

    let controls = Paragraph::new(Line::from(vec![
        Span::styled(kind.controls(), Style::default().fg(Color::DarkGray)),
        Span::styled(" · Esc menu", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(controls, footer);

    let sim = arcade.simulation();
    if sim.is_over() {
        render_game_over_overlay(f, arcade, play_area);
    } else if sim.is_paused() {
        render_paused_overlay(f, play_area);
    }
}

fn split_footer(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Board on the left, info panel on the right, centered as a unit.
fn board_with_panel(board_width: u16, board_height: u16, area: Rect) -> (Rect, Rect) {
    let outer = centered_fixed(board_width + SIDE_PANEL_WIDTH, board_height, area);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width.min(outer.width)),
            Constraint::Min(0),
        ])
        .split(outer);
    (chunks[0], chunks[1])
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn stat_lines(stats: &[(&str, String)]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (label, value) in stats {
        lines.push(Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(value.clone()));
        lines.push(Line::from(""));
    }
    lines
}

fn render_side_panel(f: &mut Frame, title: &str, lines: Vec<Line<'static>>, area: Rect) {
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

// Menu

fn render_menu(f: &mut Frame, selected: usize, size: Rect) {
    let height = GameKind::ALL.len() as u16 * 3 + 6;
    let area = centered_fixed(56, height, size);

    let mut lines = vec![Line::from("")];
    for (index, kind) in GameKind::ALL.iter().enumerate() {
        let is_selected = index == selected;
        let marker = if is_selected { "▶ " } else { "  " };
        let title_style = if is_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, title_style),
            Span::styled(format!("{} {}", index + 1, kind.title()), title_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", kind.description()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "↑↓ choose · Enter play · Q quit",
        Style::default().fg(Color::DarkGray),
    )));

    let menu = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("termcade")
            .title_alignment(Alignment::Center),
    );
    f.render_widget(menu, area);
}

// Tetris

fn piece_color(id: Cell) -> Color {
    match id {
        1 => Color::Cyan,
        2 => Color::Yellow,
        3 => Color::Magenta,
        4 => Color::Green,
        5 => Color::Red,
        6 => Color::Blue,
        7 => Color::LightRed,
        _ => Color::White,
    }
}

fn render_tetris(f: &mut Frame, game: &Tetris, area: Rect) {
    let board_width = TETRIS_COLS as u16 * 2 + 2;
    let board_height = TETRIS_ROWS as u16 + 2;
    let (board_area, side_area) = board_with_panel(board_width, board_height, area);

    let render_board = game.visible_board();
    let mut ghost_cells = Vec::new();
    if let Some(ghost) = game.get_ghost_piece() {
        ghost_cells = ghost.get_blocks();
    }
    let ghost_color = game
        .current_piece
        .map(|p| piece_color(p.piece_type.id()))
        .unwrap_or(Color::DarkGray);

    let mut board_lines = Vec::new();
    for (y, row) in render_board.iter().enumerate() {
        let mut line_spans = Vec::new();
        for (x, &cell) in row.iter().enumerate() {
            if cell != EMPTY {
                line_spans.push(Span::styled("██", Style::default().fg(piece_color(cell))));
            } else if ghost_cells.contains(&(x as i32, y as i32)) {
                line_spans.push(Span::styled("▒▒", Style::default().fg(ghost_color)));
            } else if (x + y) % 2 == 0 {
                line_spans.push(Span::styled("░░", Style::default().fg(Color::DarkGray)));
            } else {
                line_spans.push(Span::raw("  "));
            }
        }
        board_lines.push(Line::from(line_spans));
    }

    let board_widget = Paragraph::new(board_lines)
        .block(Block::default().borders(Borders::ALL).title("Tetris"));
    f.render_widget(board_widget, board_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(1)])
        .split(side_area);
    render_next_piece(f, game, chunks[0]);
    render_side_panel(
        f,
        "Stats",
        stat_lines(&[
            ("Score", game.score.to_string()),
            ("Lines", game.lines_cleared.to_string()),
        ]),
        chunks[1],
    );
}

fn render_next_piece(f: &mut Frame, game: &Tetris, area: Rect) {
    let preview = Piece::new(game.next_piece);
    let color = piece_color(game.next_piece.id());

    let mut next_lines = Vec::new();
    for row in preview.shape().iter() {
        let spans: Vec<Span> = row
            .iter()
            .map(|&c| {
                if c != 0 {
                    Span::styled("██", Style::default().fg(color))
                } else {
                    Span::raw("  ")
                }
            })
            .collect();
        next_lines.push(Line::from(spans));
    }

    let next_widget = Paragraph::new(next_lines)
        .block(Block::default().borders(Borders::ALL).title("Next"))
        .alignment(Alignment::Center);
    f.render_widget(next_widget, area);
}

// Snake

fn render_snake(f: &mut Frame, game: &Snake, area: Rect) {
    let board_width = SNAKE_COLS as u16 * 2 + 2;
    let board_height = SNAKE_ROWS as u16 + 2;
    let (board_area, side_area) = board_with_panel(board_width, board_height, area);

    let head = game.body.front().copied();
    let mut lines = Vec::with_capacity(SNAKE_ROWS);
    for y in 0..SNAKE_ROWS as i32 {
        let mut spans = Vec::with_capacity(SNAKE_COLS);
        for x in 0..SNAKE_COLS as i32 {
            let point = Point::new(x, y);
            let span = if head == Some(point) {
                Span::styled("██", Style::default().fg(Color::LightGreen))
            } else if game.contains(point) {
                Span::styled("██", Style::default().fg(Color::Green))
            } else if game.food == Some(point) {
                Span::styled("●●", Style::default().fg(Color::Red))
            } else {
                Span::raw("  ")
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Snake"));
    f.render_widget(board_widget, board_area);

    render_side_panel(
        f,
        "Stats",
        stat_lines(&[
            ("Score", game.score.to_string()),
            ("Length", game.body.len().to_string()),
            ("Speed", format!("{}ms", game.tick_interval().map_or(0, |d| d.as_millis()))),
        ]),
        side_area,
    );
}

// Puzzle

fn tile_style(value: u32) -> Style {
    let (bg, fg) = match value {
        0 => (Color::Reset, Color::DarkGray),
        2 => (Color::Gray, Color::Black),
        4 => (Color::White, Color::Black),
        8 => (Color::LightYellow, Color::Black),
        16 => (Color::Yellow, Color::Black),
        32 => (Color::LightRed, Color::Black),
        64 => (Color::Red, Color::White),
        128 => (Color::LightMagenta, Color::Black),
        256 => (Color::Magenta, Color::White),
        512 => (Color::LightBlue, Color::Black),
        1024 => (Color::Blue, Color::White),
        2048 => (Color::LightGreen, Color::Black),
        _ => (Color::Green, Color::Black),
    };
    Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
}

fn render_puzzle(f: &mut Frame, game: &Puzzle, area: Rect) {
    let board_width = PUZZLE_SIZE as u16 * TILE_WIDTH + 2;
    let board_height = PUZZLE_SIZE as u16 * TILE_HEIGHT + 2;
    let (board_area, side_area) = board_with_panel(board_width, board_height, area);

    let width = TILE_WIDTH as usize;
    let mut lines = Vec::new();
    for row in game.tiles.iter() {
        for band in 0..TILE_HEIGHT {
            let spans: Vec<Span> = row
                .iter()
                .map(|&value| {
                    let text = if band == TILE_HEIGHT / 2 && value != 0 {
                        format!("{value:^width$}")
                    } else if band == TILE_HEIGHT / 2 {
                        format!("{:^width$}", "·")
                    } else {
                        " ".repeat(width)
                    };
                    Span::styled(text, tile_style(value))
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("2048"));
    f.render_widget(board_widget, board_area);

    render_side_panel(
        f,
        "Stats",
        stat_lines(&[
            ("Score", game.score.to_string()),
            ("Best tile", game.max_tile().to_string()),
        ]),
        side_area,
    );
}

// Jeweled

fn gem_color(gem: Cell) -> Color {
    match gem {
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Blue,
        4 => Color::Yellow,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::DarkGray,
    }
}

/// Where the Jeweled board is drawn for a given terminal size.
pub fn jeweled_board_area(frame_area: Rect) -> Rect {
    let (play_area, _) = split_footer(frame_area);
    board_with_panel(JEWELED_BOARD_WIDTH, JEWELED_BOARD_HEIGHT, play_area).0
}

/// Map a terminal cell to the gem under it, if any.
pub fn jeweled_cell_at(board_area: Rect, column: u16, row: u16) -> Option<Pos> {
    let inner_x = board_area.x + 1;
    let inner_y = board_area.y + 1;
    // The board may be clipped on small terminals; only drawn cells count.
    let inner_right = (board_area.x + board_area.width).saturating_sub(1);
    let inner_bottom = (board_area.y + board_area.height).saturating_sub(1);
    if column < inner_x || row < inner_y || column >= inner_right || row >= inner_bottom {
        return None;
    }
    let col = ((column - inner_x) / GEM_WIDTH) as usize;
    let row = ((row - inner_y) / GEM_HEIGHT) as usize;
    if col < JEWELED_COLS && row < JEWELED_ROWS {
        Some(Pos::new(row, col))
    } else {
        None
    }
}

fn render_jeweled(f: &mut Frame, game: &Jeweled, area: Rect) {
    let (board_area, side_area) =
        board_with_panel(JEWELED_BOARD_WIDTH, JEWELED_BOARD_HEIGHT, area);

    let mut lines = Vec::new();
    for (r, row) in game.board.iter().enumerate() {
        for band in 0..GEM_HEIGHT {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(c, &gem)| {
                    let pos = Pos::new(r, c);
                    let mut style = Style::default().fg(gem_color(gem));
                    if game.selected == Some(pos) {
                        style = style.bg(Color::White);
                    } else if game.cursor == pos {
                        style = style.bg(Color::DarkGray);
                    }
                    let text = if band == 0 { " ◆◆ " } else { "    " };
                    Span::styled(text, style)
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Jeweled"));
    f.render_widget(board_widget, board_area);

    let mut side = stat_lines(&[("Score", game.score.to_string())]);
    if let Some(message) = game.message {
        side.push(Line::from(Span::styled(
            message,
            Style::default().fg(Color::LightRed),
        )));
    }
    render_side_panel(f, "Stats", side, side_area);
}

// Pong

fn render_pong(f: &mut Frame, game: &Pong, area: Rect) {
    let canvas_area = centered_fixed(82, 24, area);
    let title = format!(
        "Pong  You {} : {} CPU  (first to {})",
        game.score_left,
        game.score_right,
        game.winning_score()
    );

    // Field y grows downward; canvas y grows upward.
    let flip = |y: f32| (PONG_HEIGHT - y) as f64;
    let width = PONG_WIDTH as f64;
    let height = PONG_HEIGHT as f64;

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            let mut y = 0.0;
            while y < height {
                ctx.draw(&CanvasLine {
                    x1: width / 2.0,
                    y1: y,
                    x2: width / 2.0,
                    y2: (y + 12.0).min(height),
                    color: Color::DarkGray,
                });
                y += 24.0;
            }

            ctx.draw(&Rectangle {
                x: 0.0,
                y: flip(game.left_y + PADDLE_HEIGHT),
                width: PADDLE_WIDTH as f64,
                height: PADDLE_HEIGHT as f64,
                color: Color::Cyan,
            });
            ctx.draw(&Rectangle {
                x: (PONG_WIDTH - PADDLE_WIDTH) as f64,
                y: flip(game.right_y + PADDLE_HEIGHT),
                width: PADDLE_WIDTH as f64,
                height: PADDLE_HEIGHT as f64,
                color: Color::LightRed,
            });

            let mut radius = BALL_RADIUS as f64;
            while radius > 0.0 {
                ctx.draw(&Circle {
                    x: game.ball.x as f64,
                    y: flip(game.ball.y),
                    radius,
                    color: Color::White,
                });
                radius -= 1.5;
            }
        });
    f.render_widget(canvas, canvas_area);
}

// Overlays

fn render_paused_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(40, 20, area);
    f.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("PAUSED", Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from("Press P to resume"),
    ];
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(widget, popup_area);
}

fn render_game_over_overlay(f: &mut Frame, arcade: &Arcade, area: Rect) {
    let popup_area = centered_rect(50, 40, area);
    f.render_widget(Clear, popup_area);

    let (headline, color) = match arcade {
        Arcade::Pong(game) => match game.winner() {
            Some(Side::Left) => ("YOU WIN!", Color::Green),
            _ => ("CPU WINS", Color::Red),
        },
        _ => ("GAME OVER", Color::Red),
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(color))),
        Line::from(""),
        Line::from(format!("Score: {}", arcade.simulation().score())),
        Line::from(""),
        Line::from("Press R to restart"),
        Line::from("Press Esc for the menu"),
    ];
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Finished"))
        .alignment(Alignment::Center);
    f.render_widget(widget, popup_area);
}
