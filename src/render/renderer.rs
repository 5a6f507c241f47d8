use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{GameConfig, GameState, Position};

/// Draws the board, the score labels and the overlays from an immutable
/// snapshot of the game state. One text cell per normal grid cell.
pub struct Renderer {
    config: GameConfig,
}

impl Renderer {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: Option<&GameState>,
        high_score: u32,
        warning: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let labels = self.render_labels(state, high_score);
        frame.render_widget(labels, chunks[0]);

        // Center the board horizontally
        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let board = self.render_board(state);
        frame.render_widget(board, board_area);

        match state {
            None => self.render_overlay(frame, board_area, self.start_prompt()),
            Some(state) if state.over => {
                self.render_overlay(frame, board_area, self.game_over_text(state, high_score));
            }
            Some(_) => {}
        }

        let controls = self.render_controls(warning);
        frame.render_widget(controls, chunks[2]);
    }

    /// Score and high-score labels across the top
    fn render_labels(&self, state: Option<&GameState>, high_score: u32) -> Paragraph<'_> {
        let score = state.map(|s| s.score).unwrap_or(0);

        let text = vec![Line::from(vec![
            Span::styled(
                format!("Score: {}", score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(
                format!("High Score: {}", high_score),
                Style::default().fg(Color::Yellow),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    /// The board: solid background, one filled square per snake segment, the
    /// food drawn on every cell its square covers (so large food shows
    /// larger), all sized in normal grid cells.
    fn render_board(&self, state: Option<&GameState>) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for row in 0..self.config.rows() {
            let mut spans = Vec::new();

            for col in 0..self.config.cols() {
                let pos = Position::new(col * self.config.cell_size, row * self.config.cell_size);

                let cell = match state {
                    Some(state) if state.snake.segments().contains(&pos) => {
                        Span::styled("■ ", Style::default().fg(Color::Green))
                    }
                    // the eating hitbox doubles as the drawn footprint
                    Some(state) if state.food.is_eaten(pos, &self.config) => {
                        let color = if state.food.large {
                            Color::Red
                        } else {
                            Color::Yellow
                        };
                        Span::styled("● ", Style::default().fg(color).add_modifier(Modifier::BOLD))
                    }
                    _ => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .style(Style::default().bg(Color::Black))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn start_prompt(&self) -> Vec<Line<'_>> {
        vec![
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ]
    }

    fn game_over_text<'a>(&self, state: &GameState, high_score: u32) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(
                "YOU LOSE",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Game Over! Your score: {}. High Score: {}",
                    state.score, high_score
                ),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to try again", Style::default().fg(Color::Gray)),
            ]),
        ]
    }

    /// Draw a message box centered over the board
    fn render_overlay(&self, frame: &mut Frame, board_area: Rect, lines: Vec<Line<'_>>) {
        let width = lines
            .iter()
            .map(|line| line.width() as u16 + 4)
            .max()
            .unwrap_or(0)
            .min(board_area.width);
        let height = (lines.len() as u16 + 2).min(board_area.height);
        let area = centered_rect(board_area, width, height);

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }

    fn render_controls(&self, warning: Option<&str>) -> Paragraph<'_> {
        let mut lines = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        if let Some(warning) = warning {
            lines.push(Line::from(Span::styled(
                warning.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        Paragraph::new(lines).alignment(Alignment::Center)
    }
}

/// Rect of the given size centered inside `area`, clamped to fit
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
