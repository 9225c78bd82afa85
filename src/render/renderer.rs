use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CellValue, EngineState, Phase, Position, SnakeId};
use crate::highscore::HighscoreList;
use crate::metrics::GameMetrics;

/// Colors of a snake's head and body, per player
fn snake_colors(id: SnakeId) -> (Color, Color) {
    match id.0 {
        1 => (Color::Cyan, Color::Green),
        _ => (Color::Magenta, Color::Yellow),
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &EngineState,
        metrics: &GameMetrics,
        highscores: &HighscoreList,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.phase == Phase::GameOver {
            frame.render_widget(self.render_game_over(state, highscores), game_area);
        } else {
            frame.render_widget(self.render_grid(state), game_area);
        }

        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    fn render_grid(&self, state: &EngineState) -> Paragraph<'static> {
        let heads: Vec<(Position, SnakeId)> = state
            .snakes
            .iter()
            .filter(|snake| !snake.is_empty())
            .map(|snake| (snake.head(), snake.id))
            .collect();

        let mut lines = Vec::with_capacity(state.grid_size);
        for row in 0..state.grid_size {
            let mut spans = Vec::with_capacity(state.grid_size);

            for col in 0..state.grid_size {
                let pos = Position::new(row, col);

                let cell = match state.board.get(pos) {
                    CellValue::Occupied(id) => {
                        let (head_color, body_color) = snake_colors(id);
                        if heads.contains(&(pos, id)) {
                            Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(head_color)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled("□ ", Style::default().fg(body_color))
                        }
                    }
                    CellValue::Food => Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    CellValue::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &EngineState, metrics: &GameMetrics) -> Paragraph<'static> {
        let mut spans = Vec::new();
        let two_players = state.snakes.len() > 1;

        for snake in &state.snakes {
            let label = if two_players {
                format!("Player{} score: ", snake.id.0)
            } else {
                "Score: ".to_string()
            };
            let (head_color, _) = snake_colors(snake.id);
            spans.push(Span::styled(label, Style::default().fg(head_color)));
            spans.push(Span::styled(
                snake.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("    "));
        }

        spans.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            metrics.format_time(),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::raw("    "));
        spans.push(Span::styled("Best: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            metrics.best_score.to_string(),
            Style::default().fg(Color::White),
        ));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &EngineState, highscores: &HighscoreList) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];

        for entry in state.scores() {
            text.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", entry.player_label),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    entry.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Highscores",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )));
        if highscores.is_empty() {
            text.push(Line::from(Span::styled(
                "No scores set yet",
                Style::default().fg(Color::Gray),
            )));
        }
        for (rank, entry) in highscores.entries().iter().enumerate() {
            text.push(Line::from(format!(
                "{}. {}  {}",
                rank + 1,
                entry.player_label,
                entry.score
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &EngineState) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" player 1 | "),
        ];
        if state.snakes.len() > 1 {
            spans.push(Span::styled("WASD", Style::default().fg(Color::Magenta)));
            spans.push(Span::raw(" player 2 | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
