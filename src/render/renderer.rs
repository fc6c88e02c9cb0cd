use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Circle, Rectangle},
    },
};

use crate::game::{GameState, Paddle, Side};
use crate::metrics::GameMetrics;

pub struct Renderer {
    controls: Vec<(&'static str, &'static str)>,
    win_threshold: u32,
}

impl Renderer {
    /// Renderer with the keyboard controls of the human mode
    pub fn new(win_threshold: u32) -> Self {
        Self {
            controls: vec![
                ("W/↑", "up"),
                ("S/↓", "down"),
                ("R", "restart"),
                ("Q", "quit"),
            ],
            win_threshold,
        }
    }

    /// Replace the key hints shown in the footer
    pub fn with_controls(mut self, controls: Vec<(&'static str, &'static str)>) -> Self {
        self.controls = controls;
        self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Arena
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        if state.done {
            frame.render_widget(self.render_match_over(state), chunks[1]);
        } else {
            self.render_arena(frame, chunks[1], state);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_arena(&self, frame: &mut Frame, area: ratatui::layout::Rect, state: &GameState) {
        let (w, h) = (state.arena_width as f64, state.arena_height as f64);
        let title = format!(
            " Pong - {} x {} ",
            state.score.player, state.score.opponent
        );

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .marker(Marker::Braille)
            .background_color(Color::Rgb(100, 100, 100))
            .x_bounds([0.0, w])
            .y_bounds([0.0, h])
            .paint(|ctx| {
                for (i, paddle) in state.paddles.iter().enumerate() {
                    let color = match i {
                        GameState::PLAYER => Color::Cyan,
                        GameState::OPPONENT => Color::Red,
                        _ => Color::White,
                    };
                    ctx.draw(&paddle_rect(paddle, h, color));
                }

                let ball = &state.ball;
                ctx.draw(&Circle {
                    x: ball.position.x as f64,
                    // Canvas y grows upward, arena y grows downward
                    y: h - ball.position.y as f64,
                    radius: ball.radius as f64,
                    color: Color::White,
                });
            });

        frame.render_widget(canvas, area);
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format!("{} x {}", state.score.player, state.score.opponent),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Return: ", label),
            Span::styled(format!("{:.0}", metrics.episode_return), value),
            Span::raw("    "),
            Span::styled("Matches: ", label),
            Span::styled(
                format!(
                    "{} ({}-{})",
                    metrics.matches_played, metrics.player_wins, metrics.opponent_wins
                ),
                value,
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_match_over(&self, state: &GameState) -> Paragraph<'_> {
        let (headline, color) = match state.score.winner(self.win_threshold) {
            Some(Side::Player) => ("YOU WIN", Color::Green),
            Some(Side::Opponent) => ("YOU LOSE", Color::Red),
            None => ("MATCH STOPPED", Color::Gray),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} x {}", state.score.player, state.score.opponent),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let mut spans = Vec::new();
        for (i, (key, action)) in self.controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(format!(" {action}")));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

/// Canvas rectangle for a bar, flipped into the canvas' upward y axis
fn paddle_rect(paddle: &Paddle, arena_height: f64, color: Color) -> Rectangle {
    let width = paddle.width as f64;
    let length = paddle.length as f64;
    let bottom = paddle.position.y as f64 + length / 2.0;

    Rectangle {
        x: paddle.position.x as f64 - width / 2.0,
        y: arena_height - bottom,
        width,
        height: length,
        color,
    }
}
