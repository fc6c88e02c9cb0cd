use std::io::{self, Stderr, stderr};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::renderer::Renderer;
use crate::game::GameState;
use crate::metrics::GameMetrics;

/// Something that can display arena frames
///
/// `PongEnvironment::render` hands the state to a sink after each step and
/// ends the episode when the sink reports a close request.
pub trait FrameSink {
    /// Draw one frame of `state`
    fn draw(&mut self, state: &GameState) -> io::Result<()>;

    /// Whether the user asked to close the display since the last poll
    fn close_requested(&mut self) -> io::Result<bool> {
        Ok(false)
    }

    /// Release display resources
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Full-screen terminal sink drawing through `Renderer`
pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    metrics: GameMetrics,
    restored: bool,
}

impl TerminalSink {
    /// Switch the terminal to raw mode on the alternate screen
    pub fn new(renderer: Renderer) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stderr))?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            renderer,
            metrics: GameMetrics::new(),
            restored: false,
        })
    }

    /// Statistics shown in the header
    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }
}

impl FrameSink for TerminalSink {
    fn draw(&mut self, state: &GameState) -> io::Result<()> {
        self.metrics.update();
        let Self {
            terminal,
            renderer,
            metrics,
            ..
        } = self;
        terminal.draw(|frame| renderer.render(frame, state, metrics))?;
        Ok(())
    }

    fn close_requested(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if ctrl_c || matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn close(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Holds a loop to a target rate by sleeping out the rest of each frame
#[derive(Debug, Clone)]
pub struct TickLimiter {
    period: Duration,
    last: Option<Instant>,
}

impl TickLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            last: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleep until one period has passed since the previous call.
    /// Returns the time slept.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let slept = match self.last {
            Some(last) => {
                let remaining = self.period.saturating_sub(now.duration_since(last));
                if !remaining.is_zero() {
                    std::thread::sleep(remaining);
                }
                remaining
            }
            None => Duration::ZERO,
        };
        self.last = Some(Instant::now());
        slept
    }
}
