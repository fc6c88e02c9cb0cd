use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{PongError, Result};

/// Fixed arena geometry. Only the values in `GameConfig` are tunable.
pub struct Params;

impl Params {
    // Playable paddles
    pub const PADDLE_LENGTH: f32 = 100.0;
    pub const PADDLE_WIDTH: f32 = 8.0;
    /// Distance from the side boundary to a playable paddle's centre
    pub const PADDLE_OFFSET: f32 = 15.0;

    // Boundary walls
    pub const WALL_THICKNESS: f32 = 5.0;

    pub const BALL_RADIUS: f32 = 10.0;

    /// A point is scored once the ball centre is within this distance of a side
    pub const SCORE_MARGIN: f32 = 4.0;

    // Scripted opponent
    pub const PURSUIT_STOP_PROBABILITY: f64 = 0.08;
    pub const PURSUIT_START_PROBABILITY: f64 = 0.85;
    /// Fraction of the arena width the ball must reach before the opponent reacts
    pub const PURSUIT_TRIGGER: f32 = 0.6;
}

/// Configuration for the arena and the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Arena width in pixels
    pub width: u32,
    /// Arena height in pixels
    pub height: u32,
    /// Ticks simulated per environment step
    pub repeat_actions: usize,
    /// Distance a playable paddle moves per tick
    pub bar_velocity: f32,
    /// Ball speed (velocity magnitude)
    pub ball_velocity: f32,
    /// Length of the series; the first side to `ceil(num_matches / 2)` points wins
    pub num_matches: u32,
    /// Target tick rate when rendering
    pub fps: u32,

    // Rewards (for RL)
    /// Reward for winning a point, negated for losing one
    pub point_reward: f32,
    /// Extra reward for the point that ends the match, negated for losing it
    pub match_reward: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            repeat_actions: 3,
            bar_velocity: 3.0,
            ball_velocity: 2.0,
            num_matches: 7,
            fps: 50,
            point_reward: 500.0,
            match_reward: 2000.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom arena size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Small arena with short matches, handy for tests
    pub fn small() -> Self {
        Self {
            num_matches: 3,
            ..Self::new(200, 150)
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Points needed to win the match
    pub fn win_threshold(&self) -> u32 {
        self.num_matches.div_ceil(2)
    }

    pub fn arena_width(&self) -> f32 {
        self.width as f32
    }

    pub fn arena_height(&self) -> f32 {
        self.height as f32
    }

    pub fn validate(&self) -> Result<()> {
        let min_width = 2.0 * (Params::PADDLE_OFFSET + Params::PADDLE_WIDTH);
        if (self.width as f32) <= min_width {
            return Err(PongError::InvalidConfig(format!(
                "width must exceed {min_width}, got {}",
                self.width
            )));
        }
        if self.height == 0 {
            return Err(PongError::InvalidConfig("height must be positive".into()));
        }
        if self.repeat_actions == 0 {
            return Err(PongError::InvalidConfig(
                "repeat_actions must be at least 1".into(),
            ));
        }
        if self.num_matches == 0 {
            return Err(PongError::InvalidConfig(
                "num_matches must be at least 1".into(),
            ));
        }
        if self.fps == 0 {
            return Err(PongError::InvalidConfig("fps must be positive".into()));
        }
        for (name, value) in [
            ("bar_velocity", self.bar_velocity),
            ("ball_velocity", self.ball_velocity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PongError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
