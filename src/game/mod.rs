//! Core Pong simulation
//!
//! Paddles, ball physics, scoring and the match state machine, free of any
//! I/O or rendering dependencies. Driven directly by the interactive modes
//! and through `rl::PongEnvironment` by learning code.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use config::{GameConfig, Params};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::{PongError, Result};
pub use state::{
    Ball, GameState, Orientation, Paddle, Position, PursuitState, Score, Side, Velocity,
};
