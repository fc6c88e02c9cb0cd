//! Pong - a two-paddle arena game packaged as a reinforcement learning environment
//!
//! This library provides:
//! - Core game logic (game module)
//! - The RL environment, observations and named presets (rl module)
//! - TUI rendering (render module)
//! - Keyboard input (input module)
//! - Session statistics (metrics module)
//! - Execution modes (human, random)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
