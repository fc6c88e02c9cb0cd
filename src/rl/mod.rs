//! Reinforcement learning environment for Pong
//!
//! Provides:
//! - Full (4-D) and relative (2-D) observations
//! - Burn-compatible RL interface with a 3-action discrete space
//! - Named presets for the registered variants

pub mod backend;
pub mod environment;
pub mod observation;
pub mod registry;

pub use backend::{EnvBackend, default_device};
pub use environment::PongEnvironment;
pub use observation::{ObservationMode, create_observation, project};
pub use registry::{EnvSpec, make};
