use thiserror::Error;

/// Errors surfaced by the simulation and the environment wrapper
#[derive(Debug, Error)]
pub enum PongError {
    #[error("invalid action {0}: expected 0 (hold), 1 (down) or 2 (up)")]
    InvalidAction(usize),

    /// The match (or the episode time limit) is over; call `reset` first
    #[error("match is over, reset before stepping again")]
    MatchOver,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown environment id: {0}")]
    UnknownEnv(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PongError>;
