use burn::tensor::{Tensor, TensorData, backend::Backend};
use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// Which projection of the arena the agent sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObservationMode {
    /// `[paddle.x, paddle.y, ball.x, ball.y]`
    #[default]
    Full,
    /// `[paddle.x - ball.x, paddle.y - ball.y]`
    Relative,
}

impl ObservationMode {
    /// Length of the observation vector
    pub fn dim(&self) -> usize {
        match self {
            ObservationMode::Full => 4,
            ObservationMode::Relative => 2,
        }
    }
}

/// Project the controlled paddle and the ball into an observation vector
pub fn project(state: &GameState, mode: ObservationMode) -> Vec<f32> {
    let paddle = state.player().position;
    let ball = state.ball.position;

    match mode {
        ObservationMode::Full => vec![paddle.x, paddle.y, ball.x, ball.y],
        ObservationMode::Relative => vec![paddle.x - ball.x, paddle.y - ball.y],
    }
}

/// Create an observation tensor from game state
///
/// Returns: Tensor<B, 1> with shape [mode.dim()]
pub fn create_observation<B: Backend>(
    state: &GameState,
    mode: ObservationMode,
    device: &B::Device,
) -> Tensor<B, 1> {
    let data = project(state, mode);
    let len = data.len();

    Tensor::<B, 1>::from_data(TensorData::new(data, [len]), device)
}
