use super::observation::{ObservationMode, create_observation};
use crate::game::{Action, GameConfig, GameEngine, GameState, PongError, Result, StepInfo};
use crate::render::{FrameSink, TickLimiter};
use burn::tensor::{Tensor, backend::Backend};

/// Pong environment for reinforcement learning
///
/// Wraps the game engine and provides a Burn-compatible RL interface with:
/// - Tensor observations (4-D full state or 2-D relative state)
/// - Discrete action space (3 actions: Hold, MoveDown, MoveUp)
/// - Standard RL interface (reset, step, render, close)
pub struct PongEnvironment<B: Backend> {
    engine: GameEngine,
    state: GameState,
    mode: ObservationMode,
    max_episode_steps: Option<usize>,
    elapsed_steps: usize,
    truncated: bool,
    closed: bool,
    limiter: TickLimiter,
    device: B::Device,
}

impl<B: Backend> PongEnvironment<B> {
    /// Create a new Pong environment
    pub fn new(config: GameConfig, mode: ObservationMode, device: B::Device) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_engine(GameEngine::new(config), mode, device))
    }

    /// Create an environment with a seeded random source
    pub fn with_seed(
        config: GameConfig,
        mode: ObservationMode,
        seed: u64,
        device: B::Device,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_engine(
            GameEngine::with_seed(config, seed),
            mode,
            device,
        ))
    }

    fn from_engine(mut engine: GameEngine, mode: ObservationMode, device: B::Device) -> Self {
        let state = engine.reset();
        let limiter = TickLimiter::new(engine.config().fps);
        tracing::info!(
            ?mode,
            width = engine.config().width,
            height = engine.config().height,
            "pong environment created"
        );

        Self {
            engine,
            state,
            mode,
            max_episode_steps: None,
            elapsed_steps: 0,
            truncated: false,
            closed: false,
            limiter,
            device,
        }
    }

    /// End episodes after `max_steps` calls to `step`, reporting them as truncated
    pub fn with_time_limit(mut self, max_steps: usize) -> Self {
        self.max_episode_steps = Some(max_steps);
        self
    }

    /// Reset the environment and return initial observation
    ///
    /// Returns: Tensor<B, 1> with shape [observation_dim]
    pub fn reset(&mut self) -> Tensor<B, 1> {
        self.state = self.engine.reset();
        self.elapsed_steps = 0;
        self.truncated = false;
        self.get_observation()
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Hold
    /// - 1: Move down (y grows)
    /// - 2: Move up
    ///
    /// Returns: (observation, reward, done, info)
    /// - observation: Tensor<B, 1> with shape [observation_dim]
    /// - reward: f32, summed over `repeat_actions` ticks
    /// - done: bool (match over or time limit reached)
    /// - info: which side scored, current score, truncation flag
    ///
    /// Errors with `InvalidAction` for indices outside 0..3 and with
    /// `MatchOver` once the episode has finished.
    pub fn step(&mut self, action_idx: usize) -> Result<(Tensor<B, 1>, f32, bool, StepInfo)> {
        let action = Action::try_from(action_idx)?;
        if self.truncated {
            return Err(PongError::MatchOver);
        }

        let mut result = self.engine.step(&mut self.state, action)?;
        self.elapsed_steps += 1;

        if !result.terminated
            && self
                .max_episode_steps
                .is_some_and(|limit| self.elapsed_steps >= limit)
        {
            self.truncated = true;
            result.info.truncated = true;
            tracing::debug!(steps = self.elapsed_steps, "episode truncated");
        }

        let observation = self.get_observation();
        let done = result.terminated || self.truncated;

        Ok((observation, result.reward, done, result.info))
    }

    /// Hand the current state to `sink`, then optionally wait out the rest of
    /// the frame to hold the configured tick rate. A close request from the
    /// sink ends the episode.
    pub fn render<S: FrameSink>(&mut self, sink: &mut S, wait: bool) -> Result<()> {
        sink.draw(&self.state)?;

        if sink.close_requested()? {
            self.closed = true;
            self.state.done = true;
        }

        if wait {
            self.limiter.tick();
        }
        Ok(())
    }

    /// Release the sink's resources
    pub fn close<S: FrameSink>(&mut self, sink: &mut S) -> Result<()> {
        sink.close()?;
        Ok(())
    }

    /// Get current observation without stepping
    pub fn get_observation(&self) -> Tensor<B, 1> {
        create_observation(&self.state, self.mode, &self.device)
    }

    pub fn observation_mode(&self) -> ObservationMode {
        self.mode
    }

    /// Length of the observation vector
    pub fn observation_dim(&self) -> usize {
        self.mode.dim()
    }

    /// Size of the discrete action space
    pub fn action_count(&self) -> usize {
        Action::COUNT
    }

    /// Whether the episode has finished (match over, truncated or closed)
    pub fn is_done(&self) -> bool {
        self.state.done || self.truncated
    }

    /// Whether a renderer asked to close the window
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn elapsed_steps(&self) -> usize {
        self.elapsed_steps
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Get the device used by this environment
    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Get reference to current game state (for rendering/testing)
    pub fn state(&self) -> &GameState {
        &self.state
    }
}
