//! Named environment presets
//!
//! A fixed table mapping ids to an observation mode and an episode step
//! limit. Arena parameters still come from the `GameConfig` passed to `make`.

use burn::tensor::backend::Backend;

use super::environment::PongEnvironment;
use super::observation::ObservationMode;
use crate::game::{GameConfig, PongError, Result};

/// A registered environment variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSpec {
    pub id: &'static str,
    pub observation_mode: ObservationMode,
    pub max_episode_steps: Option<usize>,
}

pub const NORMAL_V0: EnvSpec = EnvSpec {
    id: "turing-normal-v0",
    observation_mode: ObservationMode::Full,
    max_episode_steps: Some(7_500),
};

pub const EASY_V0: EnvSpec = EnvSpec {
    id: "turing-easy-v0",
    observation_mode: ObservationMode::Relative,
    max_episode_steps: Some(7_500),
};

pub static REGISTRY: [EnvSpec; 2] = [NORMAL_V0, EASY_V0];

/// Look up a registered variant by id
pub fn spec(id: &str) -> Result<&'static EnvSpec> {
    REGISTRY
        .iter()
        .find(|spec| spec.id == id)
        .ok_or_else(|| PongError::UnknownEnv(id.to_string()))
}

/// Registered ids, in registration order
pub fn ids() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|spec| spec.id)
}

impl EnvSpec {
    /// Build an environment for this preset
    pub fn build<B: Backend>(
        &self,
        config: GameConfig,
        seed: Option<u64>,
        device: B::Device,
    ) -> Result<PongEnvironment<B>> {
        let env = match seed {
            Some(seed) => PongEnvironment::with_seed(config, self.observation_mode, seed, device)?,
            None => PongEnvironment::new(config, self.observation_mode, device)?,
        };

        Ok(match self.max_episode_steps {
            Some(limit) => env.with_time_limit(limit),
            None => env,
        })
    }
}

/// Build a registered environment by id
pub fn make<B: Backend>(
    id: &str,
    config: GameConfig,
    seed: Option<u64>,
    device: B::Device,
) -> Result<PongEnvironment<B>> {
    spec(id)?.build(config, seed, device)
}
