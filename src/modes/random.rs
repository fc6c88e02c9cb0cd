//! Random agent driving a registered environment
//!
//! Picks uniformly among the three actions every step. With a terminal it
//! renders each step at the configured rate and stops when the display is
//! closed; headless it only logs one line per episode.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{GameConfig, Score};
use crate::render::{Renderer, TerminalSink};
use crate::rl::{EnvBackend, PongEnvironment, default_device, make};

/// Outcome of one random-agent episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub total_reward: f32,
    pub steps: usize,
    pub score: Score,
    pub truncated: bool,
}

pub struct RandomMode {
    env: PongEnvironment<EnvBackend>,
    rng: StdRng,
    episodes: usize,
}

impl RandomMode {
    pub fn new(
        env_id: &str,
        config: GameConfig,
        episodes: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        let env = make::<EnvBackend>(env_id, config, seed, default_device())
            .with_context(|| format!("Failed to create environment '{}'", env_id))?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };

        Ok(Self { env, rng, episodes })
    }

    /// Play all episodes in the terminal
    pub fn run(&mut self) -> Result<Vec<EpisodeSummary>> {
        let renderer = Renderer::new(self.env.config().win_threshold())
            .with_controls(vec![("Q/Esc", "Quit")]);
        let mut sink = TerminalSink::new(renderer).context("Failed to set up terminal")?;

        let result = self.play(Some(&mut sink));
        self.env.close(&mut sink).context("Failed to restore terminal")?;

        result
    }

    /// Play all episodes without a display
    pub fn run_headless(&mut self) -> Result<Vec<EpisodeSummary>> {
        self.play(None)
    }

    fn play(&mut self, mut sink: Option<&mut TerminalSink>) -> Result<Vec<EpisodeSummary>> {
        let mut summaries = Vec::with_capacity(self.episodes);
        let threshold = self.env.config().win_threshold();

        for episode in 0..self.episodes {
            self.env.reset();
            if let Some(sink) = sink.as_deref_mut() {
                sink.metrics_mut().on_match_start();
            }

            let mut total_reward = 0.0;
            let mut steps = 0;

            let truncated = loop {
                let action = self.rng.gen_range(0..self.env.action_count());
                let (_obs, reward, done, info) = self.env.step(action)?;
                total_reward += reward;
                steps += 1;

                if let Some(sink) = sink.as_deref_mut() {
                    sink.metrics_mut().on_reward(reward);
                    if done {
                        sink.metrics_mut().on_match_over(&info.score, threshold);
                    }
                    self.env.render(sink, true)?;
                }

                if done || self.env.is_closed() {
                    break info.truncated;
                }
            };

            let summary = EpisodeSummary {
                episode,
                total_reward,
                steps,
                score: self.env.state().score,
                truncated,
            };
            tracing::info!(
                episode,
                total_reward,
                steps,
                player = summary.score.player,
                opponent = summary.score.opponent,
                truncated,
                "episode finished"
            );
            summaries.push(summary);

            if self.env.is_closed() {
                tracing::info!("display closed, stopping early");
                break;
            }
        }

        Ok(summaries)
    }
}
