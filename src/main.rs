use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pong_rl::game::GameConfig;
use pong_rl::modes::{HumanMode, RandomMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pong_rl")]
#[command(version, about = "Pong arena packaged as a reinforcement learning environment")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Registered environment id (random mode)
    #[arg(long, default_value = "turing-normal-v0")]
    env: String,

    /// JSON file with game parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arena width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Arena height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Number of episodes (random mode)
    #[arg(long, default_value = "1")]
    episodes: usize,

    /// Seed for the game's random source
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal display, logging to stderr (random mode)
    #[arg(long)]
    headless: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with keyboard controls against the scripted opponent
    Human,
    /// Watch a uniform-random agent drive the environment
    Random,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // The terminal modes draw on stderr
    if cli.headless && matches!(cli.mode, Mode::Random) {
        init_logging();
    }
    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.seed);
            human_mode.run().await?;
        }
        Mode::Random => {
            let mut random_mode = RandomMode::new(&cli.env, config, cli.episodes, cli.seed)?;
            if cli.headless {
                random_mode.run_headless()?;
            } else {
                let summaries = random_mode.run()?;
                for summary in &summaries {
                    println!(
                        "episode {}: return {:.0}, score {}-{}, {} steps",
                        summary.episode,
                        summary.total_reward,
                        summary.score.player,
                        summary.score.opponent,
                        summary.steps
                    );
                }
            }
        }
    }

    Ok(())
}
