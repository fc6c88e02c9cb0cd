use std::time::{Duration, Instant};

use crate::game::{Score, Side};

/// Session statistics shown by the interactive modes
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub matches_played: u32,
    pub player_wins: u32,
    pub opponent_wins: u32,
    /// Sum of rewards in the current episode
    pub episode_return: f32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            matches_played: 0,
            player_wins: 0,
            opponent_wins: 0,
            episode_return: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_match_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.episode_return = 0.0;
    }

    pub fn on_reward(&mut self, reward: f32) {
        self.episode_return += reward;
    }

    pub fn on_match_over(&mut self, score: &Score, threshold: u32) {
        self.matches_played += 1;
        match score.winner(threshold) {
            Some(Side::Player) => self.player_wins += 1,
            Some(Side::Opponent) => self.opponent_wins += 1,
            None => {}
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
