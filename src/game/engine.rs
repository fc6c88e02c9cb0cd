use super::{
    action::Action,
    config::GameConfig,
    error::{PongError, Result},
    state::{GameState, Score, Side},
};
use rand::{SeedableRng, rngs::StdRng};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Side that won a point during the step, if any
    pub scored: Option<Side>,
    /// Score after the step
    pub score: Score,
    /// Ticks actually simulated (fewer than `repeat_actions` if the match ended)
    pub ticks: usize,
    /// Episode cut short by a step limit rather than by the match ending
    pub truncated: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward accumulated over the step (for RL training)
    pub reward: f32,
    /// Whether the match has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with an entropy-seeded random source
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a game engine whose serves and opponent decisions are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new match: scores cleared, everything centred, fresh serve
    pub fn reset(&mut self) -> GameState {
        let mut state = GameState::new(&self.config);
        state.ball.reset_velocity(&mut self.rng);
        state
    }

    /// Advance `repeat_actions` ticks with the same action, stopping early
    /// if the match ends
    pub fn step(&mut self, state: &mut GameState, action: Action) -> Result<StepResult> {
        if state.done {
            return Err(PongError::MatchOver);
        }

        let mut reward = 0.0;
        let mut scored = None;
        let mut ticks = 0;

        for _ in 0..self.config.repeat_actions {
            let tick = self.tick(state, action)?;
            reward += tick.reward;
            scored = tick.info.scored.or(scored);
            ticks += 1;

            if tick.terminated {
                break;
            }
        }

        Ok(StepResult {
            reward,
            terminated: state.done,
            info: StepInfo {
                scored,
                score: state.score,
                ticks,
                truncated: false,
            },
        })
    }

    /// Simulate a single tick
    pub fn tick(&mut self, state: &mut GameState, action: Action) -> Result<StepResult> {
        if state.done {
            return Err(PongError::MatchOver);
        }

        let (w, h) = (state.arena_width, state.arena_height);

        state.paddles[GameState::PLAYER].apply_action(action, h);
        let ball = state.ball.position;
        state.paddles[GameState::OPPONENT].pursue(ball, w, h, &mut self.rng);

        state.ball.advance();

        // Not exclusive: a ball in a corner can reflect off two bars at once
        for paddle in &state.paddles {
            state.ball.bounce(paddle);
        }

        state.ticks += 1;
        tracing::trace!(
            tick = state.ticks,
            x = state.ball.position.x,
            y = state.ball.position.y,
            "tick"
        );

        let mut reward = 0.0;
        let mut scored = None;

        if !state.is_in_play() {
            let side = state.scoring_side();
            state.score.increment(side);
            reward = self.config.point_reward * side.sign();
            scored = Some(side);

            if state.score.winner(self.config.win_threshold()).is_some() {
                state.done = true;
                reward += self.config.match_reward * side.sign();
                tracing::info!(
                    winner = ?side,
                    player = state.score.player,
                    opponent = state.score.opponent,
                    "match over"
                );
            } else {
                tracing::debug!(
                    side = ?side,
                    player = state.score.player,
                    opponent = state.score.opponent,
                    "point scored"
                );
            }

            self.serve(state);
        }

        Ok(StepResult {
            reward,
            terminated: state.done,
            info: StepInfo {
                scored,
                score: state.score,
                ticks: 1,
                truncated: false,
            },
        })
    }

    /// Recentre for the next point, keeping the score
    fn serve(&mut self, state: &mut GameState) {
        state.recenter();
        state.ball.reset_velocity(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Position, PursuitState, Velocity};

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 1234)
    }

    /// Park the ball just outside the left margin so the next tick scores for the opponent
    fn park_left(state: &mut GameState) {
        state.ball.position = Position::new(3.0, 150.0);
        state.ball.velocity = Velocity::default();
    }

    fn park_right(state: &mut GameState) {
        state.ball.position = Position::new(state.arena_width - 3.0, 150.0);
        state.ball.velocity = Velocity::default();
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert!(!state.done);
        assert_eq!(state.score, Score::new());
        assert_eq!(state.ticks, 0);
        assert_eq!(state.ball.position, Position::new(200.0, 150.0));
        assert!((state.ball.velocity.magnitude() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_single_tick_action_mapping() {
        let mut engine = engine();

        for (action, expected_y) in [
            (Action::Hold, 150.0),
            (Action::MoveDown, 153.0),
            (Action::MoveUp, 147.0),
        ] {
            let mut state = engine.reset();
            engine.tick(&mut state, action).unwrap();
            assert_eq!(state.player().position.y, expected_y);
        }
    }

    #[test]
    fn test_step_repeats_action() {
        let mut engine = engine();
        let mut state = engine.reset();

        let result = engine.step(&mut state, Action::MoveDown).unwrap();

        assert_eq!(result.info.ticks, 3);
        assert_eq!(state.ticks, 3);
        assert_eq!(state.player().position.y, 159.0);
        assert_eq!(result.reward, 0.0);
        assert!(!result.terminated);
    }

    #[test]
    fn test_ball_moves_each_tick() {
        let mut engine = engine();
        let mut state = engine.reset();
        let start = state.ball.position;
        let velocity = state.ball.velocity;

        engine.tick(&mut state, Action::Hold).unwrap();

        assert!((state.ball.position.x - (start.x + velocity.dx)).abs() < 1e-5);
        assert!((state.ball.position.y - (start.y + velocity.dy)).abs() < 1e-5);
    }

    #[test]
    fn test_opponent_scores_past_left_margin() {
        let mut engine = engine();
        let mut state = engine.reset();

        for expected in 1..=3 {
            park_left(&mut state);
            let result = engine.tick(&mut state, Action::Hold).unwrap();

            assert_eq!(result.reward, -500.0);
            assert_eq!(result.info.scored, Some(Side::Opponent));
            assert!(!result.terminated);
            assert_eq!(state.score.as_array(), [0, expected]);
            // Served again from the centre
            assert_eq!(state.ball.position, Position::new(200.0, 150.0));
        }

        park_left(&mut state);
        let result = engine.tick(&mut state, Action::Hold).unwrap();

        assert_eq!(state.score.as_array(), [0, 4]);
        assert!(result.terminated);
        assert!(state.done);
        assert_eq!(result.reward, -2500.0);
    }

    #[test]
    fn test_player_scores_past_right_margin() {
        let mut engine = engine();
        let mut state = engine.reset();

        park_right(&mut state);
        let result = engine.tick(&mut state, Action::Hold).unwrap();

        assert_eq!(result.reward, 500.0);
        assert_eq!(result.info.scored, Some(Side::Player));
        assert_eq!(state.score.as_array(), [1, 0]);
    }

    #[test]
    fn test_point_resets_positions_but_keeps_score() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.score.player = 2;
        state.paddles[GameState::PLAYER].position.y = 10.0;
        state.paddles[GameState::OPPONENT].position.y = 290.0;

        park_right(&mut state);
        engine.tick(&mut state, Action::Hold).unwrap();

        assert_eq!(state.score.as_array(), [3, 0]);
        assert_eq!(state.player().position, Position::new(15.0, 150.0));
        assert_eq!(state.opponent().position, Position::new(385.0, 150.0));
    }

    #[test]
    fn test_winning_point_stops_step_early() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.score.player = 3;

        park_right(&mut state);
        let result = engine.step(&mut state, Action::Hold).unwrap();

        assert!(result.terminated);
        assert_eq!(result.info.ticks, 1);
        assert_eq!(result.reward, 2500.0);
        assert_eq!(result.info.scored, Some(Side::Player));
    }

    #[test]
    fn test_non_winning_point_inside_step() {
        let mut engine = engine();
        let mut state = engine.reset();

        park_left(&mut state);
        let result = engine.step(&mut state, Action::Hold).unwrap();

        assert!(!result.terminated);
        assert_eq!(result.info.ticks, 3);
        assert_eq!(result.reward, -500.0);
        assert_eq!(result.info.score.as_array(), [0, 1]);
    }

    #[test]
    fn test_terminated_match_rejects_steps() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.done = true;
        let ticks_before = state.ticks;

        assert!(matches!(
            engine.step(&mut state, Action::Hold),
            Err(PongError::MatchOver)
        ));
        assert!(matches!(
            engine.tick(&mut state, Action::Hold),
            Err(PongError::MatchOver)
        ));
        assert_eq!(state.ticks, ticks_before);
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.ball.position = Position::new(200.0, 2.0);
        state.ball.velocity = Velocity::new(1.0, -1.0);

        engine.tick(&mut state, Action::Hold).unwrap();

        assert_eq!(state.ball.velocity, Velocity::new(1.0, 1.0));
    }

    #[test]
    fn test_ball_bounces_off_player_paddle() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.ball.position = Position::new(20.0, 150.0);
        state.ball.velocity = Velocity::new(-2.0, 0.5);

        engine.tick(&mut state, Action::Hold).unwrap();

        assert_eq!(state.ball.velocity, Velocity::new(2.0, 0.5));
    }

    #[test]
    fn test_corner_reflects_off_both_walls() {
        let mut state = engine().reset();
        // Inside both the top wall and the left wall, clear of the player paddle
        state.ball.position = Position::new(1.0, 1.0);
        state.ball.velocity = Velocity::new(-0.5, -0.5);

        let hits = state
            .paddles
            .iter()
            .filter(|paddle| state.ball.clone().bounce(paddle))
            .count();
        assert_eq!(hits, 2);

        for paddle in &state.paddles {
            state.ball.bounce(paddle);
        }
        assert_eq!(state.ball.velocity, Velocity::new(0.5, 0.5));
    }

    #[test]
    fn test_paddles_stay_in_bounds_over_long_rallies() {
        let mut engine = engine();
        let mut state = engine.reset();

        for i in 0..5000 {
            let action = Action::ALL[i % 7 % 3];
            match engine.tick(&mut state, action) {
                Ok(_) => {}
                Err(PongError::MatchOver) => state = engine.reset(),
                Err(e) => panic!("unexpected error: {e}"),
            }
            for paddle in &state.paddles[..2] {
                assert!((0.0..=state.arena_height).contains(&paddle.position.y));
            }
            assert!((state.ball.velocity.magnitude() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = GameEngine::with_seed(GameConfig::default(), 99);
        let mut b = GameEngine::with_seed(GameConfig::default(), 99);
        let mut sa = a.reset();
        let mut sb = b.reset();

        for _ in 0..500 {
            if sa.done {
                break;
            }
            let ra = a.step(&mut sa, Action::MoveUp).unwrap();
            let rb = b.step(&mut sb, Action::MoveUp).unwrap();
            assert_eq!(ra, rb);
        }
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_full_reset_clears_pursuit() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.paddles[GameState::OPPONENT].pursuit = PursuitState::PursuingDown;

        park_right(&mut state);
        engine.tick(&mut state, Action::Hold).unwrap();
        assert_eq!(state.opponent().position.y, 150.0);

        let state = engine.reset();
        assert_eq!(state.opponent().pursuit, PursuitState::Idle);
    }
}
