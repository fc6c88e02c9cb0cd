use std::f32::consts::PI;

use rand::Rng;

use super::action::Action;
use super::config::{GameConfig, Params};

/// A point in arena (screen) coordinates: x grows right, y grows down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f32 {
        self.dx.hypot(self.dy)
    }
}

/// Which way a bar stands, and therefore which velocity component it reflects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Upright bar (playable paddles, side walls); reflects horizontal motion
    Vertical,
    /// Lying bar (top and bottom walls); reflects vertical motion
    Horizontal,
}

impl Orientation {
    /// Per-component multipliers applied to the ball velocity on contact
    pub fn reflection(&self) -> [f32; 2] {
        match self {
            Orientation::Vertical => [-1.0, 1.0],
            Orientation::Horizontal => [1.0, -1.0],
        }
    }
}

/// Latch driving the scripted opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PursuitState {
    #[default]
    Idle,
    PursuingUp,
    PursuingDown,
}

impl PursuitState {
    /// Start chasing a target; no direction when already level with it
    pub fn toward(from_y: f32, target_y: f32) -> Self {
        if target_y < from_y {
            PursuitState::PursuingUp
        } else if target_y > from_y {
            PursuitState::PursuingDown
        } else {
            PursuitState::Idle
        }
    }

    pub fn direction(&self) -> f32 {
        match self {
            PursuitState::Idle => 0.0,
            PursuitState::PursuingUp => -1.0,
            PursuitState::PursuingDown => 1.0,
        }
    }

    pub fn is_pursuing(&self) -> bool {
        !matches!(self, PursuitState::Idle)
    }
}

/// A rectangular bar: a playable paddle or a static boundary wall
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Centre of the bar
    pub position: Position,
    /// Extent along y
    pub length: f32,
    /// Extent along x
    pub width: f32,
    /// Distance moved per tick; zero for walls
    pub velocity: f32,
    pub orientation: Orientation,
    pub pursuit: PursuitState,
}

impl Paddle {
    pub fn new(
        position: Position,
        length: f32,
        width: f32,
        velocity: f32,
        orientation: Orientation,
    ) -> Self {
        Self {
            position,
            length,
            width,
            velocity,
            orientation,
            pursuit: PursuitState::Idle,
        }
    }

    /// Direct-command policy
    pub fn apply_action(&mut self, action: Action, arena_height: f32) {
        self.position.y += self.velocity * action.delta();
        self.clamp_y(arena_height);
    }

    /// Scripted pursuit policy for the opponent paddle.
    ///
    /// A pursuing paddle gives up with a small probability each tick. An idle
    /// one starts chasing once the ball has crossed into its side of the arena.
    pub fn pursue<R: Rng + ?Sized>(
        &mut self,
        ball: Position,
        arena_width: f32,
        arena_height: f32,
        rng: &mut R,
    ) {
        self.pursuit = match self.pursuit {
            PursuitState::Idle => {
                if ball.x >= arena_width * Params::PURSUIT_TRIGGER
                    && rng.r#gen::<f64>() < Params::PURSUIT_START_PROBABILITY
                {
                    PursuitState::toward(self.position.y, ball.y)
                } else {
                    PursuitState::Idle
                }
            }
            pursuing => {
                if rng.r#gen::<f64>() < Params::PURSUIT_STOP_PROBABILITY {
                    PursuitState::Idle
                } else {
                    pursuing
                }
            }
        };

        self.position.y += self.velocity * self.pursuit.direction();
        self.clamp_y(arena_height);
    }

    /// Axis-aligned containment test against the bar's extent
    pub fn contains(&self, point: Position) -> bool {
        (point.x - self.position.x).abs() <= self.width / 2.0
            && (point.y - self.position.y).abs() <= self.length / 2.0
    }

    fn clamp_y(&mut self, arena_height: f32) {
        self.position.y = self.position.y.clamp(0.0, arena_height);
    }
}

/// The ball: a circle with a constant-speed velocity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Position,
    pub radius: f32,
    pub velocity: Velocity,
    /// Velocity magnitude kept across serves
    pub speed: f32,
}

impl Ball {
    pub fn new(position: Position, radius: f32, speed: f32) -> Self {
        Self {
            position,
            radius,
            velocity: Velocity::default(),
            speed,
        }
    }

    /// Pick a fresh serve direction, avoiding near-horizontal and near-vertical shots
    pub fn reset_velocity<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = serve_angle(rng);
        self.velocity = Velocity::new(self.speed * angle.cos(), -self.speed * angle.sin());
    }

    pub fn advance(&mut self) {
        self.position.x += self.velocity.dx;
        self.position.y += self.velocity.dy;
    }

    /// Reflect off `paddle` if the ball centre lies inside it. Returns whether it did.
    pub fn bounce(&mut self, paddle: &Paddle) -> bool {
        if !paddle.contains(self.position) {
            return false;
        }
        let [mx, my] = paddle.orientation.reflection();
        self.velocity.dx *= mx;
        self.velocity.dy *= my;
        true
    }
}

/// Serve angle in radians: a first-quadrant angle in [π/8, π/3), mirrored
/// below the axis and/or rotated by π with even odds.
pub fn serve_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let mut angle = rng.gen_range(PI / 8.0..PI / 3.0);
    if rng.gen_bool(0.5) {
        angle = -angle;
    }
    if rng.gen_bool(0.5) {
        angle += PI;
    }
    angle
}

/// Which end of the table a point went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The controlled (left) paddle
    Player,
    /// The scripted (right) paddle
    Opponent,
}

impl Side {
    /// Reward sign for this side winning a point
    pub fn sign(&self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        }
    }
}

/// Points won by each side in the current match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    pub fn max(&self) -> u32 {
        self.player.max(self.opponent)
    }

    /// `[player, opponent]`
    pub fn as_array(&self) -> [u32; 2] {
        [self.player, self.opponent]
    }

    pub fn winner(&self, threshold: u32) -> Option<Side> {
        if self.player >= threshold {
            Some(Side::Player)
        } else if self.opponent >= threshold {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// Complete arena state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Player paddle, opponent paddle, then the top, bottom, left and right walls.
    /// Bounces are tested in this order.
    pub paddles: [Paddle; 6],
    pub ball: Ball,
    pub score: Score,
    /// Set once a side reaches the win threshold
    pub done: bool,
    pub arena_width: f32,
    pub arena_height: f32,
    /// Ticks simulated since the last full reset
    pub ticks: u64,
}

impl GameState {
    pub const PLAYER: usize = 0;
    pub const OPPONENT: usize = 1;

    /// Build the arena with everything centred and the ball at rest
    pub fn new(config: &GameConfig) -> Self {
        let w = config.arena_width();
        let h = config.arena_height();
        let v = config.bar_velocity;
        let t = Params::WALL_THICKNESS;

        let paddles = [
            Paddle::new(
                Position::new(Params::PADDLE_OFFSET, h / 2.0),
                Params::PADDLE_LENGTH,
                Params::PADDLE_WIDTH,
                v,
                Orientation::Vertical,
            ),
            Paddle::new(
                Position::new(w - Params::PADDLE_OFFSET, h / 2.0),
                Params::PADDLE_LENGTH,
                Params::PADDLE_WIDTH,
                v,
                Orientation::Vertical,
            ),
            Paddle::new(Position::new(w / 2.0, 0.0), t, w, 0.0, Orientation::Horizontal),
            Paddle::new(Position::new(w / 2.0, h), t, w, 0.0, Orientation::Horizontal),
            Paddle::new(Position::new(0.0, h / 2.0), h, t, 0.0, Orientation::Vertical),
            Paddle::new(Position::new(w, h / 2.0), h, t, 0.0, Orientation::Vertical),
        ];

        Self {
            paddles,
            ball: Ball::new(
                Position::new(w / 2.0, h / 2.0),
                Params::BALL_RADIUS,
                config.ball_velocity,
            ),
            score: Score::new(),
            done: false,
            arena_width: w,
            arena_height: h,
            ticks: 0,
        }
    }

    pub fn player(&self) -> &Paddle {
        &self.paddles[Self::PLAYER]
    }

    pub fn opponent(&self) -> &Paddle {
        &self.paddles[Self::OPPONENT]
    }

    /// The four boundary walls
    pub fn walls(&self) -> &[Paddle] {
        &self.paddles[2..]
    }

    /// Put the ball and the playable paddles back in their serving positions
    pub fn recenter(&mut self) {
        let (w, h) = (self.arena_width, self.arena_height);
        self.ball.position = Position::new(w / 2.0, h / 2.0);
        self.paddles[Self::PLAYER].position = Position::new(Params::PADDLE_OFFSET, h / 2.0);
        self.paddles[Self::OPPONENT].position =
            Position::new(w - Params::PADDLE_OFFSET, h / 2.0);
    }

    /// True while the ball is clear of both scoring margins
    pub fn is_in_play(&self) -> bool {
        let x = self.ball.position.x;
        Params::SCORE_MARGIN < x && x < self.arena_width - Params::SCORE_MARGIN
    }

    /// Side credited with the point once the ball leaves play. Anything past
    /// the left margin goes to the opponent, everything else to the player.
    pub fn scoring_side(&self) -> Side {
        if self.ball.position.x > Params::SCORE_MARGIN {
            Side::Player
        } else {
            Side::Opponent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    /// Every `gen::<f64>()` draw returns 0.0
    fn always_low() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every `gen::<f64>()` draw returns just under 1.0
    fn always_high() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn playable_paddle(y: f32) -> Paddle {
        Paddle::new(Position::new(385.0, y), 100.0, 8.0, 3.0, Orientation::Vertical)
    }

    fn left_paddle(y: f32) -> Paddle {
        Paddle::new(Position::new(15.0, y), 100.0, 8.0, 3.0, Orientation::Vertical)
    }

    #[test]
    fn test_action_moves_paddle() {
        let mut paddle = left_paddle(150.0);

        paddle.apply_action(Action::MoveDown, 300.0);
        assert_eq!(paddle.position.y, 153.0);

        paddle.apply_action(Action::MoveUp, 300.0);
        paddle.apply_action(Action::MoveUp, 300.0);
        assert_eq!(paddle.position.y, 147.0);

        paddle.apply_action(Action::Hold, 300.0);
        assert_eq!(paddle.position.y, 147.0);
    }

    #[test]
    fn test_paddle_clamped_to_arena() {
        let mut paddle = left_paddle(1.0);
        paddle.apply_action(Action::MoveUp, 300.0);
        assert_eq!(paddle.position.y, 0.0);

        paddle.position.y = 299.0;
        paddle.apply_action(Action::MoveDown, 300.0);
        assert_eq!(paddle.position.y, 300.0);
    }

    #[test]
    fn test_pursuit_starts_when_ball_crosses_trigger() {
        let mut paddle = playable_paddle(150.0);
        let mut rng = always_low();

        // Ball still on the far side: stays idle
        paddle.pursue(Position::new(100.0, 50.0), 400.0, 300.0, &mut rng);
        assert_eq!(paddle.pursuit, PursuitState::Idle);
        assert_eq!(paddle.position.y, 150.0);

        // Ball past 60% of the width and above the paddle
        paddle.pursue(Position::new(250.0, 50.0), 400.0, 300.0, &mut rng);
        assert_eq!(paddle.pursuit, PursuitState::PursuingUp);
        assert_eq!(paddle.position.y, 147.0);
    }

    #[test]
    fn test_pursuit_start_can_fail() {
        let mut paddle = playable_paddle(150.0);
        let mut rng = always_high();

        paddle.pursue(Position::new(300.0, 250.0), 400.0, 300.0, &mut rng);
        assert_eq!(paddle.pursuit, PursuitState::Idle);
        assert_eq!(paddle.position.y, 150.0);
    }

    #[test]
    fn test_pursuit_keeps_direction_until_stop_draw() {
        let mut paddle = playable_paddle(150.0);
        paddle.pursuit = PursuitState::PursuingDown;

        // High draws never stop, even when the ball is back on the far side
        let mut rng = always_high();
        paddle.pursue(Position::new(10.0, 0.0), 400.0, 300.0, &mut rng);
        assert_eq!(paddle.pursuit, PursuitState::PursuingDown);
        assert_eq!(paddle.position.y, 153.0);

        // A low draw stops it on the spot
        let mut rng = always_low();
        paddle.pursue(Position::new(10.0, 0.0), 400.0, 300.0, &mut rng);
        assert_eq!(paddle.pursuit, PursuitState::Idle);
        assert_eq!(paddle.position.y, 153.0);
    }

    #[test]
    fn test_pursuit_level_with_ball_stays_idle() {
        let mut paddle = playable_paddle(150.0);
        let mut rng = always_low();

        paddle.pursue(Position::new(300.0, 150.0), 400.0, 300.0, &mut rng);
        assert_eq!(paddle.pursuit, PursuitState::Idle);
        assert_eq!(paddle.position.y, 150.0);
    }

    #[test]
    fn test_pursuit_stays_in_bounds() {
        let mut paddle = playable_paddle(2.0);
        paddle.pursuit = PursuitState::PursuingUp;
        let mut rng = always_high();

        for _ in 0..10 {
            paddle.pursue(Position::new(300.0, 0.0), 400.0, 300.0, &mut rng);
            assert!((0.0..=300.0).contains(&paddle.position.y));
        }
        assert_eq!(paddle.position.y, 0.0);
    }

    #[test]
    fn test_reflection_table() {
        let upright = left_paddle(150.0);
        let mut ball = Ball::new(Position::new(15.0, 150.0), 10.0, 2.0);
        ball.velocity = Velocity::new(1.0, 1.0);
        assert!(ball.bounce(&upright));
        assert_eq!(ball.velocity, Velocity::new(-1.0, 1.0));

        let top = Paddle::new(
            Position::new(200.0, 0.0),
            5.0,
            400.0,
            0.0,
            Orientation::Horizontal,
        );
        let mut ball = Ball::new(Position::new(200.0, 1.0), 10.0, 2.0);
        ball.velocity = Velocity::new(1.0, 1.0);
        assert!(ball.bounce(&top));
        assert_eq!(ball.velocity, Velocity::new(1.0, -1.0));
    }

    #[test]
    fn test_no_bounce_outside_bar() {
        let upright = left_paddle(150.0);
        let mut ball = Ball::new(Position::new(20.0, 150.0), 10.0, 2.0);
        ball.velocity = Velocity::new(-1.0, 1.0);

        assert!(!ball.bounce(&upright));
        assert_eq!(ball.velocity, Velocity::new(-1.0, 1.0));
    }

    #[test]
    fn test_containment_edges_inclusive() {
        let paddle = left_paddle(150.0);
        assert!(paddle.contains(Position::new(19.0, 200.0)));
        assert!(paddle.contains(Position::new(11.0, 100.0)));
        assert!(!paddle.contains(Position::new(19.5, 150.0)));
        assert!(!paddle.contains(Position::new(15.0, 200.5)));
    }

    #[test]
    fn test_bounce_preserves_speed() {
        let mut rng = StdRng::seed_from_u64(7);
        let paddle = Paddle::new(
            Position::new(0.0, 0.0),
            10.0,
            10.0,
            0.0,
            Orientation::Horizontal,
        );

        let mut ball = Ball::new(Position::new(0.0, 0.0), 10.0, 2.0);
        ball.reset_velocity(&mut rng);
        let before = ball.velocity;

        ball.bounce(&paddle);
        assert_eq!(ball.velocity.dx, before.dx);
        assert_eq!(ball.velocity.dy, -before.dy);
        assert!((ball.velocity.magnitude() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_advance_preserves_speed() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut ball = Ball::new(Position::new(200.0, 150.0), 10.0, 2.0);
        ball.reset_velocity(&mut rng);
        let velocity = ball.velocity;

        for step in 1..=50 {
            ball.advance();
            assert_eq!(ball.velocity, velocity);
            let expected_x = 200.0 + velocity.dx * step as f32;
            assert!((ball.position.x - expected_x).abs() < 1e-3);
        }
        assert!((ball.velocity.magnitude() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_serve_angle_avoids_flat_and_steep_shots() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ball = Ball::new(Position::new(200.0, 150.0), 10.0, 2.0);
        let mut quadrants = [false; 4];

        for _ in 0..1000 {
            ball.reset_velocity(&mut rng);
            let Velocity { dx, dy } = ball.velocity;

            assert!((ball.velocity.magnitude() - 2.0).abs() < 1e-5);

            let folded = (dy.abs() / dx.abs()).atan();
            assert!(folded >= PI / 8.0 - 1e-4, "too flat: {folded}");
            assert!(folded <= PI / 3.0 + 1e-4, "too steep: {folded}");

            let idx = (dx < 0.0) as usize * 2 + (dy < 0.0) as usize;
            quadrants[idx] = true;
        }

        assert!(quadrants.iter().all(|&q| q), "every quadrant should be served");
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::new();
        for _ in 0..3 {
            score.increment(Side::Opponent);
        }
        assert_eq!(score.winner(4), None);
        assert_eq!(score.as_array(), [0, 3]);

        score.increment(Side::Opponent);
        assert_eq!(score.winner(4), Some(Side::Opponent));
        assert_eq!(score.max(), 4);
    }

    #[test]
    fn test_arena_layout() {
        let state = GameState::new(&GameConfig::default());

        assert_eq!(state.player().position, Position::new(15.0, 150.0));
        assert_eq!(state.opponent().position, Position::new(385.0, 150.0));
        assert_eq!(state.ball.position, Position::new(200.0, 150.0));
        assert_eq!(state.walls().len(), 4);
        assert!(state.walls().iter().all(|w| w.velocity == 0.0));
        assert_eq!(state.paddles[2].orientation, Orientation::Horizontal);
        assert_eq!(state.paddles[3].position, Position::new(200.0, 300.0));
        assert_eq!(state.paddles[4].orientation, Orientation::Vertical);
        assert_eq!(state.paddles[5].position, Position::new(400.0, 150.0));
    }

    #[test]
    fn test_scoring_margins() {
        let mut state = GameState::new(&GameConfig::default());

        state.ball.position.x = 5.0;
        assert!(state.is_in_play());

        state.ball.position.x = 4.0;
        assert!(!state.is_in_play());
        assert_eq!(state.scoring_side(), Side::Opponent);

        state.ball.position.x = 396.0;
        assert!(!state.is_in_play());
        assert_eq!(state.scoring_side(), Side::Player);
    }
}
