//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::powerup::{PowerUp, PowerUpKind};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level select, waiting for start input
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared, waiting for confirm input
    Win,
}

/// Spatial body shared by every game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Tint applied to the sprite
    pub color: Vec3,
    /// Rotation in degrees
    pub rotation: f32,
    /// Indestructible (solid bricks)
    pub solid: bool,
    /// Logically removed; skipped by update/draw/collision
    pub destroyed: bool,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self::colored(pos, size, Vec3::ONE)
    }

    pub fn colored(pos: Vec2, size: Vec2, color: Vec3) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            color,
            rotation: 0.0,
            solid: false,
            destroyed: false,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Entity,
    /// Immutable after construction
    pub radius: f32,
    /// Riding the paddle instead of moving under its own velocity
    pub stuck: bool,
    /// Re-sticks to the paddle on contact (sticky power-up)
    pub sticky: bool,
    /// Skips collision response against destructible bricks
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        let mut body = Entity::new(pos, Vec2::splat(radius * 2.0));
        body.vel = vel;
        Self {
            body,
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Center of the ball in world coordinates
    pub fn center(&self) -> Vec2 {
        self.body.pos + self.radius
    }

    /// Advance the ball by one timestep and bounce off the left, right, and
    /// top edges. The bottom edge is deliberately open: falling past it is
    /// the loss condition, detected by the controller.
    pub fn advance(&mut self, dt: f32, window_width: f32) -> Vec2 {
        if !self.stuck {
            self.body.pos += self.body.vel * dt;

            if self.body.pos.x <= 0.0 {
                self.body.vel.x = -self.body.vel.x;
                self.body.pos.x = 0.0;
            } else if self.body.pos.x + self.body.size.x >= window_width {
                self.body.vel.x = -self.body.vel.x;
                self.body.pos.x = window_width - self.body.size.x;
            }

            if self.body.pos.y <= 0.0 {
                self.body.vel.y = -self.body.vel.y;
                self.body.pos.y = 0.0;
            }
        }

        self.body.pos
    }

    /// Put the ball back on the paddle with a fresh velocity
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.body.color = Vec3::ONE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

/// Post-processing switches mirrored by the external frontend
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PostFx {
    /// Remaining shake time in seconds
    pub shake_time: f32,
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// Fire-and-forget events for the audio/effects frontend, drained each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball launched off the paddle
    BallLaunched,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// A destructible brick was destroyed
    BrickDestroyed { pos: Vec2 },
    /// Ball hit an indestructible brick
    SolidBrickHit,
    /// The paddle caught a falling power-up card
    PowerUpCollected { kind: PowerUpKind },
    /// Ball fell past the bottom edge
    BallLost,
    /// Every destructible brick in the active level is gone
    LevelComplete { level: usize },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG for power-up spawn rolls, owned by the state so runs replay
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Playfield dimensions in pixels
    pub width: f32,
    pub height: f32,
    /// Loaded levels; `level_index` selects the active one
    pub levels: Vec<Level>,
    pub level_index: usize,
    /// Player paddle
    pub paddle: Entity,
    /// The ball
    pub ball: Ball,
    /// Falling and collected-but-ticking power-ups
    pub powerups: Vec<PowerUp>,
    /// Post-processing effect state
    pub fx: PostFx,
    /// Events emitted this tick (transient, not persisted)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and playfield size.
    /// Levels are added separately with [`GameState::add_level`].
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let paddle_pos = Vec2::new(width / 2.0 - PADDLE_SIZE.x / 2.0, height - PADDLE_SIZE.y);
        let ball_pos =
            paddle_pos + Vec2::new(PADDLE_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            width,
            height,
            levels: Vec::new(),
            level_index: 0,
            paddle: Entity::new(paddle_pos, PADDLE_SIZE),
            ball: Ball::new(ball_pos, BALL_RADIUS, INITIAL_BALL_VELOCITY),
            powerups: Vec::new(),
            fx: PostFx::default(),
            events: Vec::new(),
        }
    }

    pub fn add_level(&mut self, level: Level) {
        self.levels.push(level);
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.levels.get(self.level_index)
    }

    /// Rebuild the active level's bricks from its tile grid
    pub fn reset_current_level(&mut self) {
        if let Some(level) = self.levels.get_mut(self.level_index) {
            level.reset();
        }
    }

    /// Restore the paddle and ball to their starting state and clear every
    /// power-up, flag, tint, and post effect
    pub fn reset_player(&mut self) {
        self.paddle.size = PADDLE_SIZE;
        self.paddle.pos = Vec2::new(
            self.width / 2.0 - PADDLE_SIZE.x / 2.0,
            self.height - PADDLE_SIZE.y,
        );
        self.paddle.color = Vec3::ONE;

        let ball_pos = self.paddle.pos
            + Vec2::new(PADDLE_SIZE.x / 2.0 - self.ball.radius, -self.ball.radius * 2.0);
        self.ball.reset(ball_pos, INITIAL_BALL_VELOCITY);

        self.powerups.clear();
        self.fx = PostFx::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stuck_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 12.5, Vec2::new(100.0, -350.0));
        assert!(ball.stuck);

        let pos = ball.advance(1.0, 800.0);
        assert_eq!(pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_ball_bounces_off_left_edge() {
        let mut ball = Ball::new(Vec2::new(5.0, 100.0), 12.5, Vec2::new(-200.0, 0.0));
        ball.stuck = false;

        ball.advance(0.1, 800.0);
        assert_eq!(ball.body.pos.x, 0.0);
        assert!(ball.body.vel.x > 0.0);
    }

    #[test]
    fn test_ball_bounces_off_right_edge() {
        let mut ball = Ball::new(Vec2::new(770.0, 100.0), 12.5, Vec2::new(200.0, 0.0));
        ball.stuck = false;

        ball.advance(0.1, 800.0);
        assert_eq!(ball.body.pos.x, 800.0 - 25.0);
        assert!(ball.body.vel.x < 0.0);
    }

    #[test]
    fn test_ball_bounces_off_top_edge() {
        let mut ball = Ball::new(Vec2::new(400.0, 3.0), 12.5, Vec2::new(0.0, -300.0));
        ball.stuck = false;

        ball.advance(0.1, 800.0);
        assert_eq!(ball.body.pos.y, 0.0);
        assert!(ball.body.vel.y > 0.0);
    }

    #[test]
    fn test_ball_falls_past_bottom_unclamped() {
        // No bottom clamp: the controller detects the loss condition
        let mut ball = Ball::new(Vec2::new(400.0, 590.0), 12.5, Vec2::new(0.0, 300.0));
        ball.stuck = false;

        ball.advance(0.1, 800.0);
        assert!(ball.body.pos.y > 600.0);
        assert!(ball.body.vel.y > 0.0);
    }

    #[test]
    fn test_reset_player_restores_defaults() {
        let mut state = GameState::new(7, WINDOW_WIDTH, WINDOW_HEIGHT);
        state.paddle.size.x += 50.0;
        state.ball.sticky = true;
        state.ball.pass_through = true;
        state.fx.chaos = true;
        state.powerups.push(PowerUp::new(PowerUpKind::Speed, Vec2::ZERO));

        state.reset_player();

        assert_eq!(state.paddle.size, PADDLE_SIZE);
        assert!(state.ball.stuck);
        assert!(!state.ball.sticky);
        assert!(!state.ball.pass_through);
        assert!(!state.fx.chaos);
        assert!(state.powerups.is_empty());
    }

    proptest! {
        /// Advancing a free ball from a position inside the playfield never
        /// leaves it outside [0, width - size] horizontally or above y = 0,
        /// and any boundary snap flips the matching velocity sign.
        #[test]
        fn ball_stays_in_bounds(
            x in 0.0f32..775.0,
            y in 0.0f32..600.0,
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            dt in 0.0f32..0.1,
        ) {
            let width = 800.0;
            let mut ball = Ball::new(Vec2::new(x, y), 12.5, Vec2::new(vx, vy));
            ball.stuck = false;

            ball.advance(dt, width);

            prop_assert!(ball.body.pos.x >= 0.0);
            prop_assert!(ball.body.pos.x + ball.body.size.x <= width);
            prop_assert!(ball.body.pos.y >= 0.0);

            // A snap to the left/right edge must have flipped the sign
            if ball.body.pos.x == 0.0 && vx != 0.0 {
                prop_assert!(ball.body.vel.x == -vx);
            }
            if ball.body.pos.y == 0.0 && vy != 0.0 {
                prop_assert!(ball.body.vel.y == -vy);
            }
        }
    }
}
