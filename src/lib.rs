//! Brickout - a classic brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, levels, power-ups)
//! - `render`: Draw-list contract consumed by an external sprite renderer
//! - `save`: Save/continue snapshots of the full game state
//! - `settings`: Player preferences
//!
//! The crate never touches a window, GPU, or audio device. A frontend feeds
//! `TickInput` into `sim::tick`, draws what `render::draw_list` returns, and
//! plays a clip per drained `GameEvent`.

pub mod render;
pub mod save;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels, origin top-left, +y down)
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Horizontal deflection strength of an off-center paddle hit
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);

    /// Power-up card dimensions and fall speed
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Paddle width gained per size power-up
    pub const PADDLE_WIDTH_BONUS: f32 = 50.0;
    /// Ball speed multiplier per speed power-up
    pub const BALL_SPEED_BONUS: f32 = 1.2;

    /// Screen shake duration after a solid-brick hit (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;
}
