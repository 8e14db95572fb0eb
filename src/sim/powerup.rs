//! Power-up kinds, spawn rolls, and the falling card entity
//!
//! Lifecycle: spawned at a destroyed brick, falls toward the paddle, activates
//! on paddle contact, then counts its duration down until the effect reverts.
//! Collection and expiry are driven by the tick loop; this module owns the
//! per-kind data.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Entity;
use crate::consts::{POWERUP_SIZE, POWERUP_VELOCITY};

/// The six power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Ball velocity +20%
    Speed,
    /// Ball re-sticks to the paddle on contact
    Sticky,
    /// Ball passes through destructible bricks
    PassThrough,
    /// Paddle widens by a fixed amount
    PadSizeIncrease,
    /// Confuse post effect (negative)
    Confuse,
    /// Chaos post effect (negative)
    Chaos,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Effect duration in seconds. Zero marks a one-shot kind whose effect is
    /// permanent until the level resets.
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Confuse => 15.0,
            PowerUpKind::Chaos => 15.0,
        }
    }

    /// Card tint
    pub fn color(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    /// Negative effects hinder the player and spawn more often
    pub fn is_negative(self) -> bool {
        matches!(self, PowerUpKind::Confuse | PowerUpKind::Chaos)
    }

    /// Spawn odds as 1-in-N per destroyed brick
    pub fn spawn_odds(self) -> u32 {
        if self.is_negative() { 15 } else { 75 }
    }
}

/// A falling (or collected and still ticking) power-up card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Entity,
    pub kind: PowerUpKind,
    /// Remaining effect time; counts down only while activated
    pub duration: f32,
    /// Collected by the paddle and currently in effect
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        let mut body = Entity::colored(pos, POWERUP_SIZE, kind.color());
        body.vel = POWERUP_VELOCITY;
        Self {
            body,
            kind,
            duration: kind.duration(),
            activated: false,
        }
    }
}

/// Roll spawn odds for every kind independently at a destroyed brick's
/// position. More than one kind may spawn from a single brick.
pub fn spawn_rolls(rng: &mut Pcg32, brick_pos: Vec2) -> Vec<PowerUp> {
    let mut spawned = Vec::new();
    for kind in PowerUpKind::ALL {
        if rng.random_ratio(1, kind.spawn_odds()) {
            spawned.push(PowerUp::new(kind, brick_pos));
        }
    }
    spawned
}
