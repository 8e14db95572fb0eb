//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time driven only, no clock source of its own
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{AabbHit, Direction, aabb_overlap, circle_aabb_hit};
pub use level::{Level, LevelError};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{Ball, Entity, GameEvent, GamePhase, GameState, PostFx};
pub use tick::{TickInput, tick};
