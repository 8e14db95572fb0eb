//! Draw-list contract for the external sprite renderer
//!
//! The simulation never draws; it describes. `draw_list` walks the game state
//! and emits one sprite instance per visible entity, in back-to-front order.
//! The frontend resolves each [`TextureKey`] to whatever image it loaded and
//! applies the post-processing switches from [`PostFx`](crate::sim::PostFx).

use glam::{Vec2, Vec3};

use crate::sim::{GameState, PowerUpKind};

/// Names for the texture slots the frontend is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKey {
    Background,
    Ball,
    Block,
    SolidBlock,
    Paddle,
    PowerUp(PowerUpKind),
}

/// A textured, tinted, rotated axis-aligned quad
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub texture: TextureKey,
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    pub color: Vec3,
}

impl Sprite {
    fn of(texture: TextureKey, pos: Vec2, size: Vec2, rotation: f32, color: Vec3) -> Self {
        Self {
            texture,
            pos,
            size,
            rotation,
            color,
        }
    }
}

/// Build the frame's draw list: background, bricks, paddle, power-ups, ball.
/// Destroyed entities are skipped.
pub fn draw_list(state: &GameState) -> Vec<Sprite> {
    let mut sprites = Vec::new();

    sprites.push(Sprite::of(
        TextureKey::Background,
        Vec2::ZERO,
        Vec2::new(state.width, state.height),
        0.0,
        Vec3::ONE,
    ));

    if let Some(level) = state.current_level() {
        for brick in &level.bricks {
            if brick.destroyed {
                continue;
            }
            let texture = if brick.solid {
                TextureKey::SolidBlock
            } else {
                TextureKey::Block
            };
            sprites.push(Sprite::of(
                texture,
                brick.pos,
                brick.size,
                brick.rotation,
                brick.color,
            ));
        }
    }

    sprites.push(Sprite::of(
        TextureKey::Paddle,
        state.paddle.pos,
        state.paddle.size,
        state.paddle.rotation,
        state.paddle.color,
    ));

    for card in &state.powerups {
        if card.body.destroyed {
            continue;
        }
        sprites.push(Sprite::of(
            TextureKey::PowerUp(card.kind),
            card.body.pos,
            card.body.size,
            card.body.rotation,
            card.body.color,
        ));
    }

    sprites.push(Sprite::of(
        TextureKey::Ball,
        state.ball.body.pos,
        state.ball.body.size,
        state.ball.body.rotation,
        state.ball.body.color,
    ));

    sprites
}
