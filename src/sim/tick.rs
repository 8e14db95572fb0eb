//! Per-frame simulation tick
//!
//! Single entry point that advances the game by one timestep: input handling,
//! ball movement, collision resolution, power-up lifecycle, loss and win
//! conditions. Every decision in here is a boolean/enum branch that runs
//! exactly once per tick.

use glam::{Vec2, Vec3};

use super::collision::{self, Direction};
use super::powerup::{self, PowerUp, PowerUpKind};
use super::state::{Ball, Entity, GameEvent, GamePhase, GameState, PostFx};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the paddle left (and a stuck ball with it)
    pub move_left: bool,
    /// Move the paddle right
    pub move_right: bool,
    /// Launch the ball; doubles as menu-start and win-confirm
    pub launch: bool,
    /// Cycle the selected level forward while in the menu
    pub menu_next: bool,
    /// Cycle the selected level backward
    pub menu_prev: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    match state.phase {
        GamePhase::Menu => menu_tick(state, input),
        GamePhase::Win => win_tick(state, input),
        GamePhase::Active => active_tick(state, input, dt),
    }
}

fn menu_tick(state: &mut GameState, input: &TickInput) {
    if state.levels.is_empty() {
        return;
    }
    if input.menu_next {
        state.level_index = (state.level_index + 1) % state.levels.len();
    }
    if input.menu_prev {
        state.level_index = (state.level_index + state.levels.len() - 1) % state.levels.len();
    }
    if input.launch {
        log::info!("starting level {}", state.level_index);
        state.phase = GamePhase::Active;
    }
}

fn win_tick(state: &mut GameState, input: &TickInput) {
    if input.launch {
        state.fx.chaos = false;
        state.phase = GamePhase::Menu;
    }
}

fn active_tick(state: &mut GameState, input: &TickInput, dt: f32) {
    process_input(state, input, dt);

    state.ball.advance(dt, state.width);

    resolve_brick_collisions(state);
    resolve_paddle_bounce(state);
    update_powerups(state, dt);

    // Shake runs on accumulated frame time, same as power-up durations
    if state.fx.shake_time > 0.0 {
        state.fx.shake_time -= dt;
        if state.fx.shake_time <= 0.0 {
            state.fx.shake = false;
        }
    }

    // Loss: ball fell past the bottom edge
    if state.ball.body.pos.y >= state.height {
        log::info!("ball lost, resetting level {}", state.level_index);
        state.events.push(GameEvent::BallLost);
        state.reset_current_level();
        state.reset_player();
    }

    // Win: every destructible brick destroyed
    if state.phase == GamePhase::Active
        && state.current_level().is_some_and(|level| level.is_complete())
    {
        let level = state.level_index;
        log::info!("level {level} complete");
        state.events.push(GameEvent::LevelComplete { level });
        state.reset_current_level();
        state.reset_player();
        // Victory flourish mirrored by the frontend until the win is confirmed
        state.fx.chaos = true;
        state.phase = GamePhase::Win;
    }
}

fn process_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let velocity = PADDLE_SPEED * dt;

    if input.move_left && state.paddle.pos.x >= 0.0 {
        state.paddle.translate(Vec2::new(-velocity, 0.0));
        if state.ball.stuck {
            state.ball.body.translate(Vec2::new(-velocity, 0.0));
        }
    }
    if input.move_right && state.paddle.pos.x <= state.width - state.paddle.size.x {
        state.paddle.translate(Vec2::new(velocity, 0.0));
        if state.ball.stuck {
            state.ball.body.translate(Vec2::new(velocity, 0.0));
        }
    }
    if input.launch && state.ball.stuck {
        state.ball.stuck = false;
        state.events.push(GameEvent::BallLaunched);
    }
}

fn resolve_brick_collisions(state: &mut GameState) {
    let GameState {
        levels,
        level_index,
        ball,
        powerups,
        rng,
        fx,
        events,
        ..
    } = state;
    let Some(level) = levels.get_mut(*level_index) else {
        return;
    };

    for brick in level.bricks.iter_mut() {
        if brick.destroyed {
            continue;
        }
        let hit = collision::circle_aabb_hit(ball, brick);
        if !hit.collided {
            continue;
        }

        if !brick.solid {
            brick.destroyed = true;
            events.push(GameEvent::BrickDestroyed { pos: brick.pos });
            powerups.extend(powerup::spawn_rolls(rng, brick.pos));
        } else {
            // Solid bricks shake the screen instead of breaking
            fx.shake_time = SHAKE_DURATION;
            fx.shake = true;
            events.push(GameEvent::SolidBrickHit);
        }

        // Pass-through skips the bounce against destructible bricks; the
        // destruction and spawn rolls above still happen
        if ball.pass_through && !brick.solid {
            continue;
        }

        match hit.direction {
            Direction::Left | Direction::Right => {
                ball.body.vel.x = -ball.body.vel.x;

                let overlap = ball.radius - hit.penetration.x.abs();
                if hit.direction == Direction::Left {
                    ball.body.translate(Vec2::new(overlap, 0.0));
                } else {
                    ball.body.translate(Vec2::new(-overlap, 0.0));
                }
            }
            Direction::Up | Direction::Down => {
                ball.body.vel.y = -ball.body.vel.y;

                let overlap = ball.radius - hit.penetration.y.abs();
                if hit.direction == Direction::Up {
                    ball.body.translate(Vec2::new(0.0, -overlap));
                } else {
                    ball.body.translate(Vec2::new(0.0, overlap));
                }
            }
        }
    }
}

fn resolve_paddle_bounce(state: &mut GameState) {
    let GameState {
        ball,
        paddle,
        events,
        ..
    } = state;

    if ball.stuck {
        return;
    }
    let hit = collision::circle_aabb_hit(ball, paddle);
    if !hit.collided {
        return;
    }

    // Horizontal offset from the paddle center as a fraction of half its width
    let half_width = paddle.size.x / 2.0;
    let paddle_center = paddle.pos.x + half_width;
    let distance = ball.center().x - paddle_center;
    let percentage = distance / half_width;

    // Deflect horizontally by hit position, then rescale to the incoming
    // speed so the bounce conserves it
    let old_vel = ball.body.vel;
    let deflected = Vec2::new(
        INITIAL_BALL_VELOCITY.x * percentage * PADDLE_BOUNCE_STRENGTH,
        old_vel.y,
    );
    let new_vel = deflected.normalize_or_zero() * old_vel.length();

    // Always bounce upward, even when the ball clips the paddle's side
    ball.body.vel = Vec2::new(new_vel.x, -new_vel.y.abs());

    // A sticky paddle recaptures the ball; the computed velocity is kept
    // for the next launch
    ball.stuck = ball.sticky;

    events.push(GameEvent::PaddleBounce);
}

fn update_powerups(state: &mut GameState, dt: f32) {
    let GameState {
        powerups,
        paddle,
        ball,
        fx,
        events,
        height,
        ..
    } = state;

    for i in 0..powerups.len() {
        {
            let card = &mut powerups[i];
            if !card.body.destroyed {
                card.body.pos += card.body.vel * dt;

                if card.body.pos.y >= *height {
                    // Fell past the bottom without being caught
                    card.body.destroyed = true;
                } else if collision::aabb_overlap(paddle, &card.body) {
                    card.body.destroyed = true;
                    card.activated = true;
                    let kind = card.kind;
                    events.push(GameEvent::PowerUpCollected { kind });
                    activate(kind, ball, paddle, fx);
                }
            }
        }

        let expired = {
            let card = &mut powerups[i];
            if card.activated {
                card.duration -= dt;
                if card.duration <= 0.0 {
                    card.activated = false;
                    true
                } else {
                    false
                }
            } else {
                false
            }
        };

        // Revert the effect only when no sibling of the same kind is still
        // inside its duration window
        if expired {
            let kind = powerups[i].kind;
            if !other_active(powerups, kind) {
                deactivate(kind, ball, paddle, fx);
            }
        }
    }

    powerups.retain(|card| !(card.body.destroyed && !card.activated));
}

fn activate(kind: PowerUpKind, ball: &mut Ball, paddle: &mut Entity, fx: &mut PostFx) {
    match kind {
        PowerUpKind::Speed => ball.body.vel *= BALL_SPEED_BONUS,
        PowerUpKind::Sticky => {
            ball.sticky = true;
            paddle.color = Vec3::new(1.0, 0.5, 1.0);
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = true;
            ball.body.color = Vec3::new(1.0, 0.5, 0.5);
        }
        PowerUpKind::PadSizeIncrease => paddle.size.x += PADDLE_WIDTH_BONUS,
        // Confuse and chaos are mutually exclusive: whichever is active
        // blocks the other from engaging
        PowerUpKind::Confuse => {
            if !fx.chaos {
                fx.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !fx.confuse {
                fx.chaos = true;
            }
        }
    }
}

fn deactivate(kind: PowerUpKind, ball: &mut Ball, paddle: &mut Entity, fx: &mut PostFx) {
    match kind {
        PowerUpKind::Sticky => {
            ball.sticky = false;
            paddle.color = Vec3::ONE;
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = false;
            ball.body.color = Vec3::ONE;
        }
        PowerUpKind::Confuse => fx.confuse = false,
        PowerUpKind::Chaos => fx.chaos = false,
        // One-shot kinds have no persistent flag to revert
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}

fn other_active(powerups: &[PowerUp], kind: PowerUpKind) -> bool {
    powerups
        .iter()
        .any(|card| card.activated && card.kind == kind)
}
