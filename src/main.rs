//! Brickout entry point - headless demo driver
//!
//! Runs the simulation without a window: loads the level set, then lets an
//! autopilot play for a fixed stretch of game time while logging events.
//! Exercises the whole crate end to end, which makes it handy for soak
//! testing determinism changes.
//!
//! Usage: `brickout [seed] [--resume]`

use brickout::consts::*;
use brickout::sim::{GameEvent, GamePhase, GameState, Level, TickInput, tick};
use brickout::{Settings, render, save};

const LEVEL_FILES: [&str; 4] = [
    "levels/one.lvl",
    "levels/two.lvl",
    "levels/three.lvl",
    "levels/four.lvl",
];

/// Simulated play time per run (seconds)
const DEMO_SECONDS: f32 = 120.0;

/// Drives the game without a human: launches from menus, tracks the ball
/// with the paddle, and queues up the next level after each win.
#[derive(Default)]
struct Autopilot {
    advance_queued: bool,
}

impl Autopilot {
    fn drive(&mut self, state: &GameState, tick_index: u64, input: &mut TickInput) {
        *input = TickInput::default();

        match state.phase {
            GamePhase::Menu => {
                if self.advance_queued {
                    input.menu_next = true;
                    self.advance_queued = false;
                }
                input.launch = true;
            }
            GamePhase::Win => {
                self.advance_queued = true;
                input.launch = true;
            }
            GamePhase::Active => {
                if state.ball.stuck {
                    input.launch = true;
                }

                // Track the ball with a small oscillating offset so the
                // returns vary instead of looping forever
                let time = tick_index as f32 * SIM_DT;
                let offset = (time * 0.7).sin() * 30.0;
                let target = state.ball.center().x + offset;
                let paddle_center = state.paddle.pos.x + state.paddle.size.x / 2.0;

                if target < paddle_center - 4.0 {
                    input.move_left = true;
                } else if target > paddle_center + 4.0 {
                    input.move_right = true;
                }
            }
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let resume = args.iter().any(|arg| arg == "--resume");
    let seed = args
        .iter()
        .find_map(|arg| arg.parse::<u64>().ok())
        .unwrap_or(0xB81C_C0DE);

    let settings = Settings::load();
    log::info!(
        "effects: shake={} post={}",
        settings.effective_screen_shake(),
        settings.effective_post_effects()
    );

    let saved = if resume { save::load() } else { None };
    let mut state = match saved {
        Some(saved) => {
            log::info!("resuming saved game at level {}", saved.level_index);
            saved
        }
        None => {
            let mut state = GameState::new(seed, WINDOW_WIDTH, WINDOW_HEIGHT);
            for file in LEVEL_FILES {
                // The brick area covers the top half of the playfield
                let level = Level::load(file, WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32 / 2)
                    .unwrap_or_else(|e| {
                        log::warn!("{file}: {e}; substituting an empty level");
                        Level::empty(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32 / 2)
                    });
                state.add_level(level);
            }
            state
        }
    };

    let mut autopilot = Autopilot::default();
    let mut input = TickInput::default();

    let mut bricks_destroyed = 0u64;
    let mut powerups_collected = 0u64;
    let mut balls_lost = 0u64;
    let mut levels_cleared = 0u64;

    let total_ticks = (DEMO_SECONDS / SIM_DT) as u64;
    for tick_index in 0..total_ticks {
        autopilot.drive(&state, tick_index, &mut input);
        tick(&mut state, &input, SIM_DT);

        for event in &state.events {
            log::debug!("{event:?}");
            match event {
                GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                GameEvent::PowerUpCollected { .. } => powerups_collected += 1,
                GameEvent::BallLost => balls_lost += 1,
                GameEvent::LevelComplete { .. } => levels_cleared += 1,
                _ => {}
            }
        }
    }

    let sprites = render::draw_list(&state);
    println!("simulated {DEMO_SECONDS}s with seed {seed:#x}");
    println!(
        "bricks destroyed: {bricks_destroyed}, power-ups collected: {powerups_collected}, \
         balls lost: {balls_lost}, levels cleared: {levels_cleared}"
    );
    println!(
        "final frame: {} sprites, phase {:?}, level {}",
        sprites.len(),
        state.phase,
        state.level_index
    );

    save::save(&state);
}
