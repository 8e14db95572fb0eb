//! Save/continue persistence
//!
//! The full [`GameState`] serializes, RNG included, so a restored run
//! continues deterministically. Snapshots go into a versioned JSON envelope
//! in the platform data directory; an unreadable or wrong-version save is
//! discarded rather than propagated.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Bumped whenever the serialized state shape changes
const SAVE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    state: GameState,
}

fn save_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("brickout").join("save.json"))
}

/// Snapshot the game state to disk
pub fn save(state: &GameState) {
    let Some(path) = save_path() else {
        log::warn!("could not determine data directory for saves");
        return;
    };
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        log::warn!("failed to create save directory: {e}");
        return;
    }

    let envelope = Envelope {
        version: SAVE_VERSION,
        state: state.clone(),
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => {
            if let Err(e) = fs::write(&path, json) {
                log::warn!("failed to write save: {e}");
            } else {
                log::info!("saved game to {}", path.display());
            }
        }
        Err(e) => log::warn!("failed to serialize save: {e}"),
    }
}

/// Restore the last snapshot, if a compatible one exists
pub fn load() -> Option<GameState> {
    let path = save_path()?;
    let contents = fs::read_to_string(&path).ok()?;

    match serde_json::from_str::<Envelope>(&contents) {
        Ok(envelope) if envelope.version == SAVE_VERSION => Some(envelope.state),
        Ok(envelope) => {
            log::warn!(
                "discarding save with version {} (expected {SAVE_VERSION})",
                envelope.version
            );
            None
        }
        Err(e) => {
            log::warn!("discarding corrupt save: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
    use crate::sim::{GamePhase, Level, TickInput, tick};

    #[test]
    fn test_state_round_trips_through_envelope() {
        let mut state = GameState::new(77, WINDOW_WIDTH, WINDOW_HEIGHT);
        state.add_level(Level::parse("2 0 2", 800, 300).unwrap());
        state.phase = GamePhase::Active;
        for _ in 0..60 {
            tick(
                &mut state,
                &TickInput {
                    launch: true,
                    ..Default::default()
                },
                crate::consts::SIM_DT,
            );
        }

        let envelope = Envelope {
            version: SAVE_VERSION,
            state: state.clone(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let mut restored: GameState = serde_json::from_str::<Envelope>(&json).unwrap().state;

        assert_eq!(restored.phase, state.phase);
        assert_eq!(restored.ball.body.pos, state.ball.body.pos);
        assert_eq!(restored.rng, state.rng);

        // The restored run continues identically
        tick(&mut state, &TickInput::default(), crate::consts::SIM_DT);
        tick(&mut restored, &TickInput::default(), crate::consts::SIM_DT);
        assert_eq!(restored.ball.body.pos, state.ball.body.pos);
    }

    #[test]
    fn test_envelope_carries_version() {
        let state = GameState::new(1, WINDOW_WIDTH, WINDOW_HEIGHT);
        let envelope = Envelope {
            version: SAVE_VERSION,
            state,
        };
        let json = serde_json::to_string(&envelope).unwrap();

        let parsed = serde_json::from_str::<Envelope>(&json).unwrap();
        assert_eq!(parsed.version, SAVE_VERSION);
    }
}
