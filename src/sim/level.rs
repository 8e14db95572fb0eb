//! Level loading from tile-coded text grids
//!
//! A level file is rows of whitespace-separated non-negative integers:
//! 0 = empty, 1 = indestructible solid brick, >= 2 = destructible brick with
//! a code-keyed tint. The grid is stretched over a target pixel area; tile
//! dimensions come from integer division by the column/row counts.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Entity;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad tile code {token:?} on line {line}")]
    BadTile { line: usize, token: String },
}

/// A grid of bricks built from tile codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Parsed tile grid, kept so `reset` can rebuild without re-reading the file
    tiles: Vec<Vec<u32>>,
    /// Target pixel area the bricks fill
    area_width: u32,
    area_height: u32,
    /// Brick entities; the destroyed flags are the only mutable part after load
    pub bricks: Vec<Entity>,
}

impl Level {
    /// Load a level from a file. Callers that treat a missing file as an
    /// empty level log the error and fall back to [`Level::empty`].
    pub fn load(
        path: impl AsRef<Path>,
        area_width: u32,
        area_height: u32,
    ) -> Result<Self, LevelError> {
        let text = fs::read_to_string(path.as_ref())?;
        let level = Self::parse(&text, area_width, area_height)?;
        log::info!(
            "loaded level {} ({} bricks)",
            path.as_ref().display(),
            level.bricks.len()
        );
        Ok(level)
    }

    /// Parse a tile grid from text
    pub fn parse(text: &str, area_width: u32, area_height: u32) -> Result<Self, LevelError> {
        let mut tiles = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<u32>().map_err(|_| LevelError::BadTile {
                        line: index + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<u32>, LevelError>>()?;
            tiles.push(row);
        }

        let bricks = build_bricks(&tiles, area_width, area_height);
        Ok(Self {
            tiles,
            area_width,
            area_height,
            bricks,
        })
    }

    /// A level with no bricks at all
    pub fn empty(area_width: u32, area_height: u32) -> Self {
        Self {
            tiles: Vec::new(),
            area_width,
            area_height,
            bricks: Vec::new(),
        }
    }

    /// Rebuild all bricks from the stored tile grid
    pub fn reset(&mut self) {
        self.bricks = build_bricks(&self.tiles, self.area_width, self.area_height);
    }

    /// A level is complete once every destructible brick is destroyed.
    /// Solid bricks never count.
    pub fn is_complete(&self) -> bool {
        self.bricks
            .iter()
            .all(|brick| brick.solid || brick.destroyed)
    }
}

/// Tint for a destructible tile code; codes beyond the palette render white
fn brick_color(code: u32) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

const SOLID_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.7);

fn build_bricks(tiles: &[Vec<u32>], area_width: u32, area_height: u32) -> Vec<Entity> {
    let rows = tiles.len() as u32;
    let cols = tiles.first().map(|row| row.len()).unwrap_or(0) as u32;
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    // Integer division on purpose: tiles are whole pixels wide
    let unit_width = (area_width / cols) as f32;
    let unit_height = (area_height / rows) as f32;

    let mut bricks = Vec::new();
    for (y, row) in tiles.iter().enumerate() {
        for (x, &code) in row.iter().enumerate() {
            if code == 0 {
                continue;
            }
            let pos = Vec2::new(unit_width * x as f32, unit_height * y as f32);
            let size = Vec2::new(unit_width, unit_height);
            let brick = if code == 1 {
                let mut solid = Entity::colored(pos, size, SOLID_COLOR);
                solid.solid = true;
                solid
            } else {
                Entity::colored(pos, size, brick_color(code))
            };
            bricks.push(brick);
        }
    }
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_single_row() {
        let mut level = Level::parse("1 0 2", 300, 100).unwrap();
        assert_eq!(level.bricks.len(), 2);

        let solid = &level.bricks[0];
        assert!(solid.solid);
        assert_eq!(solid.pos, Vec2::new(0.0, 0.0));
        assert_eq!(solid.size, Vec2::new(100.0, 100.0));

        let destructible = &level.bricks[1];
        assert!(!destructible.solid);
        assert_eq!(destructible.pos, Vec2::new(200.0, 0.0));
        assert_eq!(destructible.size, Vec2::new(100.0, 100.0));
        assert_eq!(destructible.color, Vec3::new(0.2, 0.6, 1.0));

        assert!(!level.is_complete());
        level.bricks[1].destroyed = true;
        assert!(level.is_complete());
    }

    #[test]
    fn test_solid_bricks_never_count_against_completion() {
        let level = Level::parse("1 1 1", 300, 100).unwrap();
        assert!(level.is_complete());
    }

    #[test]
    fn test_empty_text_loads_no_bricks() {
        let level = Level::parse("", 800, 300).unwrap();
        assert!(level.bricks.is_empty());
        assert!(level.is_complete());
    }

    #[test]
    fn test_palette() {
        let level = Level::parse("2 3 4 5 9", 500, 100).unwrap();
        assert_eq!(level.bricks[0].color, Vec3::new(0.2, 0.6, 1.0));
        assert_eq!(level.bricks[1].color, Vec3::new(0.0, 0.7, 0.0));
        assert_eq!(level.bricks[2].color, Vec3::new(0.8, 0.8, 0.4));
        assert_eq!(level.bricks[3].color, Vec3::new(1.0, 0.5, 0.0));
        // Codes beyond the palette default to white
        assert_eq!(level.bricks[4].color, Vec3::ONE);
    }

    #[test]
    fn test_tile_size_uses_integer_division() {
        let level = Level::parse("2 2 2 2 2 2 2 2 2 2 2 2 2 2 2", 800, 30).unwrap();
        // 800 / 15 = 53 in integer math
        assert_eq!(level.bricks[0].size, Vec2::new(53.0, 30.0));
    }

    #[test]
    fn test_reset_rebuilds_destroyed_bricks() {
        let mut level = Level::parse("2 2", 200, 100).unwrap();
        level.bricks[0].destroyed = true;
        level.bricks[1].destroyed = true;
        assert!(level.is_complete());

        level.reset();
        assert_eq!(level.bricks.len(), 2);
        assert!(!level.is_complete());
    }

    #[test]
    fn test_bad_tile_code() {
        let err = Level::parse("1 x 2", 300, 100).unwrap_err();
        assert!(matches!(err, LevelError::BadTile { line: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Level::load("does/not/exist.lvl", 800, 300).unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }
}
