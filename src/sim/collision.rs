//! Collision detection for axis-aligned gameplay
//!
//! Two pure routines: rectangle-vs-rectangle overlap (paddle vs falling
//! power-up cards) and circle-vs-rectangle nearest-point overlap (ball vs
//! bricks and paddle) with a compass classification of the penetration so the
//! caller can reflect along the right axis.

use glam::Vec2;

use super::state::{Ball, Entity};

/// Compass direction of a penetration vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const COMPASS: [(Direction, Vec2); 4] = [
        (Direction::Up, Vec2::new(0.0, 1.0)),
        (Direction::Down, Vec2::new(0.0, -1.0)),
        (Direction::Left, Vec2::new(-1.0, 0.0)),
        (Direction::Right, Vec2::new(1.0, 0.0)),
    ];

    /// Classify a vector against the four compass directions.
    ///
    /// The first strict maximum wins, so on an exact tie the earlier entry
    /// (`Up` before `Down` before `Left` before `Right`) is kept, and the
    /// degenerate zero vector classifies as `Up`.
    pub fn from_vector(v: Vec2) -> Self {
        let unit = v.normalize_or_zero();
        let mut best = Direction::Up;
        let mut maximum = 0.0;
        for (direction, compass) in Self::COMPASS {
            let dot = unit.dot(compass);
            if dot > maximum {
                maximum = dot;
                best = direction;
            }
        }
        best
    }
}

/// Result of a circle-vs-rectangle check
#[derive(Debug, Clone, Copy)]
pub struct AabbHit {
    /// Whether a collision occurred
    pub collided: bool,
    /// Compass direction of the penetration (valid only when `collided`)
    pub direction: Direction,
    /// Vector from the circle center to the closest point on the rectangle
    pub penetration: Vec2,
}

impl AabbHit {
    pub fn miss() -> Self {
        Self {
            collided: false,
            direction: Direction::Up,
            penetration: Vec2::ZERO,
        }
    }
}

/// Rectangle-vs-rectangle overlap on closed intervals.
///
/// Edges that exactly touch count as overlapping.
pub fn aabb_overlap(a: &Entity, b: &Entity) -> bool {
    let overlap_x = a.pos.x + a.size.x >= b.pos.x && b.pos.x + b.size.x >= a.pos.x;
    let overlap_y = a.pos.y + a.size.y >= b.pos.y && b.pos.y + b.size.y >= a.pos.y;
    overlap_x && overlap_y
}

/// Circle-vs-rectangle nearest-point test.
///
/// Clamps the vector between the two centers into the rectangle's half
/// extents to find the closest point on the rectangle, then compares the
/// distance from that point to the circle center against the radius.
pub fn circle_aabb_hit(ball: &Ball, rect: &Entity) -> AabbHit {
    let center = ball.body.pos + ball.radius;

    let half_extents = rect.size / 2.0;
    let aabb_center = rect.pos + half_extents;

    let difference = center - aabb_center;
    let clamped = difference.clamp(-half_extents, half_extents);
    let closest = aabb_center + clamped;

    let penetration = closest - center;
    if penetration.length() < ball.radius {
        AabbHit {
            collided: true,
            direction: Direction::from_vector(penetration),
            penetration,
        }
    } else {
        AabbHit::miss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_at(pos: Vec2, radius: f32) -> Ball {
        Ball::new(pos, radius, Vec2::ZERO)
    }

    fn rect_at(pos: Vec2, size: Vec2) -> Entity {
        Entity::new(pos, size)
    }

    #[test]
    fn test_aabb_overlap() {
        let a = rect_at(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = rect_at(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(aabb_overlap(&a, &b));

        let far = rect_at(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0));
        assert!(!aabb_overlap(&a, &far));
    }

    #[test]
    fn test_aabb_overlap_touching_edges() {
        // Closed-interval comparison: exactly touching edges overlap
        let a = rect_at(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = rect_at(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(aabb_overlap(&a, &b));
    }

    #[test]
    fn test_circle_hit_from_below() {
        // Rect spans y in [0, 20]; ball center sits just under the bottom edge
        let rect = rect_at(Vec2::new(0.0, 0.0), Vec2::new(100.0, 20.0));
        let ball = ball_at(Vec2::new(40.0, 12.5), 12.5); // center (52.5, 25.0)

        let hit = circle_aabb_hit(&ball, &rect);
        assert!(hit.collided);
        assert_eq!(hit.direction, Direction::Down);
        assert!(hit.penetration.y < 0.0);
    }

    #[test]
    fn test_circle_contained_at_center() {
        // Ball centered exactly on the rectangle's center with a radius larger
        // than half the diagonal must still report a collision
        let rect = rect_at(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let radius = 20.0;
        let ball = ball_at(Vec2::new(5.0 - radius, 5.0 - radius), radius);

        let hit = circle_aabb_hit(&ball, &rect);
        assert!(hit.collided);
        // Closest point equals the center, so the penetration degenerates
        assert_eq!(hit.penetration, Vec2::ZERO);
        assert_eq!(hit.direction, Direction::Up);
    }

    #[test]
    fn test_circle_miss_defaults() {
        let rect = rect_at(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let ball = ball_at(Vec2::new(100.0, 100.0), 5.0);

        let hit = circle_aabb_hit(&ball, &rect);
        assert!(!hit.collided);
        assert_eq!(hit.direction, Direction::Up);
        assert_eq!(hit.penetration, Vec2::ZERO);
    }

    #[test]
    fn test_direction_classification() {
        assert_eq!(Direction::from_vector(Vec2::new(0.0, -5.0)), Direction::Down);
        assert_eq!(Direction::from_vector(Vec2::new(0.0, 5.0)), Direction::Up);
        assert_eq!(Direction::from_vector(Vec2::new(-3.0, 0.0)), Direction::Left);
        assert_eq!(Direction::from_vector(Vec2::new(3.0, 0.0)), Direction::Right);
        // Documented tie-break: zero vector classifies as Up
        assert_eq!(Direction::from_vector(Vec2::ZERO), Direction::Up);
        // Exact diagonal ties keep the earlier compass entry
        assert_eq!(Direction::from_vector(Vec2::new(1.0, 1.0)), Direction::Up);
    }

    proptest! {
        /// Translating both bodies by the same vector must not change the
        /// result. Integer-valued coordinates keep the arithmetic exact.
        #[test]
        fn translation_invariance(
            bx in -200i32..200,
            by in -200i32..200,
            rx in -200i32..200,
            ry in -200i32..200,
            w in 1i32..100,
            h in 1i32..100,
            dx in -500i32..500,
            dy in -500i32..500,
        ) {
            let shift = Vec2::new(dx as f32, dy as f32);
            let ball = ball_at(Vec2::new(bx as f32, by as f32), 12.5);
            let rect = rect_at(Vec2::new(rx as f32, ry as f32), Vec2::new(w as f32, h as f32));

            let moved_ball = ball_at(ball.body.pos + shift, ball.radius);
            let moved_rect = rect_at(rect.pos + shift, rect.size);

            let a = circle_aabb_hit(&ball, &rect);
            let b = circle_aabb_hit(&moved_ball, &moved_rect);

            prop_assert_eq!(a.collided, b.collided);
            prop_assert_eq!(a.direction, b.direction);
            prop_assert_eq!(a.penetration, b.penetration);
        }
    }
}
