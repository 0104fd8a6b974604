//! Arena rim handling
//!
//! The bowl is round on screen but the simulation bounces bodies off its
//! bounding square in percentage space.

use glam::Vec2;

use crate::tuning::Tuning;
use crate::{Position, Velocity};

/// Clamp a body into the arena and reflect the velocity on every axis that
/// crossed the rim. Axes are handled independently so a corner hit flips both.
pub fn resolve_boundary(pos: Position, vel: Velocity, tuning: &Tuning) -> (Position, Velocity) {
    let (x, vx) = reflect_axis(pos.x, vel.x, tuning);
    let (y, vy) = reflect_axis(pos.y, vel.y, tuning);
    (Vec2::new(x, y), Vec2::new(vx, vy))
}

#[inline]
fn reflect_axis(coord: f32, vel: f32, tuning: &Tuning) -> (f32, f32) {
    if coord < tuning.arena_min {
        (tuning.arena_min, -vel * tuning.boundary_restitution)
    } else if coord > tuning.arena_max {
        (tuning.arena_max, -vel * tuning.boundary_restitution)
    } else {
        (coord, vel)
    }
}

/// Whether a position lies inside the arena box
pub fn in_bounds(pos: Position, tuning: &Tuning) -> bool {
    (tuning.arena_min..=tuning.arena_max).contains(&pos.x)
        && (tuning.arena_min..=tuning.arena_max).contains(&pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::BoundaryPreset;
    use proptest::prelude::*;

    #[test]
    fn test_inside_is_untouched() {
        let tuning = Tuning::default();
        let pos = Vec2::new(50.0, 40.0);
        let vel = Vec2::new(1.0, -0.5);
        assert_eq!(resolve_boundary(pos, vel, &tuning), (pos, vel));
    }

    #[test]
    fn test_left_wall_reflects_with_damping() {
        let tuning = Tuning::default();
        let (pos, vel) = resolve_boundary(Vec2::new(8.0, 50.0), Vec2::new(-1.0, 0.5), &tuning);
        assert_eq!(pos, Vec2::new(10.0, 50.0));
        assert!((vel.x - 0.9).abs() < 1e-6);
        assert_eq!(vel.y, 0.5);
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let tuning = Tuning::from_preset(BoundaryPreset::Elastic);
        let (pos, vel) = resolve_boundary(Vec2::new(95.0, 97.0), Vec2::new(2.0, 3.0), &tuning);
        assert_eq!(pos, Vec2::new(90.0, 90.0));
        assert_eq!(vel, Vec2::new(-2.0, -3.0));
    }

    proptest! {
        #[test]
        fn output_always_in_bounds(
            x in -50.0f32..150.0,
            y in -50.0f32..150.0,
            vx in -5.0f32..5.0,
            vy in -5.0f32..5.0,
        ) {
            let tuning = Tuning::default();
            let (pos, _) = resolve_boundary(Vec2::new(x, y), Vec2::new(vx, vy), &tuning);
            prop_assert!(in_bounds(pos, &tuning));
        }
    }
}
