//! Body-to-body collision response
//!
//! Bodies are treated as discs of equal size. On impact they are pushed
//! apart to the separation distance, their velocities are split into
//! normal and tangential parts, the normal parts are exchanged with a
//! power-weighted elastic formula and the tangential parts get a little
//! random jitter so two bodies don't lock into a repeating bounce.

use glam::Vec2;
use rand::Rng;

use super::body::CombatStyle;
use crate::tuning::Tuning;
use crate::{Position, Velocity};

/// A body as the resolver sees it
#[derive(Debug, Clone, Copy)]
pub struct CollisionBody {
    pub pos: Position,
    pub vel: Velocity,
    pub power: f32,
    pub style: CombatStyle,
}

/// Which branch the resolver took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Overlap resolved and velocities exchanged
    Resolved,
    /// Centres (almost) coincide; bodies nudged apart, velocities kept
    Nudged,
    /// Already at or beyond separation distance; nothing changed
    Clear,
}

/// Result of resolving a collision
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    pub kind: CollisionKind,
    pub pos_a: Position,
    pub vel_a: Velocity,
    pub pos_b: Position,
    pub vel_b: Velocity,
}

impl CollisionResult {
    fn unchanged(a: &CollisionBody, b: &CollisionBody, kind: CollisionKind) -> Self {
        Self {
            kind,
            pos_a: a.pos,
            vel_a: a.vel,
            pos_b: b.pos,
            vel_b: b.vel,
        }
    }
}

/// Multiplier on the impulse a body imparts
#[inline]
fn impact_factor(style: CombatStyle, tuning: &Tuning) -> f32 {
    match style {
        CombatStyle::Attack => tuning.attack_impact,
        _ => 1.0,
    }
}

/// Multiplier on a body's own outgoing normal velocity
#[inline]
fn defense_factor(style: CombatStyle, tuning: &Tuning) -> f32 {
    match style {
        CombatStyle::Defense => tuning.defense_dampening,
        _ => 1.0,
    }
}

/// Extra normal speed for the body that was launched by hand (1.0 - 1.5)
#[inline]
pub fn launch_bonus(launch_power: f32) -> f32 {
    1.0 + launch_power / 20.0
}

/// Resolve a collision between `a` (the player, who gets the launch bonus)
/// and `b` (the opponent, who never does).
///
/// Callers only invoke this when the bodies are closer than the collision
/// threshold and were not already in contact.
pub fn resolve_collision<R: Rng + ?Sized>(
    a: &CollisionBody,
    b: &CollisionBody,
    launch_power: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> CollisionResult {
    let separation = a.pos - b.pos;
    let dist = separation.length();

    if dist < tuning.degenerate_distance {
        let nudge = Vec2::new(tuning.fallback_nudge, 0.0);
        return CollisionResult {
            kind: CollisionKind::Nudged,
            pos_a: a.pos + nudge,
            vel_a: a.vel,
            pos_b: b.pos - nudge,
            vel_b: b.vel,
        };
    }

    let overlap = tuning.separation_distance - dist;
    if overlap <= 0.0 {
        return CollisionResult::unchanged(a, b, CollisionKind::Clear);
    }

    // Normal points from b to a
    let normal = separation / dist;
    let tangent = normal.perp();

    let push = normal * overlap * 0.5;
    let pos_a = a.pos + push;
    let pos_b = b.pos - push;

    // Into the collision frame
    let (na, ta) = (a.vel.dot(normal), a.vel.dot(tangent));
    let (nb, tb) = (b.vel.dot(normal), b.vel.dot(tangent));

    let impact_a = impact_factor(a.style, tuning);
    let impact_b = impact_factor(b.style, tuning);
    let total_power = (a.power + b.power).max(f32::EPSILON);

    let na_out = (na * (a.power - b.power * impact_b) + 2.0 * b.power * impact_b * nb)
        / total_power
        * defense_factor(a.style, tuning)
        * launch_bonus(launch_power);
    let nb_out = (nb * (b.power - a.power * impact_a) + 2.0 * a.power * impact_a * na)
        / total_power
        * defense_factor(b.style, tuning);

    let ta_out = ta * tuning.tangential_retention + jitter(rng, tuning.tangential_jitter);
    let tb_out = tb * tuning.tangential_retention + jitter(rng, tuning.tangential_jitter);

    // Back to world space
    CollisionResult {
        kind: CollisionKind::Resolved,
        pos_a,
        vel_a: normal * na_out + tangent * ta_out,
        pos_b,
        vel_b: normal * nb_out + tangent * tb_out,
    }
}

/// Uniform in [-amplitude, amplitude)
#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f32) -> f32 {
    (rng.random::<f32>() * 2.0 - 1.0) * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn body(x: f32, y: f32, vx: f32, vy: f32, power: f32, style: CombatStyle) -> CollisionBody {
        CollisionBody {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            power,
            style,
        }
    }

    #[test]
    fn test_head_on_equal_bodies_swap() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let a = body(40.0, 50.0, 1.0, 0.0, 5.0, CombatStyle::Balance);
        let b = body(50.0, 50.0, -1.0, 0.0, 5.0, CombatStyle::Balance);

        let result = resolve_collision(&a, &b, 0.0, &tuning, &mut rng);
        assert_eq!(result.kind, CollisionKind::Resolved);
        assert!((result.vel_a.x + 1.0).abs() < 1e-5);
        assert!((result.vel_b.x - 1.0).abs() < 1e-5);
        // Jitter stays on the tangent (y here)
        assert!(result.vel_a.y.abs() <= 0.2 + 1e-6);
        assert!((distance(result.pos_a, result.pos_b) - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_attack_style_hits_harder() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let a = body(40.0, 50.0, 1.0, 0.0, 5.0, CombatStyle::Attack);
        let b = body(50.0, 50.0, -1.0, 0.0, 5.0, CombatStyle::Balance);

        let result = resolve_collision(&a, &b, 0.0, &tuning, &mut rng);
        assert!((result.vel_b.x - 1.75).abs() < 1e-5);
    }

    #[test]
    fn test_defense_style_dampens_own_rebound() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let a = body(40.0, 50.0, 1.0, 0.0, 5.0, CombatStyle::Balance);
        let b = body(50.0, 50.0, -1.0, 0.0, 5.0, CombatStyle::Defense);

        let result = resolve_collision(&a, &b, 0.0, &tuning, &mut rng);
        assert!((result.vel_b.x - 0.7).abs() < 1e-5);
        assert!((result.vel_a.x + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_launch_bonus_only_for_player() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let a = body(40.0, 50.0, 1.0, 0.0, 5.0, CombatStyle::Balance);
        let b = body(50.0, 50.0, -1.0, 0.0, 5.0, CombatStyle::Balance);

        let result = resolve_collision(&a, &b, 10.0, &tuning, &mut rng);
        assert!((result.vel_a.x + 1.5).abs() < 1e-5);
        assert!((result.vel_b.x - 1.0).abs() < 1e-5);
        assert_eq!(launch_bonus(0.0), 1.0);
        assert_eq!(launch_bonus(10.0), 1.5);
    }

    #[test]
    fn test_stronger_body_imparts_more() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let a = body(40.0, 50.0, 1.0, 0.0, 9.0, CombatStyle::Balance);
        let b = body(50.0, 50.0, -1.0, 0.0, 3.0, CombatStyle::Balance);

        let result = resolve_collision(&a, &b, 0.0, &tuning, &mut rng);
        assert!(result.vel_b.x.abs() > result.vel_a.x.abs());
    }

    #[test]
    fn test_coincident_centres_are_nudged() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let a = body(50.0, 50.0, 0.5, 0.0, 5.0, CombatStyle::Attack);
        let b = body(50.0, 50.0, 0.0, 0.5, 5.0, CombatStyle::Defense);

        let result = resolve_collision(&a, &b, 5.0, &tuning, &mut rng);
        assert_eq!(result.kind, CollisionKind::Nudged);
        assert_eq!(result.pos_a, Vec2::new(51.0, 50.0));
        assert_eq!(result.pos_b, Vec2::new(49.0, 50.0));
        assert_eq!(result.vel_a, a.vel);
        assert_eq!(result.vel_b, b.vel);
    }

    #[test]
    fn test_no_overlap_is_left_alone() {
        let tuning = Tuning {
            collision_threshold: 25.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let a = body(30.0, 50.0, 1.0, 0.0, 5.0, CombatStyle::Balance);
        let b = body(50.0, 50.0, -1.0, 0.0, 5.0, CombatStyle::Balance);

        let result = resolve_collision(&a, &b, 0.0, &tuning, &mut rng);
        assert_eq!(result.kind, CollisionKind::Clear);
        assert_eq!(result.vel_a, a.vel);
    }

    #[test]
    fn test_same_seed_same_result() {
        let tuning = Tuning::default();
        let a = body(44.0, 47.0, 0.3, 0.8, 6.0, CombatStyle::Stamina);
        let b = body(52.0, 52.0, -0.6, 0.1, 4.0, CombatStyle::Attack);
        let r1 = resolve_collision(&a, &b, 3.0, &tuning, &mut Pcg32::seed_from_u64(42));
        let r2 = resolve_collision(&a, &b, 3.0, &tuning, &mut Pcg32::seed_from_u64(42));
        assert_eq!(r1.vel_a, r2.vel_a);
        assert_eq!(r1.vel_b, r2.vel_b);
    }

    proptest! {
        #[test]
        fn separated_to_exact_distance(
            ax in 20.0f32..80.0,
            ay in 20.0f32..80.0,
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.2f32..14.9,
            seed in any::<u64>(),
        ) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let a = body(ax, ay, 1.0, 0.0, 7.0, CombatStyle::Attack);
            let offset = Vec2::from_angle(angle) * dist;
            let b = body(ax + offset.x, ay + offset.y, 0.0, 1.0, 4.0, CombatStyle::Defense);

            let result = resolve_collision(&a, &b, 6.0, &tuning, &mut rng);
            prop_assert_eq!(result.kind, CollisionKind::Resolved);
            prop_assert!((distance(result.pos_a, result.pos_b) - 18.0).abs() < 1e-3);
        }
    }
}
