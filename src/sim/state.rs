//! Simulation state and step results
//!
//! Everything a running battle mutates lives in `SimulationState`, owned by
//! exactly one driver. Helpers in the sibling modules are pure and work on
//! copies.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ability::ElementEffect;
use super::body::Body;
use super::stamina::{Verdict, opponent_stamina_budget, stamina_budget};
use crate::consts::DEFAULT_LAUNCH_POWER;
use crate::tuning::Tuning;
use crate::{Position, Velocity, normalize};

/// Which of the two combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    PositionsUpdated { player: Position, opponent: Position },
    /// Cosmetic impact flash on/off
    Collision { active: bool },
    SpecialAbilityActivated { name: String },
    BattleEnded { winner: String },
    RunningStateChanged { running: bool },
}

/// Special ability window currently open for one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveAbility {
    pub effect: ElementEffect,
    pub ticks_remaining: u32,
}

/// How a battle was settled
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Finish {
    pub winner: Side,
    pub verdict: Verdict,
    /// Effective stamina each side was judged on
    pub stamina: [f32; 2],
}

/// What one step produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub frame: u32,
    pub positions: [Position; 2],
    /// In emission order
    pub events: Vec<BattleEvent>,
    /// Set on the final step only
    pub finish: Option<Finish>,
}

/// Mutable state of one running battle
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub bodies: [Body; 2],
    pub launch_power: f32,
    pub positions: [Position; 2],
    pub velocities: [Velocity; 2],
    /// Steps taken so far
    pub frame: u32,
    /// Bodies touched and haven't drifted apart yet
    pub in_contact: bool,
    /// Ticks left on the cosmetic collision flash
    pub collision_effect_ticks: u32,
    /// Ability already fired this battle
    pub ability_used: [bool; 2],
    /// Open ability windows, indexed by side; both may run at once
    pub active_abilities: [Option<ActiveAbility>; 2],
    pub stamina_budgets: [f32; 2],
    pub collisions: u32,
    rng: Pcg32,
}

impl SimulationState {
    /// Fresh battle: bodies at their spawn points, launched in random directions.
    ///
    /// The player's speed scales with launch power (`launch / 5`); a zero
    /// launch counts as the default. The opponent gets a plain unit vector.
    pub fn new(
        player: Body,
        opponent: Body,
        launch_power: f32,
        tuning: &Tuning,
        seed: u64,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let launch_multiplier = if launch_power > 0.0 {
            launch_power / DEFAULT_LAUNCH_POWER
        } else {
            1.0
        };
        let player_vel = random_direction(&mut rng) * launch_multiplier;
        let opponent_vel = random_direction(&mut rng);

        let stamina_budgets = [
            stamina_budget(player.style, player.power, launch_power),
            opponent_stamina_budget(opponent.style, opponent.power),
        ];

        Self {
            bodies: [player, opponent],
            launch_power,
            positions: [tuning.player_start, tuning.opponent_start],
            velocities: [player_vel, opponent_vel],
            frame: 0,
            in_contact: false,
            collision_effect_ticks: 0,
            ability_used: [false; 2],
            active_abilities: [None; 2],
            stamina_budgets,
            collisions: 0,
            rng,
        }
    }

    #[inline]
    pub fn body(&self, side: Side) -> &Body {
        &self.bodies[side.index()]
    }

    #[inline]
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Frames at which the battle runs out of stamina
    pub fn max_budget(&self) -> f32 {
        self.stamina_budgets[0].max(self.stamina_budgets[1])
    }

    /// Budget biased by the element of any ability that fired
    pub fn effective_stamina(&self, side: Side) -> f32 {
        let budget = self.stamina_budgets[side.index()];
        if self.ability_used[side.index()] {
            budget * ElementEffect::for_element(self.body(side).element).stamina_bias
        } else {
            budget
        }
    }

    /// Per-step speed multiplier: own window's boost times the other
    /// body's slowdown
    pub fn speed_factor(&self, side: Side) -> f32 {
        let body = self.body(side);
        let base = match side {
            Side::Player => (body.power_f() / 10.0) * (1.0 + self.launch_power / 10.0),
            Side::Opponent => body.power_f() / 10.0,
        };
        let own = self.active_abilities[side.index()].map_or(1.0, |a| a.effect.self_speed);
        let other = self.active_abilities[side.other().index()]
            .map_or(1.0, |a| a.effect.opponent_speed);
        base * own * other
    }
}

/// Uniformly random unit vector. Falls back to +x if both draws are zero.
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let v = Vec2::new(
        rng.random::<f32>() * 2.0 - 1.0,
        rng.random::<f32>() * 2.0 - 1.0,
    );
    let n = normalize(v);
    if n == Vec2::ZERO { Vec2::X } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ability::Element;
    use crate::sim::body::CombatStyle;

    fn pair() -> (Body, Body) {
        (
            Body::new("Dragoon", CombatStyle::Attack, 8).unwrap(),
            Body::new("Draciel", CombatStyle::Defense, 7).unwrap(),
        )
    }

    #[test]
    fn test_initial_state() {
        let (p, o) = pair();
        let state = SimulationState::new(p, o, 10.0, &Tuning::default(), 1);
        assert_eq!(state.positions, [Vec2::new(30.0, 30.0), Vec2::new(70.0, 70.0)]);
        assert!((state.velocities[0].length() - 2.0).abs() < 1e-5);
        assert!((state.velocities[1].length() - 1.0).abs() < 1e-5);
        assert_eq!(state.frame, 0);
        assert!(!state.in_contact);
        assert_eq!(state.ability_used, [false; 2]);
    }

    #[test]
    fn test_zero_launch_uses_default_speed() {
        let (p, o) = pair();
        let state = SimulationState::new(p, o, 0.0, &Tuning::default(), 1);
        assert!((state.velocities[0].length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_speed_factors() {
        let (p, o) = pair();
        let mut state = SimulationState::new(p, o, 10.0, &Tuning::default(), 1);
        assert!((state.speed_factor(Side::Player) - 1.6).abs() < 1e-5);
        assert!((state.speed_factor(Side::Opponent) - 0.7).abs() < 1e-5);

        state.active_abilities[1] = Some(ActiveAbility {
            effect: Element::Water.effect(),
            ticks_remaining: 10,
        });
        assert!((state.speed_factor(Side::Player) - 1.12).abs() < 1e-5);
        assert!((state.speed_factor(Side::Opponent) - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_overlapping_windows_stack() {
        let (p, o) = pair();
        let mut state = SimulationState::new(p, o, 10.0, &Tuning::default(), 1);
        // Player boosts itself, opponent slows the player
        state.active_abilities = [
            Some(ActiveAbility {
                effect: Element::Fire.effect(),
                ticks_remaining: 10,
            }),
            Some(ActiveAbility {
                effect: Element::Darkness.effect(),
                ticks_remaining: 10,
            }),
        ];
        assert!((state.speed_factor(Side::Player) - 1.6 * 1.3 * 0.85).abs() < 1e-5);
        assert!((state.speed_factor(Side::Opponent) - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_effective_stamina_bias_needs_activation() {
        let (p, o) = pair();
        let o = o.with_element(Element::Earth);
        let mut state = SimulationState::new(p, o, 5.0, &Tuning::default(), 1);
        let base = state.stamina_budgets[1];
        assert_eq!(state.effective_stamina(Side::Opponent), base);
        state.ability_used[1] = true;
        assert!((state.effective_stamina(Side::Opponent) - base * 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Player.other(), Side::Opponent);
        assert_eq!(Side::Opponent.index(), 1);
    }
}
