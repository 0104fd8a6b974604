//! Stamina budgets and the winner rule
//!
//! A body's stamina budget is the number of frames it can keep spinning.
//! The battle ends once the frame counter passes the larger budget, and the
//! body with more stamina takes it.

use serde::{Deserialize, Serialize};

use super::body::{Body, CombatStyle};
use super::state::Side;
use crate::consts::DEFAULT_LAUNCH_POWER;

/// Harder launches spin out sooner: 1.1 at launch 0 down to 0.7 from launch 8 up
#[inline]
pub fn launch_stamina_factor(launch_power: f32) -> f32 {
    (1.1 - launch_power / 20.0).clamp(0.7, 1.1)
}

/// Frames a body can sustain
pub fn stamina_budget(style: CombatStyle, power: u8, launch_power: f32) -> f32 {
    let power = f32::from(power);
    let factor = launch_stamina_factor(launch_power);
    match style {
        CombatStyle::Stamina => 1000.0 + power * 100.0 * factor,
        CombatStyle::Defense => 800.0 + power * 80.0 * factor,
        CombatStyle::Attack | CombatStyle::Balance => 600.0 + power * 60.0 * factor,
    }
}

/// Budget for the opponent, who is never launched by hand
#[inline]
pub fn opponent_stamina_budget(style: CombatStyle, power: u8) -> f32 {
    stamina_budget(style, power, DEFAULT_LAUNCH_POWER)
}

/// How the winner was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Stamina,
    Power,
    PowerWithBonus,
    /// Everything equal; the opponent keeps the arena
    Draw,
}

/// Pick the winning side.
///
/// `stamina` holds each side's effective stamina (budget times any element
/// bias). Ties fall through to base power, then power plus bit-beast bonus,
/// and a dead heat goes to the opponent.
pub fn decide_winner(player: &Body, opponent: &Body, stamina: [f32; 2]) -> (Side, Verdict) {
    let [p, o] = stamina;
    if p > o {
        return (Side::Player, Verdict::Stamina);
    }
    if o > p {
        return (Side::Opponent, Verdict::Stamina);
    }
    if player.power != opponent.power {
        let side = if player.power > opponent.power {
            Side::Player
        } else {
            Side::Opponent
        };
        return (side, Verdict::Power);
    }
    if player.total_power() != opponent.total_power() {
        let side = if player.total_power() > opponent.total_power() {
            Side::Player
        } else {
            Side::Opponent
        };
        return (side, Verdict::PowerWithBonus);
    }
    (Side::Opponent, Verdict::Draw)
}
