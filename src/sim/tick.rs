//! Fixed timestep simulation tick
//!
//! Advances a battle by one step. Within a step the order is fixed:
//! move, rim, collision, special abilities, termination.

use super::ability::ElementEffect;
use super::boundary::resolve_boundary;
use super::collision::{CollisionBody, CollisionKind, resolve_collision};
use super::stamina::decide_winner;
use super::state::{ActiveAbility, BattleEvent, Finish, Side, SimulationState, StepOutcome};
use crate::tuning::Tuning;
use crate::{distance, ensure_minimum_speed};

/// Advance the battle by one step and report what happened
pub fn tick(state: &mut SimulationState, tuning: &Tuning) -> StepOutcome {
    state.frame += 1;
    let mut events = Vec::new();

    // Move with this step's speed factors, then let any ability window run down
    for side in Side::BOTH {
        let factor = state.speed_factor(side);
        let i = side.index();
        state.positions[i] += state.velocities[i] * factor;
    }
    for side in Side::BOTH {
        let slot = &mut state.active_abilities[side.index()];
        if let Some(active) = slot.as_mut() {
            active.ticks_remaining = active.ticks_remaining.saturating_sub(1);
            if active.ticks_remaining == 0 {
                log::debug!("{side:?} ability window closed at frame {}", state.frame);
                *slot = None;
            }
        }
    }

    for i in 0..2 {
        let (pos, vel) = resolve_boundary(state.positions[i], state.velocities[i], tuning);
        state.positions[i] = pos;
        state.velocities[i] = vel;
    }

    if step_collision(state, tuning, &mut events) {
        step_abilities(state, tuning, &mut events);
    }

    let finish = check_finish(state, tuning);
    if let Some(finish) = finish {
        let winner = state.body(finish.winner).name.clone();
        log::info!(
            "Battle over at frame {}: {} wins ({:?}, stamina {:.1} vs {:.1})",
            state.frame,
            winner,
            finish.verdict,
            finish.stamina[0],
            finish.stamina[1]
        );
        events.push(BattleEvent::BattleEnded { winner });
    }

    events.insert(
        0,
        BattleEvent::PositionsUpdated {
            player: state.positions[0],
            opponent: state.positions[1],
        },
    );

    StepOutcome {
        frame: state.frame,
        positions: state.positions,
        events,
        finish,
    }
}

/// Edge-triggered collision handling. Returns true if a new impact was resolved.
fn step_collision(
    state: &mut SimulationState,
    tuning: &Tuning,
    events: &mut Vec<BattleEvent>,
) -> bool {
    if state.collision_effect_ticks > 0 {
        state.collision_effect_ticks -= 1;
        if state.collision_effect_ticks == 0 {
            events.push(BattleEvent::Collision { active: false });
        }
    }

    let dist = distance(state.positions[0], state.positions[1]);

    if state.in_contact {
        if dist > tuning.contact_release_distance() {
            state.in_contact = false;
        }
        return false;
    }
    if dist >= tuning.collision_threshold {
        return false;
    }

    let a = collision_body(state, Side::Player);
    let b = collision_body(state, Side::Opponent);
    let launch_power = state.launch_power;
    let result = resolve_collision(&a, &b, launch_power, tuning, state.rng());

    state.positions = [result.pos_a, result.pos_b];
    state.velocities = [
        ensure_minimum_speed(result.vel_a, tuning.min_speed),
        ensure_minimum_speed(result.vel_b, tuning.min_speed),
    ];
    state.in_contact = true;
    state.collisions += 1;

    if result.kind == CollisionKind::Nudged {
        log::debug!("Frame {}: centres coincided, nudged apart", state.frame);
    } else {
        log::debug!(
            "Frame {}: collision #{} at distance {:.2}",
            state.frame,
            state.collisions,
            dist
        );
    }

    if state.collision_effect_ticks == 0 {
        events.push(BattleEvent::Collision { active: true });
    }
    state.collision_effect_ticks = tuning.collision_effect_ticks().max(1);
    true
}

fn collision_body(state: &SimulationState, side: Side) -> CollisionBody {
    let i = side.index();
    let body = state.body(side);
    CollisionBody {
        pos: state.positions[i],
        vel: state.velocities[i],
        power: body.power_f(),
        style: body.style,
    }
}

/// Give every unspent ability a draw, player first. Each success opens that
/// body's own window, so both can fire on the same impact.
fn step_abilities(state: &mut SimulationState, tuning: &Tuning, events: &mut Vec<BattleEvent>) {
    for side in Side::BOTH {
        let i = side.index();
        if state.ability_used[i] {
            continue;
        }
        let Some(ability) = state.bodies[i].special_ability.clone() else {
            continue;
        };
        if !ability.try_activate(state.rng()) {
            continue;
        }

        let name = state.body(side).name.clone();
        let element = state.body(side).element;
        log::debug!(
            "Frame {}: {} activated {} ({})",
            state.frame,
            name,
            ability.name,
            element.map(|e| e.as_str()).unwrap_or("no element")
        );
        state.active_abilities[i] = Some(ActiveAbility {
            effect: ElementEffect::for_element(element),
            ticks_remaining: tuning.ability_window_ticks(),
        });
        state.ability_used[i] = true;
        events.push(BattleEvent::SpecialAbilityActivated { name });
    }
}

/// Judge the battle as it stands
pub fn judge(state: &SimulationState) -> Finish {
    let stamina = [
        state.effective_stamina(Side::Player),
        state.effective_stamina(Side::Opponent),
    ];
    let (winner, verdict) = decide_winner(
        state.body(Side::Player),
        state.body(Side::Opponent),
        stamina,
    );
    Finish {
        winner,
        verdict,
        stamina,
    }
}

fn check_finish(state: &SimulationState, tuning: &Tuning) -> Option<Finish> {
    let exhausted = state.frame as f32 > state.max_budget();
    let capped = state.frame >= tuning.safety_cap_frames;
    if capped && !exhausted {
        log::warn!("Safety cap reached at frame {}", state.frame);
    }
    (exhausted || capped).then(|| judge(state))
}
