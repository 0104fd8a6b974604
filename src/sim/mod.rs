//! Deterministic simulation module
//!
//! All battle logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed in-step order (move, rim, collision, abilities, termination)
//! - No rendering or platform dependencies

pub mod ability;
pub mod body;
pub mod boundary;
pub mod collision;
pub mod stamina;
pub mod state;
pub mod tick;

pub use ability::{Element, ElementEffect, SpecialAbility, rolls_activation};
pub use body::{Body, BodyDef, CombatStyle};
pub use boundary::resolve_boundary;
pub use collision::{CollisionBody, CollisionKind, CollisionResult, resolve_collision};
pub use stamina::{Verdict, decide_winner, launch_stamina_factor, stamina_budget};
pub use state::{ActiveAbility, BattleEvent, Finish, Side, SimulationState, StepOutcome};
pub use tick::{judge, tick};
