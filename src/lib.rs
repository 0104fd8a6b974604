//! Spin Clash - two spinning tops battling in a circular arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (boundary, collisions, stamina, abilities, step fn)
//! - `battle`: Battle driver (state machine, handles, observers)
//! - `tuning`: Data-driven physics constants
//! - `roster`: Bit-beast catalogue that bodies can bond with
//! - `web`: wasm-bindgen facade (wasm32 only)

pub mod battle;
pub mod error;
pub mod roster;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use battle::{Battle, BattleHandle, BattleObserver, BattleOutcome, BattlePhase};
pub use error::BattleError;
pub use tuning::{BoundaryPreset, Tuning};

use glam::Vec2;

/// Arena-percentage position
pub type Position = Vec2;
/// Per-step displacement, scaled by a body's speed factor
pub type Velocity = Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds
    pub const TICK_MS: u32 = 50;
    /// Maximum substeps per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena bounding box (percentage space proxy for the round bowl)
    pub const ARENA_MIN: f32 = 10.0;
    pub const ARENA_MAX: f32 = 90.0;
    /// Velocity kept after bouncing off the rim (1.0 = perfectly elastic)
    pub const BOUNDARY_RESTITUTION: f32 = 0.9;

    /// Spawn points for each side
    pub const PLAYER_START: (f32, f32) = (30.0, 30.0);
    pub const OPPONENT_START: (f32, f32) = (70.0, 70.0);

    /// Centre distance below which two bodies collide
    pub const COLLISION_THRESHOLD: f32 = 15.0;
    /// Centre distance the resolver separates bodies to
    pub const SEPARATION_DISTANCE: f32 = 18.0;
    /// Contact ends once bodies drift past threshold * this factor
    pub const CONTACT_RELEASE_FACTOR: f32 = 1.5;
    /// Below this distance the collision normal is undefined
    pub const DEGENERATE_DISTANCE: f32 = 0.1;
    /// Offset applied to each body in the degenerate case
    pub const FALLBACK_NUDGE: f32 = 1.0;

    /// Post-collision speed floor
    pub const MIN_SPEED: f32 = 0.2;
    /// Attack style multiplier on imparted normal impulse
    pub const ATTACK_IMPACT: f32 = 1.5;
    /// Defense style multiplier on own resulting normal velocity
    pub const DEFENSE_DAMPENING: f32 = 0.7;
    /// Share of tangential velocity kept through a hit
    pub const TANGENTIAL_RETENTION: f32 = 0.95;
    /// Half-width of the uniform tangential jitter
    pub const TANGENTIAL_JITTER: f32 = 0.2;

    /// Cosmetic collision flash
    pub const COLLISION_EFFECT_MS: u32 = 300;
    /// Special ability effect window
    pub const ABILITY_WINDOW_MS: u32 = 2000;
    /// Hard stop regardless of stamina (60 seconds of play)
    pub const SAFETY_CAP_FRAMES: u32 = 3000;

    /// Launch power assumed for the opponent and for a zero launch
    pub const DEFAULT_LAUNCH_POWER: f32 = 5.0;
    pub const MAX_LAUNCH_POWER: f32 = 10.0;
}

/// Scale a vector to unit length. A zero vector stays zero.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let magnitude = v.length();
    if magnitude == 0.0 {
        return Vec2::ZERO;
    }
    v / magnitude
}

/// Euclidean distance between two positions
#[inline]
pub fn distance(a: Position, b: Position) -> f32 {
    (a - b).length()
}

/// Lift a velocity to `min_speed` if it has slowed below it, keeping direction
#[inline]
pub fn ensure_minimum_speed(v: Velocity, min_speed: f32) -> Velocity {
    if v.length() < min_speed {
        normalize(v) * min_speed
    } else {
        v
    }
}
