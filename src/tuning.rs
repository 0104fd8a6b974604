//! Physics tuning
//!
//! Every constant the simulation reads goes through here so hosts can swap in
//! a different rule set (older revisions of the game bounced elastically and
//! used other separation distances) without touching the step function.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::BattleError;

/// How much speed a body keeps when it bounces off the rim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundaryPreset {
    /// Reflected component scaled by 0.9
    #[default]
    Damped,
    /// Reflected component keeps full magnitude
    Elastic,
}

impl BoundaryPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPreset::Damped => "Damped",
            BoundaryPreset::Elastic => "Elastic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "damped" => Some(BoundaryPreset::Damped),
            "elastic" => Some(BoundaryPreset::Elastic),
            _ => None,
        }
    }

    pub fn restitution(&self) -> f32 {
        match self {
            BoundaryPreset::Damped => BOUNDARY_RESTITUTION,
            BoundaryPreset::Elastic => 1.0,
        }
    }
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_min: f32,
    pub arena_max: f32,
    pub boundary_restitution: f32,
    pub player_start: Vec2,
    pub opponent_start: Vec2,

    // === Collisions ===
    pub collision_threshold: f32,
    pub separation_distance: f32,
    pub contact_release_factor: f32,
    pub degenerate_distance: f32,
    pub fallback_nudge: f32,
    pub min_speed: f32,
    pub attack_impact: f32,
    pub defense_dampening: f32,
    pub tangential_retention: f32,
    pub tangential_jitter: f32,

    // === Timing ===
    pub tick_ms: u32,
    pub max_substeps: u32,
    pub collision_effect_ms: u32,
    pub ability_window_ms: u32,
    pub safety_cap_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_min: ARENA_MIN,
            arena_max: ARENA_MAX,
            boundary_restitution: BOUNDARY_RESTITUTION,
            player_start: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            opponent_start: Vec2::new(OPPONENT_START.0, OPPONENT_START.1),

            collision_threshold: COLLISION_THRESHOLD,
            separation_distance: SEPARATION_DISTANCE,
            contact_release_factor: CONTACT_RELEASE_FACTOR,
            degenerate_distance: DEGENERATE_DISTANCE,
            fallback_nudge: FALLBACK_NUDGE,
            min_speed: MIN_SPEED,
            attack_impact: ATTACK_IMPACT,
            defense_dampening: DEFENSE_DAMPENING,
            tangential_retention: TANGENTIAL_RETENTION,
            tangential_jitter: TANGENTIAL_JITTER,

            tick_ms: TICK_MS,
            max_substeps: MAX_SUBSTEPS,
            collision_effect_ms: COLLISION_EFFECT_MS,
            ability_window_ms: ABILITY_WINDOW_MS,
            safety_cap_frames: SAFETY_CAP_FRAMES,
        }
    }
}

impl Tuning {
    /// Create tuning from a boundary preset (other constants default)
    pub fn from_preset(preset: BoundaryPreset) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    pub fn apply_preset(&mut self, preset: BoundaryPreset) {
        self.boundary_restitution = preset.restitution();
    }

    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, BattleError> {
        let tuning: Self = serde_json::from_str(json).map_err(BattleError::InvalidTuning)?;
        log::info!(
            "Loaded tuning: threshold={}, separation={}, restitution={}",
            tuning.collision_threshold,
            tuning.separation_distance,
            tuning.boundary_restitution
        );
        Ok(tuning)
    }

    /// Distance at which an ongoing contact is considered over
    pub fn contact_release_distance(&self) -> f32 {
        self.collision_threshold * self.contact_release_factor
    }

    /// Wall-clock time one step stands for
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms.max(1)))
    }

    pub fn collision_effect_ticks(&self) -> u32 {
        self.ms_to_ticks(self.collision_effect_ms)
    }

    pub fn ability_window_ticks(&self) -> u32 {
        self.ms_to_ticks(self.ability_window_ms)
    }

    fn ms_to_ticks(&self, ms: u32) -> u32 {
        ms.div_ceil(self.tick_ms.max(1))
    }
}
