//! Browser facade
//!
//! JS drives the battle on its own timer and receives JSON back. Bodies come
//! in as JSON definitions (`{"name": .., "style": .., "power": ..}`).

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::battle::{Battle, BattleHandle};
use crate::roster;
use crate::sim::Body;
use crate::tuning::Tuning;

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Already initialized if the host loaded the module twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Spin Clash ready");
}

/// One battle driver owned by JS
#[wasm_bindgen]
pub struct WebBattle {
    battle: Battle,
    handle: Option<BattleHandle>,
}

#[wasm_bindgen]
impl WebBattle {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebBattle {
        Self {
            battle: Battle::new(seed),
            handle: None,
        }
    }

    /// Driver with a JSON tuning override
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: u64, tuning_json: &str) -> Result<WebBattle, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(to_js)?;
        Ok(Self {
            battle: Battle::with_tuning(tuning, seed),
            handle: None,
        })
    }

    /// Start a battle, returning its id
    pub fn start(
        &mut self,
        player_json: &str,
        opponent_json: &str,
        launch_power: f32,
    ) -> Result<u64, JsValue> {
        let player = Body::from_json(player_json).map_err(to_js)?;
        let opponent = Body::from_json(opponent_json).map_err(to_js)?;
        let handle = self
            .battle
            .start(player, opponent, launch_power)
            .map_err(to_js)?;
        self.handle = Some(handle);
        Ok(handle.id())
    }

    /// One fixed step as JSON, or `undefined` when nothing is running
    pub fn step(&mut self) -> Result<Option<String>, JsValue> {
        self.battle
            .step()
            .map(|outcome| serde_json::to_string(&outcome).map_err(to_js))
            .transpose()
    }

    /// Run the steps covered by `elapsed_ms`; JSON array of step results
    pub fn advance(&mut self, elapsed_ms: f64) -> Result<String, JsValue> {
        let elapsed_ms = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, 60_000.0)
        } else {
            0.0
        };
        let elapsed = Duration::from_secs_f64(elapsed_ms / 1000.0);
        let outcomes = self.battle.advance(elapsed);
        serde_json::to_string(&outcomes).map_err(to_js)
    }

    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => self.battle.cancel(handle),
            None => false,
        }
    }

    pub fn running(&self) -> bool {
        self.battle.is_running()
    }

    /// Result of the last finished battle as JSON
    pub fn outcome(&self) -> Result<Option<String>, JsValue> {
        self.battle
            .outcome()
            .map(|outcome| serde_json::to_string(outcome).map_err(to_js))
            .transpose()
    }

    #[wasm_bindgen(js_name = bitBeasts)]
    pub fn bit_beasts() -> Result<String, JsValue> {
        serde_json::to_string(roster::bit_beasts()).map_err(to_js)
    }
}
