//! Battle driver
//!
//! Owns one battle at a time and walks it through `Idle -> Running ->
//! Finished`. The host either calls `step()` on its own 50 ms cadence or
//! feeds wall-clock time into `advance()`, which runs as many fixed steps as
//! fit. Events reach the host twice: in each returned `StepOutcome` and
//! through any subscribed `BattleObserver`.

use std::time::Duration;

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::Position;
use crate::consts::MAX_LAUNCH_POWER;
use crate::error::BattleError;
use crate::sim::{BattleEvent, Body, Side, SimulationState, StepOutcome, Verdict, tick};
use crate::tuning::Tuning;

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BattlePhase {
    /// Nothing running; ready for `start`
    Idle,
    Running,
    /// Winner decided; inert until the next `start`
    Finished,
}

/// Identifies one started battle. Stale handles are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BattleHandle(u64);

impl BattleHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Terminal result of a battle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleOutcome {
    pub winner: String,
    pub side: Side,
    pub verdict: Verdict,
    /// Frame on which the battle ended
    pub frame: u32,
    /// Effective stamina each side was judged on
    pub stamina: [f32; 2],
    pub collisions: u32,
}

/// Push-style event subscriber. Every method defaults to a no-op.
pub trait BattleObserver {
    fn on_positions_updated(&mut self, _player: Position, _opponent: Position) {}
    fn on_collision(&mut self, _active: bool) {}
    fn on_special_ability_activated(&mut self, _name: &str) {}
    fn on_battle_end(&mut self, _winner: &str) {}
    fn on_running_state_changed(&mut self, _running: bool) {}

    /// Route an event to the matching callback
    fn on_event(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::PositionsUpdated { player, opponent } => {
                self.on_positions_updated(*player, *opponent)
            }
            BattleEvent::Collision { active } => self.on_collision(*active),
            BattleEvent::SpecialAbilityActivated { name } => {
                self.on_special_ability_activated(name)
            }
            BattleEvent::BattleEnded { winner } => self.on_battle_end(winner),
            BattleEvent::RunningStateChanged { running } => {
                self.on_running_state_changed(*running)
            }
        }
    }
}

/// Observer built from a closure that sees every event
pub struct EventSink<F>(pub F);

impl<F: FnMut(&BattleEvent)> BattleObserver for EventSink<F> {
    fn on_event(&mut self, event: &BattleEvent) {
        (self.0)(event)
    }
}

/// The battle driver
pub struct Battle {
    tuning: Tuning,
    phase: BattlePhase,
    state: Option<SimulationState>,
    outcome: Option<BattleOutcome>,
    /// Seeds each new battle's RNG
    seeder: Pcg32,
    generation: u64,
    accumulator: Duration,
    observers: Vec<Box<dyn BattleObserver>>,
}

impl Battle {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self {
            tuning,
            phase: BattlePhase::Idle,
            state: None,
            outcome: None,
            seeder: Pcg32::seed_from_u64(seed),
            generation: 0,
            accumulator: Duration::ZERO,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl BattleObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == BattlePhase::Running
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Live state of the running battle
    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    /// Result of the last finished battle
    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    /// Validate both bodies and launch a fresh battle.
    ///
    /// Starting while another battle runs replaces it; the old handle goes stale.
    pub fn start(
        &mut self,
        player: Body,
        opponent: Body,
        launch_power: f32,
    ) -> Result<BattleHandle, BattleError> {
        if !(0.0..=MAX_LAUNCH_POWER).contains(&launch_power) {
            return Err(BattleError::LaunchPowerOutOfRange(launch_power));
        }
        player.validate()?;
        opponent.validate()?;
        if player.name == opponent.name {
            return Err(BattleError::DuplicateName(player.name));
        }

        if self.is_running() {
            log::warn!("Restarting battle {} before it finished", self.generation);
            self.dispatch(&[BattleEvent::RunningStateChanged { running: false }]);
        }

        log::info!(
            "Battle started: {} ({}, power {}) vs {} ({}, power {}), launch {}",
            player.name,
            player.style.as_str(),
            player.power,
            opponent.name,
            opponent.style.as_str(),
            opponent.power,
            launch_power
        );

        self.generation += 1;
        let seed = self.seeder.next_u64();
        let state = SimulationState::new(player, opponent, launch_power, &self.tuning, seed);
        let positions = state.positions;

        self.state = Some(state);
        self.outcome = None;
        self.phase = BattlePhase::Running;
        self.accumulator = Duration::ZERO;

        self.dispatch(&[
            BattleEvent::RunningStateChanged { running: true },
            BattleEvent::PositionsUpdated {
                player: positions[0],
                opponent: positions[1],
            },
        ]);

        Ok(BattleHandle(self.generation))
    }

    /// Stop a running battle without a winner. Returns false for stale
    /// handles or when nothing is running.
    pub fn cancel(&mut self, handle: BattleHandle) -> bool {
        if handle.0 != self.generation || !self.is_running() {
            log::debug!("Ignoring cancel for battle {}", handle.0);
            return false;
        }

        log::info!("Battle {} cancelled", handle.0);
        self.state = None;
        self.phase = BattlePhase::Idle;
        self.accumulator = Duration::ZERO;
        self.dispatch(&[BattleEvent::RunningStateChanged { running: false }]);
        true
    }

    /// Advance one fixed step. `None` unless a battle is running.
    pub fn step(&mut self) -> Option<StepOutcome> {
        if !self.is_running() {
            return None;
        }
        let state = self.state.as_mut()?;
        let mut outcome = tick(state, &self.tuning);

        if let Some(finish) = outcome.finish {
            self.outcome = Some(BattleOutcome {
                winner: state.body(finish.winner).name.clone(),
                side: finish.winner,
                verdict: finish.verdict,
                frame: outcome.frame,
                stamina: finish.stamina,
                collisions: state.collisions,
            });
            self.state = None;
            self.phase = BattlePhase::Finished;
            self.accumulator = Duration::ZERO;
            outcome
                .events
                .push(BattleEvent::RunningStateChanged { running: false });
        }

        self.dispatch(&outcome.events);
        Some(outcome)
    }

    /// Feed elapsed wall-clock time and run the fixed steps it covers.
    /// Leftover time carries into the next call; at most `max_substeps`
    /// steps run per call.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        if !self.is_running() {
            return outcomes;
        }

        let tick = self.tuning.tick_duration();
        let max_substeps = self.tuning.max_substeps;
        self.accumulator = (self.accumulator + elapsed).min(tick * max_substeps);

        let mut substeps = 0;
        while self.accumulator >= tick && substeps < max_substeps {
            self.accumulator -= tick;
            substeps += 1;
            match self.step() {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }
        outcomes
    }

    /// Step until the battle finishes (headless hosts and tests)
    pub fn run_to_completion(&mut self) -> Option<&BattleOutcome> {
        while self.step().is_some() {}
        self.outcome.as_ref()
    }

    fn dispatch(&mut self, events: &[BattleEvent]) {
        for observer in &mut self.observers {
            for event in events {
                observer.on_event(event);
            }
        }
    }
}
