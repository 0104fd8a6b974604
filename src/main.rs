//! Spin Clash entry point
//!
//! Native builds run one headless battle and print the result:
//! `spin-clash [seed] [launch_power] [damped|elastic]`. The wasm build is driven from JS
//! through `spin_clash::web::WebBattle`.

#[cfg(not(target_arch = "wasm32"))]
use spin_clash::sim::{Body, CombatStyle};
#[cfg(not(target_arch = "wasm32"))]
use spin_clash::{
    Battle, BattleError, BattleObserver, BoundaryPreset, Position, Tuning, roster,
};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u64 = 42;

/// Logs the interesting events as they happen
#[cfg(not(target_arch = "wasm32"))]
struct ConsoleObserver {
    last_report: Position,
}

#[cfg(not(target_arch = "wasm32"))]
impl BattleObserver for ConsoleObserver {
    fn on_positions_updated(&mut self, player: Position, _opponent: Position) {
        if player.distance(self.last_report) > 25.0 {
            log::debug!("Player at ({:.1}, {:.1})", player.x, player.y);
            self.last_report = player;
        }
    }

    fn on_collision(&mut self, active: bool) {
        if active {
            log::info!("Clash!");
        }
    }

    fn on_special_ability_activated(&mut self, name: &str) {
        println!("  {name} activates a special ability!");
    }

    fn on_battle_end(&mut self, winner: &str) {
        println!("  {winner} is the last one spinning");
    }

    fn on_running_state_changed(&mut self, running: bool) {
        log::debug!("Running: {running}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T: std::str::FromStr>(arg: Option<String>, default: T, what: &str) -> T {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {what} {raw:?}, using default");
            default
        }),
        None => default,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), BattleError> {
    let mut args = std::env::args().skip(1);
    let seed = parse_arg(args.next(), DEFAULT_SEED, "seed");
    let launch_power = parse_arg(
        args.next(),
        spin_clash::consts::DEFAULT_LAUNCH_POWER,
        "launch power",
    );
    let preset = match args.next() {
        Some(raw) => BoundaryPreset::from_str(&raw).unwrap_or_else(|| {
            log::warn!("Unknown boundary preset {raw:?}, using damped");
            BoundaryPreset::Damped
        }),
        None => BoundaryPreset::Damped,
    };

    let mut player = Body::new("Dragoon", CombatStyle::Attack, 8)?;
    if let Some(beast) = roster::find("dragon-inferno") {
        player = player.with_bit_beast(beast);
    }
    let mut opponent = Body::new("Draciel", CombatStyle::Defense, 7)?;
    if let Some(beast) = roster::find("turtle-water") {
        opponent = opponent.with_bit_beast(beast);
    }

    println!(
        "{} ({}) vs {} ({}), launch power {launch_power}, seed {seed}, {} rim",
        player.name,
        player.style.as_str(),
        opponent.name,
        opponent.style.as_str(),
        preset.as_str()
    );

    let mut battle = Battle::with_tuning(Tuning::from_preset(preset), seed);
    let last_report = battle.tuning().player_start;
    battle.subscribe(ConsoleObserver { last_report });
    battle.start(player, opponent, launch_power)?;

    if let Some(outcome) = battle.run_to_completion() {
        println!(
            "Winner: {} by {:?} after {} frames and {} collisions (stamina {:.0} vs {:.0})",
            outcome.winner,
            outcome.verdict,
            outcome.frame,
            outcome.collisions,
            outcome.stamina[0],
            outcome.stamina[1]
        );
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spin Clash (native) starting...");

    if let Err(e) = run() {
        log::error!("Battle failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is spin_clash::web, this is just to satisfy the compiler
}
