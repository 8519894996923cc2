//! Subhunt headless driver
//!
//! Plays a scripted engagement on a simulated 60 Hz host clock, logs what
//! happens and prints the final render snapshot as JSON.
//!
//! Usage: `subhunt [settings.json]` (set `RUST_LOG=debug` for every order)

use std::path::Path;

use subhunt::Settings;
use subhunt::sim::{Command, GameState, Heading, Side, apply_command, update};

/// Simulated host frame length
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this much host time
const MAX_RUN_MS: f64 = 180_000.0;

/// Orders for the helm once `step` steps have been committed
fn orders_for(step: u64) -> Vec<Command> {
    let mut orders = Vec::new();
    match step {
        0 => orders.push(Command::FullAhead),
        4 => orders.push(Command::SetHeading(Heading::East)),
        _ => {}
    }
    if step > 4 && step % 6 == 0 {
        orders.push(Command::FireMissile(Side::Port));
        orders.push(Command::FireMissile(Side::Starboard));
    }
    if step > 4 && step % 25 == 0 {
        orders.push(Command::DropMine);
    }
    orders
}

fn main() {
    env_logger::init();

    let settings = std::env::args()
        .nth(1)
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();
    log::info!("Subhunt (headless) starting with seed {}", settings.seed);
    match settings.to_json() {
        Ok(json) => log::debug!("Settings: {json}"),
        Err(e) => log::warn!("Failed to encode settings: {e}"),
    }

    let mut state = GameState::new(settings);
    let mut orders_given_at = None;
    let mut now = 0.0;

    while now < MAX_RUN_MS {
        now += FRAME_MS;

        if orders_given_at != Some(state.steps) {
            orders_given_at = Some(state.steps);
            for order in orders_for(state.steps) {
                let outcome = apply_command(&mut state, order);
                log::debug!("Step {}: {order:?} -> {outcome:?}", state.steps);
            }
        }

        if !update(&mut state, now) {
            continue;
        }

        for event in state.drain_events() {
            log::info!("Step {}: {event:?}", state.steps);
        }

        if let Some(outcome) = state.outcome() {
            // Let the wreck burn out before stopping
            let wrecked = state.ship.exploding || state.submarine.exploding;
            if wrecked && state.explosions.is_empty() {
                log::info!("{outcome:?} after {} steps", state.steps);
                break;
            }
        }
    }

    if state.outcome().is_none() {
        log::info!("No decision after {:.0} s of host time", now / 1000.0);
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode snapshot: {e}"),
    }
}
