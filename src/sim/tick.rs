//! Fixed-quantum simulation clock
//!
//! The host calls [`update`] once per frame with its clock. A step is
//! committed only when a full quantum has elapsed since the previous one;
//! otherwise the call changes nothing.

use super::collision::collides;
use super::combat;
use super::state::{GameEvent, GameState, Target, WeaponKind};

/// Advance the game if a full quantum has elapsed. Returns whether a step ran.
pub fn update(state: &mut GameState, now_ms: f64) -> bool {
    if now_ms - state.last_tick_ms < state.settings.tick_ms {
        return false;
    }
    state.last_tick_ms = now_ms;
    step(state, now_ms);
    true
}

/// Run one simulation step unconditionally
pub fn step(state: &mut GameState, now_ms: f64) {
    state.steps += 1;

    // Order matters: boundary exits are resolved before collisions
    combat::explode_wrecks(state);
    move_combatants(state, now_ms);
    age_explosions(state);
    advance_missiles(state, now_ms);
    advance_torpedoes(state, now_ms);
    check_mines(state);
}

fn move_combatants(state: &mut GameState, now_ms: f64) {
    let grid = state.grid;

    if state.ship.is_alive() {
        state.ship.advance(&grid, now_ms);
    }

    if state.submarine.is_alive() {
        state.submarine.advance(&grid, now_ms);
        let interval = state.settings.torpedo_interval_ms;
        if let Some(torpedo) = state.submarine.fire_torpedo(now_ms, interval) {
            log::debug!("Submarine fired torpedo at {}", torpedo.position);
            state.torpedoes.push(torpedo);
            state.push_event(GameEvent::TorpedoFired);
        }
    }
}

fn age_explosions(state: &mut GameState) {
    let grid = state.grid;
    state
        .explosions
        .retain_mut(|explosion| explosion.update(&grid, &mut state.rng));
}

fn advance_missiles(state: &mut GameState, now_ms: f64) {
    let grid = state.grid;
    let missiles = std::mem::take(&mut state.missiles);
    let mut survivors = Vec::with_capacity(missiles.len());

    for mut missile in missiles {
        if missile.advance(&grid, now_ms) {
            combat::resolve_boundary_exit(state, &missile, WeaponKind::Missile);
        } else if state.submarine.is_alive() && collides(&missile, &state.submarine, &grid) {
            combat::resolve_missile_hit(state, &missile);
        } else {
            survivors.push(missile);
        }
    }

    state.missiles = survivors;
}

fn advance_torpedoes(state: &mut GameState, now_ms: f64) {
    let grid = state.grid;
    let torpedoes = std::mem::take(&mut state.torpedoes);
    let mut survivors = Vec::with_capacity(torpedoes.len());

    for mut torpedo in torpedoes {
        if torpedo.advance(&grid, now_ms) {
            combat::resolve_boundary_exit(state, &torpedo, WeaponKind::Torpedo);
        } else if state.ship.is_alive() && collides(&torpedo, &state.ship, &grid) {
            combat::resolve_torpedo_hit(state, &torpedo);
        } else {
            survivors.push(torpedo);
        }
    }

    state.torpedoes = survivors;
}

/// A mine may strike both combatants in the same step
fn check_mines(state: &mut GameState) {
    let grid = state.grid;
    let mines = std::mem::take(&mut state.mines);
    let mut survivors = Vec::with_capacity(mines.len());

    for mine in mines {
        let mut triggered = false;

        for target in [Target::Submarine, Target::Ship] {
            let entity = state.entity(target);
            if entity.is_alive() && collides(&mine, entity, &grid) {
                combat::resolve_mine_hit(state, &mine, target);
                triggered = true;
            }
        }

        if !triggered {
            survivors.push(mine);
        }
    }

    state.mines = survivors;
}
