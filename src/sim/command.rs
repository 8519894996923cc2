//! Ship command interpreter
//!
//! Commands arrive already parsed from the host's input surface. They are
//! applied between steps and take effect on the next one. Malformed or
//! out-of-range commands change nothing and report why.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Heading, Side};
use super::grid::Grid;
use super::state::GameState;
use crate::consts::{SHIP_HEIGHT, SHIP_WIDTH};

/// Accepted speed orders (cells per step)
pub const MIN_SPEED_ORDER: u8 = 1;
pub const MAX_SPEED_ORDER: u8 = 10;

/// Speed used by the dead-slow preset
pub const DEAD_SLOW: f32 = 1.0;

/// The closed command vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SetHeading(Heading),
    /// Ramp toward `n` cells per step, `n` in `1..=10`
    SetSpeed(u8),
    FullAhead,
    DeadSlow,
    Stop,
    FireMissile(Side),
    DropMine,
}

/// Why a command left the state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    ShipDestroyed,
    SpeedOutOfRange,
    /// A motionless ship cannot pivot
    ShipStationary,
    HeadingUnchanged,
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Accepted,
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_accepted(self) -> bool {
        self == CommandOutcome::Accepted
    }
}

/// Apply one command to the ship's controls
pub fn apply_command(state: &mut GameState, command: Command) -> CommandOutcome {
    if !state.ship.is_alive() {
        return CommandOutcome::Ignored(IgnoreReason::ShipDestroyed);
    }

    let outcome = match command {
        Command::SetHeading(heading) => set_heading(state, heading),
        Command::SetSpeed(n) if (MIN_SPEED_ORDER..=MAX_SPEED_ORDER).contains(&n) => {
            state.ship.set_target_speed(n as f32);
            CommandOutcome::Accepted
        }
        Command::SetSpeed(_) => CommandOutcome::Ignored(IgnoreReason::SpeedOutOfRange),
        Command::FullAhead => {
            let max = state.ship.max_speed;
            state.ship.set_target_speed(max);
            CommandOutcome::Accepted
        }
        Command::DeadSlow => {
            state.ship.set_target_speed(DEAD_SLOW);
            CommandOutcome::Accepted
        }
        Command::Stop => {
            state.ship.stop();
            CommandOutcome::Accepted
        }
        Command::FireMissile(side) => {
            let launch = missile_launch(&state.ship, side, &state.grid);
            let direction = missile_direction(state.ship.heading, side);
            log::debug!("Missile away from {side:?} at {launch}, heading {direction:?}");
            state.missiles.push(Entity::missile(launch, direction));
            CommandOutcome::Accepted
        }
        Command::DropMine => {
            let cell = mine_drop(&state.ship);
            log::debug!("Mine dropped at {}", state.grid.wrap(cell));
            let mine = Entity::mine(cell, &state.grid);
            state.mines.push(mine);
            CommandOutcome::Accepted
        }
    };

    if let CommandOutcome::Ignored(reason) = outcome {
        log::debug!("Ignored {command:?}: {reason:?}");
    }
    outcome
}

fn set_heading(state: &mut GameState, heading: Heading) -> CommandOutcome {
    if state.ship.speed <= 0.0 {
        return CommandOutcome::Ignored(IgnoreReason::ShipStationary);
    }
    let grid = state.grid;
    if state.ship.set_heading(heading, &grid) {
        CommandOutcome::Accepted
    } else {
        CommandOutcome::Ignored(IgnoreReason::HeadingUnchanged)
    }
}

/// Launch cell beside the hull.
///
/// Offsets use the nominal 2x8 sprite size whatever the heading, so on an
/// east or west heading port and starboard sit at different distances.
pub fn missile_launch(ship: &Entity, side: Side, grid: &Grid) -> IVec2 {
    let IVec2 { mut x, mut y } = ship.position;

    match ship.heading {
        Heading::East | Heading::West => {
            x += SHIP_WIDTH / 2;
            let (port, starboard) = (y - 1, y + SHIP_HEIGHT);
            y = match (ship.heading, side) {
                (Heading::East, Side::Port) | (Heading::West, Side::Starboard) => port,
                _ => starboard,
            };
        }
        Heading::North | Heading::South => {
            y += SHIP_HEIGHT / 2;
            let (port, starboard) = (x - 1, x + SHIP_WIDTH);
            x = match (ship.heading, side) {
                (Heading::North, Side::Port) | (Heading::South, Side::Starboard) => port,
                _ => starboard,
            };
        }
    }

    grid.wrap(IVec2::new(x, y))
}

/// Missiles fly perpendicular to the ship, away from the launching side
pub fn missile_direction(heading: Heading, side: Side) -> Heading {
    match (heading, side) {
        (Heading::East, Side::Port) => Heading::North,
        (Heading::East, Side::Starboard) => Heading::South,
        (Heading::West, Side::Port) => Heading::South,
        (Heading::West, Side::Starboard) => Heading::North,
        (Heading::North, Side::Port) => Heading::West,
        (Heading::North, Side::Starboard) => Heading::East,
        (Heading::South, Side::Port) => Heading::East,
        (Heading::South, Side::Starboard) => Heading::West,
    }
}

/// Drop cell astern of the ship (unwrapped; the mine wraps itself)
pub fn mine_drop(ship: &Entity) -> IVec2 {
    let IVec2 { x, y } = ship.position;
    match ship.heading {
        Heading::North => IVec2::new(x + SHIP_WIDTH / 2 - 1, y + SHIP_HEIGHT + 2),
        Heading::South => IVec2::new(x + SHIP_WIDTH / 2 - 1, y - 2),
        Heading::East => IVec2::new(x - 2, y + SHIP_HEIGHT / 2 - 1),
        Heading::West => IVec2::new(x + SHIP_WIDTH + 2, y + SHIP_HEIGHT / 2 - 1),
    }
}
