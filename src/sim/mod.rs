//! Fixed-quantum combat simulation
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and input concerns:
//! - State only advances in whole quanta via [`update`]
//! - Explosion debris comes from a seeded RNG owned by the session
//! - Per-step work runs in a fixed order (wrecks, movers, explosions,
//!   missiles, torpedoes, mines)

pub mod collision;
pub mod combat;
pub mod command;
pub mod entity;
pub mod explosion;
pub mod grid;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{CellKey, collides, segments_collide};
pub use command::{Command, CommandOutcome, IgnoreReason, apply_command};
pub use entity::{Entity, EntityKind, Heading, Segment, Side};
pub use explosion::{Explosion, Particle};
pub use grid::Grid;
pub use snapshot::{DrawCell, ShipView, Snapshot, SubmarineView};
pub use state::{GameEvent, GameState, Outcome, Target, WeaponKind};
pub use tick::{step, update};
