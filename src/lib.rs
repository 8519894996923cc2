//! Subhunt - ship versus submarine on a wrapping grid
//!
//! Core modules:
//! - `sim`: Fixed-quantum simulation (movement, collisions, combat, explosions)
//! - `settings`: Runtime configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Command, CommandOutcome, GameState, Snapshot, update};

/// Game configuration constants
pub mod consts {
    /// Grid extent (cells)
    pub const GRID_WIDTH: i32 = 100;
    pub const GRID_HEIGHT: i32 = 100;

    /// Fixed simulation quantum in milliseconds (4 steps per second)
    pub const TICK_MS: f64 = 250.0;

    /// Minimum wall-clock gap between two submarine torpedo launches
    pub const TORPEDO_INTERVAL_MS: f64 = 10_000.0;

    /// Ship defaults
    pub const SHIP_START: (i32, i32) = (4, 46);
    pub const SHIP_MAX_SPEED: f32 = 8.0;
    pub const SHIP_ACCELERATION: f32 = 0.25;
    pub const SHIP_LIVES: u32 = 10;
    /// Nominal sprite size used for launch and drop offsets
    pub const SHIP_WIDTH: i32 = 2;
    pub const SHIP_HEIGHT: i32 = 8;
    /// Footprint length along the direction of travel
    pub const SHIP_LENGTH: i32 = 8;
    /// Footprint width across the direction of travel
    pub const SHIP_BEAM: i32 = 2;

    /// Submarine defaults
    pub const SUBMARINE_START: (i32, i32) = (48, 10);
    pub const SUBMARINE_SPEED: f32 = 1.0;
    pub const SUBMARINE_MAX_SPEED: f32 = 2.0;
    pub const SUBMARINE_LIVES: u32 = 10;
    pub const SUBMARINE_HEIGHT: i32 = 7;

    /// Weapon speeds (cells per step)
    pub const MISSILE_SPEED: f32 = 6.0;
    pub const MISSILE_MAX_SPEED: f32 = 16.0;
    pub const TORPEDO_SPEED: f32 = 4.0;
    pub const TORPEDO_MAX_SPEED: f32 = 12.0;
    pub const TORPEDO_LENGTH: i32 = 6;
    pub const MINE_SIZE: i32 = 2;

    /// Explosion lifetime
    pub const EXPLOSION_MAX_RADIUS: i32 = 4;
    pub const EXPLOSION_MAX_AGE: u32 = 12;
    pub const EXPLOSION_PARTICLES: usize = 24;
}

/// Display colors (0xRRGGBB). Cosmetic only.
pub mod palette {
    pub const SHIP: u32 = 0x18FF27;
    pub const SUBMARINE: u32 = 0x525252;
    pub const CONNING_TOWER: u32 = 0xFA442C;
    pub const WRECK: u32 = 0x1F1E1E;
    pub const MISSILE: u32 = 0xFFA500;
    pub const TORPEDO: u32 = 0xA5A5A5;
    pub const TORPEDO_GLOW: u32 = 0x563CCA;
    pub const MINE: u32 = 0xFFFFFF;
    pub const BLACK: u32 = 0x000000;
    pub const WHITE: u32 = 0xFFFFFF;
    pub const ORANGE: u32 = 0xFFA500;
    pub const GOLD: u32 = 0xFFD700;
}

/// Wrap a coordinate into `[0, extent)`
#[inline]
pub fn wrap(coord: i32, extent: i32) -> i32 {
    coord.rem_euclid(extent)
}
