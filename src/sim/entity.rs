//! Entity model shared by the ship, the submarine and their weapons
//!
//! One record carries the fields every mover has (anchor, shape, speed,
//! heading, lives). The [`EntityKind`] tag selects how the record moves,
//! how its shape is derived from the anchor and what it leaves behind when
//! it explodes.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::*;
use crate::palette;

/// Cardinal direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Heading {
    #[default]
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Compass bearing in degrees (north = 0, clockwise)
    pub fn degrees(self) -> u16 {
        match self {
            Heading::North => 0,
            Heading::East => 90,
            Heading::South => 180,
            Heading::West => 270,
        }
    }

    /// One-cell displacement (y grows southward)
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::North => IVec2::NEG_Y,
            Heading::East => IVec2::X,
            Heading::South => IVec2::Y,
            Heading::West => IVec2::NEG_X,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Heading::East | Heading::West)
    }
}

/// Side of the ship a missile is launched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Port,
    Starboard,
}

/// One occupied grid cell, optionally with its own display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub cell: IVec2,
    pub color: Option<u32>,
}

impl Segment {
    pub fn plain(cell: IVec2) -> Self {
        Self { cell, color: None }
    }

    pub fn colored(cell: IVec2, color: u32) -> Self {
        Self {
            cell,
            color: Some(color),
        }
    }
}

/// Per-kind state and behavior selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship {
        score: u32,
    },
    Submarine {
        /// Timestamp of the last launch, `None` until the first one
        last_torpedo_ms: Option<f64>,
    },
    Missile,
    Torpedo {
        /// Clock used for the cosmetic flashing of the warhead
        flash_ms: f64,
    },
    Mine,
}

/// Submarine sprite, rows top to bottom
const SUBMARINE_PATTERN: [[bool; 3]; 7] = [
    [true, false, true],
    [false, true, false],
    [false, true, false],
    [true, true, true],
    [false, true, false],
    [false, true, false],
    [false, true, false],
];

/// Pattern cell drawn in the conning-tower color
const CONNING_TOWER_CELL: (usize, usize) = (1, 1);

/// A mover on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    /// Anchor cell; segments are derived from it
    pub position: IVec2,
    pub segments: Vec<Segment>,
    /// Fallback color for segments without their own
    pub color: u32,
    pub speed: f32,
    pub target_speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub heading: Heading,
    pub lives: u32,
    pub max_lives: u32,
    /// Set once the body has been turned into explosions
    pub exploding: bool,
}

impl Entity {
    fn with_kind(kind: EntityKind, position: IVec2, heading: Heading, color: u32) -> Self {
        Self {
            kind,
            position,
            segments: Vec::new(),
            color,
            speed: 0.0,
            target_speed: 0.0,
            max_speed: 0.0,
            acceleration: 0.0,
            heading,
            lives: 1,
            max_lives: 1,
            exploding: false,
        }
    }

    /// The player's ship at its starting berth, stopped and facing north
    pub fn ship(grid: &Grid) -> Self {
        let start = grid.wrap(IVec2::new(SHIP_START.0, SHIP_START.1));
        let mut ship = Self::with_kind(
            EntityKind::Ship { score: 0 },
            start,
            Heading::North,
            palette::SHIP,
        );
        ship.max_speed = SHIP_MAX_SPEED;
        ship.acceleration = SHIP_ACCELERATION;
        ship.lives = SHIP_LIVES;
        ship.max_lives = SHIP_LIVES;
        ship.update_shape(grid);
        ship
    }

    /// The enemy submarine, already running south at its cruising speed
    pub fn submarine(grid: &Grid) -> Self {
        let start = grid.wrap(IVec2::new(SUBMARINE_START.0, SUBMARINE_START.1));
        let mut sub = Self::with_kind(
            EntityKind::Submarine {
                last_torpedo_ms: None,
            },
            start,
            Heading::South,
            palette::SUBMARINE,
        );
        sub.speed = SUBMARINE_SPEED;
        sub.target_speed = SUBMARINE_SPEED;
        sub.max_speed = SUBMARINE_MAX_SPEED;
        sub.lives = SUBMARINE_LIVES;
        sub.max_lives = SUBMARINE_LIVES;
        sub.update_shape(grid);
        sub
    }

    pub fn missile(cell: IVec2, direction: Heading) -> Self {
        let mut missile =
            Self::with_kind(EntityKind::Missile, cell, direction, palette::MISSILE);
        missile.speed = MISSILE_SPEED;
        missile.target_speed = MISSILE_SPEED;
        missile.max_speed = MISSILE_MAX_SPEED;
        missile.segments = vec![Segment::plain(cell)];
        missile
    }

    /// Torpedoes always run south
    pub fn torpedo(cell: IVec2, now_ms: f64) -> Self {
        let mut torpedo = Self::with_kind(
            EntityKind::Torpedo { flash_ms: now_ms },
            cell,
            Heading::South,
            palette::TORPEDO,
        );
        torpedo.speed = TORPEDO_SPEED;
        torpedo.target_speed = TORPEDO_SPEED;
        torpedo.max_speed = TORPEDO_MAX_SPEED;
        torpedo.segments = torpedo_segments(cell, now_ms, torpedo.color);
        torpedo
    }

    pub fn mine(cell: IVec2, grid: &Grid) -> Self {
        let mut mine = Self::with_kind(EntityKind::Mine, grid.wrap(cell), Heading::North, palette::MINE);
        mine.update_shape(grid);
        mine
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn score(&self) -> u32 {
        match self.kind {
            EntityKind::Ship { score } => score,
            _ => 0,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        if let EntityKind::Ship { score } = &mut self.kind {
            *score += points;
        }
    }

    /// Width and height of the ship's footprint for the current heading
    pub fn footprint(&self) -> (i32, i32) {
        if self.heading.is_horizontal() {
            (SHIP_LENGTH, SHIP_BEAM)
        } else {
            (SHIP_BEAM, SHIP_LENGTH)
        }
    }

    /// Rebuild `segments` from the anchor
    pub fn update_shape(&mut self, grid: &Grid) {
        self.segments = match self.kind {
            EntityKind::Ship { .. } => {
                let (w, h) = self.footprint();
                grid.wrapped_rect(self.position, w, h).map(Segment::plain).collect()
            }
            EntityKind::Submarine { .. } => self.submarine_segments(grid),
            EntityKind::Missile => vec![Segment::plain(self.position)],
            EntityKind::Torpedo { flash_ms } => torpedo_segments(self.position, flash_ms, self.color),
            EntityKind::Mine => grid
                .wrapped_rect(self.position, MINE_SIZE, MINE_SIZE)
                .map(Segment::plain)
                .collect(),
        };
    }

    fn submarine_segments(&self, grid: &Grid) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(10);
        for (y, row) in SUBMARINE_PATTERN.iter().enumerate() {
            for (x, &occupied) in row.iter().enumerate() {
                if !occupied {
                    continue;
                }
                let cell = grid.wrap(self.position + IVec2::new(x as i32, y as i32));
                let color = if !self.is_alive() {
                    palette::WRECK
                } else if (x, y) == CONNING_TOWER_CELL {
                    palette::CONNING_TOWER
                } else {
                    self.color
                };
                segments.push(Segment::colored(cell, color));
            }
        }
        segments
    }

    /// Whole cells covered this step; fractional speeds still move
    #[inline]
    pub fn cells_per_step(&self) -> u32 {
        self.speed.ceil().max(0.0) as u32
    }

    /// Advance one simulation step.
    ///
    /// Returns `true` when a bounded mover (missile, torpedo) would leave the
    /// grid. The anchor then stays on the last in-bounds cell.
    pub fn advance(&mut self, grid: &Grid, now_ms: f64) -> bool {
        match self.kind {
            EntityKind::Ship { .. } => {
                self.steer(grid);
                false
            }
            EntityKind::Submarine { .. } => {
                if self.is_alive() {
                    self.step_wrapping(grid);
                }
                false
            }
            EntityKind::Missile => self.step_bounded(grid),
            EntityKind::Torpedo { ref mut flash_ms } => {
                *flash_ms = now_ms;
                self.step_bounded(grid)
            }
            EntityKind::Mine => false,
        }
    }

    fn steer(&mut self, grid: &Grid) {
        if !self.is_alive() {
            return;
        }

        if self.speed < self.target_speed {
            self.speed = (self.speed + self.acceleration).min(self.target_speed);
        } else if self.speed > self.target_speed {
            self.speed = (self.speed - self.acceleration).max(self.target_speed);
        }

        // Snap float residue to a dead stop
        if self.speed.abs() < 0.01 {
            self.speed = 0.0;
            return;
        }

        self.step_wrapping(grid);
    }

    fn step_wrapping(&mut self, grid: &Grid) {
        let delta = self.heading.delta();
        for _ in 0..self.cells_per_step() {
            self.position = grid.wrap(self.position + delta);
            self.update_shape(grid);
        }
    }

    fn step_bounded(&mut self, grid: &Grid) -> bool {
        let delta = self.heading.delta();
        for _ in 0..self.cells_per_step() {
            let next = self.position + delta;
            if !grid.contains(next) {
                return true;
            }
            self.position = next;
        }
        self.update_shape(grid);
        false
    }

    /// Turn the ship. Refused while stopped or when already on that heading.
    pub fn set_heading(&mut self, heading: Heading, grid: &Grid) -> bool {
        if self.speed > 0.0 && self.heading != heading {
            self.heading = heading;
            self.update_shape(grid);
            true
        } else {
            false
        }
    }

    /// Set the speed to ramp toward, clamped to `[0, max_speed]`
    pub fn set_target_speed(&mut self, speed: f32) {
        self.target_speed = speed.clamp(0.0, self.max_speed);
    }

    pub fn stop(&mut self) {
        self.target_speed = 0.0;
    }

    /// Launch a torpedo below the hull if the cooldown allows it
    pub fn fire_torpedo(&mut self, now_ms: f64, interval_ms: f64) -> Option<Entity> {
        if !self.is_alive() {
            return None;
        }
        let EntityKind::Submarine { last_torpedo_ms } = &mut self.kind else {
            return None;
        };
        if last_torpedo_ms.is_some_and(|last| now_ms - last < interval_ms) {
            return None;
        }
        *last_torpedo_ms = Some(now_ms);

        // Not wrapped: a launch below the last row bursts on its first step
        let launch = self.position + IVec2::new(1, SUBMARINE_HEIGHT);
        Some(Entity::torpedo(launch, now_ms))
    }

    /// Convert the body into explosion anchors, once.
    ///
    /// Returns one cell per occupied segment the first time it is called and
    /// nothing afterwards.
    pub fn explode(&mut self, grid: &Grid) -> Vec<IVec2> {
        if self.exploding {
            return Vec::new();
        }
        self.lives = 0;
        self.exploding = true;
        self.color = palette::WRECK;
        match self.kind {
            EntityKind::Ship { .. } => self.stop(),
            _ => self.speed = 0.0,
        }
        self.update_shape(grid);
        self.segments.iter().map(|s| s.cell).collect()
    }
}

fn torpedo_segments(head: IVec2, now_ms: f64, body_color: u32) -> Vec<Segment> {
    let lead_flash = now_ms.rem_euclid(500.0) < 250.0;
    let tip_flash = (now_ms + 250.0).rem_euclid(500.0) < 250.0;

    (0..TORPEDO_LENGTH)
        .map(|i| {
            let color = match i {
                0 | 1 if tip_flash => palette::BLACK,
                0 | 1 => palette::TORPEDO_GLOW,
                2 if lead_flash => palette::WHITE,
                2 => palette::TORPEDO_GLOW,
                _ => body_color,
            };
            Segment::colored(head + IVec2::new(0, i), color)
        })
        .collect()
}
