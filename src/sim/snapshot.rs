//! Read-only render data
//!
//! Built after a committed or skipped step. A renderer only ever sees this
//! view, never the live state.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Heading};
use super::state::GameState;

/// One cell to paint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCell {
    pub cell: IVec2,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub position: IVec2,
    pub segments: Vec<DrawCell>,
    pub speed: f32,
    pub heading: Heading,
    /// Compass bearing of the bow, for rotating the sprite
    pub bearing: u16,
    pub lives: u32,
    pub max_lives: u32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmarineView {
    pub segments: Vec<DrawCell>,
    pub lives: u32,
    pub max_lives: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ship: ShipView,
    pub submarine: SubmarineView,
    /// Missiles followed by torpedoes
    pub projectiles: Vec<Vec<DrawCell>>,
    pub mines: Vec<Vec<IVec2>>,
    pub explosions: Vec<Vec<DrawCell>>,
}

fn draw_cells(entity: &Entity) -> Vec<DrawCell> {
    entity
        .segments
        .iter()
        .map(|s| DrawCell {
            cell: s.cell,
            color: s.color.unwrap_or(entity.color),
        })
        .collect()
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let ship = &self.ship;
        Snapshot {
            ship: ShipView {
                position: ship.position,
                segments: draw_cells(ship),
                speed: ship.speed,
                heading: ship.heading,
                bearing: ship.heading.degrees(),
                lives: ship.lives,
                max_lives: ship.max_lives,
                score: ship.score(),
            },
            submarine: SubmarineView {
                segments: draw_cells(&self.submarine),
                lives: self.submarine.lives,
                max_lives: self.submarine.max_lives,
            },
            projectiles: self
                .missiles
                .iter()
                .chain(&self.torpedoes)
                .map(draw_cells)
                .collect(),
            mines: self
                .mines
                .iter()
                .map(|m| m.segments.iter().map(|s| s.cell).collect())
                .collect(),
            explosions: self
                .explosions
                .iter()
                .map(|e| {
                    e.segments
                        .iter()
                        .map(|s| DrawCell {
                            cell: s.cell,
                            color: s.color.unwrap_or(crate::palette::WHITE),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;
    use crate::sim::{Command, Side, apply_command};

    #[test]
    fn test_snapshot_resolves_colors() {
        let state = GameState::default();
        let snap = state.snapshot();

        assert_eq!(snap.ship.segments.len(), 16);
        assert!(snap.ship.segments.iter().all(|c| c.color == palette::SHIP));
        assert_eq!(snap.ship.lives, 10);
        assert_eq!(snap.ship.max_lives, 10);
        assert_eq!(snap.submarine.segments.len(), 10);
        assert!(snap.submarine.segments.iter().any(|c| c.color == palette::CONNING_TOWER));
        assert!(snap.projectiles.is_empty());
        assert_eq!(snap.ship.bearing, 0);
    }

    #[test]
    fn test_snapshot_bearing_follows_heading() {
        let mut state = GameState::default();
        state.ship.speed = 1.0;
        assert!(apply_command(&mut state, Command::SetHeading(Heading::West)).is_accepted());
        assert_eq!(state.snapshot().ship.bearing, 270);
    }

    #[test]
    fn test_snapshot_lists_weapons() {
        let mut state = GameState::default();
        state.ship.speed = 1.0;
        assert!(apply_command(&mut state, Command::FireMissile(Side::Starboard)).is_accepted());
        assert!(apply_command(&mut state, Command::DropMine).is_accepted());

        let snap = state.snapshot();
        assert_eq!(snap.projectiles.len(), 1);
        assert_eq!(snap.projectiles[0][0].color, palette::MISSILE);
        assert_eq!(snap.mines.len(), 1);
        assert_eq!(snap.mines[0].len(), 4);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::default();
        let json = serde_json::to_string(&state.snapshot());
        assert!(json.is_ok_and(|j| j.contains("\"score\":0")));
    }
}
