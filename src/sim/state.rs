//! Session state and core simulation types
//!
//! The session owns the two long-lived combatants and every short-lived
//! weapon and explosion. Only the tick loop adds or removes weapons and
//! explosions.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::explosion::Explosion;
use super::grid::Grid;
use crate::settings::Settings;

/// One of the two combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Ship,
    Submarine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Missile,
    Torpedo,
    Mine,
}

/// Something noteworthy that happened during a committed step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TorpedoFired,
    MissileHit { lives_left: u32 },
    TorpedoHit { lives_left: u32 },
    MineHit { target: Target, lives_left: u32 },
    /// A missile or torpedo ran off the grid
    WeaponExpired { weapon: WeaponKind },
    Destroyed { target: Target },
}

/// How the encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Complete engine state for one encounter
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub grid: Grid,
    pub ship: Entity,
    pub submarine: Entity,
    pub missiles: Vec<Entity>,
    pub torpedoes: Vec<Entity>,
    pub mines: Vec<Entity>,
    pub explosions: Vec<Explosion>,
    /// Host timestamp of the last committed step
    pub last_tick_ms: f64,
    /// Committed steps so far
    pub steps: u64,
    /// Drives explosion debris and ring colors
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl GameState {
    /// Create a fresh encounter
    pub fn new(settings: Settings) -> Self {
        let grid = Grid::default();
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            grid,
            ship: Entity::ship(&grid),
            submarine: Entity::submarine(&grid),
            missiles: Vec::new(),
            torpedoes: Vec::new(),
            mines: Vec::new(),
            explosions: Vec::new(),
            last_tick_ms: 0.0,
            steps: 0,
            events: Vec::new(),
        }
    }

    /// Restart the encounter with the same settings
    pub fn reset(&mut self) {
        log::info!("Encounter reset (seed {})", self.settings.seed);
        *self = Self::new(self.settings.clone());
    }

    pub fn spawn_explosion(&mut self, cell: IVec2) {
        let explosion = Explosion::new(cell, &self.grid, &mut self.rng);
        self.explosions.push(explosion);
    }

    /// One explosion per cell
    pub fn spawn_explosions(&mut self, cells: impl IntoIterator<Item = IVec2>) {
        for cell in cells {
            self.spawn_explosion(cell);
        }
    }

    pub fn entity(&self, target: Target) -> &Entity {
        match target {
            Target::Ship => &self.ship,
            Target::Submarine => &self.submarine,
        }
    }

    pub fn entity_mut(&mut self, target: Target) -> &mut Entity {
        match target {
            Target::Ship => &mut self.ship,
            Target::Submarine => &mut self.submarine,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// `None` while both combatants are afloat
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.ship.is_alive() {
            Some(Outcome::Defeat)
        } else if !self.submarine.is_alive() {
            Some(Outcome::Victory)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_quiet() {
        let state = GameState::default();
        assert_eq!(state.ship.lives, 10);
        assert_eq!(state.submarine.lives, 10);
        assert!(state.missiles.is_empty());
        assert!(state.explosions.is_empty());
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_outcome_prefers_defeat() {
        let mut state = GameState::default();
        state.submarine.lives = 0;
        assert_eq!(state.outcome(), Some(Outcome::Victory));
        state.ship.lives = 0;
        assert_eq!(state.outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn test_reset_restores_initial_encounter() {
        let mut state = GameState::default();
        state.ship.lives = 2;
        state.ship.add_score(5);
        state.spawn_explosion(IVec2::new(3, 3));
        state.steps = 40;

        state.reset();
        assert_eq!(state.ship.lives, 10);
        assert_eq!(state.ship.score(), 0);
        assert!(state.explosions.is_empty());
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::default();
        state.push_event(GameEvent::TorpedoFired);
        assert_eq!(state.drain_events(), vec![GameEvent::TorpedoFired]);
        assert!(state.drain_events().is_empty());
    }
}
