//! Combat resolution: damage, score and explosion spawning
//!
//! | Event                  | Damage | Side effect                                   |
//! |------------------------|--------|-----------------------------------------------|
//! | missile hits submarine | 3      | ship score +1, blast at missile               |
//! | torpedo hits ship      | 6      | blast at torpedo                              |
//! | mine hits submarine    | 5      | ship score +3, wreck or blast at mine         |
//! | mine hits ship         | 3      | wreck or blast at mine, survivor crippled     |

use super::entity::Entity;
use super::state::{GameEvent, GameState, Target, WeaponKind};

pub const MISSILE_DAMAGE: u32 = 3;
pub const TORPEDO_DAMAGE: u32 = 6;
pub const MINE_DAMAGE_TO_SUBMARINE: u32 = 5;
pub const MINE_DAMAGE_TO_SHIP: u32 = 3;

pub const MISSILE_HIT_SCORE: u32 = 1;
pub const MINE_HIT_SCORE: u32 = 3;

/// Top speed of a ship that survived a mine
pub const CRIPPLED_MAX_SPEED: f32 = 2.0;

/// Subtract damage, flooring lives at zero. Returns the lives left.
pub fn apply_damage(entity: &mut Entity, damage: u32) -> u32 {
    entity.lives = entity.lives.saturating_sub(damage);
    entity.lives
}

/// Permanently cap the ship's speed after a mine strike
pub fn cripple(ship: &mut Entity) {
    ship.max_speed = CRIPPLED_MAX_SPEED;
    ship.speed = ship.speed.min(ship.max_speed);
    ship.set_target_speed(ship.speed);
}

/// Break a dead combatant into one explosion per body cell, once
pub fn destroy(state: &mut GameState, target: Target) {
    let grid = state.grid;
    let entity = state.entity_mut(target);
    if entity.exploding {
        return;
    }
    let cells = entity.explode(&grid);
    log::info!("{target:?} destroyed ({} explosions)", cells.len());
    state.spawn_explosions(cells);
    state.push_event(GameEvent::Destroyed { target });
}

/// Explode combatants that died since the last step
pub fn explode_wrecks(state: &mut GameState) {
    for target in [Target::Ship, Target::Submarine] {
        let entity = state.entity(target);
        if !entity.is_alive() && !entity.exploding {
            destroy(state, target);
        }
    }
}

/// A missile or torpedo ran off the grid; it bursts where it last was.
///
/// A torpedo launched below the last row never had an in-grid cell, so its
/// burst is pulled onto the nearest edge cell.
pub fn resolve_boundary_exit(state: &mut GameState, weapon: &Entity, kind: WeaponKind) {
    let origin = state.grid.clamp(weapon.position);
    state.spawn_explosion(origin);
    state.push_event(GameEvent::WeaponExpired { weapon: kind });
}

pub fn resolve_missile_hit(state: &mut GameState, missile: &Entity) {
    let lives_left = apply_damage(&mut state.submarine, MISSILE_DAMAGE);
    state.ship.add_score(MISSILE_HIT_SCORE);
    state.spawn_explosion(missile.position);
    log::debug!("Missile hit submarine at {}, {lives_left} lives left", missile.position);
    state.push_event(GameEvent::MissileHit { lives_left });
}

pub fn resolve_torpedo_hit(state: &mut GameState, torpedo: &Entity) {
    let lives_left = apply_damage(&mut state.ship, TORPEDO_DAMAGE);
    state.spawn_explosion(torpedo.position);
    log::debug!("Torpedo hit ship at {}, {lives_left} lives left", torpedo.position);
    state.push_event(GameEvent::TorpedoHit { lives_left });
}

pub fn resolve_mine_hit(state: &mut GameState, mine: &Entity, target: Target) {
    let damage = match target {
        Target::Ship => MINE_DAMAGE_TO_SHIP,
        Target::Submarine => MINE_DAMAGE_TO_SUBMARINE,
    };
    let lives_left = apply_damage(state.entity_mut(target), damage);
    log::debug!("Mine hit {target:?} at {}, {lives_left} lives left", mine.position);
    state.push_event(GameEvent::MineHit { target, lives_left });

    if lives_left == 0 && !state.entity(target).exploding {
        destroy(state, target);
    } else {
        state.spawn_explosion(mine.position);
    }

    match target {
        Target::Submarine => state.ship.add_score(MINE_HIT_SCORE),
        Target::Ship if lives_left > 0 => cripple(&mut state.ship),
        Target::Ship => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use proptest::prelude::*;

    #[test]
    fn test_damage_floors_at_zero() {
        let mut state = GameState::default();
        assert_eq!(apply_damage(&mut state.ship, 4), 6);
        assert_eq!(apply_damage(&mut state.ship, u32::MAX), 0);
        assert_eq!(state.ship.lives, 0);
    }

    #[test]
    fn test_missile_hit_scores_and_bursts_once() {
        let mut state = GameState::default();
        let missile = Entity::missile(IVec2::new(49, 12), crate::sim::Heading::East);

        resolve_missile_hit(&mut state, &missile);
        assert_eq!(state.submarine.lives, 7);
        assert_eq!(state.ship.score(), 1);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].origin, IVec2::new(49, 12));
        assert_eq!(state.drain_events(), vec![GameEvent::MissileHit { lives_left: 7 }]);
    }

    #[test]
    fn test_torpedo_hit_damages_ship() {
        let mut state = GameState::default();
        let torpedo = Entity::torpedo(IVec2::new(5, 40), 0.0);
        resolve_torpedo_hit(&mut state, &torpedo);
        assert_eq!(state.ship.lives, 4);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.ship.score(), 0);
    }

    #[test]
    fn test_mine_kill_disintegrates_submarine() {
        let mut state = GameState::default();
        state.submarine.lives = 4;
        let body = state.submarine.segments.len();
        let mine = Entity::mine(state.submarine.position, &state.grid);

        resolve_mine_hit(&mut state, &mine, Target::Submarine);
        assert_eq!(state.submarine.lives, 0);
        assert!(state.submarine.exploding);
        assert_eq!(state.explosions.len(), body);
        assert_eq!(state.ship.score(), 3);
    }

    #[test]
    fn test_mine_wound_cripples_ship() {
        let mut state = GameState::default();
        state.ship.speed = 6.0;
        state.ship.target_speed = 8.0;
        let mine = Entity::mine(state.ship.position, &state.grid);

        resolve_mine_hit(&mut state, &mine, Target::Ship);
        assert_eq!(state.ship.lives, 7);
        assert_eq!(state.ship.max_speed, 2.0);
        assert!(state.ship.speed <= 2.0);
        assert!(state.ship.target_speed <= 2.0);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.ship.score(), 0);
    }

    #[test]
    fn test_mine_kill_on_ship_skips_cripple() {
        let mut state = GameState::default();
        state.ship.lives = 2;
        state.ship.speed = 5.0;
        let mine = Entity::mine(state.ship.position, &state.grid);

        resolve_mine_hit(&mut state, &mine, Target::Ship);
        assert_eq!(state.ship.lives, 0);
        assert_eq!(state.ship.max_speed, 8.0);
        assert_eq!(state.explosions.len(), 16);
    }

    #[test]
    fn test_wreck_explodes_only_once() {
        let mut state = GameState::default();
        state.submarine.lives = 0;
        explode_wrecks(&mut state);
        assert_eq!(state.explosions.len(), 10);
        explode_wrecks(&mut state);
        assert_eq!(state.explosions.len(), 10);
    }

    proptest! {
        #[test]
        fn prop_lives_never_underflow(
            start in 0u32..=10,
            hits in proptest::collection::vec(0u32..=u32::MAX, 0..20),
        ) {
            let mut state = GameState::default();
            state.submarine.lives = start;
            let mut expected = start;
            for damage in hits {
                expected = expected.saturating_sub(damage);
                prop_assert_eq!(apply_damage(&mut state.submarine, damage), expected);
            }
            prop_assert!(state.submarine.lives <= start);
        }
    }
}
