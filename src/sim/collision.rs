//! Collision detection on the torus
//!
//! Discrete steps let a fast mover hop over a thin target between two
//! snapshots. Every cell of the first shape is therefore dilated to its 3x3
//! neighborhood (wrapped) before it is tested against the second shape.

use std::collections::HashSet;

use glam::IVec2;

use super::entity::{Entity, Segment};
use super::grid::Grid;

/// Packed integer key for one cell.
///
/// Both halves keep their full 32 bits, so cells outside the grid (a torpedo
/// tail hanging past the last row) never alias a real cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey(u64);

impl CellKey {
    #[inline]
    pub fn new(cell: IVec2) -> Self {
        Self(((cell.y as u32 as u64) << 32) | cell.x as u32 as u64)
    }
}

/// Whether any cell of `a`, grown by one cell in every direction, overlaps `b`
pub fn segments_collide(a: &[Segment], b: &[Segment], grid: &Grid) -> bool {
    let occupied: HashSet<CellKey> = b.iter().map(|s| CellKey::new(s.cell)).collect();
    if occupied.is_empty() {
        return false;
    }

    a.iter().any(|segment| {
        (-1..=1).any(|dx| {
            (-1..=1).any(|dy| {
                let probe = grid.wrap(segment.cell + IVec2::new(dx, dy));
                occupied.contains(&CellKey::new(probe))
            })
        })
    })
}

/// Whether two entities touch under the 1-cell tolerance
#[inline]
pub fn collides(a: &Entity, b: &Entity, grid: &Grid) -> bool {
    segments_collide(&a.segments, &b.segments, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Heading;

    fn dot(x: i32, y: i32) -> Vec<Segment> {
        vec![Segment::plain(IVec2::new(x, y))]
    }

    #[test]
    fn test_diagonal_neighbors_collide() {
        let grid = Grid::default();
        assert!(segments_collide(&dot(10, 10), &dot(11, 11), &grid));
        assert!(segments_collide(&dot(10, 10), &dot(9, 11), &grid));
        assert!(segments_collide(&dot(10, 10), &dot(10, 10), &grid));
    }

    #[test]
    fn test_two_cells_apart_do_not_collide() {
        let grid = Grid::default();
        assert!(!segments_collide(&dot(10, 10), &dot(12, 12), &grid));
        assert!(!segments_collide(&dot(10, 10), &dot(10, 12), &grid));
    }

    #[test]
    fn test_tolerance_wraps_across_edges() {
        let grid = Grid::default();
        assert!(segments_collide(&dot(0, 50), &dot(99, 50), &grid));
        assert!(segments_collide(&dot(99, 99), &dot(0, 0), &grid));
        assert!(!segments_collide(&dot(0, 50), &dot(98, 50), &grid));
    }

    #[test]
    fn test_empty_shapes_never_collide() {
        let grid = Grid::default();
        assert!(!segments_collide(&[], &dot(1, 1), &grid));
        assert!(!segments_collide(&dot(1, 1), &[], &grid));
    }

    #[test]
    fn test_off_grid_cells_do_not_alias() {
        assert_ne!(CellKey::new(IVec2::new(100, 0)), CellKey::new(IVec2::new(0, 1)));
        assert_ne!(CellKey::new(IVec2::new(-1, 0)), CellKey::new(IVec2::new(99, 0)));
    }

    #[test]
    fn test_missile_against_submarine_body() {
        let grid = Grid::default();
        let sub = Entity::submarine(&grid);
        // Pattern cell (2, 3) of the sub anchored at (48, 10)
        let touching = Entity::missile(IVec2::new(51, 13), Heading::East);
        let clear = Entity::missile(IVec2::new(52, 13), Heading::East);
        assert!(collides(&touching, &sub, &grid));
        assert!(!collides(&clear, &sub, &grid));
    }
}
