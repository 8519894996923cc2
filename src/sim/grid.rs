//! Toroidal grid geometry
//!
//! Every wrapping mover routes its coordinates through here. Cells are
//! integer pairs in `[0, width) x [0, height)`; leaving one edge re-enters
//! the opposite one.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::wrap;

/// Immutable grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Wrap a cell onto the torus
    #[inline]
    pub fn wrap(&self, cell: IVec2) -> IVec2 {
        IVec2::new(wrap(cell.x, self.width), wrap(cell.y, self.height))
    }

    /// Whether a cell lies inside the grid without wrapping
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Nearest in-grid cell
    #[inline]
    pub fn clamp(&self, cell: IVec2) -> IVec2 {
        cell.clamp(IVec2::ZERO, IVec2::new(self.width - 1, self.height - 1))
    }

    /// All cells of a `w x h` rectangle anchored at `origin`, wrapped, row-major
    pub fn wrapped_rect(&self, origin: IVec2, w: i32, h: i32) -> impl Iterator<Item = IVec2> + '_ {
        (0..h).flat_map(move |y| (0..w).map(move |x| self.wrap(origin + IVec2::new(x, y))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_negative_and_overflow() {
        let grid = Grid::default();
        assert_eq!(grid.wrap(IVec2::new(-1, 100)), IVec2::new(99, 0));
        assert_eq!(grid.wrap(IVec2::new(-201, 250)), IVec2::new(99, 50));
        assert_eq!(grid.wrap(IVec2::new(42, 7)), IVec2::new(42, 7));
    }

    #[test]
    fn test_clamp_pulls_outside_cells_to_edge() {
        let grid = Grid::default();
        assert_eq!(grid.clamp(IVec2::new(49, 103)), IVec2::new(49, 99));
        assert_eq!(grid.clamp(IVec2::new(-3, 120)), IVec2::new(0, 99));
        assert_eq!(grid.clamp(IVec2::new(12, 34)), IVec2::new(12, 34));
    }

    #[test]
    fn test_contains_is_half_open() {
        let grid = Grid::default();
        assert!(grid.contains(IVec2::new(0, 0)));
        assert!(grid.contains(IVec2::new(99, 99)));
        assert!(!grid.contains(IVec2::new(100, 5)));
        assert!(!grid.contains(IVec2::new(5, -1)));
    }

    #[test]
    fn test_wrapped_rect_crosses_corner() {
        let grid = Grid::default();
        let cells: Vec<IVec2> = grid.wrapped_rect(IVec2::new(99, 99), 2, 2).collect();
        assert_eq!(
            cells,
            vec![
                IVec2::new(99, 99),
                IVec2::new(0, 99),
                IVec2::new(99, 0),
                IVec2::new(0, 0),
            ]
        );
    }
}
