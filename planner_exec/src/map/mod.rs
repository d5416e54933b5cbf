//! # Map collaborators
//!
//! The planner sees the world through three interfaces:
//!
//! - [`CostSurface`] - a rolling 2D grid of `u8` occupancy costs,
//! - [`WorldModel`] - legality and cost of placing the vehicle footprint at a pose,
//! - [`DistanceField`] - path and goal distances over the same grid, recomputed from the plan.
//!
//! Reference implementations of each are provided by [`CostGrid`], [`CostmapModel`] and
//! [`MapGrid`].

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod cost_grid;
mod map_grid;
mod world_model;

pub use cost_grid::{CostGrid, CostGridParams, MapError};
pub use map_grid::MapGrid;
pub use world_model::CostmapModel;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::sync::Arc;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{footprint::FootprintSpec, loc::Pose2};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Cell is known to be free.
pub const FREE_SPACE: u8 = 0;

/// The vehicle's centre cannot enter this cell without the footprint touching an obstacle.
pub const INSCRIBED_INFLATED_OBSTACLE: u8 = 253;

/// Cell contains an obstacle.
pub const LETHAL_OBSTACLE: u8 = 254;

/// Nothing is known about this cell.
pub const NO_INFORMATION: u8 = 255;

/// Distance field value of a cell that cannot reach the path or goal.
pub const UNREACHABLE: f64 = f64::INFINITY;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Integer index of a cell in a grid.
///
/// Indices are signed so that cells outside the map can still be represented, for example when
/// rasterising a footprint which overhangs the map edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
}

/// Geometry of a 2D grid: where it sits in the world and how big its cells are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Position of the lower-left corner of cell `(0, 0)` in the map frame
    pub origin_m: Vector2<f64>,

    /// Side length of a (square) cell
    pub resolution_m: f64,

    /// Number of cells along the X and Y axes
    pub num_cells: Vector2<usize>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Result of placing the vehicle footprint at a pose.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum FootprintCost {
    /// The footprint is legal with the given cost (the maximum cell cost it touches)
    Cost(f64),

    /// The footprint touches an obstacle, unknown space, or leaves the map
    Impassable,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A rolling 2D grid of occupancy costs in the map frame.
pub trait CostSurface {
    /// Geometry of the grid.
    fn geometry(&self) -> &GridGeometry;

    /// Cost of the given cell, or `None` if the cell is outside the grid.
    fn cell_cost(&self, cell: GridCell) -> Option<u8>;
}

/// Evaluates the legality of placing the vehicle footprint at a pose.
pub trait WorldModel {
    /// Cost of placing the footprint at the given pose.
    fn footprint_cost(&self, pose: &Pose2, footprint: &FootprintSpec) -> FootprintCost;
}

/// Path and goal distance fields over the cost surface's grid.
///
/// Distances are expressed in cells, straight steps cost 1 and diagonal steps sqrt(2). Cells
/// which cannot reach the path (or goal) hold [`UNREACHABLE`], as do cells outside the grid.
pub trait DistanceField {
    /// Recompute both fields for the given plan and local goal.
    ///
    /// The plan is given in the map frame. Only the parts of the plan inside the grid are used.
    fn recompute<S: CostSurface>(
        &mut self,
        surface: &S,
        plan_m: &[Vector2<f64>],
        goal_m: &Vector2<f64>,
    );

    /// Distance from the cell to the nearest plan cell.
    fn path_distance(&self, cell: GridCell) -> f64;

    /// Distance from the cell to the local goal cell.
    fn goal_distance(&self, cell: GridCell) -> f64;

    /// Whether the cell lies on the rasterised plan.
    fn is_path_cell(&self, cell: GridCell) -> bool {
        self.path_distance(cell) == 0.0
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl GridCell {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Iterator over the 8-connected neighbours of this cell, with the step length (in cells)
    /// to reach each one.
    pub fn neighbours(self) -> impl Iterator<Item = (GridCell, f64)> {
        const OFFSETS: [(i64, i64); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];

        OFFSETS.iter().map(move |&(dx, dy)| {
            let step = if dx != 0 && dy != 0 {
                std::f64::consts::SQRT_2
            } else {
                1.0
            };
            (GridCell::new(self.x + dx, self.y + dy), step)
        })
    }
}

impl GridGeometry {
    /// Get the cell containing the given map frame position, even if outside the grid.
    pub fn world_to_cell(&self, position_m: &Vector2<f64>) -> GridCell {
        let rel = (position_m - self.origin_m) / self.resolution_m;

        GridCell::new(rel.x.floor() as i64, rel.y.floor() as i64)
    }

    /// Get the cell containing the given map frame position, or `None` if outside the grid.
    pub fn world_to_map(&self, position_m: &Vector2<f64>) -> Option<GridCell> {
        let cell = self.world_to_cell(position_m);

        if self.contains(cell) {
            Some(cell)
        } else {
            None
        }
    }

    /// Map frame position of the centre of the given cell.
    pub fn cell_to_world(&self, cell: GridCell) -> Vector2<f64> {
        self.origin_m
            + Vector2::new(
                (cell.x as f64 + 0.5) * self.resolution_m,
                (cell.y as f64 + 0.5) * self.resolution_m,
            )
    }

    /// Whether the cell is inside the grid.
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.num_cells.x
            && (cell.y as usize) < self.num_cells.y
    }

    /// Index of the cell into a `[x, y]` shaped array, or `None` if outside the grid.
    pub fn index(&self, cell: GridCell) -> Option<(usize, usize)> {
        if self.contains(cell) {
            Some((cell.x as usize, cell.y as usize))
        } else {
            None
        }
    }

    /// Whether the map frame position lies inside the grid.
    pub fn contains_world(&self, position_m: &Vector2<f64>) -> bool {
        self.world_to_map(position_m).is_some()
    }
}

impl FootprintCost {
    /// The cost if legal, or `None` if impassable.
    pub fn cost(&self) -> Option<f64> {
        match self {
            FootprintCost::Cost(c) => Some(*c),
            FootprintCost::Impassable => None,
        }
    }
}

/// Whether a cell cost forbids the vehicle from touching the cell.
pub fn is_impassable(cost: u8) -> bool {
    cost >= INSCRIBED_INFLATED_OBSTACLE
}

impl<T: CostSurface> CostSurface for Arc<T> {
    fn geometry(&self) -> &GridGeometry {
        (**self).geometry()
    }

    fn cell_cost(&self, cell: GridCell) -> Option<u8> {
        (**self).cell_cost(cell)
    }
}

impl<T: CostSurface> CostSurface for &T {
    fn geometry(&self) -> &GridGeometry {
        (**self).geometry()
    }

    fn cell_cost(&self, cell: GridCell) -> Option<u8> {
        (**self).cell_cost(cell)
    }
}

impl<T: WorldModel> WorldModel for Arc<T> {
    fn footprint_cost(&self, pose: &Pose2, footprint: &FootprintSpec) -> FootprintCost {
        (**self).footprint_cost(pose, footprint)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn geom() -> GridGeometry {
        GridGeometry {
            origin_m: Vector2::new(-3.0, -6.0),
            resolution_m: 0.05,
            num_cells: Vector2::new(240, 240),
        }
    }

    #[test]
    fn test_world_to_cell() {
        let g = geom();

        assert_eq!(g.world_to_cell(&Vector2::new(0.01, 0.01)), GridCell::new(60, 120));
        assert_eq!(g.world_to_cell(&Vector2::new(-3.01, 0.01)), GridCell::new(-1, 120));
        assert_eq!(g.world_to_map(&Vector2::new(-3.01, 0.01)), None);
        assert_eq!(g.world_to_map(&Vector2::new(8.99, 5.99)), Some(GridCell::new(239, 239)));
        assert_eq!(g.world_to_map(&Vector2::new(9.01, 0.0)), None);
    }

    #[test]
    fn test_cell_to_world_round_trip() {
        let g = geom();
        let cell = GridCell::new(104, 125);
        let centre = g.cell_to_world(cell);

        assert!((centre.x - 2.225).abs() < 1e-9);
        assert!((centre.y - 0.275).abs() < 1e-9);
        assert_eq!(g.world_to_cell(&centre), cell);
    }

    #[test]
    fn test_neighbours() {
        let n: Vec<_> = GridCell::new(0, 0).neighbours().collect();

        assert_eq!(n.len(), 8);
        assert_eq!(n.iter().filter(|(_, s)| *s == 1.0).count(), 4);
        assert!(n.iter().all(|(c, _)| c.x.abs() <= 1 && c.y.abs() <= 1 && (c.x, c.y) != (0, 0)));
    }
}
