//! # Cost Grid
//!
//! A dense `u8` cost surface stored as an `[x, y]` indexed array. Costs follow the usual
//! occupancy convention, see the constants in the parent module. The vehicle's centre cannot
//! enter anything at or above `INSCRIBED_INFLATED_OBSTACLE`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector2;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{CostSurface, GridCell, GridGeometry, FREE_SPACE, LETHAL_OBSTACLE};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A dense grid of occupancy costs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostGrid {
    geometry: GridGeometry,

    /// Raw cost data, indexed by x cell then y cell
    data: Array2<u8>,
}

/// Parameters describing a cost grid, as found in parameter files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostGridParams {
    /// Number of cells along X and Y
    pub num_cells: [usize; 2],

    /// Side length of a cell
    pub resolution_m: f64,

    /// Position of the lower-left corner of the grid in the map frame
    pub origin_m: [f64; 2],

    /// Positions of lethal obstacles in the map frame
    #[serde(default)]
    pub obstacles_m: Vec<[f64; 2]>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can arise when editing a [`CostGrid`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("Cell ({}, {}) is outside the grid", .0.x, .0.y)]
    CellOutsideGrid(GridCell),

    #[error("Position ({}, {}) m is outside the grid", .0.x, .0.y)]
    PositionOutsideGrid(Vector2<f64>),

    #[error("Invalid grid geometry: {0}")]
    InvalidGeometry(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CostGrid {
    /// Create a new grid with every cell set to [`FREE_SPACE`].
    pub fn new(geometry: GridGeometry) -> Result<Self, MapError> {
        Self::filled(geometry, FREE_SPACE)
    }

    /// Create a new grid with every cell set to `cost`.
    pub fn filled(geometry: GridGeometry, cost: u8) -> Result<Self, MapError> {
        if !(geometry.resolution_m > 0.0) {
            return Err(MapError::InvalidGeometry(format!(
                "resolution must be positive, found {}",
                geometry.resolution_m
            )));
        }
        if geometry.num_cells.x == 0 || geometry.num_cells.y == 0 {
            return Err(MapError::InvalidGeometry(format!(
                "grid must have at least one cell, found {}x{}",
                geometry.num_cells.x, geometry.num_cells.y
            )));
        }

        let data = Array2::from_elem((geometry.num_cells.x, geometry.num_cells.y), cost);

        Ok(Self { geometry, data })
    }

    /// Build a grid from its parameters, marking all listed obstacles as lethal.
    pub fn from_params(params: &CostGridParams) -> Result<Self, MapError> {
        let mut grid = Self::new(GridGeometry {
            origin_m: Vector2::new(params.origin_m[0], params.origin_m[1]),
            resolution_m: params.resolution_m,
            num_cells: Vector2::new(params.num_cells[0], params.num_cells[1]),
        })?;

        for o in params.obstacles_m.iter() {
            grid.set_cost_world(&Vector2::new(o[0], o[1]), LETHAL_OBSTACLE)?;
        }

        Ok(grid)
    }

    /// Set the cost of a cell.
    pub fn set_cost(&mut self, cell: GridCell, cost: u8) -> Result<(), MapError> {
        let idx = self
            .geometry
            .index(cell)
            .ok_or(MapError::CellOutsideGrid(cell))?;
        self.data[idx] = cost;

        Ok(())
    }

    /// Set the cost of the cell containing a map frame position.
    pub fn set_cost_world(&mut self, position_m: &Vector2<f64>, cost: u8) -> Result<(), MapError> {
        let cell = self
            .geometry
            .world_to_map(position_m)
            .ok_or(MapError::PositionOutsideGrid(*position_m))?;

        self.set_cost(cell, cost)
    }

    /// Number of cells with a cost at or above the given threshold.
    pub fn count_at_least(&self, threshold: u8) -> usize {
        self.data.iter().filter(|&&c| c >= threshold).count()
    }
}

impl CostSurface for CostGrid {
    fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    fn cell_cost(&self, cell: GridCell) -> Option<u8> {
        self.geometry.index(cell).map(|idx| self.data[idx])
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
