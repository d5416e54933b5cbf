//! # Costmap world model
//!
//! Checks a footprint against a [`CostSurface`] by tracing the footprint's outline on the grid,
//! or every cell it covers when built with [`CostmapModel::with_fill`]. The footprint is legal
//! when its centre lies in a passable cell and every checked cell lies in the grid without being
//! lethal or unknown, in which case its cost is the highest checked cell cost.
//!
//! Inscribed cells only forbid the centre, the footprint itself may overlap them.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use super::{
    is_impassable, CostSurface, FootprintCost, GridCell, WorldModel, LETHAL_OBSTACLE,
    NO_INFORMATION,
};
use crate::{
    footprint::{footprint_cells, outline_iter, FootprintSpec},
    loc::Pose2,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// World model backed by a cost surface.
#[derive(Debug, Clone)]
pub struct CostmapModel<M> {
    surface: M,

    /// Check the footprint's interior as well as its outline
    fill: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<M: CostSurface> CostmapModel<M> {
    pub fn new(surface: M) -> Self {
        Self {
            surface,
            fill: false,
        }
    }

    /// Create a model which checks every cell covered by the footprint.
    pub fn with_fill(surface: M) -> Self {
        Self {
            surface,
            fill: true,
        }
    }

    /// The surface this model checks footprints against.
    pub fn surface(&self) -> &M {
        &self.surface
    }
}

impl<M: CostSurface> WorldModel for CostmapModel<M> {
    fn footprint_cost(&self, pose: &Pose2, footprint: &FootprintSpec) -> FootprintCost {
        let geometry = self.surface.geometry();

        // The centre of the vehicle must be in a passable cell of the map
        let centre = geometry.world_to_cell(&pose.position_m);
        let mut max_cost = match self.surface.cell_cost(centre) {
            Some(c) if !is_impassable(c) => c,
            _ => return FootprintCost::Impassable,
        };

        let mut check = |cell: GridCell| match self.surface.cell_cost(cell) {
            Some(c) if c != LETHAL_OBSTACLE && c != NO_INFORMATION => {
                max_cost = max_cost.max(c);
                true
            }
            _ => false,
        };

        let legal = if self.fill {
            footprint_cells(pose, footprint, geometry, true)
                .iter()
                .all(|&c| check(c))
        } else {
            outline_iter(pose, footprint, geometry).all(check)
        };

        if legal {
            FootprintCost::Cost(max_cost as f64)
        } else {
            FootprintCost::Impassable
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
