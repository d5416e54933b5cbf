//! # Map Grid
//!
//! Path and goal distance fields computed by 8-connected Dijkstra propagation over the cost
//! surface. Obstacle cells (cost at or above `INSCRIBED_INFLATED_OBSTACLE`) act as barriers and
//! are never entered, so cells walled off from the plan stay [`UNREACHABLE`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{cmp::Reverse, collections::BinaryHeap};

use log::trace;
use nalgebra::Vector2;
use ndarray::Array2;
use ordered_float::OrderedFloat;
use serde::Serialize;

use super::{is_impassable, CostSurface, DistanceField, GridCell, GridGeometry, UNREACHABLE};
use crate::footprint::line_cells;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Path and goal distance fields over a grid.
#[derive(Debug, Clone, Serialize)]
pub struct MapGrid {
    geometry: GridGeometry,

    /// Distance from each cell to the nearest plan cell, indexed by x then y
    path_dist: Array2<f64>,

    /// Distance from each cell to the goal cell, indexed by x then y
    goal_dist: Array2<f64>,

    /// Number of cells marked as lying on the plan during the last recompute
    num_path_cells: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MapGrid {
    /// Create a new grid with every cell unreachable.
    pub fn new(geometry: GridGeometry) -> Self {
        let shape = (geometry.num_cells.x, geometry.num_cells.y);

        Self {
            geometry,
            path_dist: Array2::from_elem(shape, UNREACHABLE),
            goal_dist: Array2::from_elem(shape, UNREACHABLE),
            num_path_cells: 0,
        }
    }

    /// Number of cells marked as lying on the plan during the last recompute.
    pub fn num_path_cells(&self) -> usize {
        self.num_path_cells
    }

    /// Resize the fields if the surface's grid has moved or changed shape.
    fn match_geometry(&mut self, geometry: &GridGeometry) {
        if &self.geometry != geometry {
            trace!(
                "Resizing distance fields to {}x{}",
                geometry.num_cells.x,
                geometry.num_cells.y
            );
            *self = Self::new(geometry.clone());
        }
    }
}

impl DistanceField for MapGrid {
    fn recompute<S: CostSurface>(
        &mut self,
        surface: &S,
        plan_m: &[Vector2<f64>],
        goal_m: &Vector2<f64>,
    ) {
        self.match_geometry(surface.geometry());

        // Rasterise the plan, only joining consecutive points which are both in the grid
        let mut path_cells = Vec::new();
        let mut prev: Option<GridCell> = None;
        for point in plan_m {
            let cell = self.geometry.world_to_map(point);
            match (prev, cell) {
                (Some(p), Some(c)) => path_cells.extend(line_cells(p, c)),
                (None, Some(c)) => path_cells.push(c),
                _ => (),
            }
            prev = cell;
        }

        self.num_path_cells = propagate(surface, &mut self.path_dist, path_cells.into_iter());

        let goal_cell = self.geometry.world_to_map(goal_m);
        propagate(surface, &mut self.goal_dist, goal_cell.into_iter());

        trace!(
            "Distance fields recomputed from {} path cells, goal cell {:?}",
            self.num_path_cells,
            goal_cell
        );
    }

    fn path_distance(&self, cell: GridCell) -> f64 {
        self.geometry
            .index(cell)
            .map_or(UNREACHABLE, |idx| self.path_dist[idx])
    }

    fn goal_distance(&self, cell: GridCell) -> f64 {
        self.geometry
            .index(cell)
            .map_or(UNREACHABLE, |idx| self.goal_dist[idx])
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Fill `field` with the 8-connected distance from the seed cells, returning the number of seeds
/// used.
///
/// Seeds outside the grid or on impassable cells are ignored.
fn propagate<S, I>(surface: &S, field: &mut Array2<f64>, seeds: I) -> usize
where
    S: CostSurface,
    I: Iterator<Item = GridCell>,
{
    let geometry = surface.geometry();
    let passable = |cell: GridCell| surface.cell_cost(cell).map_or(false, |c| !is_impassable(c));

    field.fill(UNREACHABLE);

    let mut queue = BinaryHeap::new();
    let mut num_seeds = 0;

    for seed in seeds {
        if let Some(idx) = geometry.index(seed) {
            if field[idx] > 0.0 && passable(seed) {
                field[idx] = 0.0;
                queue.push(Reverse((OrderedFloat(0.0), seed)));
                num_seeds += 1;
            }
        }
    }

    while let Some(Reverse((OrderedFloat(dist), cell))) = queue.pop() {
        // Skip stale entries which have since been improved upon
        let idx = match geometry.index(cell) {
            Some(i) => i,
            None => continue,
        };
        if dist > field[idx] {
            continue;
        }

        for (next, step) in cell.neighbours() {
            let next_idx = match geometry.index(next) {
                Some(i) => i,
                None => continue,
            };

            let next_dist = dist + step;
            if next_dist < field[next_idx] && passable(next) {
                field[next_idx] = next_dist;
                queue.push(Reverse((OrderedFloat(next_dist), next)));
            }
        }
    }

    num_seeds
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
