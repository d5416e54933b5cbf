//! # Trajectory scoring
//!
//! A trajectory is scored by walking its poses. At each pose the footprint is checked with the
//! world model, and the centre line from the previous pose is traced over the grid. Any
//! impassable cell, cell outside the map, or cell with no route to the path or goal rejects the
//! whole trajectory. Otherwise the cost is
//!
//! ```text
//! pdist_scale * path + gdist_scale * goal + occdist_scale * occupancy + hdiff_scale * heading
//! ```
//!
//! where `path` and `goal` are the distance field values of the terminal cell, `occupancy` is the
//! highest cost touched along the way, and `heading` is the absolute difference between the
//! terminal heading and the direction to a lookahead cell further along the path.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use nalgebra::Vector2;
use serde::Serialize;

use super::{CostBreakdown, InvalidReason, Trajectory};
use crate::{
    footprint::{line_cells, FootprintSpec},
    loc::Pose2,
    map::{is_impassable, CostSurface, DistanceField, GridCell, WorldModel},
    planner::TrajPlannerParams,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Scores trajectories against one snapshot of the map, distance fields, and configuration.
pub struct TrajScorer<'a, M, W, D> {
    pub surface: &'a M,
    pub world_model: &'a W,
    pub distance_field: &'a D,
    pub footprint: &'a FootprintSpec,
    pub params: &'a TrajPlannerParams,
    pub local_goal_m: Vector2<f64>,
}

/// Cost decomposition of a single cell.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CellCosts {
    /// Path distance of the cell, in cells
    pub path_cost: f64,

    /// Goal distance of the cell, in cells
    pub goal_cost: f64,

    /// Occupancy cost of the cell
    pub occ_cost: f64,

    /// Weighted sum of the three costs, or -1 if the cell is not legal
    pub total_cost: f64,

    /// False if the cell is outside the map, impassable, or cut off from the path or goal
    pub legal: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<'a, M, W, D> TrajScorer<'a, M, W, D>
where
    M: CostSurface,
    W: WorldModel,
    D: DistanceField,
{
    /// Score the trajectory, storing and returning its cost.
    ///
    /// Invalid trajectories get a cost of -1 and the reason they were rejected.
    pub fn score(&self, traj: &mut Trajectory) -> f64 {
        match self.evaluate(traj) {
            Ok(breakdown) => {
                let p = self.params;
                traj.breakdown = breakdown;
                traj.cost = p.pdist_scale * breakdown.path
                    + p.gdist_scale * breakdown.goal
                    + p.occdist_scale * breakdown.occupancy
                    + p.hdiff_scale * breakdown.heading_rad;
                traj.invalid_reason = None;
                traj.cost
            }
            Err(reason) => {
                trace!(
                    "Rejected control ({:.3} m/s, {:.3} rad/s): {:?}",
                    traj.control.speed_ms,
                    traj.control.steer_rate_rads,
                    reason
                );
                traj.invalidate(reason)
            }
        }
    }

    /// Get the cost decomposition of a single cell.
    pub fn cell_costs(&self, cell: GridCell) -> CellCosts {
        let occ = self.surface.cell_cost(cell);
        let path_cost = self.distance_field.path_distance(cell);
        let goal_cost = self.distance_field.goal_distance(cell);

        let legal = occ.map_or(false, |c| !is_impassable(c))
            && path_cost.is_finite()
            && goal_cost.is_finite();
        let occ_cost = occ.map_or(f64::INFINITY, f64::from);

        let total_cost = if legal {
            self.params.pdist_scale * path_cost
                + self.params.gdist_scale * goal_cost
                + self.params.occdist_scale * occ_cost
        } else {
            super::INVALID_COST
        };

        CellCosts {
            path_cost,
            goal_cost,
            occ_cost,
            total_cost,
            legal,
        }
    }

    /// Walk the trajectory, collecting the unscaled cost terms or the reason it is invalid.
    fn evaluate(&self, traj: &Trajectory) -> Result<CostBreakdown, InvalidReason> {
        let geometry = self.surface.geometry();
        let use_fields = !self.params.simple_attractor;

        let mut occupancy = 0.0f64;
        let mut prev_cell: Option<GridCell> = None;

        for pose in traj.poses.iter() {
            let cell = geometry
                .world_to_map(&pose.position_m)
                .ok_or(InvalidReason::OutsideMap)?;

            // Footprint legality from the world model
            let footprint_cost = self
                .world_model
                .footprint_cost(pose, self.footprint)
                .cost()
                .ok_or(InvalidReason::Collision)?;
            occupancy = occupancy.max(footprint_cost);

            // Cells swept by the centre line since the last pose
            for swept in line_cells(prev_cell.unwrap_or(cell), cell) {
                let cost = self
                    .surface
                    .cell_cost(swept)
                    .ok_or(InvalidReason::OutsideMap)?;
                if is_impassable(cost) {
                    return Err(InvalidReason::Collision);
                }
                occupancy = occupancy.max(cost as f64);

                if use_fields
                    && !(self.distance_field.path_distance(swept).is_finite()
                        && self.distance_field.goal_distance(swept).is_finite())
                {
                    return Err(InvalidReason::Unreachable);
                }
            }

            prev_cell = Some(cell);
        }

        let (terminal, terminal_cell) = match (traj.terminal_pose(), prev_cell) {
            (Some(p), Some(c)) => (p, c),
            _ => return Err(InvalidReason::OutsideMap),
        };

        let (path, goal) = if use_fields {
            (
                self.distance_field.path_distance(terminal_cell),
                self.distance_field.goal_distance(terminal_cell),
            )
        } else {
            (
                0.0,
                terminal.distance_to(&self.local_goal_m) / geometry.resolution_m,
            )
        };

        Ok(CostBreakdown {
            path,
            goal,
            occupancy,
            heading_rad: self.heading_diff(terminal, terminal_cell),
        })
    }

    /// Absolute difference between the pose's heading and the direction to the lookahead point.
    ///
    /// If no lookahead point can be found the largest possible difference (pi) is used.
    pub fn heading_diff(&self, pose: &Pose2, cell: GridCell) -> f64 {
        let target_m = if self.params.simple_attractor {
            self.local_goal_m
        } else {
            match self.heading_lookahead(cell) {
                Some(c) => self.surface.geometry().cell_to_world(c),
                None => return std::f64::consts::PI,
            }
        };

        let to_target = target_m - pose.position_m;

        // Already on top of the target, any heading is fine
        if to_target.norm() < self.surface.geometry().resolution_m {
            return 0.0;
        }

        util::maths::shortest_ang_dist(pose.heading_rad, to_target.y.atan2(to_target.x)).abs()
    }

    /// Find the cell `heading_points` cells along the path from the point the given cell joins
    /// the path.
    ///
    /// The path distance gradient is descended onto the path, then path cells are followed
    /// towards the goal. Returns `None` if the cell has no route to the path.
    fn heading_lookahead(&self, from: GridCell) -> Option<GridCell> {
        let field = self.distance_field;

        if !field.path_distance(from).is_finite() {
            return None;
        }

        // Descend onto the path, each step strictly reduces the path distance
        let mut cell = from;
        while !field.is_path_cell(cell) {
            let (next, dist) = cell
                .neighbours()
                .map(|(n, _)| (n, field.path_distance(n)))
                .min_by(|a, b| a.1.total_cmp(&b.1))?;

            if dist >= field.path_distance(cell) {
                return None;
            }
            cell = next;
        }

        // Follow the path towards the goal
        for _ in 0..self.params.heading_points {
            let next = cell
                .neighbours()
                .map(|(n, _)| n)
                .filter(|n| field.is_path_cell(*n))
                .map(|n| (n, field.goal_distance(n)))
                .min_by(|a, b| a.1.total_cmp(&b.1));

            match next {
                Some((n, dist)) if dist < field.goal_distance(cell) => cell = n,
                _ => break,
            }
        }

        Some(cell)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
