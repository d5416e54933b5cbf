//! # Global plan
//!
//! The global plan is the sequence of map frame waypoints the planner tracks. It is replaced
//! wholesale on every update, and the local goal is derived from it against the current map.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::map::GridGeometry;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A plan defining the desired route of the vehicle.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct GlobalPlan {
    pub points_m: Vec<Vector2<f64>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GlobalPlan {
    pub fn new(points_m: Vec<Vector2<f64>>) -> Self {
        Self { points_m }
    }

    /// Produces a direct plan between the two position vectors, with each point in the plan
    /// having at most the given separation.
    ///
    /// Both `from` and `to` are always included. A non-positive separation gives just the two
    /// end points.
    pub fn direct(from: Vector2<f64>, to: Vector2<f64>, point_sep_m: f64) -> Self {
        let diff_vec = to - from;
        let dist = diff_vec.norm();

        // If the points are closer than the separation just produce a new plan with the from and
        // to being the only points.
        if !(point_sep_m > 0.0) || dist <= point_sep_m {
            return Self::new(vec![from, to]);
        }

        // Number of segments needed so that none are longer than the separation
        let num_segments = (dist / point_sep_m).ceil() as usize;
        let delta = diff_vec / num_segments as f64;

        let mut points_m: Vec<_> = (0..num_segments).map(|i| from + delta * i as f64).collect();
        points_m.push(to);

        Self::new(points_m)
    }

    /// Return the length of the plan in meters.
    ///
    /// If the plan is empty (not enough points) then `None` is returned.
    pub fn get_length(&self) -> Option<f64> {
        if self.points_m.len() < 2 {
            return None;
        }

        Some(
            self.points_m
                .windows(2)
                .map(|w| (w[1] - w[0]).norm())
                .sum(),
        )
    }

    /// Get the number of points in the plan
    pub fn get_num_points(&self) -> usize {
        self.points_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_m.is_empty()
    }

    /// Find the local goal of the plan within the given map.
    ///
    /// This is the last waypoint before the plan first leaves the map, skipping any leading
    /// waypoints which start outside it. Returns `None` if no waypoint is inside the map.
    pub fn local_goal(&self, geometry: &GridGeometry) -> Option<Vector2<f64>> {
        let mut goal = None;

        for point in self.points_m.iter() {
            if geometry.contains_world(point) {
                goal = Some(*point);
            } else if goal.is_some() {
                break;
            }
        }

        goal
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn geom() -> GridGeometry {
        GridGeometry {
            origin_m: Vector2::new(0.0, 0.0),
            resolution_m: 0.1,
            num_cells: Vector2::new(100, 100),
        }
    }

    #[test]
    fn test_direct() {
        let plan = GlobalPlan::direct(Vector2::new(0.0, 0.0), Vector2::new(5.0, 0.0), 0.05);

        assert!((101..=102).contains(&plan.get_num_points()));
        assert_eq!(plan.points_m.last(), Some(&Vector2::new(5.0, 0.0)));
        assert_relative_eq!(plan.get_length().unwrap(), 5.0, epsilon = 1e-9);
        assert!(plan
            .points_m
            .windows(2)
            .all(|w| (w[1] - w[0]).norm() <= 0.05 + 1e-9));

        let short = GlobalPlan::direct(Vector2::new(0.0, 0.0), Vector2::new(0.01, 0.0), 0.05);
        assert_eq!(short.get_num_points(), 2);

        assert_eq!(GlobalPlan::default().get_length(), None);
    }

    #[test]
    fn test_local_goal() {
        // Ends inside the map
        let plan = GlobalPlan::direct(Vector2::new(1.0, 1.0), Vector2::new(5.0, 5.0), 0.5);
        assert_eq!(plan.local_goal(&geom()), Some(Vector2::new(5.0, 5.0)));

        // Leaves the map, comes back, and ends inside
        let plan = GlobalPlan::new(vec![
            Vector2::new(-1.0, 5.0),
            Vector2::new(5.0, 5.0),
            Vector2::new(9.5, 5.0),
            Vector2::new(12.0, 5.0),
            Vector2::new(8.0, 8.0),
        ]);
        assert_eq!(plan.local_goal(&geom()), Some(Vector2::new(9.5, 5.0)));

        // Entirely outside
        let plan = GlobalPlan::new(vec![Vector2::new(-1.0, 5.0), Vector2::new(-2.0, 5.0)]);
        assert_eq!(plan.local_goal(&geom()), None);
        assert_eq!(GlobalPlan::default().local_goal(&geom()), None);
    }
}
