//! # Trajectories
//!
//! A trajectory is the result of forward-simulating one sampled [`Control`] from the vehicle's
//! current state. It carries the simulated poses and actuator states, and once scored, its cost
//! and a breakdown of the cost terms.
//!
//! Valid trajectories have a cost of zero or more. Invalid ones have the cost [`INVALID_COST`]
//! and an [`InvalidReason`] describing why they were rejected.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod bicycle;
mod scorer;

pub use bicycle::{integrate_pose, BicycleSim};
pub use scorer::{CellCosts, TrajScorer};

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

use crate::loc::{AckermannState, Pose2};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Cost given to trajectories which are invalid.
pub const INVALID_COST: f64 = -1.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A sampled control, the target the vehicle accelerates towards over the simulated horizon.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Default)]
pub struct Control {
    /// Target forward speed
    pub speed_ms: f64,

    /// Target rate of the steering axis (not the body yaw rate)
    pub steer_rate_rads: f64,
}

/// Unscaled cost terms of a scored trajectory.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Default)]
pub struct CostBreakdown {
    /// Distance from the terminal cell to the path, in cells
    pub path: f64,

    /// Distance from the terminal cell to the local goal, in cells
    pub goal: f64,

    /// Highest occupancy cost touched along the trajectory
    pub occupancy: f64,

    /// Absolute heading difference to the path ahead at the end of the trajectory
    pub heading_rad: f64,
}

/// A simulated and (optionally) scored trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    /// The control this trajectory was simulated from
    pub control: Control,

    /// Simulated poses, starting with the initial pose
    pub poses: Vec<Pose2>,

    /// Simulated actuator states, one per pose
    pub states: Vec<AckermannState>,

    /// Total cost, or [`INVALID_COST`]
    pub cost: f64,

    /// Cost terms making up the total cost
    pub breakdown: CostBreakdown,

    /// Why the trajectory was rejected, if it was
    pub invalid_reason: Option<InvalidReason>,
}

/// The two reusable trajectory buffers used while searching.
///
/// Each candidate is simulated into `candidate`, and swapped into `best` when it beats it. The
/// losing buffer is reused for the next candidate so the search does not allocate per
/// candidate.
#[derive(Debug, Default)]
pub struct TrajectorySlots {
    pub best: Trajectory,
    pub candidate: Trajectory,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Reasons a trajectory can be rejected during scoring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum InvalidReason {
    /// The footprint or the swept centre line touches an impassable cell
    Collision,

    /// The trajectory leaves the cost map
    OutsideMap,

    /// The trajectory enters a cell with no route to the path or goal
    Unreachable,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Trajectory {
    fn default() -> Self {
        Self {
            control: Control::default(),
            poses: Vec::new(),
            states: Vec::new(),
            cost: INVALID_COST,
            breakdown: CostBreakdown::default(),
            invalid_reason: None,
        }
    }
}

impl Trajectory {
    /// Clear the trajectory for reuse with a new control, keeping its allocations.
    pub fn reset(&mut self, control: Control) {
        self.control = control;
        self.poses.clear();
        self.states.clear();
        self.cost = INVALID_COST;
        self.breakdown = CostBreakdown::default();
        self.invalid_reason = None;
    }

    /// Whether this trajectory has been scored as valid.
    pub fn is_valid(&self) -> bool {
        self.cost >= 0.0
    }

    /// Mark the trajectory as invalid, returning the invalid cost.
    pub fn invalidate(&mut self, reason: InvalidReason) -> f64 {
        self.cost = INVALID_COST;
        self.invalid_reason = Some(reason);
        self.cost
    }

    pub fn terminal_pose(&self) -> Option<&Pose2> {
        self.poses.last()
    }

    /// State after the first simulation step, or the initial state for single pose
    /// trajectories.
    pub fn first_step_state(&self) -> Option<&AckermannState> {
        self.states.get(1).or_else(|| self.states.first())
    }
}

impl TrajectorySlots {
    /// Prepare both slots for a new search.
    pub fn reset(&mut self) {
        self.best.reset(Control::default());
        self.candidate.reset(Control::default());
    }

    /// Keep the candidate if it is valid and strictly cheaper than the current best, returning
    /// true if it was kept.
    ///
    /// Ties keep the earlier trajectory.
    pub fn keep_if_better(&mut self) -> bool {
        if self.candidate.is_valid() && (!self.best.is_valid() || self.candidate.cost < self.best.cost)
        {
            std::mem::swap(&mut self.best, &mut self.candidate);
            true
        } else {
            false
        }
    }

    /// Take the best trajectory out of the slots, leaving an empty one in its place.
    pub fn take_best(&mut self) -> Trajectory {
        std::mem::take(&mut self.best)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn scored(speed_ms: f64, cost: f64) -> Trajectory {
        let mut t = Trajectory::default();
        t.reset(Control {
            speed_ms,
            steer_rate_rads: 0.0,
        });
        t.cost = cost;
        t
    }

    #[test]
    fn test_slots_keep_strictly_better() {
        let mut slots = TrajectorySlots::default();
        slots.reset();

        // Invalid candidates are never kept
        slots.candidate = scored(0.1, INVALID_COST);
        assert!(!slots.keep_if_better());

        slots.candidate = scored(0.1, 5.0);
        assert!(slots.keep_if_better());

        // Equal cost keeps the earlier one
        slots.candidate = scored(0.2, 5.0);
        assert!(!slots.keep_if_better());
        assert_eq!(slots.best.control.speed_ms, 0.1);

        slots.candidate = scored(0.3, 4.0);
        assert!(slots.keep_if_better());
        assert_eq!(slots.best.control.speed_ms, 0.3);

        // The loser is left in the candidate slot for reuse
        assert_eq!(slots.candidate.control.speed_ms, 0.1);

        let best = slots.take_best();
        assert_eq!(best.cost, 4.0);
        assert!(!slots.best.is_valid());
    }

    #[test]
    fn test_invalidate() {
        let mut t = scored(0.1, 3.0);

        assert_eq!(t.invalidate(InvalidReason::Collision), INVALID_COST);
        assert!(!t.is_valid());
        assert_eq!(t.invalid_reason, Some(InvalidReason::Collision));

        t.reset(Control::default());
        assert_eq!(t.invalid_reason, None);
    }
}
