//! # Trajectory planner
//!
//! The [`TrajectoryPlanner`] owns the configuration and the plan, and once per control cycle
//! searches the sampled control space for the cheapest legal trajectory.
//!
//! Configuration and plan are held as immutable snapshots behind locks. Each planning call takes
//! a snapshot of both at its start, so a concurrent [`TrajectoryPlanner::reconfigure`] or
//! [`TrajectoryPlanner::update_plan`] never tears a cycle in progress.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;
mod plan;
mod traj_planner;

pub use params::{LocalPlannerParams, ParamsError, TrajPlannerParams, VehicleParams};
pub use plan::GlobalPlan;
pub use traj_planner::{PlannerConfig, TrajectoryPlanner};

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::sync::PoisonError;

use serde::Serialize;

use crate::{
    footprint::FootprintError,
    traj::{Control, CostBreakdown, Trajectory},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Body frame twist of the vehicle, as used by the simulation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Default)]
pub struct DriveVelocities {
    /// Forward speed
    pub linear_ms: f64,

    /// Yaw rate, `speed * tan(steer_angle) / axis_distance`
    pub angular_rads: f64,
}

/// Physical command for an Ackermann vehicle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Default)]
pub struct AckermannCommand {
    /// Forward speed
    pub speed_ms: f64,

    /// Steering angle, positive turns left
    pub steer_angle_rad: f64,
}

/// Output of a planning cycle.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// The winning trajectory
    pub trajectory: Trajectory,

    /// Twist of the winning trajectory's first step
    pub drive_velocities: DriveVelocities,

    /// Command to send to the vehicle
    pub ackermann_cmd: AckermannCommand,

    /// Summary of the search
    pub report: PlanReport,
}

/// Summary of a planning cycle, saved by the executable for later analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PlanReport {
    /// True if the cycle short-circuited because the vehicle is at the local goal
    pub goal_reached: bool,

    /// Local goal used for the cycle
    pub local_goal_m: Option<[f64; 2]>,

    /// Number of controls simulated and scored
    pub num_candidates: usize,

    /// Number of those which were valid
    pub num_valid: usize,

    /// Number rejected for touching an impassable cell
    pub num_collisions: usize,

    /// Number rejected for leaving the map
    pub num_outside_map: usize,

    /// Number rejected for entering cells cut off from the path or goal
    pub num_unreachable: usize,

    /// The winning control
    pub best_control: Control,

    /// Cost of the winning trajectory
    pub best_cost: f64,

    /// Cost terms of the winning trajectory
    pub best_breakdown: CostBreakdown,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors surfaced by the planner.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("No valid trajectory among {0} candidates")]
    NoValidTrajectory(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ParamsError),

    #[error("Degenerate footprint: {0}")]
    DegenerateFootprint(FootprintError),

    #[error("No plan has been set, or no part of the plan lies inside the map")]
    NoPlan,

    #[error("The vehicle position ({0:.3}, {1:.3}) m is outside the map")]
    PoseOutsideMap(f64, f64),

    #[error("Sync primitive is poisoned")]
    PoisonError,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl From<ParamsError> for PlannerError {
    fn from(e: ParamsError) -> Self {
        Self::InvalidConfiguration(e)
    }
}

impl From<FootprintError> for PlannerError {
    fn from(e: FootprintError) -> Self {
        Self::DegenerateFootprint(e)
    }
}

impl<G> From<PoisonError<G>> for PlannerError {
    fn from(_: PoisonError<G>) -> Self {
        Self::PoisonError
    }
}
