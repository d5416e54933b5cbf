//! Planner executable entry point.
//!
//! # Architecture
//!
//! The executable drives a simulated Ackermann vehicle along a straight global plan through a
//! static cost grid:
//!
//!     - Initialise the session, logging and parameters
//!     - Build the cost grid, world model and distance fields
//!     - Main loop:
//!         - Find the best trajectory from the current pose
//!         - Save the planning report
//!         - Apply the Ackermann command to the simulated vehicle for one cycle
//!     - Stop on reaching the goal, on too many failed cycles, or on the cycle limit
//!
//! A second thread performs one live reconfiguration of the planner part way through the run.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, error, info, warn};
use nalgebra::Vector2;
use serde::Deserialize;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use planner_lib::{
    loc::{AckermannState, Pose2},
    map::{CostGrid, CostGridParams, CostSurface, CostmapModel, MapGrid},
    planner::{GlobalPlan, LocalPlannerParams, PlannerError, TrajectoryPlanner},
    traj::integrate_pose,
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Parameters of the executable itself.
#[derive(Debug, Clone, Deserialize)]
struct ExecParams {
    /// Target period of one cycle, also the time the simulated vehicle is advanced by per cycle.
    cycle_period_s: f64,

    /// Maximum number of cycles before giving up on reaching the goal.
    max_cycles: usize,

    /// Number of consecutive cycles without a valid trajectory after which the run is aborted.
    max_failed_cycles: usize,

    /// Start position of the vehicle, also the start of the plan.
    start_position_m: [f64; 2],

    /// Start heading of the vehicle.
    start_heading_rad: f64,

    /// End of the plan.
    plan_end_m: [f64; 2],

    /// Separation between plan points.
    plan_separation_m: f64,

    /// Delay before the reconfiguration thread swaps in new parameters.
    reconfigure_after_s: f64,

    /// Heading weight used by the reconfiguration.
    reconfigure_hdiff_scale: f64,

    /// The cost grid to plan in.
    map: CostGridParams,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("planner_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    info!("Ackermann Local Planner Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let planner_params: LocalPlannerParams = util::params::load("local_planner.toml")
        .wrap_err("Could not load local planner params")?;
    let exec_params: ExecParams =
        util::params::load("planner_exec.toml").wrap_err("Could not load exec params")?;

    info!("Parameters loaded");

    // ---- INITIALISE PLANNER ----

    let cost_grid =
        Arc::new(CostGrid::from_params(&exec_params.map).wrap_err("Failed to build the cost grid")?);
    info!(
        "Cost grid of {}x{} cells at {} m/cell with {} obstacle cells",
        cost_grid.geometry().num_cells.x,
        cost_grid.geometry().num_cells.y,
        cost_grid.geometry().resolution_m,
        exec_params.map.obstacles_m.len()
    );

    let axis_distance_m = planner_params.vehicle.axis_distance_m;

    let planner = Arc::new(
        TrajectoryPlanner::new(
            cost_grid.clone(),
            CostmapModel::new(cost_grid.clone()),
            MapGrid::new(cost_grid.geometry().clone()),
            planner_params.clone(),
        )
        .wrap_err("Failed to initialise the planner")?,
    );
    let config = planner
        .config()
        .wrap_err("Failed to get the planner config")?;
    info!(
        "Planner initialised, footprint of {} points with circumscribed radius {:.3} m",
        config.footprint.points_m().len(),
        config.footprint.circumscribed_radius_m()
    );

    let start_m = Vector2::new(exec_params.start_position_m[0], exec_params.start_position_m[1]);
    let plan = GlobalPlan::direct(
        start_m,
        Vector2::new(exec_params.plan_end_m[0], exec_params.plan_end_m[1]),
        exec_params.plan_separation_m,
    );
    info!(
        "Plan of {} points, {:.2} m long",
        plan.get_num_points(),
        plan.get_length().unwrap_or(0.0)
    );

    planner
        .update_plan(plan, true)
        .wrap_err("Failed to set the plan")?;

    let local_goal_m = planner
        .get_local_goal()
        .wrap_err("Failed to get the local goal")?
        .ok_or_else(|| eyre!("The plan does not enter the cost grid"))?;
    info!("Local goal: ({:.3}, {:.3}) m\n", local_goal_m.x, local_goal_m.y);

    // ---- RECONFIGURATION THREAD ----

    let reconfigure_handle = {
        let planner = planner.clone();
        let delay = Duration::from_secs_f64(exec_params.reconfigure_after_s.max(0.0));
        let mut params = planner_params;
        params.planner.hdiff_scale = exec_params.reconfigure_hdiff_scale;

        thread::spawn(move || {
            thread::sleep(delay);
            planner.reconfigure(params)
        })
    };

    // ---- MAIN LOOP ----

    let mut pose = Pose2::new(start_m.x, start_m.y, exec_params.start_heading_rad);
    let mut state = AckermannState::default();

    let mut num_cycles = 0usize;
    let mut num_consec_failed_cycles = 0usize;

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        if num_cycles >= exec_params.max_cycles {
            warn!(
                "Cycle limit of {} reached before the goal",
                exec_params.max_cycles
            );
            break;
        }

        // ---- PLANNING ----

        match planner.find_best_path(&pose, &state) {
            Ok(result) => {
                num_consec_failed_cycles = 0;
                session.save_with_timestamp("reports/plan.json", result.report.clone());

                if result.report.goal_reached {
                    info!(
                        "Goal reached after {} cycles at ({:.3}, {:.3}) m",
                        num_cycles, pose.position_m.x, pose.position_m.y
                    );
                    break;
                }

                let cmd = result.ackermann_cmd;
                debug!(
                    "Cycle {}: speed {:.3} m/s, steer {:.3} rad, yaw rate {:.3} rad/s",
                    num_cycles,
                    cmd.speed_ms,
                    cmd.steer_angle_rad,
                    result.drive_velocities.angular_rads
                );

                // ---- VEHICLE SIMULATION ----

                pose = integrate_pose(
                    &pose,
                    cmd.speed_ms,
                    cmd.steer_angle_rad,
                    axis_distance_m,
                    exec_params.cycle_period_s,
                );
                state = AckermannState {
                    speed_ms: cmd.speed_ms,
                    steer_angle_rad: cmd.steer_angle_rad,
                    steer_rate_rads: (cmd.steer_angle_rad - state.steer_angle_rad)
                        / exec_params.cycle_period_s,
                };
            }
            Err(PlannerError::NoValidTrajectory(n)) => {
                num_consec_failed_cycles += 1;
                warn!(
                    "Cycle {}: none of {} trajectories valid, stopping the vehicle",
                    num_cycles, n
                );
                state = AckermannState::stationary(state.steer_angle_rad);

                if num_consec_failed_cycles > exec_params.max_failed_cycles {
                    error!(
                        "Maximum number of consecutive failed cycles ({}) has been exceeded",
                        exec_params.max_failed_cycles
                    );
                    break;
                }
            }
            Err(e) => return Err(e).wrap_err("An error occured while planning"),
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        match Duration::from_secs_f64(exec_params.cycle_period_s).checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - exec_params.cycle_period_s
            ),
        }

        num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    match reconfigure_handle.join() {
        Ok(Ok(())) => info!("Live reconfiguration applied"),
        Ok(Err(e)) => warn!("Live reconfiguration failed: {}", e),
        Err(_) => warn!("Reconfiguration thread panicked"),
    }

    session.exit();

    info!("End of execution");

    Ok(())
}
