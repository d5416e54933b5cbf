//! Trajectory planner state and search

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::sync::{Arc, Mutex, RwLock};

use log::{debug, info, warn};
use nalgebra::Vector2;
use util::maths::linspace;

use super::{
    AckermannCommand, DriveVelocities, GlobalPlan, LocalPlannerParams, PlanReport, PlanResult,
    PlannerError, TrajPlannerParams, VehicleParams,
};
use crate::{
    footprint::FootprintSpec,
    loc::{AckermannState, Pose2},
    map::{CostSurface, DistanceField, GridCell, WorldModel},
    traj::{
        BicycleSim, CellCosts, Control, InvalidReason, TrajScorer, Trajectory, TrajectorySlots,
    },
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A validated configuration snapshot.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub params: LocalPlannerParams,
    pub footprint: FootprintSpec,
}

/// Samples controls around an Ackermann vehicle and selects the cheapest legal trajectory.
///
/// Generic over the map collaborators: `M` is the cost surface, `W` the world model used for
/// footprint legality, and `D` the distance field provider.
pub struct TrajectoryPlanner<M, W, D> {
    cost_map: M,
    world_model: W,

    config: RwLock<Arc<PlannerConfig>>,
    plan: RwLock<Arc<PlanState>>,

    distance_field: Mutex<D>,
    slots: Mutex<TrajectorySlots>,
}

/// The current plan and the local goal derived from it.
#[derive(Debug, Default)]
struct PlanState {
    plan: GlobalPlan,
    local_goal_m: Option<Vector2<f64>>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PlannerConfig {
    /// Validate the parameters and build the footprint.
    pub fn new(params: LocalPlannerParams) -> Result<Self, PlannerError> {
        params.validate()?;
        let footprint = FootprintSpec::from_pairs(&params.vehicle.footprint_m)?;

        Ok(Self { params, footprint })
    }
}

impl<M, W, D> TrajectoryPlanner<M, W, D>
where
    M: CostSurface,
    W: WorldModel,
    D: DistanceField,
{
    /// Create a new planner with no plan.
    pub fn new(
        cost_map: M,
        world_model: W,
        distance_field: D,
        params: LocalPlannerParams,
    ) -> Result<Self, PlannerError> {
        let config = PlannerConfig::new(params)?;

        Ok(Self {
            cost_map,
            world_model,
            config: RwLock::new(Arc::new(config)),
            plan: RwLock::new(Arc::new(PlanState::default())),
            distance_field: Mutex::new(distance_field),
            slots: Mutex::new(TrajectorySlots::default()),
        })
    }

    /// Get the current configuration snapshot.
    pub fn config(&self) -> Result<Arc<PlannerConfig>, PlannerError> {
        Ok(self.config.read()?.clone())
    }

    /// Replace the whole configuration.
    ///
    /// The new parameters are validated before anything is changed, if they are rejected the
    /// previous configuration stays in place.
    pub fn reconfigure(&self, params: LocalPlannerParams) -> Result<(), PlannerError> {
        let config = match PlannerConfig::new(params) {
            Ok(c) => c,
            Err(e) => {
                warn!("Rejected reconfiguration: {}", e);
                return Err(e);
            }
        };

        *self.config.write()? = Arc::new(config);
        info!("Planner reconfigured");

        Ok(())
    }

    /// Replace the plan, optionally recomputing the distance fields straight away.
    pub fn update_plan(&self, plan: GlobalPlan, compute_dists: bool) -> Result<(), PlannerError> {
        let local_goal_m = plan.local_goal(self.cost_map.geometry());

        debug!(
            "New plan with {} points, local goal {:?}",
            plan.get_num_points(),
            local_goal_m.map(|g| (g.x, g.y))
        );

        let state = Arc::new(PlanState { plan, local_goal_m });
        *self.plan.write()? = state.clone();

        if compute_dists {
            if let Some(goal_m) = local_goal_m {
                self.distance_field.lock()?.recompute(
                    &self.cost_map,
                    &state.plan.points_m,
                    &goal_m,
                );
            }
        }

        Ok(())
    }

    /// Get the local goal derived from the current plan, if any.
    pub fn get_local_goal(&self) -> Result<Option<Vector2<f64>>, PlannerError> {
        Ok(self.plan.read()?.local_goal_m)
    }

    /// Find the best trajectory from the given pose and state.
    ///
    /// If the vehicle is already within the goal tolerance no search is performed and a stop
    /// command is returned.
    pub fn find_best_path(
        &self,
        pose: &Pose2,
        state: &AckermannState,
    ) -> Result<PlanResult, PlannerError> {
        // Snapshots held for the whole cycle
        let config = self.config()?;
        let plan = self.plan.read()?.clone();
        let goal_m = plan.local_goal_m.ok_or(PlannerError::NoPlan)?;

        if !self.cost_map.geometry().contains_world(&pose.position_m) {
            return Err(PlannerError::PoseOutsideMap(
                pose.position_m.x,
                pose.position_m.y,
            ));
        }

        let vehicle = &config.params.vehicle;
        let planner = &config.params.planner;

        let mut report = PlanReport {
            local_goal_m: Some([goal_m.x, goal_m.y]),
            ..Default::default()
        };

        // ---- GOAL ARRIVAL ----

        if pose.distance_to(&goal_m) <= planner.xy_goal_tolerance_m {
            info!(
                "Within {:.3} m of the local goal, stopping",
                planner.xy_goal_tolerance_m
            );
            return Ok(goal_arrival(pose, state, vehicle, report));
        }

        // ---- SEARCH ----

        let mut field = self.distance_field.lock()?;
        field.recompute(&self.cost_map, &plan.plan.points_m, &goal_m);

        let mut slots = self.slots.lock()?;
        slots.reset();

        let sim = BicycleSim::new(vehicle, planner);
        let scorer = TrajScorer {
            surface: &self.cost_map,
            world_model: &self.world_model,
            distance_field: &*field,
            footprint: &config.footprint,
            params: planner,
            local_goal_m: goal_m,
        };

        for speed_ms in speed_samples(vehicle, planner, state) {
            for steer_rate_rads in linspace(
                vehicle.min_steer_vel_rads,
                vehicle.max_steer_vel_rads,
                planner.vtheta_samples,
            ) {
                let control = Control {
                    speed_ms,
                    steer_rate_rads,
                };

                sim.simulate(pose, state, control, &mut slots.candidate);
                scorer.score(&mut slots.candidate);
                report.record(&slots.candidate);
                slots.keep_if_better();
            }
        }
        drop(field);

        if !slots.best.is_valid() {
            warn!(
                "No valid trajectory ({} collisions, {} outside map, {} unreachable)",
                report.num_collisions, report.num_outside_map, report.num_unreachable
            );
            return Err(PlannerError::NoValidTrajectory(report.num_candidates));
        }

        let trajectory = slots.take_best();
        drop(slots);

        report.best_control = trajectory.control;
        report.best_cost = trajectory.cost;
        report.best_breakdown = trajectory.breakdown;

        debug!(
            "{} of {} candidates valid, best ({:.3} m/s, {:.3} rad/s) with cost {:.3}",
            report.num_valid,
            report.num_candidates,
            trajectory.control.speed_ms,
            trajectory.control.steer_rate_rads,
            trajectory.cost
        );

        let (drive_velocities, ackermann_cmd) = commands(&trajectory, vehicle);

        Ok(PlanResult {
            trajectory,
            drive_velocities,
            ackermann_cmd,
            report,
        })
    }

    /// Simulate and score a single control against the current distance fields.
    pub fn evaluate_control(
        &self,
        pose: &Pose2,
        state: &AckermannState,
        control: Control,
    ) -> Result<Trajectory, PlannerError> {
        let config = self.config()?;
        let goal_m = self.get_local_goal()?.ok_or(PlannerError::NoPlan)?;

        let field = self.distance_field.lock()?;

        let mut trajectory = Trajectory::default();
        BicycleSim::new(&config.params.vehicle, &config.params.planner).simulate(
            pose,
            state,
            control,
            &mut trajectory,
        );

        TrajScorer {
            surface: &self.cost_map,
            world_model: &self.world_model,
            distance_field: &*field,
            footprint: &config.footprint,
            params: &config.params.planner,
            local_goal_m: goal_m,
        }
        .score(&mut trajectory);

        Ok(trajectory)
    }

    /// Cost of a single control, -1 if it is not legal.
    pub fn score_trajectory(
        &self,
        pose: &Pose2,
        state: &AckermannState,
        control: Control,
    ) -> Result<f64, PlannerError> {
        Ok(self.evaluate_control(pose, state, control)?.cost)
    }

    /// Whether a single control gives a legal trajectory.
    pub fn check_trajectory(
        &self,
        pose: &Pose2,
        state: &AckermannState,
        control: Control,
    ) -> Result<bool, PlannerError> {
        Ok(self.score_trajectory(pose, state, control)? >= 0.0)
    }

    /// Cost decomposition of a single cell against the current distance fields.
    pub fn get_cell_costs(&self, cell: GridCell) -> Result<CellCosts, PlannerError> {
        let config = self.config()?;
        let goal_m = self.get_local_goal()?.unwrap_or_else(Vector2::zeros);
        let field = self.distance_field.lock()?;

        let costs = TrajScorer {
            surface: &self.cost_map,
            world_model: &self.world_model,
            distance_field: &*field,
            footprint: &config.footprint,
            params: &config.params.planner,
            local_goal_m: goal_m,
        }
        .cell_costs(cell);

        Ok(costs)
    }
}

impl PlanReport {
    /// Count a scored candidate.
    fn record(&mut self, traj: &Trajectory) {
        self.num_candidates += 1;

        match traj.invalid_reason {
            None if traj.is_valid() => self.num_valid += 1,
            None => (),
            Some(InvalidReason::Collision) => self.num_collisions += 1,
            Some(InvalidReason::OutsideMap) => self.num_outside_map += 1,
            Some(InvalidReason::Unreachable) => self.num_unreachable += 1,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Forward speed samples, restricted to the speeds reachable within the horizon unless using the
/// simple attractor.
fn speed_samples(
    vehicle: &VehicleParams,
    planner: &TrajPlannerParams,
    state: &AckermannState,
) -> impl Iterator<Item = f64> {
    let mut min = vehicle.min_vel_ms;
    let mut max = vehicle.max_vel_ms;

    if !planner.simple_attractor {
        let reach = vehicle.max_acc_mss * planner.sim_time_s;
        min = min.max(state.speed_ms - reach);
        max = max.min(state.speed_ms + reach);

        // Current speed far outside the bounds, sample the nearest bound only
        if min > max {
            let v = util::maths::clamp(&state.speed_ms, &vehicle.min_vel_ms, &vehicle.max_vel_ms);
            min = v;
            max = v;
        }
    }

    linspace(min, max, planner.vx_samples)
}

/// Derive the drive twist and Ackermann command from a trajectory.
///
/// The speed is the trajectory's target speed, the steering angle the one reached after the
/// first simulation step.
fn commands(traj: &Trajectory, vehicle: &VehicleParams) -> (DriveVelocities, AckermannCommand) {
    let speed_ms = traj.control.speed_ms;
    let steer_angle_rad = traj.first_step_state().map_or(0.0, |s| s.steer_angle_rad);

    (
        DriveVelocities {
            linear_ms: speed_ms,
            angular_rads: speed_ms * steer_angle_rad.tan() / vehicle.axis_distance_m,
        },
        AckermannCommand {
            speed_ms,
            steer_angle_rad,
        },
    )
}

/// Result for a vehicle already at its goal: stop, holding the current steering angle.
fn goal_arrival(
    pose: &Pose2,
    state: &AckermannState,
    vehicle: &VehicleParams,
    mut report: PlanReport,
) -> PlanResult {
    let mut trajectory = Trajectory::default();
    trajectory.reset(Control::default());
    trajectory.poses.push(*pose);
    trajectory
        .states
        .push(AckermannState::stationary(state.steer_angle_rad));
    trajectory.cost = 0.0;

    report.goal_reached = true;
    report.best_cost = 0.0;

    let (drive_velocities, ackermann_cmd) = commands(&trajectory, vehicle);

    PlanResult {
        trajectory,
        drive_velocities,
        ackermann_cmd,
        report,
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::map::{CostGrid, CostmapModel, GridGeometry, MapGrid, LETHAL_OBSTACLE};
    use approx::assert_relative_eq;
    use std::thread;

    type Planner = TrajectoryPlanner<Arc<CostGrid>, CostmapModel<Arc<CostGrid>>, MapGrid>;

    /// Small, coarse setup to keep the search quick.
    fn params() -> LocalPlannerParams {
        let mut params = LocalPlannerParams::default();
        params.planner.vx_samples = 5;
        params.planner.vtheta_samples = 5;
        params.planner.sim_time_s = 4.0;
        params.planner.sim_granularity_m = 0.05;
        params.planner.angular_sim_granularity_rad = 0.05;
        params
    }

    fn planner(obstacles: &[GridCell]) -> Planner {
        let mut grid = CostGrid::new(GridGeometry {
            origin_m: Vector2::new(-2.0, -3.0),
            resolution_m: 0.1,
            num_cells: Vector2::new(80, 60),
        })
        .unwrap();
        for &o in obstacles {
            grid.set_cost(o, LETHAL_OBSTACLE).unwrap();
        }
        let grid = Arc::new(grid);

        TrajectoryPlanner::new(
            grid.clone(),
            CostmapModel::new(grid.clone()),
            MapGrid::new(grid.geometry().clone()),
            params(),
        )
        .unwrap()
    }

    fn straight_plan() -> GlobalPlan {
        GlobalPlan::direct(Vector2::new(0.0, 0.0), Vector2::new(4.0, 0.0), 0.1)
    }

    #[test]
    fn test_construction_errors() {
        let grid = Arc::new(
            CostGrid::new(GridGeometry {
                origin_m: Vector2::new(0.0, 0.0),
                resolution_m: 0.1,
                num_cells: Vector2::new(10, 10),
            })
            .unwrap(),
        );

        let mut bad_footprint = params();
        bad_footprint.vehicle.footprint_m = vec![[0.5, 0.5], [-0.5, 0.5]];
        let res = TrajectoryPlanner::new(
            grid.clone(),
            CostmapModel::new(grid.clone()),
            MapGrid::new(grid.geometry().clone()),
            bad_footprint,
        );
        assert!(matches!(res, Err(PlannerError::DegenerateFootprint(_))));

        let mut bad_bounds = params();
        bad_bounds.vehicle.min_vel_ms = 1.0;
        let res = TrajectoryPlanner::new(
            grid.clone(),
            CostmapModel::new(grid.clone()),
            MapGrid::new(grid.geometry().clone()),
            bad_bounds,
        );
        assert!(matches!(res, Err(PlannerError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_reconfigure_is_all_or_nothing() -> Result<(), PlannerError> {
        let p = planner(&[]);

        // Invalid, nothing changes
        let mut bad = params();
        bad.planner.pdist_scale = 5.0;
        bad.vehicle.min_vel_ms = 0.5;
        bad.vehicle.max_vel_ms = 0.2;
        assert!(matches!(
            p.reconfigure(bad),
            Err(PlannerError::InvalidConfiguration(_))
        ));
        assert_eq!(p.config()?.params, params());

        let mut bad = params();
        bad.vehicle.footprint_m.clear();
        assert!(matches!(
            p.reconfigure(bad),
            Err(PlannerError::DegenerateFootprint(_))
        ));
        assert_eq!(p.config()?.params, params());

        // Valid, everything changes
        let mut good = params();
        good.planner.pdist_scale = 5.0;
        good.vehicle.max_vel_ms = 0.2;
        p.reconfigure(good.clone())?;
        assert_eq!(p.config()?.params, good);

        Ok(())
    }

    #[test]
    fn test_plan_errors() -> Result<(), PlannerError> {
        let p = planner(&[]);
        let pose = Pose2::new(0.0, 0.0, 0.0);
        let state = AckermannState::default();

        assert!(matches!(
            p.find_best_path(&pose, &state),
            Err(PlannerError::NoPlan)
        ));
        assert_eq!(p.get_local_goal()?, None);

        p.update_plan(straight_plan(), true)?;
        assert_eq!(p.get_local_goal()?, Some(Vector2::new(4.0, 0.0)));

        assert!(matches!(
            p.find_best_path(&Pose2::new(-5.0, 0.0, 0.0), &state),
            Err(PlannerError::PoseOutsideMap(..))
        ));

        Ok(())
    }

    #[test]
    fn test_goal_arrival() -> Result<(), PlannerError> {
        let p = planner(&[]);
        p.update_plan(straight_plan(), false)?;

        let state = AckermannState {
            speed_ms: 0.2,
            steer_angle_rad: 0.1,
            steer_rate_rads: 0.0,
        };
        let res = p.find_best_path(&Pose2::new(3.7, 0.1, 0.0), &state)?;

        assert!(res.report.goal_reached);
        assert_eq!(res.ackermann_cmd.speed_ms, 0.0);
        assert_eq!(res.ackermann_cmd.steer_angle_rad, 0.1);
        assert_eq!(res.drive_velocities, DriveVelocities::default());
        assert_eq!(res.trajectory.poses.len(), 1);
        assert_eq!(res.trajectory.cost, 0.0);

        // Report as saved by the executable
        let json = serde_json::to_value(&res.report).unwrap();
        assert_eq!(json["goal_reached"], true);
        assert_eq!(json["num_candidates"], 0);
        assert_eq!(json["local_goal_m"][0], 4.0);

        Ok(())
    }

    #[test]
    fn test_find_best_path_drives_forward() -> Result<(), PlannerError> {
        let p = planner(&[]);
        p.update_plan(straight_plan(), false)?;

        let res = p.find_best_path(&Pose2::new(0.0, 0.0, 0.0), &AckermannState::default())?;

        assert!(!res.report.goal_reached);
        assert_eq!(res.report.num_candidates, 25);
        assert!(res.report.num_valid > 0);
        assert!(res.trajectory.is_valid());
        assert!(res.ackermann_cmd.speed_ms > 0.0);
        assert_relative_eq!(res.drive_velocities.linear_ms, res.ackermann_cmd.speed_ms);
        assert_relative_eq!(
            res.drive_velocities.angular_rads,
            res.ackermann_cmd.speed_ms * res.ackermann_cmd.steer_angle_rad.tan() / 1.65,
            epsilon = 1e-12
        );

        Ok(())
    }

    fn slow_params() -> LocalPlannerParams {
        let mut params = params();
        params.vehicle.max_acc_mss = 0.01;
        params.planner.sim_time_s = 10.0;
        params
    }

    fn moving(speed_ms: f64) -> AckermannState {
        AckermannState {
            speed_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_speed_samples_reachable_window() {
        let p = slow_params();

        // 0.1 m/s of reach either side of 0.3, clipped by the upper bound
        let s: Vec<f64> = speed_samples(&p.vehicle, &p.planner, &moving(0.3)).collect();
        assert_eq!(s.len(), 5);
        assert_relative_eq!(s[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(s[4], 0.3, epsilon = 1e-12);
        assert!(s.iter().all(|&v| v >= 0.2 - 1e-12 && v <= 0.3));

        // Symmetric window inside the bounds
        let s: Vec<f64> = speed_samples(&p.vehicle, &p.planner, &moving(0.0)).collect();
        assert_relative_eq!(s[0], -0.1, epsilon = 1e-12);
        assert_relative_eq!(s[4], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_speed_samples_outside_bounds() {
        let p = slow_params();

        // Too fast to reach the bounds within the horizon, only the nearest bound is sampled
        let s: Vec<f64> = speed_samples(&p.vehicle, &p.planner, &moving(2.0)).collect();
        assert_eq!(s.len(), 5);
        assert!(s.iter().all(|&v| v == 0.3));

        let s: Vec<f64> = speed_samples(&p.vehicle, &p.planner, &moving(-2.0)).collect();
        assert!(s.iter().all(|&v| v == -0.3));
    }

    #[test]
    fn test_speed_samples_simple_attractor() {
        let mut p = slow_params();
        p.planner.simple_attractor = true;

        // The whole speed range regardless of the acceleration limit
        let s: Vec<f64> = speed_samples(&p.vehicle, &p.planner, &moving(0.3)).collect();
        assert_eq!(s.len(), 5);
        assert_relative_eq!(s[0], -0.3, epsilon = 1e-12);
        assert_relative_eq!(s[4], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_search_stays_in_reachable_window() -> Result<(), PlannerError> {
        let p = planner(&[]);
        p.reconfigure(slow_params())?;
        p.update_plan(straight_plan(), false)?;

        let res = p.find_best_path(&Pose2::new(0.0, 0.0, 0.0), &moving(0.3))?;
        assert_eq!(res.report.num_candidates, 25);
        assert!(res.trajectory.control.speed_ms >= 0.2 - 1e-9);
        assert!(res.ackermann_cmd.speed_ms >= 0.2 - 1e-9);

        Ok(())
    }

    #[test]
    fn test_no_valid_trajectory() -> Result<(), PlannerError> {
        // Box the vehicle in completely
        let mut walls = Vec::new();
        for i in 8..=32 {
            walls.extend([
                GridCell::new(i, 18),
                GridCell::new(i, 42),
                GridCell::new(8, i + 10),
                GridCell::new(32, i + 10),
            ]);
        }
        let p = planner(&walls);
        p.update_plan(straight_plan(), false)?;

        let res = p.find_best_path(&Pose2::new(0.0, 0.0, 0.0), &AckermannState::default());
        assert!(matches!(res, Err(PlannerError::NoValidTrajectory(25))));

        Ok(())
    }

    #[test]
    fn test_check_trajectory() -> Result<(), PlannerError> {
        // Wall across the path 1.5 m ahead
        let wall: Vec<_> = (20..=40).map(|y| GridCell::new(35, y)).collect();
        let p = planner(&wall);
        p.update_plan(straight_plan(), true)?;

        let pose = Pose2::new(0.0, 0.0, 0.0);
        let state = AckermannState::default();
        let forward = Control {
            speed_ms: 0.3,
            steer_rate_rads: 0.0,
        };
        let stop = Control::default();

        assert!(!p.check_trajectory(&pose, &state, forward)?);
        assert_eq!(p.score_trajectory(&pose, &state, forward)?, -1.0);
        assert!(p.check_trajectory(&pose, &state, stop)?);

        let traj = p.evaluate_control(&pose, &state, forward)?;
        assert_eq!(traj.invalid_reason, Some(InvalidReason::Collision));

        Ok(())
    }

    #[test]
    fn test_get_cell_costs() -> Result<(), PlannerError> {
        let p = planner(&[GridCell::new(40, 40)]);
        p.update_plan(straight_plan(), true)?;

        // (1.05, 0.05) m is on the plan, 3 m from the goal
        let on_path = p.get_cell_costs(GridCell::new(30, 30))?;
        assert!(on_path.legal);
        assert_eq!(on_path.path_cost, 0.0);
        assert_relative_eq!(on_path.goal_cost, 30.0);

        assert!(!p.get_cell_costs(GridCell::new(40, 40))?.legal);

        Ok(())
    }

    #[test]
    fn test_reconfigure_during_search() -> Result<(), PlannerError> {
        let p = Arc::new(planner(&[]));
        p.update_plan(straight_plan(), false)?;

        let reconfigurer = {
            let p = p.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    let mut params = params();
                    params.planner.hdiff_scale = 0.5 + 0.1 * i as f64;
                    p.reconfigure(params)?;
                }
                Ok::<(), PlannerError>(())
            })
        };

        for _ in 0..3 {
            let res = p.find_best_path(&Pose2::new(0.0, 0.0, 0.0), &AckermannState::default())?;
            assert_eq!(res.report.num_candidates, 25);
        }

        reconfigurer.join().map_err(|_| PlannerError::PoisonError)??;
        assert_relative_eq!(p.config()?.params.planner.hdiff_scale, 1.4, epsilon = 1e-9);

        Ok(())
    }
}
