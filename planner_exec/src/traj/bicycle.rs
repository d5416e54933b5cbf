//! # Bicycle model simulation
//!
//! Forward-integrates the kinematic bicycle model over the planning horizon. Each step moves the
//! steering rate towards the sampled rate (limited by the steering acceleration), integrates the
//! steering angle, moves the speed towards the sampled speed (limited by the acceleration), and
//! then advances the pose:
//!
//! ```text
//! x     += v cos(theta) dt
//! y     += v sin(theta) dt
//! theta += v tan(delta) / L dt
//! ```
//!
//! The number of steps is chosen so that no step moves further than the linear granularity or
//! turns further than the angular granularity.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use util::maths::{approach, clamp, wrap_pi};

use super::{Control, Trajectory};
use crate::{
    loc::{AckermannState, Pose2},
    planner::{TrajPlannerParams, VehicleParams},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Bicycle model simulator for one configuration snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BicycleSim<'a> {
    vehicle: &'a VehicleParams,
    planner: &'a TrajPlannerParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<'a> BicycleSim<'a> {
    pub fn new(vehicle: &'a VehicleParams, planner: &'a TrajPlannerParams) -> Self {
        Self { vehicle, planner }
    }

    /// Number of steps needed to simulate the control from the given state.
    pub fn num_steps(&self, state: &AckermannState, control: &Control) -> usize {
        let v = self.vehicle;
        let p = self.planner;

        // Fastest the vehicle will travel during the horizon
        let speed_ms = state
            .speed_ms
            .abs()
            .max(clamp(&control.speed_ms, &v.min_vel_ms, &v.max_vel_ms).abs())
            .min(v.max_abs_vel_ms());

        // Largest steering angle it can reach during the horizon
        let steer_rate_rads = state
            .steer_rate_rads
            .abs()
            .max(control.steer_rate_rads.abs())
            .min(v.max_abs_steer_vel_rads());
        let steer_rad = (state.steer_angle_rad.abs() + steer_rate_rads * p.sim_time_s)
            .min(v.max_abs_steer_angle_rad());
        let yaw_rate_rads = speed_ms * steer_rad.tan() / v.axis_distance_m;

        let linear_steps = speed_ms * p.sim_time_s / p.sim_granularity_m;
        let angular_steps = yaw_rate_rads * p.sim_time_s / p.angular_sim_granularity_rad;

        (linear_steps.max(angular_steps).ceil() as usize).max(1)
    }

    /// Simulate the control from the start pose and state, writing the poses and states into the
    /// trajectory.
    ///
    /// The trajectory is reset first. The start pose and (bounded) start state are the first
    /// entries, followed by one entry per step.
    pub fn simulate(
        &self,
        start: &Pose2,
        state: &AckermannState,
        control: Control,
        traj: &mut Trajectory,
    ) {
        traj.reset(control);

        let num_steps = self.num_steps(state, &control);
        let dt_s = self.planner.sim_time_s / num_steps as f64;

        let mut pose = *start;
        let mut state = self.bound_state(state);

        traj.poses.reserve(num_steps + 1);
        traj.states.reserve(num_steps + 1);
        traj.poses.push(pose);
        traj.states.push(state);

        for _ in 0..num_steps {
            let (next_pose, next_state) = self.step(&pose, &state, &control, dt_s);
            pose = next_pose;
            state = next_state;

            traj.poses.push(pose);
            traj.states.push(state);
        }
    }

    /// Advance the vehicle by a single step of `dt_s` seconds.
    pub fn step(
        &self,
        pose: &Pose2,
        state: &AckermannState,
        control: &Control,
        dt_s: f64,
    ) -> (Pose2, AckermannState) {
        let v = self.vehicle;

        // Steering rate towards the commanded rate, limited by the steering acceleration
        let target_rate = clamp(
            &control.steer_rate_rads,
            &v.min_steer_vel_rads,
            &v.max_steer_vel_rads,
        );
        let mut steer_rate_rads = clamp(
            &approach(
                state.steer_rate_rads,
                target_rate,
                v.max_steer_acc_radss * dt_s,
            ),
            &v.min_steer_vel_rads,
            &v.max_steer_vel_rads,
        );

        // Steering angle, the axis stops when it reaches a limit
        let unbounded_angle = state.steer_angle_rad + steer_rate_rads * dt_s;
        let steer_angle_rad = clamp(
            &unbounded_angle,
            &v.min_steer_angle_rad,
            &v.max_steer_angle_rad,
        );
        if steer_angle_rad != unbounded_angle {
            steer_rate_rads = 0.0;
        }

        // Speed towards the target speed, limited by the acceleration
        let target_speed = clamp(&control.speed_ms, &v.min_vel_ms, &v.max_vel_ms);
        let speed_ms = clamp(
            &approach(state.speed_ms, target_speed, v.max_acc_mss * dt_s),
            &v.min_vel_ms,
            &v.max_vel_ms,
        );

        let next_state = AckermannState {
            speed_ms,
            steer_angle_rad,
            steer_rate_rads,
        };

        (
            integrate_pose(pose, speed_ms, steer_angle_rad, v.axis_distance_m, dt_s),
            next_state,
        )
    }

    /// Clamp a measured state into the configured bounds.
    fn bound_state(&self, state: &AckermannState) -> AckermannState {
        let v = self.vehicle;

        AckermannState {
            speed_ms: clamp(&state.speed_ms, &v.min_vel_ms, &v.max_vel_ms),
            steer_angle_rad: clamp(
                &state.steer_angle_rad,
                &v.min_steer_angle_rad,
                &v.max_steer_angle_rad,
            ),
            steer_rate_rads: clamp(
                &state.steer_rate_rads,
                &v.min_steer_vel_rads,
                &v.max_steer_vel_rads,
            ),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Advance a pose by one step of the bicycle model with constant speed and steering angle.
pub fn integrate_pose(
    pose: &Pose2,
    speed_ms: f64,
    steer_angle_rad: f64,
    axis_distance_m: f64,
    dt_s: f64,
) -> Pose2 {
    let (sin, cos) = pose.heading_rad.sin_cos();
    let yaw_rate_rads = speed_ms * steer_angle_rad.tan() / axis_distance_m;

    let mut next = *pose;
    next.position_m.x += speed_ms * cos * dt_s;
    next.position_m.y += speed_ms * sin * dt_s;
    next.heading_rad = wrap_pi(pose.heading_rad + yaw_rate_rads * dt_s);

    next
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::planner::LocalPlannerParams;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn simulate(state: AckermannState, control: Control) -> Trajectory {
        let params = LocalPlannerParams::default();
        let sim = BicycleSim::new(&params.vehicle, &params.planner);
        let mut traj = Trajectory::default();

        sim.simulate(&Pose2::new(0.0, 0.0, 0.0), &state, control, &mut traj);
        traj
    }

    #[test]
    fn test_num_steps() {
        let params = LocalPlannerParams::default();
        let sim = BicycleSim::new(&params.vehicle, &params.planner);
        let rest = AckermannState::default();

        // Stationary controls still give a single step
        assert_eq!(sim.num_steps(&rest, &Control::default()), 1);

        // 0.3 m/s for 10 s in 0.025 m steps
        let steps = sim.num_steps(
            &rest,
            &Control {
                speed_ms: 0.3,
                steer_rate_rads: 0.0,
            },
        );
        assert!((120..=121).contains(&steps));
    }

    #[test]
    fn test_num_steps_limits_steer_rate() {
        let mut params = LocalPlannerParams::default();
        params.planner.sim_time_s = 0.2;
        let sim = BicycleSim::new(&params.vehicle, &params.planner);
        let rest = AckermannState::default();

        // Rates beyond the steering velocity bound cannot turn any further
        let steps = |steer_rate_rads| {
            sim.num_steps(
                &rest,
                &Control {
                    speed_ms: 0.3,
                    steer_rate_rads,
                },
            )
        };
        assert_eq!(steps(-5.0), steps(-0.5));
        assert_eq!(steps(5.0), steps(0.5));
    }

    #[test]
    fn test_straight_line() {
        let traj = simulate(
            AckermannState {
                speed_ms: 0.3,
                ..Default::default()
            },
            Control {
                speed_ms: 0.3,
                steer_rate_rads: 0.0,
            },
        );

        let end = traj.terminal_pose().unwrap();
        assert_eq!(traj.poses.len(), traj.states.len());
        assert_relative_eq!(end.position_m.x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(end.position_m.y, 0.0);
        assert_relative_eq!(end.heading_rad, 0.0);
    }

    #[test]
    fn test_accelerates_from_rest() {
        let traj = simulate(
            AckermannState::default(),
            Control {
                speed_ms: 0.3,
                steer_rate_rads: 0.0,
            },
        );

        // Speed ramps up at 1 m/s^2, losing v^2 / 2a = 0.045 m against constant speed
        let speeds: Vec<f64> = traj.states.iter().map(|s| s.speed_ms).collect();
        assert_eq!(speeds[0], 0.0);
        assert!(speeds.windows(2).all(|w| w[1] >= w[0]));
        assert_relative_eq!(*speeds.last().unwrap(), 0.3);

        let end = traj.terminal_pose().unwrap();
        assert!(end.position_m.x > 2.9 && end.position_m.x < 3.0);
    }

    #[test]
    fn test_steering_direction() {
        let left = simulate(
            AckermannState::default(),
            Control {
                speed_ms: 0.3,
                steer_rate_rads: 0.5,
            },
        );
        let right = simulate(
            AckermannState::default(),
            Control {
                speed_ms: 0.3,
                steer_rate_rads: -0.5,
            },
        );

        let l = left.terminal_pose().unwrap();
        let r = right.terminal_pose().unwrap();
        assert!(l.position_m.y > 0.5 && l.heading_rad > 0.0);
        assert!(r.position_m.y < -0.5 && r.heading_rad < 0.0);
        assert_relative_eq!(l.position_m.y, -r.position_m.y, epsilon = 1e-9);

        // The steering saturates at the angle limit
        assert_relative_eq!(left.states.last().unwrap().steer_angle_rad, 0.35);
        assert_relative_eq!(right.states.last().unwrap().steer_angle_rad, -0.35);
    }

    #[test]
    fn test_step_limits_displacement() {
        let params = LocalPlannerParams::default();
        let traj = simulate(
            AckermannState {
                speed_ms: 0.3,
                steer_angle_rad: 0.35,
                steer_rate_rads: 0.0,
            },
            Control {
                speed_ms: 0.3,
                steer_rate_rads: 0.5,
            },
        );

        for w in traj.poses.windows(2) {
            let dist = (w[1].position_m - w[0].position_m).norm();
            let turn = util::maths::shortest_ang_dist(w[0].heading_rad, w[1].heading_rad).abs();
            assert!(dist <= params.planner.sim_granularity_m + 1e-9);
            assert!(turn <= params.planner.angular_sim_granularity_rad + 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_states_stay_in_bounds(
            speed in -0.3f64..=0.3,
            angle in -0.35f64..=0.35,
            rate in -0.5f64..=0.5,
            target_speed in -0.3f64..=0.3,
            target_rate in -0.5f64..=0.5,
        ) {
            let params = LocalPlannerParams::default();
            let v = &params.vehicle;
            let traj = simulate(
                AckermannState { speed_ms: speed, steer_angle_rad: angle, steer_rate_rads: rate },
                Control { speed_ms: target_speed, steer_rate_rads: target_rate },
            );

            prop_assert!(traj.poses.len() >= 2);
            for s in traj.states.iter() {
                prop_assert!(s.speed_ms >= v.min_vel_ms && s.speed_ms <= v.max_vel_ms);
                prop_assert!(
                    s.steer_angle_rad >= v.min_steer_angle_rad
                        && s.steer_angle_rad <= v.max_steer_angle_rad
                );
                prop_assert!(
                    s.steer_rate_rads >= v.min_steer_vel_rads
                        && s.steer_rate_rads <= v.max_steer_vel_rads
                );
            }
            for p in traj.poses.iter() {
                prop_assert!(p.heading_rad > -std::f64::consts::PI);
                prop_assert!(p.heading_rad <= std::f64::consts::PI);
            }
        }
    }
}
