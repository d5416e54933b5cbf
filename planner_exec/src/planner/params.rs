//! Parameters for the trajectory planner

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Complete planner configuration, swapped as a single unit on reconfiguration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LocalPlannerParams {
    /// Vehicle kinematics and limits
    pub vehicle: VehicleParams,

    /// Sampling, simulation, and scoring
    pub planner: TrajPlannerParams,
}

/// Kinematic description and actuator limits of the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    // ---- GEOMETRY ----
    /// Distance between the front and rear axles (the wheelbase).
    ///
    /// Units: meters
    pub axis_distance_m: f64,

    /// Footprint polygon vertices as `[x, y]` pairs in the body frame. The polygon is closed
    /// implicitly and must be convex.
    ///
    /// Units: meters,
    /// Frame: Vehicle body (origin at the rear axle centre)
    pub footprint_m: Vec<[f64; 2]>,

    // ---- SPEED ----
    /// Maximum forward acceleration magnitude.
    ///
    /// Units: meters/second^2
    pub max_acc_mss: f64,

    /// Minimum (most negative) speed.
    ///
    /// Units: meters/second
    pub min_vel_ms: f64,

    /// Maximum speed.
    ///
    /// Units: meters/second
    pub max_vel_ms: f64,

    // ---- STEERING ----
    /// Maximum steering acceleration magnitude.
    ///
    /// Units: radians/second^2
    pub max_steer_acc_radss: f64,

    /// Minimum (most negative) steering rate.
    ///
    /// Units: radians/second
    pub min_steer_vel_rads: f64,

    /// Maximum steering rate.
    ///
    /// Units: radians/second
    pub max_steer_vel_rads: f64,

    /// Minimum (most negative, right) steering angle.
    ///
    /// Units: radians
    pub min_steer_angle_rad: f64,

    /// Maximum (left) steering angle.
    ///
    /// Units: radians
    pub max_steer_angle_rad: f64,
}

/// Sampling, simulation, and cost parameters of the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajPlannerParams {
    // ---- SIMULATION ----
    /// Length of the simulated horizon.
    ///
    /// Units: seconds
    pub sim_time_s: f64,

    /// Maximum distance travelled in a single simulation step.
    ///
    /// Units: meters
    pub sim_granularity_m: f64,

    /// Maximum heading change in a single simulation step.
    ///
    /// Units: radians
    pub angular_sim_granularity_rad: f64,

    // ---- SAMPLING ----
    /// Number of forward speed samples.
    pub vx_samples: usize,

    /// Number of steering rate samples.
    pub vtheta_samples: usize,

    // ---- SCORING ----
    /// Weight of the distance between the trajectory end and the path, in cells.
    pub pdist_scale: f64,

    /// Weight of the distance between the trajectory end and the local goal, in cells.
    pub gdist_scale: f64,

    /// Weight of the highest occupancy cost touched by the trajectory.
    pub occdist_scale: f64,

    /// Weight of the heading difference between the trajectory end and the path ahead.
    pub hdiff_scale: f64,

    /// Number of path cells to look ahead when computing the heading difference.
    pub heading_points: usize,

    /// Use the straight line distance to the local goal rather than the goal distance field.
    pub simple_attractor: bool,

    // ---- GOAL ----
    /// Distance from the local goal at which the vehicle is considered arrived.
    ///
    /// Units: meters
    pub xy_goal_tolerance_m: f64,
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

/// Reasons a parameter set can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("Parameter {0} is not finite")]
    NonFinite(&'static str),

    #[error("Bounds are inverted, {min_name} ({min}) is greater than {max_name} ({max})")]
    InvertedBounds {
        min_name: &'static str,
        min: f64,
        max_name: &'static str,
        max: f64,
    },

    #[error("Parameter {0} must be greater than zero, found {1}")]
    NotPositive(&'static str, f64),

    #[error("Parameter {0} must not be negative, found {1}")]
    Negative(&'static str, f64),

    #[error("Parameter {0} needs at least one sample")]
    NoSamples(&'static str),

    #[error("Steering angles must stay within (-pi/2, pi/2), found a magnitude of {0} rad")]
    SteerAngleTooLarge(f64),
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            axis_distance_m: 1.65,
            footprint_m: vec![[0.5, 0.5], [-0.5, 0.5], [-0.5, -0.5], [0.5, -0.5]],
            max_acc_mss: 1.0,
            min_vel_ms: -0.3,
            max_vel_ms: 0.3,
            max_steer_acc_radss: 1.0,
            min_steer_vel_rads: -0.5,
            max_steer_vel_rads: 0.5,
            min_steer_angle_rad: -0.35,
            max_steer_angle_rad: 0.35,
        }
    }
}

impl Default for TrajPlannerParams {
    fn default() -> Self {
        Self {
            sim_time_s: 10.0,
            sim_granularity_m: 0.025,
            angular_sim_granularity_rad: 0.025,
            vx_samples: 20,
            vtheta_samples: 20,
            pdist_scale: 0.6,
            gdist_scale: 0.8,
            occdist_scale: 0.01,
            hdiff_scale: 1.0,
            heading_points: 8,
            simple_attractor: false,
            xy_goal_tolerance_m: 0.5,
        }
    }
}

impl LocalPlannerParams {
    /// Check every invariant of the configuration.
    ///
    /// The footprint is validated separately when the planner builds it.
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.vehicle.validate()?;
        self.planner.validate()
    }
}

impl VehicleParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        positive("axis_distance_m", self.axis_distance_m)?;
        positive("max_acc_mss", self.max_acc_mss)?;
        positive("max_steer_acc_radss", self.max_steer_acc_radss)?;

        ordered(
            ("min_vel_ms", self.min_vel_ms),
            ("max_vel_ms", self.max_vel_ms),
        )?;
        ordered(
            ("min_steer_vel_rads", self.min_steer_vel_rads),
            ("max_steer_vel_rads", self.max_steer_vel_rads),
        )?;
        ordered(
            ("min_steer_angle_rad", self.min_steer_angle_rad),
            ("max_steer_angle_rad", self.max_steer_angle_rad),
        )?;

        // tan() is unbounded at +/- pi/2
        if self.min_steer_angle_rad <= -std::f64::consts::FRAC_PI_2
            || self.max_steer_angle_rad >= std::f64::consts::FRAC_PI_2
        {
            return Err(ParamsError::SteerAngleTooLarge(
                self.max_abs_steer_angle_rad(),
            ));
        }

        Ok(())
    }

    /// Largest steering angle magnitude the vehicle can reach.
    pub fn max_abs_steer_angle_rad(&self) -> f64 {
        self.min_steer_angle_rad
            .abs()
            .max(self.max_steer_angle_rad.abs())
    }

    /// Largest steering rate magnitude the vehicle can reach.
    pub fn max_abs_steer_vel_rads(&self) -> f64 {
        self.min_steer_vel_rads.abs().max(self.max_steer_vel_rads.abs())
    }

    /// Largest speed magnitude the vehicle can reach.
    pub fn max_abs_vel_ms(&self) -> f64 {
        self.min_vel_ms.abs().max(self.max_vel_ms.abs())
    }
}

impl TrajPlannerParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        positive("sim_time_s", self.sim_time_s)?;
        positive("sim_granularity_m", self.sim_granularity_m)?;
        positive("angular_sim_granularity_rad", self.angular_sim_granularity_rad)?;

        if self.vx_samples == 0 {
            return Err(ParamsError::NoSamples("vx_samples"));
        }
        if self.vtheta_samples == 0 {
            return Err(ParamsError::NoSamples("vtheta_samples"));
        }

        non_negative("pdist_scale", self.pdist_scale)?;
        non_negative("gdist_scale", self.gdist_scale)?;
        non_negative("occdist_scale", self.occdist_scale)?;
        non_negative("hdiff_scale", self.hdiff_scale)?;
        non_negative("xy_goal_tolerance_m", self.xy_goal_tolerance_m)?;

        Ok(())
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

fn finite(name: &'static str, value: f64) -> Result<(), ParamsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamsError::NonFinite(name))
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ParamsError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NotPositive(name, value))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ParamsError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::Negative(name, value))
    }
}

fn ordered(min: (&'static str, f64), max: (&'static str, f64)) -> Result<(), ParamsError> {
    finite(min.0, min.1)?;
    finite(max.0, max.1)?;
    if min.1 <= max.1 {
        Ok(())
    } else {
        Err(ParamsError::InvertedBounds {
            min_name: min.0,
            min: min.1,
            max_name: max.0,
            max: max.1,
        })
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(LocalPlannerParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_shipped_params_file() -> Result<(), util::params::LoadError> {
        let params: LocalPlannerParams =
            util::params::parse(include_str!("../../../params/local_planner.toml"))?;

        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.vehicle.axis_distance_m, 1.65);
        assert_eq!(params.planner.vx_samples, 20);

        Ok(())
    }

    #[test]
    fn test_inverted_bounds() {
        let mut params = LocalPlannerParams::default();
        params.vehicle.min_vel_ms = 0.5;

        assert_eq!(
            params.validate(),
            Err(ParamsError::InvertedBounds {
                min_name: "min_vel_ms",
                min: 0.5,
                max_name: "max_vel_ms",
                max: 0.3
            })
        );

        let mut params = LocalPlannerParams::default();
        params.vehicle.min_steer_angle_rad = 0.4;
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_invalid_values() {
        let mut params = LocalPlannerParams::default();
        params.vehicle.axis_distance_m = 0.0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::NotPositive("axis_distance_m", 0.0))
        );

        let mut params = LocalPlannerParams::default();
        params.planner.vtheta_samples = 0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::NoSamples("vtheta_samples"))
        );

        let mut params = LocalPlannerParams::default();
        params.planner.hdiff_scale = -1.0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::Negative("hdiff_scale", -1.0))
        );

        let mut params = LocalPlannerParams::default();
        params.planner.sim_granularity_m = f64::NAN;
        assert_eq!(
            params.validate(),
            Err(ParamsError::NonFinite("sim_granularity_m"))
        );

        let mut params = LocalPlannerParams::default();
        params.vehicle.max_steer_angle_rad = 1.6;
        assert_eq!(params.validate(), Err(ParamsError::SteerAngleTooLarge(1.6)));
    }
}
