//! # Localisation types
//!
//! Planar pose and Ackermann actuator state of the vehicle, both expressed in the map frame.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The planar pose of the vehicle in the map frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose2 {
    /// Position of the rear axle centre in the map frame
    pub position_m: Vector2<f64>,

    /// Heading (angle to the +ve map X axis), always in `(-pi, pi]`
    pub heading_rad: f64,
}

/// The actuator state of an Ackermann vehicle.
///
/// When given to the planner this is the measured state at the start of the cycle. Inside a
/// trajectory it is the simulated state at each step.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AckermannState {
    /// Forward speed, negative when reversing
    pub speed_ms: f64,

    /// Steering angle, positive turns left
    pub steer_angle_rad: f64,

    /// Rate of change of the steering angle
    pub steer_rate_rads: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Pose2 {
    /// Create a new pose, wrapping the heading into `(-pi, pi]`.
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            heading_rad: util::maths::wrap_pi(heading_rad),
        }
    }

    /// Euclidean distance between the position of this pose and a point.
    pub fn distance_to(&self, point_m: &Vector2<f64>) -> f64 {
        (point_m - self.position_m).norm()
    }

    /// Transform a point in the vehicle body frame into the map frame.
    pub fn transform_point(&self, point_body_m: &Vector2<f64>) -> Vector2<f64> {
        let (sin, cos) = self.heading_rad.sin_cos();

        self.position_m
            + Vector2::new(
                point_body_m.x * cos - point_body_m.y * sin,
                point_body_m.x * sin + point_body_m.y * cos,
            )
    }
}

impl AckermannState {
    /// State of a vehicle at rest with the given steering angle.
    pub fn stationary(steer_angle_rad: f64) -> Self {
        Self {
            speed_ms: 0.0,
            steer_angle_rad,
            steer_rate_rads: 0.0,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
