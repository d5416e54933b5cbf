//! # Ackermann local planner library.
//!
//! Given a global plan, a rolling cost map, and the vehicle's current pose and Ackermann state,
//! the planner samples candidate controls, forward-simulates each one with a bicycle model,
//! scores the resulting trajectories against the map, and returns the best one together with the
//! command to send to the vehicle.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Footprint polygon and grid rasterisation (lines, outlines, filled interiors)
pub mod footprint;

/// Localisation types - the planar pose and Ackermann state of the vehicle
pub mod loc;

/// Map collaborators - cost surface, world model, and distance fields
pub mod map;

/// Trajectory planner - sampling search, configuration, and the global plan
pub mod planner;

/// Trajectories - control samples, forward simulation, and scoring
pub mod traj;
