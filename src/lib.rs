//! # Holonomic Motion
//!
//! A deterministic, jerk-limited (S-curve) motion planner for a holonomic
//! mobile base: point-to-point and constant-velocity trajectory generation,
//! plus closed-form position/velocity lookup for a real-time control loop.
//!
//! Core pipeline:
//! - [`scurve`] solves a single scalar axis's seven-segment profile.
//! - [`sync`] time-aligns a translational and a rotational axis.
//! - [`trajectory::Trajectory`] is the facade consumers build and query.
//!
//! [`problem`] and [`config`] are the construction-time configuration layer;
//! [`error`] holds the shared error type used below the facade boundary.

#[cfg(feature = "config-toml")]
pub mod config;
pub mod error;
pub mod problem;
pub mod scurve;
pub mod sync;
pub mod trajectory;
pub mod types;

#[cfg(feature = "config-toml")]
pub use config::{ConfigError, MotionConfig};
pub use error::MotionError;
pub use problem::{LimitProfile, MotionPlanningProblem, SolverParameters};
pub use scurve::SCurveParameters;
pub use trajectory::Trajectory;
pub use types::{Axis, DynamicLimits, PVTPoint, Point, SwitchPoint, Velocity, EPSILON};
