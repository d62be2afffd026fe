//! Error types shared by the solver, synchronizer and facade.

use crate::types::Axis;

/// Errors produced below the facade boundary.
///
/// The public facade (see [`crate::trajectory::Trajectory`]) flattens these
/// into the documented `bool` return values after logging them; nothing in
/// this crate panics or unwinds across its public API.
#[derive(Debug, thiserror::Error, PartialEq, Clone, Copy)]
pub enum MotionError {
    /// The limit-relaxation search exhausted `num_loops` without finding a
    /// feasible `(dt_j, dt_a, dt_v)` triple for the requested displacement.
    #[error("no feasible S-curve for {axis} axis (requested distance {requested:.6})")]
    Infeasible { axis: Axis, requested: f64 },

    /// After synchronization the two axes' total durations still differ by
    /// more than the numerical tolerance.
    #[error(
        "translation and rotation durations did not synchronize \
         (translation={translation_time:.6}s, rotation={rotation_time:.6}s)"
    )]
    Desync {
        translation_time: f64,
        rotation_time: f64,
    },

    /// `lookup` was called before any successful generation.
    #[error("lookup requested before a trajectory was generated")]
    Uninitialized,
}
