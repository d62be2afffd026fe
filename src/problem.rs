//! Assembles a [`MotionPlanningProblem`] from raw endpoints, a motion mode
//! and a configured limit profile.

use crate::types::{DynamicLimits, Point};

/// Controls the limit-relaxation search performed by [`crate::scurve::solve`].
///
/// Typical values (see the spec's external-interfaces section): `num_loops =
/// 10`, `alpha_decay = beta_decay = 0.1`, `exponent_decay = 2.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverParameters {
    pub num_loops: u32,
    pub alpha_decay: f64,
    pub beta_decay: f64,
    pub exponent_decay: f64,
}

impl Default for SolverParameters {
    fn default() -> Self {
        Self {
            num_loops: 10,
            alpha_decay: 0.1,
            beta_decay: 0.1,
            exponent_decay: 2.0,
        }
    }
}

/// Coarse and fine dynamic-limit pairs for one scalar axis, plus the
/// fine-mode scaling factor used to derive `fine` from `coarse` when only
/// one profile is configured.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct LimitProfile {
    pub coarse: DynamicLimits,
    pub fine: DynamicLimits,
}

impl LimitProfile {
    /// Builds a fine profile by scaling `coarse` uniformly by `fine_scale`
    /// (a fraction strictly less than 1, e.g. 0.5).
    pub fn from_coarse(coarse: DynamicLimits, fine_scale: f64) -> Self {
        Self {
            coarse,
            fine: coarse * fine_scale,
        }
    }

    pub fn select(&self, fine_mode: bool) -> DynamicLimits {
        if fine_mode {
            self.fine
        } else {
            self.coarse
        }
    }
}

/// A fully specified point-to-point motion planning request: endpoints plus
/// the per-axis limits and solver tuning to use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPlanningProblem {
    pub initial: Point,
    pub target: Point,
    pub translation_limits: DynamicLimits,
    pub rotation_limits: DynamicLimits,
    pub solver_params: SolverParameters,
}

impl MotionPlanningProblem {
    /// Assembles a problem by selecting the coarse or fine profile per
    /// `fine_mode`.
    pub fn build(
        initial: Point,
        target: Point,
        fine_mode: bool,
        translation: &LimitProfile,
        rotation: &LimitProfile,
        solver_params: SolverParameters,
    ) -> Self {
        Self {
            initial,
            target,
            translation_limits: translation.select(fine_mode),
            rotation_limits: rotation.select(fine_mode),
            solver_params,
        }
    }
}
