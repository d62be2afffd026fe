//! Kinematic primitives shared by the solver, synchronizer and facade.

use core::ops::Mul;

/// Tolerance used throughout the crate for floating point comparisons.
pub const EPSILON: f64 = 1e-6;

/// A planar pose: `(x, y)` in meters, `a` (heading) in radians.
///
/// Immutable once produced by the solver; equality is bit-exact, which is
/// useful for regression tests that compare a `lookup` result against a
/// previously recorded point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub a: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, a: f64) -> Self {
        Self { x, y, a }
    }
}

/// A planar velocity: `(vx, vy)` in m/s, `va` in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
    pub va: f64,
}

impl Velocity {
    pub const fn new(vx: f64, vy: f64, va: f64) -> Self {
        Self { vx, vy, va }
    }

    /// True when every component's magnitude is below `epsilon`.
    pub fn near_zero(&self, epsilon: f64) -> bool {
        self.vx.abs() < epsilon && self.vy.abs() < epsilon && self.va.abs() < epsilon
    }
}

/// Position, velocity and time at a single instant — the sole output of
/// [`crate::trajectory::Trajectory::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct PVTPoint {
    pub position: Point,
    pub velocity: Velocity,
    pub time: f64,
}

/// A `(v_max, a_max, j_max)` triple. All components are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicLimits {
    pub v_max: f64,
    pub a_max: f64,
    pub j_max: f64,
}

impl DynamicLimits {
    pub const fn new(v_max: f64, a_max: f64, j_max: f64) -> Self {
        Self { v_max, a_max, j_max }
    }
}

/// Scaling a limit triple preserves the segment-time ratios of an S-curve,
/// which is exactly what the two-axis synchronizer relies on.
impl Mul<f64> for DynamicLimits {
    type Output = DynamicLimits;

    fn mul(self, scale: f64) -> DynamicLimits {
        DynamicLimits {
            v_max: self.v_max * scale,
            a_max: self.a_max * scale,
            j_max: self.j_max * scale,
        }
    }
}

/// Cumulative `(t, p, v, a)` at an S-curve segment boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchPoint {
    pub t: f64,
    pub p: f64,
    pub v: f64,
    pub a: f64,
}

/// Which scalar axis a solver/synchronizer error pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Translation,
    Rotation,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Axis::Translation => write!(f, "translation"),
            Axis::Rotation => write!(f, "rotation"),
        }
    }
}
