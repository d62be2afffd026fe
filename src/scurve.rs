//! One-dimensional, seven-segment, jerk-limited (S-curve) motion solver.
//!
//! Given a signed scalar displacement and a [`DynamicLimits`] triple, [`solve`]
//! produces an [`SCurveParameters`] describing the classical `+J, 0, -J, 0,
//! -J, 0, +J` profile: accelerate under max jerk, coast at max acceleration,
//! decelerate the jerk back to zero at the velocity limit, cruise, then mirror
//! the whole thing to come to rest exactly at the target displacement.

use crate::error::MotionError;
use crate::problem::SolverParameters;
use crate::types::{Axis, DynamicLimits, SwitchPoint, EPSILON};

/// Signed unit jerk per segment, in the fixed order
/// `[dt_j, dt_a, dt_j, dt_v, dt_j, dt_a, dt_j]`.
const JERK_SIGN: [f64; 7] = [1.0, 0.0, -1.0, 0.0, -1.0, 0.0, 1.0];

/// A fully solved seven-segment S-curve for one scalar axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SCurveParameters {
    /// Signed velocity limit actually used to build this profile.
    pub v_lim: f64,
    /// Signed acceleration limit actually used to build this profile.
    pub a_lim: f64,
    /// Signed jerk limit actually used to build this profile.
    pub j_lim: f64,
    pub switch_points: [SwitchPoint; 8],
}

impl SCurveParameters {
    /// Total duration of the profile, `switch_points[7].t`.
    pub fn total_time(&self) -> f64 {
        self.switch_points[7].t
    }

    /// Net signed displacement covered by the profile, `switch_points[7].p`.
    pub fn total_displacement(&self) -> f64 {
        self.switch_points[7].p
    }

    /// Evaluate `(position, velocity, acceleration)` at time `t`.
    ///
    /// `t` is clamped to `[0, total_time()]`: a negative query returns the
    /// initial state, and a query past the end returns the terminal state
    /// with velocity and acceleration forced to exactly zero.
    pub fn evaluate(&self, t: f64) -> (f64, f64, f64) {
        let sp = &self.switch_points;

        if t <= 0.0 {
            return (sp[0].p, sp[0].v, sp[0].a);
        }
        if t >= sp[7].t {
            return (sp[7].p, 0.0, 0.0);
        }

        // Linear scan: at most 7 comparisons, no heap, no recursion.
        let mut region = 6;
        for r in 0..7 {
            if t < sp[r + 1].t {
                region = r;
                break;
            }
        }

        let dt = t - sp[region].t;
        let j_r = JERK_SIGN[region] * self.j_lim;

        let a = sp[region].a + j_r * dt;
        let v = sp[region].v + sp[region].a * dt + 0.5 * j_r * dt * dt;
        let p = sp[region].p
            + sp[region].v * dt
            + 0.5 * sp[region].a * dt * dt
            + (j_r * dt * dt * dt) / 6.0;

        (p, v, a)
    }
}

/// Integrate the seven `(duration, unit-jerk)` segments starting from rest at
/// the origin, returning unsigned switch points. `j_mag` must be positive.
fn integrate_segments(durations: [f64; 7], j_mag: f64) -> [SwitchPoint; 8] {
    let mut points = [SwitchPoint::default(); 8];

    for i in 0..7 {
        let prev = points[i];
        let dt = durations[i];
        let j = JERK_SIGN[i] * j_mag;

        points[i + 1] = SwitchPoint {
            t: prev.t + dt,
            p: prev.p + prev.v * dt + 0.5 * prev.a * dt * dt + (j * dt * dt * dt) / 6.0,
            v: prev.v + prev.a * dt + 0.5 * j * dt * dt,
            a: prev.a + j * dt,
        };
    }

    points
}

/// Nominal segment durations for distance `d` (unsigned) under limits
/// `(v, a, j_mag)`, per §4.1: `dt_j = a/j`, `dt_a = v/a - a/j`,
/// `dt_v = d/v - v/a - a/j`. Returns `None` if `dt_a` or `dt_v` would be
/// negative beyond tolerance — the trial is infeasible and must not be
/// silently clamped to zero.
fn try_profile(d: f64, v: f64, a: f64, j_mag: f64) -> Option<(f64, f64, f64)> {
    let dt_j = a / j_mag;
    let dt_a = v / a - a / j_mag;
    let dt_v = d / v - v / a - a / j_mag;

    if dt_a >= -EPSILON && dt_v >= -EPSILON {
        Some((dt_j, dt_a.max(0.0), dt_v.max(0.0)))
    } else {
        None
    }
}

fn build(sign: f64, v: f64, a: f64, j_mag: f64, dt_j: f64, dt_a: f64, dt_v: f64) -> SCurveParameters {
    let durations = [dt_j, dt_a, dt_j, dt_v, dt_j, dt_a, dt_j];
    let unsigned = integrate_segments(durations, j_mag);

    let mut switch_points = [SwitchPoint::default(); 8];
    for (i, sp) in unsigned.iter().enumerate() {
        switch_points[i] = SwitchPoint {
            t: sp.t,
            p: sign * sp.p,
            v: sign * sp.v,
            a: sign * sp.a,
        };
    }

    SCurveParameters {
        v_lim: sign * v,
        a_lim: sign * a,
        j_lim: sign * j_mag,
        switch_points,
    }
}

/// A trivial profile that holds position for `total_time` seconds without
/// ever moving: every switch point is the origin except `switch_points[7].t`.
///
/// Used for a degenerate zero-distance axis (see `crate::sync`) and for the
/// fully degenerate zero-move trajectory (see `crate::trajectory`), where a
/// real S-curve solve is either meaningless (distance is zero) or unneeded.
pub fn hold(total_time: f64) -> SCurveParameters {
    let mut switch_points = [SwitchPoint::default(); 8];
    switch_points[7].t = total_time;

    SCurveParameters {
        v_lim: 0.0,
        a_lim: 0.0,
        j_lim: 0.0,
        switch_points,
    }
}

/// Solve a seven-segment S-curve for signed displacement `d` under `lim`,
/// using `params` to bound and shape the limit-relaxation search.
///
/// A near-zero displacement is a degenerate case handled by the caller
/// ([`crate::trajectory::Trajectory`]) before reaching this solver.
pub fn solve(
    axis: Axis,
    d: f64,
    lim: DynamicLimits,
    params: &SolverParameters,
) -> Result<SCurveParameters, MotionError> {
    let sign = if d < 0.0 { -1.0 } else { 1.0 };
    let d_abs = d.abs();

    if let Some((dt_j, dt_a, dt_v)) = try_profile(d_abs, lim.v_max, lim.a_max, lim.j_max) {
        return Ok(build(sign, lim.v_max, lim.a_max, lim.j_max, dt_j, dt_a, dt_v));
    }

    for k in 1..=params.num_loops {
        let factor = (k as f64).powf(params.exponent_decay);
        let v_k = lim.v_max * (1.0 - params.alpha_decay * factor);
        let a_k = lim.a_max * (1.0 - params.beta_decay * factor);

        if v_k <= 0.0 || a_k <= 0.0 {
            continue;
        }

        if let Some((dt_j, dt_a, dt_v)) = try_profile(d_abs, v_k, a_k, lim.j_max) {
            let profile = build(sign, v_k, a_k, lim.j_max, dt_j, dt_a, dt_v);

            if (profile.total_displacement().abs() - d_abs).abs() < EPSILON {
                return Ok(profile);
            }
        }
    }

    Err(MotionError::Infeasible { axis, requested: d })
}

/// Inverse (constant-velocity) solver: build a rest-to-rest profile that
/// ramps up to (a clamped version of) `v_target`, cruises for as long as
/// `total_time` allows, and ramps back down to rest.
///
/// Unlike [`solve`], this never fails: when `v_target` or `total_time` exceed
/// what `lim` can achieve the peak velocity is silently clamped down to the
/// largest value reachable in `total_time / 2` with no cruise phase at all.
/// The caller is responsible for logging that a clamp occurred; see
/// `crate::trajectory`.
pub fn solve_inverse(v_target: f64, total_time: f64, lim: DynamicLimits) -> SCurveParameters {
    let sign = if v_target < 0.0 { -1.0 } else { 1.0 };
    let v_mag = v_target.abs().min(lim.v_max);

    if total_time <= 0.0 {
        return build(sign, lim.v_max, lim.a_max, lim.j_max, 0.0, 0.0, 0.0);
    }

    // Ramp duration (accel-only, symmetric to decel) to reach velocity `v`.
    let ramp_time = |v: f64| -> (f64, f64) {
        let threshold = lim.a_max * lim.a_max / lim.j_max;
        if v <= threshold {
            let t_j = (v / lim.j_max).sqrt();
            (t_j, 0.0)
        } else {
            let t_j = lim.a_max / lim.j_max;
            let t_a = v / lim.a_max - lim.a_max / lim.j_max;
            (t_j, t_a)
        }
    };

    let (mut t_j, mut t_a) = ramp_time(v_mag);
    let mut v_peak = v_mag;
    let mut plateau = total_time - 2.0 * (2.0 * t_j + t_a);

    if plateau < 0.0 {
        let half = total_time / 2.0;
        let threshold = lim.a_max * lim.a_max / lim.j_max;
        let candidate = lim.j_max * (half / 2.0) * (half / 2.0);

        if candidate <= threshold {
            t_j = half / 2.0;
            t_a = 0.0;
            v_peak = candidate;
        } else {
            t_j = lim.a_max / lim.j_max;
            t_a = (half - 2.0 * t_j).max(0.0);
            v_peak = lim.a_max * (half - lim.a_max / lim.j_max);
        }

        plateau = 0.0;
    }

    build(sign, v_peak.max(0.0), lim.a_max, lim.j_max, t_j, t_a, plateau)
}
