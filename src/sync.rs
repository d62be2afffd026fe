//! Scales one axis's limits so that a translational and a rotational
//! S-curve complete in exactly the same total time.

use crate::error::MotionError;
use crate::problem::SolverParameters;
use crate::scurve::{self, SCurveParameters};
use crate::types::{Axis, DynamicLimits, EPSILON};

/// Solve `trans_dist` and `rot_dist` independently, then re-solve whichever
/// axis finished sooner with its limits scaled so both total durations
/// match.
///
/// Scaling a full limit triple by `s` preserves an S-curve's segment-time
/// ratios and stretches its total duration by `1/s`, so a single rescale
/// pass after the two independent solves is enough (§4.2).
pub fn synchronize(
    trans_dist: f64,
    trans_limits: DynamicLimits,
    rot_dist: f64,
    rot_limits: DynamicLimits,
    params: &SolverParameters,
) -> Result<(SCurveParameters, SCurveParameters), MotionError> {
    let trans_is_zero = trans_dist.abs() < EPSILON;
    let rot_is_zero = rot_dist.abs() < EPSILON;

    // A zero-displacement axis has no feasible (dt_j, dt_a, dt_v) triple —
    // try_profile's dt_v term is strictly negative for d = 0 — so it never
    // goes through the solver; it just holds position for the other axis's
    // duration.
    match (trans_is_zero, rot_is_zero) {
        (true, true) => return Ok((scurve::hold(0.0), scurve::hold(0.0))),
        (true, false) => {
            let rot = scurve::solve(Axis::Rotation, rot_dist, rot_limits, params)?;
            let trans = scurve::hold(rot.total_time());
            return Ok((trans, rot));
        }
        (false, true) => {
            let trans = scurve::solve(Axis::Translation, trans_dist, trans_limits, params)?;
            let rot = scurve::hold(trans.total_time());
            return Ok((trans, rot));
        }
        (false, false) => {}
    }

    let mut trans = scurve::solve(Axis::Translation, trans_dist, trans_limits, params)?;
    let mut rot = scurve::solve(Axis::Rotation, rot_dist, rot_limits, params)?;

    let t_trans = trans.total_time();
    let t_rot = rot.total_time();

    if (t_trans - t_rot).abs() < EPSILON {
        return Ok((trans, rot));
    }

    if t_trans < t_rot {
        let scale = t_trans / t_rot;
        trans = scurve::solve(Axis::Translation, trans_dist, trans_limits * scale, params)?;
    } else {
        let scale = t_rot / t_trans;
        rot = scurve::solve(Axis::Rotation, rot_dist, rot_limits * scale, params)?;
    }

    let t_trans = trans.total_time();
    let t_rot = rot.total_time();

    if (t_trans - t_rot).abs() < EPSILON {
        Ok((trans, rot))
    } else {
        Err(MotionError::Desync {
            translation_time: t_trans,
            rotation_time: t_rot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synchronizes_unequal_axis_durations() {
        let params = SolverParameters::default();
        let trans_limits = DynamicLimits::new(0.5, 0.5, 1.0);
        let rot_limits = DynamicLimits::new(3.0, 3.0, 6.0);

        let (trans, rot) = synchronize(1.0, trans_limits, 1.5708, rot_limits, &params).unwrap();

        assert!((trans.total_time() - rot.total_time()).abs() < EPSILON);
    }

    #[test]
    fn already_synchronized_axes_pass_through() {
        let params = SolverParameters::default();
        let lim = DynamicLimits::new(1.0, 1.0, 2.0);

        let (trans, rot) = synchronize(1.0, lim, 1.0, lim, &params).unwrap();

        assert!((trans.total_time() - rot.total_time()).abs() < EPSILON);
    }

    #[test]
    fn pure_rotation_holds_translation_axis() {
        let params = SolverParameters::default();
        let trans_limits = DynamicLimits::new(1.0, 1.0, 2.0);
        let rot_limits = DynamicLimits::new(3.0, 3.0, 6.0);

        let (trans, rot) = synchronize(0.0, trans_limits, 1.5708, rot_limits, &params).unwrap();

        assert!((trans.total_time() - rot.total_time()).abs() < EPSILON);
        assert_eq!(trans.v_lim, 0.0);
        let (p, v, a) = trans.evaluate(trans.total_time() / 2.0);
        assert_eq!((p, v, a), (0.0, 0.0, 0.0));
    }

    #[test]
    fn pure_translation_holds_rotation_axis() {
        let params = SolverParameters::default();
        let trans_limits = DynamicLimits::new(1.0, 1.0, 2.0);
        let rot_limits = DynamicLimits::new(3.0, 3.0, 6.0);

        let (trans, rot) = synchronize(1.0, trans_limits, 0.0, rot_limits, &params).unwrap();

        assert!((trans.total_time() - rot.total_time()).abs() < EPSILON);
        assert_eq!(rot.v_lim, 0.0);
    }

    #[test]
    fn both_axes_zero_yields_zero_duration_hold() {
        let params = SolverParameters::default();
        let lim = DynamicLimits::new(1.0, 1.0, 2.0);

        let (trans, rot) = synchronize(0.0, lim, 0.0, lim, &params).unwrap();

        assert_eq!(trans.total_time(), 0.0);
        assert_eq!(rot.total_time(), 0.0);
    }
}
