//! The public facade: owns the current trajectory, builds new ones from a
//! [`MotionPlanningProblem`]-shaped request, and answers point-in-time
//! queries.

use std::cell::Cell;

use tracing::{debug, warn};

use crate::error::MotionError;
use crate::problem::{LimitProfile, MotionPlanningProblem, SolverParameters};
use crate::scurve::{self, SCurveParameters};
use crate::sync;
use crate::types::{DynamicLimits, PVTPoint, Point, Velocity, EPSILON};

/// A unit 2-D direction, or the zero vector for a degenerate (zero-length)
/// translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Direction2 {
    x: f64,
    y: f64,
}

impl Direction2 {
    fn from_delta(dx: f64, dy: f64) -> (Self, f64) {
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < EPSILON {
            (Self::default(), 0.0)
        } else {
            (
                Self {
                    x: dx / dist,
                    y: dy / dist,
                },
                dist,
            )
        }
    }
}

/// Shortest signed angular delta from `from` to `to`, normalized to
/// `(-π, π]`.
fn angular_delta(from: f64, to: f64) -> f64 {
    let two_pi = std::f64::consts::TAU;
    let mut delta = (to - from) % two_pi;
    if delta > std::f64::consts::PI {
        delta -= two_pi;
    } else if delta <= -std::f64::consts::PI {
        delta += two_pi;
    }
    delta
}

/// A stored, fully synchronized two-axis trajectory, or the absence of one.
#[derive(Debug, Clone, Copy)]
enum State {
    Empty,
    Ready {
        initial: Point,
        trans_direction: Direction2,
        rot_sign: f64,
        trans: SCurveParameters,
        rot: SCurveParameters,
    },
}

/// Generates and evaluates a single current trajectory for a holonomic base.
///
/// Construction takes a translation and a rotation [`LimitProfile`] (each a
/// coarse/fine `DynamicLimits` pair) and [`SolverParameters`] once;
/// `generate_point_to_point` and `generate_const_vel` then each overwrite
/// the stored trajectory on success and leave it untouched on failure.
#[derive(Debug)]
pub struct Trajectory {
    translation: LimitProfile,
    rotation: LimitProfile,
    solver_params: SolverParameters,
    state: State,
    logged_empty_lookup: Cell<bool>,
}

impl Trajectory {
    pub fn new(
        trans_coarse: DynamicLimits,
        trans_fine: DynamicLimits,
        rot_coarse: DynamicLimits,
        rot_fine: DynamicLimits,
        solver_params: SolverParameters,
    ) -> Self {
        Self {
            translation: LimitProfile {
                coarse: trans_coarse,
                fine: trans_fine,
            },
            rotation: LimitProfile {
                coarse: rot_coarse,
                fine: rot_fine,
            },
            solver_params,
            state: State::Empty,
            logged_empty_lookup: Cell::new(false),
        }
    }

    /// Build and store a synchronized trajectory from `initial` to `target`.
    /// Returns `true` and overwrites the stored trajectory on success;
    /// returns `false` and leaves the previous trajectory intact otherwise.
    pub fn generate_point_to_point(&mut self, initial: Point, target: Point, fine_mode: bool) -> bool {
        let problem = MotionPlanningProblem::build(
            initial,
            target,
            fine_mode,
            &self.translation,
            &self.rotation,
            self.solver_params,
        );

        let (trans_direction, dist) = Direction2::from_delta(
            problem.target.x - problem.initial.x,
            problem.target.y - problem.initial.y,
        );
        let delta = angular_delta(problem.initial.a, problem.target.a);
        let rot_sign = if delta < 0.0 { -1.0 } else { 1.0 };

        match sync::synchronize(
            dist,
            problem.translation_limits,
            delta.abs(),
            problem.rotation_limits,
            &problem.solver_params,
        ) {
            Ok((trans, rot)) => {
                self.state = State::Ready {
                    initial: problem.initial,
                    trans_direction,
                    rot_sign: if delta.abs() < EPSILON { 0.0 } else { rot_sign },
                    trans,
                    rot,
                };
                true
            }
            Err(err) => {
                warn!(%err, "point-to-point generation failed, keeping previous trajectory");
                false
            }
        }
    }

    /// Build and store a best-effort constant-velocity trajectory lasting
    /// `move_time` seconds. Never fails outright: the inverse solver clamps
    /// silently when `velocity` or `move_time` exceed what the limits allow.
    pub fn generate_const_vel(
        &mut self,
        initial: Point,
        velocity: Velocity,
        move_time: f64,
        fine_mode: bool,
    ) -> bool {
        let trans_limits = self.translation.select(fine_mode);
        let rot_limits = self.rotation.select(fine_mode);

        let (trans_direction, v_mag) = Direction2::from_delta(velocity.vx, velocity.vy);
        let rot_sign = if velocity.va < 0.0 { -1.0 } else { 1.0 };

        let trans = scurve::solve_inverse(v_mag, move_time, trans_limits);
        let rot = scurve::solve_inverse(velocity.va.abs(), move_time, rot_limits);

        if (trans.v_lim.abs() - v_mag).abs() > EPSILON || (rot.v_lim.abs() - velocity.va.abs()).abs() > EPSILON {
            debug!(move_time, "const-vel generation clamped one or both axes to reachable limits");
        }

        self.state = State::Ready {
            initial,
            trans_direction,
            rot_sign: if velocity.va.abs() < EPSILON { 0.0 } else { rot_sign },
            trans,
            rot,
        };
        true
    }

    /// Evaluate the stored trajectory at `time` seconds, or
    /// [`MotionError::Uninitialized`] if nothing has been generated yet.
    fn lookup_checked(&self, time: f64) -> Result<PVTPoint, MotionError> {
        match &self.state {
            State::Empty => Err(MotionError::Uninitialized),
            State::Ready {
                initial,
                trans_direction,
                rot_sign,
                trans,
                rot,
            } => {
                let (p_trans, v_trans, _a_trans) = trans.evaluate(time);
                let (p_rot, v_rot, _a_rot) = rot.evaluate(time);

                Ok(PVTPoint {
                    position: Point {
                        x: initial.x + trans_direction.x * p_trans,
                        y: initial.y + trans_direction.y * p_trans,
                        a: initial.a + rot_sign * p_rot,
                    },
                    velocity: Velocity {
                        vx: trans_direction.x * v_trans,
                        vy: trans_direction.y * v_trans,
                        va: rot_sign * v_rot,
                    },
                    time,
                })
            }
        }
    }

    /// Evaluate the stored trajectory at `time` seconds from its start.
    ///
    /// Before any successful generation this returns a zero-velocity point
    /// at the origin and logs once at `debug` — a real-time loop polling
    /// before the first trajectory is ready must not spam the log — it
    /// never panics.
    pub fn lookup(&self, time: f64) -> PVTPoint {
        match self.lookup_checked(time) {
            Ok(point) => point,
            Err(err) => {
                if !self.logged_empty_lookup.replace(true) {
                    debug!(%err, "lookup requested before any trajectory was generated");
                }
                PVTPoint::default()
            }
        }
    }

    /// True once a trajectory has been successfully generated.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn trajectory() -> Trajectory {
        let trans = DynamicLimits::new(0.5, 0.5, 1.0);
        let rot = DynamicLimits::new(3.0, 3.0, 6.0);
        Trajectory::new(trans, trans * 0.5, rot, rot * 0.5, SolverParameters::default())
    }

    #[test]
    fn pure_translation_reaches_target() {
        let mut traj = trajectory();
        let initial = Point::new(0.0, 0.0, 0.0);
        let target = Point::new(1.0, 0.0, 0.0);

        assert!(traj.generate_point_to_point(initial, target, false));

        let end = traj.lookup(1_000.0);
        assert!(approx_eq!(f64, end.position.x, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, end.position.y, 0.0, epsilon = 1e-9));
        assert!(end.velocity.near_zero(1e-9));
    }

    #[test]
    fn pure_rotation_reaches_heading() {
        let mut traj = trajectory();
        let initial = Point::new(0.0, 0.0, 0.0);
        let target = Point::new(0.0, 0.0, std::f64::consts::FRAC_PI_2);

        assert!(traj.generate_point_to_point(initial, target, false));

        let end = traj.lookup(1_000.0);
        assert!(approx_eq!(f64, end.position.a, std::f64::consts::FRAC_PI_2, epsilon = 1e-6));
        assert!(approx_eq!(f64, end.position.x, 0.0, epsilon = 1e-6));
    }

    #[test]
    fn combined_move_synchronizes_axes() {
        let mut traj = trajectory();
        let initial = Point::new(0.0, 0.0, 0.0);
        let target = Point::new(1.0, 1.0, std::f64::consts::PI);

        assert!(traj.generate_point_to_point(initial, target, false));

        let end = traj.lookup(1_000.0);
        assert!(approx_eq!(f64, end.position.x, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, end.position.y, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, end.position.a, std::f64::consts::PI, epsilon = 1e-6));
    }

    #[test]
    fn negative_direction_move() {
        let mut traj = trajectory();
        let initial = Point::new(0.0, 0.0, 0.0);
        let target = Point::new(-0.5, 0.0, 0.0);

        assert!(traj.generate_point_to_point(initial, target, false));

        let end = traj.lookup(1_000.0);
        assert!(approx_eq!(f64, end.position.x, -0.5, epsilon = 1e-6));
    }

    #[test]
    fn zero_move_is_a_no_op_trajectory() {
        let mut traj = trajectory();
        let initial = Point::new(2.0, 3.0, 0.5);

        assert!(traj.generate_point_to_point(initial, initial, false));

        let start = traj.lookup(0.0);
        let later = traj.lookup(5.0);
        assert_eq!(start.position, initial);
        assert_eq!(later.position, initial);
        assert!(start.velocity.near_zero(1e-9));
        assert!(later.velocity.near_zero(1e-9));
    }

    #[test]
    fn lookup_before_generation_is_zero_and_does_not_panic() {
        let traj = trajectory();
        let point = traj.lookup(1.0);
        assert_eq!(point.position, Point::default());
        assert!(!traj.is_ready());
    }

    #[test]
    fn lookup_checked_reports_uninitialized_until_generated() {
        let mut traj = trajectory();
        assert_eq!(traj.lookup_checked(0.0), Err(MotionError::Uninitialized));

        let initial = Point::new(0.0, 0.0, 0.0);
        let target = Point::new(1.0, 0.0, 0.0);
        assert!(traj.generate_point_to_point(initial, target, false));

        assert!(traj.lookup_checked(0.0).is_ok());
    }

    #[test]
    fn repeated_empty_lookups_log_only_once() {
        let traj = trajectory();
        assert!(!traj.logged_empty_lookup.get());
        traj.lookup(0.0);
        assert!(traj.logged_empty_lookup.get());
        traj.lookup(1.0);
        assert!(traj.logged_empty_lookup.get());
    }

    #[test]
    fn const_vel_never_fails_and_respects_move_time() {
        let mut traj = trajectory();
        let initial = Point::new(0.0, 0.0, 0.0);
        let velocity = Velocity::new(0.5, 0.0, 0.0);

        assert!(traj.generate_const_vel(initial, velocity, 4.0, false));

        let end = traj.lookup(4.0);
        assert!(approx_eq!(f64, end.velocity.vx, 0.0, epsilon = 1e-6));
    }
}
