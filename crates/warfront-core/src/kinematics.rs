//! Hull and turret movement.
//!
//! All rates are per unit of simulation time and scale linearly with `dt`.
//! There is no sub-stepping: a very large `dt` can overshoot a destination,
//! so callers are expected to clamp it upstream. A non-positive `dt` leaves
//! every piece of state untouched.
//!
//! Angles are degrees, counter-clockwise from +X, normalized to `(-180, 180]`.
//!
//! # Example
//!
//! ```
//! use warfront_core::kinematics::{heading_to, rotate_towards};
//! use glam::Vec2;
//!
//! let desired = heading_to(Vec2::ZERO, Vec2::new(0.0, 10.0)).unwrap();
//! assert!((desired - 90.0).abs() < 1e-4);
//!
//! // A 2.8 deg/tick hull needs many ticks to come about.
//! assert_eq!(rotate_towards(0.0, desired, 2.8), 2.8);
//! ```

use glam::Vec2;

use crate::descriptor::{MovementParams, TurretParams};
use crate::unit::components::{MotionState, TransformState, TurretState};

// =============================================================================
// Angle Helpers
// =============================================================================

/// Wraps an angle in degrees into `(-180, 180]`.
#[must_use]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Rotates `current` toward `target` by at most `max_step` degrees, along the
/// shorter arc.
#[must_use]
pub fn rotate_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = normalize_degrees(target - current);
    if delta.abs() <= max_step {
        normalize_degrees(target)
    } else {
        normalize_degrees(current + max_step.copysign(delta))
    }
}

/// Returns the heading from `from` to `to`, or `None` if the points coincide.
#[must_use]
pub fn heading_to(from: Vec2, to: Vec2) -> Option<f32> {
    let offset = to - from;
    if offset.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(offset.y.atan2(offset.x).to_degrees())
}

/// Unit vector pointing along `degrees`.
#[must_use]
pub fn direction(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Distance needed to come to a halt from `speed` at `deceleration`.
#[must_use]
pub fn stopping_distance(speed: f32, deceleration: f32) -> f32 {
    if deceleration > 0.0 {
        speed * speed / (2.0 * deceleration)
    } else {
        0.0
    }
}

// =============================================================================
// Hull
// =============================================================================

/// Advances the hull by `dt`: turns toward the destination, adjusts speed,
/// then moves along the new heading.
///
/// The target speed tapers with the remaining heading error and is zero
/// past 90 degrees, so a destination inside the turning circle is reached
/// by turning first. A destination inside `arrival_radius` completes the
/// move order.
pub fn advance_hull(
    transform: &mut TransformState,
    motion: &mut MotionState,
    params: &MovementParams,
    dt: f32,
) {
    if dt <= 0.0 {
        return;
    }

    let target_speed = match motion.destination {
        Some(destination) => {
            let distance = transform.position.distance(destination);
            if distance <= params.arrival_radius {
                motion.destination = None;
                0.0
            } else {
                let mut error = 0.0;
                if let Some(desired) = heading_to(transform.position, destination) {
                    transform.heading =
                        rotate_towards(transform.heading, desired, params.turn_speed * dt);
                    error = normalize_degrees(desired - transform.heading);
                }
                if distance <= stopping_distance(motion.speed, params.move_deceleration) {
                    0.0
                } else {
                    params.max_move_speed * alignment_factor(error)
                }
            }
        }
        None => 0.0,
    };

    motion.speed = approach_speed(motion.speed, target_speed, params, dt);
    transform.position += direction(transform.heading) * (motion.speed * dt);
}

/// Share of full speed allowed at `error` degrees off the desired heading.
fn alignment_factor(error: f32) -> f32 {
    error.to_radians().cos().max(0.0)
}

fn approach_speed(speed: f32, target: f32, params: &MovementParams, dt: f32) -> f32 {
    let next = if speed < target {
        (speed + params.move_acceleration * dt).min(target)
    } else {
        (speed - params.move_deceleration * dt).max(target)
    };
    next.clamp(0.0, params.max_move_speed)
}

// =============================================================================
// Turret
// =============================================================================

/// World position of the turret pivot.
#[must_use]
pub fn turret_pivot(transform: &TransformState, params: &TurretParams) -> Vec2 {
    transform.position + direction(transform.heading) * params.mount_offset
}

/// Rotates the turret toward its aim point, or back to the hull heading when
/// it has none. Independent of the hull's own turn rate.
pub fn track_turret(
    turret: &mut TurretState,
    transform: &TransformState,
    params: &TurretParams,
    dt: f32,
) {
    if dt <= 0.0 {
        return;
    }

    let pivot = turret_pivot(transform, params);
    let desired = turret
        .aim
        .and_then(|aim| heading_to(pivot, aim))
        .unwrap_or(transform.heading);
    turret.direction = rotate_towards(turret.direction, desired, params.turn_speed * dt);
}
