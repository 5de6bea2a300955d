//! Per-instance state components.
//!
//! These hold the mutable state of a live unit. Each is updated by one
//! subsystem: [`TransformState`] and [`MotionState`] by the hull kinematics,
//! [`TurretState`] by turret tracking, [`HealthState`] by damage. Attack and
//! lifecycle state live next to their state machines in [`crate::attack`] and
//! [`crate::lifecycle`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, height and hull heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// World position of the hull center
    pub position: Vec2,
    /// Height above the surface (non-zero for aircraft)
    pub height: f32,
    /// Hull heading in degrees
    pub heading: f32,
}

impl TransformState {
    /// Creates a transform at `position`.
    #[must_use]
    pub fn new(position: Vec2, height: f32, heading: f32) -> Self {
        Self {
            position,
            height,
            heading,
        }
    }
}

/// Current speed and standing move order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Current speed along the heading, never negative
    pub speed: f32,
    /// Point the unit is moving to, if any
    pub destination: Option<Vec2>,
}

/// Turret orientation and aim point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TurretState {
    /// World direction of the barrel in degrees
    pub direction: f32,
    /// Point the turret is turning toward
    pub aim: Option<Vec2>,
}

/// Hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthState {
    /// Remaining hit points in `[0, max_hp]`
    pub hp: f32,
    /// Hit points at spawn
    pub max_hp: f32,
}

impl HealthState {
    /// Full health.
    #[must_use]
    pub fn full(max_hp: f32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    /// Subtracts `amount`, clamping at zero. Returns `true` if this brought
    /// hit points to zero. A NaN amount is ignored.
    pub fn take(&mut self, amount: f32) -> bool {
        if amount.is_nan() {
            return false;
        }
        let was_alive = self.hp > 0.0;
        self.hp = (self.hp - amount).max(0.0);
        was_alive && self.hp <= 0.0
    }

    /// Remaining fraction of maximum health.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.hp / self.max_hp
    }
}
