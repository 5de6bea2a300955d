//! Active/wreck lifecycle.
//!
//! A unit is `Active` until it is destroyed, then a `Wreck` for the rest of
//! the session. The transition happens once: it disables collision, moves
//! the unit to the [`DrawLayer::Wreck`] layer, and yields a
//! [`DestructionEffect`] for the effects and audio services. Every later
//! call is a no-op.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::descriptor::{ExplosionSize, SoundCue, TargetCategories};
use crate::unit::UnitId;

/// Lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Moving, shooting, colliding
    Active,
    /// Destroyed; drawn until the cleanup pass removes it
    Wreck,
}

/// Render ordering bucket. Lower layers draw first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DrawLayer {
    /// Wrecks, beneath every live unit
    Wreck,
    /// Live land and naval units
    Surface,
    /// Live aircraft
    Air,
}

impl DrawLayer {
    /// Layer a live unit of `category` draws on.
    #[must_use]
    pub fn for_category(category: TargetCategories) -> Self {
        if category.contains(TargetCategories::AIR) {
            Self::Air
        } else {
            Self::Surface
        }
    }
}

/// Lifecycle stage together with its collision and layering consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleState {
    stage: Lifecycle,
    collidable: bool,
    draw_layer: DrawLayer,
}

impl LifecycleState {
    /// State of a freshly spawned unit of `category`.
    #[must_use]
    pub fn active(category: TargetCategories) -> Self {
        Self {
            stage: Lifecycle::Active,
            collidable: true,
            draw_layer: DrawLayer::for_category(category),
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Lifecycle {
        self.stage
    }

    /// Returns `true` once wrecked.
    #[must_use]
    pub fn is_wreck(&self) -> bool {
        self.stage == Lifecycle::Wreck
    }

    /// Whether the unit takes part in collision.
    #[must_use]
    pub fn is_collidable(&self) -> bool {
        self.collidable
    }

    /// Layer the unit draws on.
    #[must_use]
    pub fn draw_layer(&self) -> DrawLayer {
        self.draw_layer
    }

    /// Transitions to `Wreck`. Returns `false` if already wrecked.
    pub fn wreck(&mut self) -> bool {
        if self.is_wreck() {
            return false;
        }
        self.stage = Lifecycle::Wreck;
        self.collidable = false;
        self.draw_layer = DrawLayer::Wreck;
        true
    }
}

/// Request produced by the wreck transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestructionEffect {
    /// Destroyed unit
    pub unit: UnitId,
    /// Where the explosion goes
    pub position: Vec2,
    /// Height of the unit when destroyed
    pub height: f32,
    /// Explosion size
    pub explosion: ExplosionSize,
    /// Optional destruction sound
    pub sound: Option<SoundCue>,
}
