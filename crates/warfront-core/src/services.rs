//! Interfaces of the external services the unit core talks to.
//!
//! The core owns none of these. Asset loading happens once at
//! initialization through [`AssetService`]; audio, effects and projectiles
//! are fed per tick through the resolvers via a [`Services`] bundle; the draw
//! pass hands a [`RenderFrame`] to a [`Renderer`].
//!
//! Every per-tick call is fire-and-forget: no return value, no error.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::attack::ProjectileSpawnRequest;
use crate::descriptor::{Argb, ExplosionSize, SoundId};
use crate::error::ConfigError;
use crate::lifecycle::DrawLayer;
use crate::unit::{UnitId, UnitKind};
use crate::visual::{TeamId, VisualHandle};

/// Image loading and team recoloring. Used at load time only.
pub trait AssetService {
    /// Loads an image by reference.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Asset`] if the image cannot be provided.
    fn load_image(&mut self, image: &str) -> Result<VisualHandle, ConfigError>;

    /// Produces a copy of `base` in the colors of `team`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Asset`] if the recolor fails.
    fn recolor_for_team(
        &mut self,
        base: VisualHandle,
        team: TeamId,
    ) -> Result<VisualHandle, ConfigError>;
}

/// Positional sound playback.
pub trait AudioService {
    /// Plays `sound` at `volume` from `position`.
    fn play_sound(&mut self, sound: &SoundId, volume: f32, position: Vec2);
}

/// Visual effects.
pub trait EffectsService {
    /// Emits an explosion.
    fn emit_explosion(&mut self, position: Vec2, height: f32, size: ExplosionSize);

    /// Emits a muzzle flash pointing along `direction` (degrees).
    fn emit_muzzle_flash(&mut self, position: Vec2, height: f32, direction: f32);

    /// Emits a short-lived light.
    fn emit_light(&mut self, position: Vec2, height: f32, color: Argb);
}

/// The projectile subsystem. Takes ownership of every request.
pub trait ProjectileSink {
    /// Spawns the projectile described by `request`.
    fn spawn_projectile(&mut self, request: ProjectileSpawnRequest);
}

/// Receives one frame of render requests per draw pass.
pub trait Renderer {
    /// Draws `frame`.
    fn submit(&mut self, frame: &RenderFrame);
}

/// The per-tick sinks, borrowed for the length of one dispatch.
pub struct Services<'a> {
    /// Audio sink
    pub audio: &'a mut dyn AudioService,
    /// Effects sink
    pub effects: &'a mut dyn EffectsService,
    /// Projectile sink
    pub projectiles: &'a mut dyn ProjectileSink,
}

impl<'a> Services<'a> {
    /// Bundles the three sinks.
    pub fn new(
        audio: &'a mut dyn AudioService,
        effects: &'a mut dyn EffectsService,
        projectiles: &'a mut dyn ProjectileSink,
    ) -> Self {
        Self {
            audio,
            effects,
            projectiles,
        }
    }
}

// =============================================================================
// Render Requests
// =============================================================================

/// What the renderer needs to draw one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Unit being drawn
    pub unit: UnitId,
    /// Kind of the unit
    pub kind: UnitKind,
    /// Team of the unit
    pub team: TeamId,
    /// Image to draw (team recolor, or the wreck image)
    pub visual: VisualHandle,
    /// Hull center
    pub position: Vec2,
    /// Height above the surface
    pub height: f32,
    /// Hull heading in degrees
    pub heading: f32,
    /// Turret direction in degrees; `None` for wrecks
    pub turret_direction: Option<f32>,
    /// Ordering bucket
    pub layer: DrawLayer,
}

/// All render requests of one draw pass, ordered by `(layer, unit)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Ticks completed when the frame was built
    pub tick: u64,
    /// Time delta passed to the draw pass
    pub delta: f32,
    /// Requests, lowest layer first
    pub requests: Vec<RenderRequest>,
}

impl RenderFrame {
    /// Returns the request for `unit`, if it was drawn.
    #[must_use]
    pub fn request_for(&self, unit: UnitId) -> Option<&RenderRequest> {
        self.requests.iter().find(|r| r.unit == unit)
    }

    /// Returns the number of requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_traits_are_object_safe() {
        fn _assets(_: &mut dyn AssetService) {}
        fn _audio(_: &mut dyn AudioService) {}
        fn _effects(_: &mut dyn EffectsService) {}
        fn _projectiles(_: &mut dyn ProjectileSink) {}
        fn _renderer(_: &mut dyn Renderer) {}
    }

    #[test]
    fn empty_frame() {
        let frame = RenderFrame::default();
        assert!(frame.is_empty());
        assert!(frame.request_for(UnitId::new(0)).is_none());
    }
}
