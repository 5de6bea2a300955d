//! Outputs emitted by units for the external services.
//!
//! Units never call the audio, effects or projectile services directly.
//! Firing and destruction produce [`Output`] values that the simulation
//! queues in [`OutputEnvelope`]s and later routes through the resolvers.
//!
//! # Ordering
//!
//! Each envelope carries its source unit and a sequence number that is
//! monotonic within a dispatch window. Sorting by `(source, sequence)` gives
//! the same service call order on every run, no matter in which order the
//! outputs were queued.
//!
//! # Example
//!
//! ```
//! use warfront_core::output::{EffectRequest, Output, OutputEnvelope, OutputKind};
//! use warfront_core::descriptor::ExplosionSize;
//! use warfront_core::unit::UnitId;
//! use glam::Vec2;
//!
//! let envelope = OutputEnvelope::new(
//!     Output::Effect(EffectRequest::Explosion {
//!         position: Vec2::new(10.0, 20.0),
//!         height: 0.0,
//!         size: ExplosionSize::Small,
//!     }),
//!     UnitId::new(4),
//!     12, // tick
//!     0,  // sequence
//! );
//!
//! assert_eq!(envelope.output().kind(), OutputKind::Effect);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attack::ProjectileSpawnRequest;
use crate::descriptor::{Argb, AttackParams, ExplosionSize, SoundId};
use crate::lifecycle::DestructionEffect;
use crate::unit::UnitId;

// =============================================================================
// Requests
// =============================================================================

/// A fire-and-forget sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundRequest {
    /// Sound to play
    pub sound: SoundId,
    /// Volume in `[0, 1]`
    pub volume: f32,
    /// World position of the emitter
    pub position: Vec2,
}

/// A fire-and-forget visual effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectRequest {
    /// Explosion at a wreck
    Explosion {
        /// World position
        position: Vec2,
        /// Height of the destroyed unit
        height: f32,
        /// Explosion size
        size: ExplosionSize,
    },
    /// Flame at the muzzle, pointing along the barrel
    MuzzleFlash {
        /// World position of the turret end
        position: Vec2,
        /// Height of the firing unit
        height: f32,
        /// Barrel direction in degrees
        direction: f32,
    },
    /// Short-lived light at the muzzle
    Light {
        /// World position of the turret end
        position: Vec2,
        /// Height of the firing unit
        height: f32,
        /// Light color
        color: Argb,
    },
}

// =============================================================================
// Output
// =============================================================================

/// Routing category of an [`Output`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// Routed to the projectile subsystem
    Projectile,
    /// Routed to the audio service
    Sound,
    /// Routed to the effects service
    Effect,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Projectile => write!(f, "Projectile"),
            Self::Sound => write!(f, "Sound"),
            Self::Effect => write!(f, "Effect"),
        }
    }
}

/// Something a unit asks an external service to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Spawn a projectile
    Projectile(ProjectileSpawnRequest),
    /// Play a sound
    Sound(SoundRequest),
    /// Emit a visual effect
    Effect(EffectRequest),
}

impl Output {
    /// Returns the routing category.
    #[must_use]
    pub const fn kind(&self) -> OutputKind {
        match self {
            Self::Projectile(_) => OutputKind::Projectile,
            Self::Sound(_) => OutputKind::Sound,
            Self::Effect(_) => OutputKind::Effect,
        }
    }

    /// Returns the projectile request, if this is one.
    #[must_use]
    pub const fn as_projectile(&self) -> Option<&ProjectileSpawnRequest> {
        match self {
            Self::Projectile(request) => Some(request),
            _ => None,
        }
    }

    /// Returns the sound request, if this is one.
    #[must_use]
    pub const fn as_sound(&self) -> Option<&SoundRequest> {
        match self {
            Self::Sound(request) => Some(request),
            _ => None,
        }
    }

    /// Returns the effect request, if this is one.
    #[must_use]
    pub const fn as_effect(&self) -> Option<&EffectRequest> {
        match self {
            Self::Effect(request) => Some(request),
            _ => None,
        }
    }
}

impl From<ProjectileSpawnRequest> for Output {
    fn from(request: ProjectileSpawnRequest) -> Self {
        Self::Projectile(request)
    }
}

impl From<SoundRequest> for Output {
    fn from(request: SoundRequest) -> Self {
        Self::Sound(request)
    }
}

impl From<EffectRequest> for Output {
    fn from(request: EffectRequest) -> Self {
        Self::Effect(request)
    }
}

/// Outputs produced by one successful shot: the projectile, then the fire
/// sound, muzzle flash and muzzle light the weapon declares.
#[must_use]
pub fn fire_outputs(shot: &ProjectileSpawnRequest, params: &AttackParams) -> Vec<Output> {
    let mut outputs = vec![Output::Projectile(shot.clone())];

    if let Some(cue) = &params.fire_sound {
        outputs.push(Output::Sound(SoundRequest {
            sound: cue.sound.clone(),
            volume: cue.volume,
            position: shot.origin,
        }));
    }
    if params.muzzle_flash {
        outputs.push(Output::Effect(EffectRequest::MuzzleFlash {
            position: shot.origin,
            height: shot.height,
            direction: shot.direction,
        }));
    }
    if let Some(color) = params.muzzle_light {
        outputs.push(Output::Effect(EffectRequest::Light {
            position: shot.origin,
            height: shot.height,
            color,
        }));
    }

    outputs
}

/// Outputs produced by the wreck transition.
#[must_use]
pub fn destruction_outputs(effect: &DestructionEffect) -> Vec<Output> {
    let mut outputs = vec![Output::Effect(EffectRequest::Explosion {
        position: effect.position,
        height: effect.height,
        size: effect.explosion,
    })];

    if let Some(cue) = &effect.sound {
        outputs.push(Output::Sound(SoundRequest {
            sound: cue.sound.clone(),
            volume: cue.volume,
            position: effect.position,
        }));
    }

    outputs
}

// =============================================================================
// Output Envelope
// =============================================================================

/// An output with its origin and ordering metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEnvelope {
    output: Output,
    source: UnitId,
    tick: u64,
    sequence: u32,
}

impl OutputEnvelope {
    /// Wraps an output.
    ///
    /// # Arguments
    ///
    /// * `output` - The request itself
    /// * `source` - The unit that produced it
    /// * `tick` - Tick during which it was produced
    /// * `sequence` - Position within the current dispatch window
    #[must_use]
    pub fn new(output: Output, source: UnitId, tick: u64, sequence: u32) -> Self {
        Self {
            output,
            source,
            tick,
            sequence,
        }
    }

    /// Returns the wrapped output.
    #[must_use]
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Returns the unit that produced this output.
    #[must_use]
    pub fn source(&self) -> UnitId {
        self.source
    }

    /// Returns the tick the output was produced in.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns the sequence number.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Deterministic dispatch key.
    #[must_use]
    pub fn sort_key(&self) -> (UnitId, u32) {
        (self.source(), self.sequence())
    }
}
