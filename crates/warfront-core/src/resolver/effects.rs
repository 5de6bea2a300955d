//! Effects resolver.
//!
//! Turns explosion, muzzle-flash and light requests into calls on the
//! effects service. Muzzle effects are emitted at the turret end, explosions
//! at the wreck position.

use crate::output::{EffectRequest, OutputEnvelope, OutputKind};
use crate::services::Services;

use super::Resolver;

/// Emits every queued visual effect.
#[derive(Debug, Clone, Default)]
pub struct EffectsResolver;

impl EffectsResolver {
    /// Creates a new effects resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for EffectsResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Effect]
    }

    fn resolve(&self, outputs: &[&OutputEnvelope], services: &mut Services<'_>) {
        for request in outputs.iter().filter_map(|e| e.output().as_effect()) {
            match *request {
                EffectRequest::Explosion {
                    position,
                    height,
                    size,
                } => services.effects.emit_explosion(position, height, size),
                EffectRequest::MuzzleFlash {
                    position,
                    height,
                    direction,
                } => services.effects.emit_muzzle_flash(position, height, direction),
                EffectRequest::Light {
                    position,
                    height,
                    color,
                } => services.effects.emit_light(position, height, color),
            }
        }
    }
}
