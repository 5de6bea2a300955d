//! Audio resolver.

use crate::output::{OutputEnvelope, OutputKind};
use crate::services::Services;

use super::Resolver;

/// Plays every queued sound through the audio service.
///
/// # Example
///
/// ```
/// use warfront_core::resolver::{AudioResolver, Resolver};
/// use warfront_core::output::OutputKind;
///
/// let resolver = AudioResolver::new();
/// assert!(resolver.handles().contains(&OutputKind::Sound));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AudioResolver;

impl AudioResolver {
    /// Creates a new audio resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for AudioResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Sound]
    }

    fn resolve(&self, outputs: &[&OutputEnvelope], services: &mut Services<'_>) {
        for request in outputs.iter().filter_map(|e| e.output().as_sound()) {
            services
                .audio
                .play_sound(&request.sound, request.volume, request.position);
        }
    }
}
