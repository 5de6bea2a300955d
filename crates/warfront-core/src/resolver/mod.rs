//! Routing of queued outputs to the external services.
//!
//! Resolvers are the last phase of an update: the simulation sorts the
//! queued [`OutputEnvelope`]s by `(source, sequence)`, filters them by each
//! resolver's [`Resolver::handles()`], and lets the resolver forward them to
//! its service.
//!
//! # Invariants
//!
//! - Resolvers never touch unit state; they only call services.
//! - Outputs are forwarded in the order they are given.
//!
//! # Available Resolvers
//!
//! - [`ProjectileResolver`]: projectile requests to the [`ProjectileSink`](crate::services::ProjectileSink)
//! - [`AudioResolver`]: sounds to the [`AudioService`](crate::services::AudioService)
//! - [`EffectsResolver`]: explosions, flashes and lights to the [`EffectsService`](crate::services::EffectsService)

mod audio;
mod effects;
mod projectile;

pub use audio::AudioResolver;
pub use effects::EffectsResolver;
pub use projectile::ProjectileResolver;

use crate::output::{OutputEnvelope, OutputKind};
use crate::services::Services;

/// Forwards one category of outputs to a service.
///
/// # Example
///
/// ```
/// use warfront_core::resolver::Resolver;
/// use warfront_core::output::{OutputEnvelope, OutputKind};
/// use warfront_core::services::Services;
///
/// struct CountingResolver;
///
/// impl Resolver for CountingResolver {
///     fn handles(&self) -> &[OutputKind] {
///         &[OutputKind::Sound]
///     }
///
///     fn resolve(&self, outputs: &[&OutputEnvelope], _services: &mut Services<'_>) {
///         println!("{} sounds", outputs.len());
///     }
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// Output kinds this resolver accepts.
    fn handles(&self) -> &[OutputKind];

    /// Forwards `outputs` (already filtered by [`handles`](Self::handles)
    /// and sorted) to the matching service in `services`.
    fn resolve(&self, outputs: &[&OutputEnvelope], services: &mut Services<'_>);
}

/// The resolvers a simulation starts with, one per service.
#[must_use]
pub fn default_resolvers() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(ProjectileResolver::new()),
        Box::new(AudioResolver::new()),
        Box::new(EffectsResolver::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_is_object_safe() {
        fn _accepts_boxed(_resolver: Box<dyn Resolver>) {}
        fn _accepts_slice(_resolvers: &[Box<dyn Resolver>]) {}
    }

    #[test]
    fn default_resolvers_cover_every_kind_once() {
        let resolvers = default_resolvers();
        for kind in [OutputKind::Projectile, OutputKind::Sound, OutputKind::Effect] {
            let count = resolvers
                .iter()
                .filter(|r| r.handles().contains(&kind))
                .count();
            assert_eq!(count, 1, "{kind} handled {count} times");
        }
    }
}
