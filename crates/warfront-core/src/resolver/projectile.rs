//! Projectile resolver.

use crate::output::{OutputEnvelope, OutputKind};
use crate::services::Services;

use super::Resolver;

/// Hands every queued shot to the projectile subsystem, which owns the
/// projectile from then on.
#[derive(Debug, Clone, Default)]
pub struct ProjectileResolver;

impl ProjectileResolver {
    /// Creates a new projectile resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for ProjectileResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Projectile]
    }

    fn resolve(&self, outputs: &[&OutputEnvelope], services: &mut Services<'_>) {
        for request in outputs.iter().filter_map(|e| e.output().as_projectile()) {
            services.projectiles.spawn_projectile(request.clone());
        }
    }
}
