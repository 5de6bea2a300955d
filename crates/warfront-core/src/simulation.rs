//! Per-frame orchestration of every unit.
//!
//! The `Simulation` owns the [`Arena`] and sequences each tick:
//!
//! 1. **SNAPSHOT**: record a [`TargetInfo`] for every active unit
//! 2. **UPDATE**: for each active unit in id order, resolve its target order
//!    against the snapshot, aim the turret, advance the hull, tick the
//!    cooldown, and fire if the target is eligible and in range
//! 3. **DISPATCH**: route queued outputs through the resolvers to the services
//! 4. **DRAW**: a separate, read-only pass that builds one render request per
//!    unit (wrecks included) and submits the frame
//!
//! All updates complete before any draw. External events (damage, manual
//! fire, destruction) may arrive between ticks; their outputs are queued and
//! dispatched with the next update.
//!
//! # Determinism
//!
//! - Units are iterated in id order (`BTreeMap`)
//! - Outputs are sorted by `(source, sequence)` before dispatch
//! - The draw pass runs in parallel but sorts its requests by `(layer, id)`
//!
//! # Example
//!
//! ```
//! use warfront_core::catalog::UnitTypeRegistry;
//! use warfront_core::simulation::Simulation;
//! use warfront_core::unit::UnitKind;
//! use warfront_core::visual::{TeamId, VisualHandle};
//! use warfront_core::services::AssetService;
//! use warfront_core::error::ConfigError;
//! use glam::Vec2;
//!
//! struct Assets(u32);
//!
//! impl AssetService for Assets {
//!     fn load_image(&mut self, _image: &str) -> Result<VisualHandle, ConfigError> {
//!         self.0 += 1;
//!         Ok(VisualHandle::new(self.0))
//!     }
//!     fn recolor_for_team(&mut self, _base: VisualHandle, _team: TeamId) -> Result<VisualHandle, ConfigError> {
//!         self.0 += 1;
//!         Ok(VisualHandle::new(self.0))
//!     }
//! }
//!
//! let mut sim = Simulation::load(UnitTypeRegistry::builtin(), &mut Assets(0)).unwrap();
//! let boat = sim.spawn(UnitKind::GunBoat, TeamId::new(0).unwrap(), Vec2::ZERO, 0.0).unwrap();
//! sim.order_move(boat, Vec2::new(200.0, 0.0)).unwrap();
//!
//! let frame = sim.render_frame(1.0);
//! assert_eq!(frame.requests.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use rayon::prelude::*;
use tracing::debug;

use crate::arena::Arena;
use crate::attack::{ProjectileSpawnRequest, Target, TargetInfo, TargetOrder};
use crate::catalog::UnitTypeRegistry;
use crate::error::{ConfigError, SimError};
use crate::lifecycle::DestructionEffect;
use crate::output::{destruction_outputs, fire_outputs, Output, OutputEnvelope};
use crate::resolver::{default_resolvers, Resolver};
use crate::services::{AssetService, RenderFrame, RenderRequest, Renderer, Services};
use crate::unit::{UnitId, UnitInstance, UnitKind};
use crate::visual::{TeamId, VisualRegistry};

// =============================================================================
// Simulation
// =============================================================================

/// Owner of the active-unit collection and the per-tick loop.
pub struct Simulation {
    /// Every unit and wreck.
    arena: Arena,
    /// Shared descriptors, one per kind.
    units: Arc<UnitTypeRegistry>,
    /// Shared visuals, one bundle per kind.
    visuals: Arc<VisualRegistry>,
    /// Routes outputs to services.
    resolvers: Vec<Box<dyn Resolver>>,
    /// Outputs waiting for the next dispatch.
    outbox: Vec<OutputEnvelope>,
    /// Next sequence number within the current dispatch window.
    next_sequence: u32,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("arena", &self.arena)
            .field("unit_types", &self.units.len())
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("pending_outputs", &self.outbox.len())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates an empty simulation over already-loaded registries, with the
    /// default resolvers.
    #[must_use]
    pub fn new(units: Arc<UnitTypeRegistry>, visuals: Arc<VisualRegistry>) -> Self {
        Self {
            arena: Arena::new(),
            units,
            visuals,
            resolvers: default_resolvers(),
            outbox: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Loads visuals for `units` through `assets` and creates a simulation.
    ///
    /// # Errors
    ///
    /// Returns the first asset failure.
    pub fn load(units: UnitTypeRegistry, assets: &mut dyn AssetService) -> Result<Self, ConfigError> {
        let visuals = VisualRegistry::load(&units, assets)?;
        Ok(Self::new(Arc::new(units), Arc::new(visuals)))
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Runs the update pass, dispatches outputs, and advances the tick.
    ///
    /// Wrecks are skipped. A unit whose target order names a unit that is
    /// gone or wrecked has the order cleared.
    pub fn update(&mut self, dt: f32, services: &mut Services<'_>) {
        let tick = self.arena.current_tick();

        // PHASE 1: SNAPSHOT
        let snapshot: BTreeMap<UnitId, TargetInfo> = self
            .arena
            .units_sorted()
            .filter(|u| !u.is_wreck())
            .map(|u| (u.id(), u.as_target()))
            .collect();

        // PHASE 2: UPDATE
        for unit in self.arena.units_sorted_mut() {
            if unit.is_wreck() {
                continue;
            }

            let target = resolve_order(unit, &snapshot);
            unit.aim_turret(target.as_ref().map(Target::position));
            unit.advance(dt);
            unit.tick(dt);

            let Some(target) = target else { continue };
            let Some(shot) = unit.fire(&target) else { continue };
            debug!(
                unit = %unit.id(),
                target = ?shot.target,
                tick,
                "unit fired"
            );
            if let Some(params) = unit.descriptor().attack.as_ref() {
                enqueue(
                    &mut self.outbox,
                    &mut self.next_sequence,
                    tick,
                    unit.id(),
                    fire_outputs(&shot, params),
                );
            }
        }
        self.arena.sync_spatial();

        // PHASE 3: DISPATCH
        self.flush_outputs(services);

        self.arena.advance_tick();
    }

    /// Routes every queued output through the resolvers, in
    /// `(source, sequence)` order, and empties the queue.
    pub fn flush_outputs(&mut self, services: &mut Services<'_>) {
        let mut outbox = std::mem::take(&mut self.outbox);
        self.next_sequence = 0;
        if outbox.is_empty() {
            return;
        }

        outbox.sort_by_key(OutputEnvelope::sort_key);
        for resolver in &self.resolvers {
            let relevant: Vec<_> = outbox
                .iter()
                .filter(|e| resolver.handles().contains(&e.output().kind()))
                .collect();
            if !relevant.is_empty() {
                resolver.resolve(&relevant, services);
            }
        }
    }

    /// Builds the render frame for the current state. Reads only.
    #[must_use]
    pub fn render_frame(&self, dt: f32) -> RenderFrame {
        let units: Vec<&UnitInstance> = self.arena.units_sorted().collect();
        let mut requests: Vec<RenderRequest> = units.par_iter().map(|u| u.draw()).collect();
        requests.sort_by_key(|r| (r.layer, r.unit));

        RenderFrame {
            tick: self.arena.current_tick(),
            delta: dt,
            requests,
        }
    }

    /// Submits the render frame to `renderer`.
    pub fn draw(&self, dt: f32, renderer: &mut dyn Renderer) {
        renderer.submit(&self.render_frame(dt));
    }

    /// One full frame: update, then draw.
    pub fn step(&mut self, dt: f32, services: &mut Services<'_>, renderer: &mut dyn Renderer) {
        self.update(dt, services);
        self.draw(dt, renderer);
    }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Spawns a unit of `kind` for `team`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MissingDescriptor`] or [`SimError::MissingVisuals`]
    /// if `kind` was not loaded.
    pub fn spawn(
        &mut self,
        kind: UnitKind,
        team: TeamId,
        position: Vec2,
        heading: f32,
    ) -> Result<UnitId, SimError> {
        let descriptor = Arc::clone(self.units.get(kind).ok_or(SimError::MissingDescriptor(kind))?);
        let visuals = Arc::clone(self.visuals.get(kind).ok_or(SimError::MissingVisuals(kind))?);

        let id = self.arena.spawn_with(|id| {
            UnitInstance::new(id, descriptor, visuals, team, position, heading)
        });
        debug!(unit = %id, %kind, %team, "unit spawned");
        Ok(id)
    }

    /// Removes a unit outright, wreck or not.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownUnit`] if `id` is not in the arena.
    pub fn despawn(&mut self, id: UnitId) -> Result<UnitInstance, SimError> {
        self.arena.despawn(id).ok_or(SimError::UnknownUnit(id))
    }

    /// Orders a unit to move.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownUnit`] if `id` is not in the arena.
    pub fn order_move(&mut self, id: UnitId, destination: Vec2) -> Result<(), SimError> {
        self.unit_mut(id)?.order_move(destination);
        Ok(())
    }

    /// Cancels a unit's move order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownUnit`] if `id` is not in the arena.
    pub fn stop(&mut self, id: UnitId) -> Result<(), SimError> {
        self.unit_mut(id)?.stop();
        Ok(())
    }

    /// Gives a unit a standing target order.
    ///
    /// # Errors
    ///
    /// - [`SimError::UnknownUnit`] if the unit or a target unit does not exist
    /// - [`SimError::TargetWrecked`] if the target unit is a wreck
    pub fn assign_target(&mut self, id: UnitId, order: TargetOrder) -> Result<(), SimError> {
        self.require(id)?;
        self.resolve_target(order)?;
        self.unit_mut(id)?.assign_target(order);
        Ok(())
    }

    /// Clears a unit's standing target order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownUnit`] if `id` is not in the arena.
    pub fn clear_target(&mut self, id: UnitId) -> Result<(), SimError> {
        self.unit_mut(id)?.clear_target();
        Ok(())
    }

    /// Fires immediately at `order`'s target, outside the update pass.
    ///
    /// `Ok(None)` is the benign no-op: not ready, not eligible, or out of
    /// range. The shot's outputs go out with the next dispatch.
    ///
    /// # Errors
    ///
    /// - [`SimError::UnknownUnit`] if the unit or a target unit does not exist
    /// - [`SimError::TargetWrecked`] if the target unit is a wreck
    pub fn fire_at(
        &mut self,
        id: UnitId,
        order: TargetOrder,
    ) -> Result<Option<ProjectileSpawnRequest>, SimError> {
        self.require(id)?;
        let target = self.resolve_target(order)?;
        let tick = self.arena.current_tick();

        let unit = self.unit_mut(id)?;
        let Some(shot) = unit.fire(&target) else {
            return Ok(None);
        };
        let outputs = unit
            .descriptor()
            .attack
            .as_ref()
            .map(|params| fire_outputs(&shot, params))
            .unwrap_or_default();

        debug!(unit = %id, target = ?shot.target, tick, "unit fired on command");
        self.queue(id, outputs);
        Ok(Some(shot))
    }

    /// Reassigns a unit to another team.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownUnit`] if `id` is not in the arena.
    pub fn set_team(&mut self, id: UnitId, team: TeamId) -> Result<(), SimError> {
        self.unit_mut(id)?.set_team(team);
        Ok(())
    }

    /// Wrecks a unit. `Ok(None)` if it already was one.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownUnit`] if `id` is not in the arena.
    pub fn destroy(&mut self, id: UnitId) -> Result<Option<DestructionEffect>, SimError> {
        let effect = self.unit_mut(id)?.destroy();
        if let Some(effect) = &effect {
            self.record_destruction(effect);
        }
        Ok(effect)
    }

    /// Applies damage from the external damage system. Returns the
    /// destruction effect if this hit wrecked the unit.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownUnit`] if `id` is not in the arena.
    pub fn apply_damage(
        &mut self,
        id: UnitId,
        amount: f32,
    ) -> Result<Option<DestructionEffect>, SimError> {
        let effect = self.unit_mut(id)?.apply_damage(amount);
        if let Some(effect) = &effect {
            self.record_destruction(effect);
        }
        Ok(effect)
    }

    /// Cleanup pass: despawns every wreck and returns their ids in order.
    pub fn remove_wrecks(&mut self) -> Vec<UnitId> {
        let wrecks: Vec<UnitId> = self
            .arena
            .units_sorted()
            .filter(|u| u.is_wreck())
            .map(UnitInstance::id)
            .collect();
        for id in &wrecks {
            self.arena.despawn(*id);
        }
        if !wrecks.is_empty() {
            debug!(count = wrecks.len(), "wrecks removed");
        }
        wrecks
    }

    /// Active (non-wrecked) units within `radius` of `center`, sorted by id.
    ///
    /// Positions are those indexed at the end of the last update.
    #[must_use]
    pub fn units_within(&self, center: Vec2, radius: f32) -> Vec<UnitId> {
        self.arena
            .spatial()
            .query_radius(center, radius)
            .into_iter()
            .filter(|id| self.arena.get(*id).is_some_and(|u| !u.is_wreck()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the arena.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Returns a unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&UnitInstance> {
        self.arena.get(id)
    }

    /// Returns the number of completed update passes.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.arena.current_tick()
    }

    /// Returns the unit-type registry.
    #[must_use]
    pub fn unit_types(&self) -> &UnitTypeRegistry {
        &self.units
    }

    /// Returns the visual registry.
    #[must_use]
    pub fn visuals(&self) -> &VisualRegistry {
        &self.visuals
    }

    /// Outputs queued since the last dispatch, in queue order.
    #[must_use]
    pub fn pending_outputs(&self) -> &[OutputEnvelope] {
        &self.outbox
    }

    /// Adds a resolver. Resolvers run in the order they were added.
    pub fn add_resolver(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    /// Returns the number of resolvers.
    #[must_use]
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn require(&self, id: UnitId) -> Result<(), SimError> {
        if self.arena.contains(id) {
            Ok(())
        } else {
            Err(SimError::UnknownUnit(id))
        }
    }

    fn unit_mut(&mut self, id: UnitId) -> Result<&mut UnitInstance, SimError> {
        self.arena.get_mut(id).ok_or(SimError::UnknownUnit(id))
    }

    /// Turns an order into a concrete target, failing for absent or wrecked
    /// units.
    fn resolve_target(&self, order: TargetOrder) -> Result<Target, SimError> {
        match order {
            TargetOrder::Ground(point) => Ok(Target::Ground(point)),
            TargetOrder::Unit(target) => {
                let unit = self.arena.get(target).ok_or(SimError::UnknownUnit(target))?;
                if unit.is_wreck() {
                    return Err(SimError::TargetWrecked(target));
                }
                Ok(Target::Unit(unit.as_target()))
            }
        }
    }

    fn record_destruction(&mut self, effect: &DestructionEffect) {
        debug!(
            unit = %effect.unit,
            x = effect.position.x,
            y = effect.position.y,
            "unit destroyed"
        );
        self.queue(effect.unit, destruction_outputs(effect));
    }

    fn queue(&mut self, source: UnitId, outputs: Vec<Output>) {
        let tick = self.arena.current_tick();
        enqueue(&mut self.outbox, &mut self.next_sequence, tick, source, outputs);
    }
}

/// Resolves a unit's standing order against the snapshot, clearing orders
/// whose target has disappeared or been wrecked.
fn resolve_order(unit: &mut UnitInstance, snapshot: &BTreeMap<UnitId, TargetInfo>) -> Option<Target> {
    match unit.target_order()? {
        TargetOrder::Ground(point) => Some(Target::Ground(point)),
        TargetOrder::Unit(target) => {
            if let Some(info) = snapshot.get(&target) {
                Some(Target::Unit(*info))
            } else {
                debug!(unit = %unit.id(), target = %target, "target lost, order cleared");
                unit.clear_target();
                None
            }
        }
    }
}

fn enqueue(
    outbox: &mut Vec<OutputEnvelope>,
    next_sequence: &mut u32,
    tick: u64,
    source: UnitId,
    outputs: Vec<Output>,
) {
    for output in outputs {
        outbox.push(OutputEnvelope::new(output, source, tick, *next_sequence));
        *next_sequence = next_sequence.wrapping_add(1);
    }
}

// =============================================================================
// Tests
// =============================================================================
