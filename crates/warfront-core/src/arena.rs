//! The active-unit collection.
//!
//! The Arena owns every live unit and wreck. It provides:
//! - Unit storage with deterministic iteration order (`BTreeMap`)
//! - Spatial indexing for proximity queries
//! - Unit lifecycle management (spawn/despawn)
//! - The tick counter
//!
//! # Spatial Index Synchronization
//!
//! The spatial index is NOT updated when a unit moves through `get_mut()`.
//! Call [`Arena::sync_spatial`] after a batch of moves. Spawning and
//! despawning keep the index in sync.
//!
//! # Example
//!
//! ```
//! use warfront_core::arena::Arena;
//! use warfront_core::unit::UnitId;
//! use glam::Vec2;
//!
//! let arena = Arena::new();
//! assert!(arena.is_empty());
//! assert!(arena.spatial().query_radius(Vec2::ZERO, 50.0).is_empty());
//! assert!(arena.get(UnitId::new(0)).is_none());
//! ```

use std::collections::{BTreeMap, HashMap};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::unit::{UnitId, UnitInstance};

// =============================================================================
// Spatial Index
// =============================================================================

/// Position index for proximity queries.
///
/// A `HashMap` is fine here: lookups are by id and radius queries sort their
/// results, so its iteration order never leaks into simulation state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpatialIndex {
    positions: HashMap<UnitId, Vec2>,
}

impl SpatialIndex {
    /// Creates a new empty spatial index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }

    /// Inserts or updates a unit's position.
    pub fn insert(&mut self, id: UnitId, pos: Vec2) {
        self.positions.insert(id, pos);
    }

    /// Removes a unit from the index.
    pub fn remove(&mut self, id: UnitId) {
        self.positions.remove(&id);
    }

    /// Returns the indexed position of a unit.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<Vec2> {
        self.positions.get(&id).copied()
    }

    /// Returns the ids within `radius` of `center`, sorted by id.
    #[must_use]
    pub fn query_radius(&self, center: Vec2, radius: f32) -> Vec<UnitId> {
        let radius_sq = radius * radius;
        let mut results: Vec<UnitId> = self
            .positions
            .iter()
            .filter(|(_, pos)| center.distance_squared(**pos) <= radius_sq)
            .map(|(id, _)| *id)
            .collect();

        // Sort for deterministic order
        results.sort();
        results
    }

    /// Returns the number of indexed units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Owner of every unit in the simulation.
///
/// Unit ids are assigned monotonically and never reused, so the `BTreeMap`
/// iterates in spawn order on every platform.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    /// Next id to hand out.
    next_id: u64,
    /// Units and wrecks, keyed by id.
    units: BTreeMap<UnitId, UnitInstance>,
    /// Spatial index for proximity queries.
    spatial: SpatialIndex,
    /// Completed update passes.
    tick: u64,
}

impl Arena {
    /// Creates an empty arena at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a unit built by `build` from its freshly assigned id.
    ///
    /// The unit is added to the spatial index at its spawn position.
    pub fn spawn_with<F>(&mut self, build: F) -> UnitId
    where
        F: FnOnce(UnitId) -> UnitInstance,
    {
        let id = UnitId::new(self.next_id);
        self.next_id += 1;

        let unit = build(id);
        self.spatial.insert(id, unit.position());
        self.units.insert(id, unit);
        id
    }

    /// Removes a unit from the arena and the spatial index.
    pub fn despawn(&mut self, id: UnitId) -> Option<UnitInstance> {
        self.spatial.remove(id);
        self.units.remove(&id)
    }

    /// Returns a unit by id.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&UnitInstance> {
        self.units.get(&id)
    }

    /// Returns a unit by id, mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut UnitInstance> {
        self.units.get_mut(&id)
    }

    /// Returns true if `id` is in the arena.
    #[must_use]
    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Iterates over ids in ascending order.
    pub fn unit_ids_sorted(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.keys().copied()
    }

    /// Iterates over units in ascending id order.
    pub fn units_sorted(&self) -> impl Iterator<Item = &UnitInstance> + '_ {
        self.units.values()
    }

    /// Iterates over units mutably in ascending id order.
    pub fn units_sorted_mut(&mut self) -> impl Iterator<Item = &mut UnitInstance> + '_ {
        self.units.values_mut()
    }

    /// Returns the number of units, wrecks included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the arena holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the spatial index.
    #[must_use]
    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    /// Re-indexes every unit.
    pub fn sync_spatial(&mut self) {
        for (id, unit) in &self.units {
            self.spatial.insert(*id, unit.position());
        }
    }

    /// Returns the number of completed update passes.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Advances the tick counter.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }
}

// =============================================================================
// Tests
// =============================================================================
