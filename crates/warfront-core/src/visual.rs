//! Team-based visual identity.
//!
//! Every unit kind gets a [`KindVisuals`] bundle at load time: its base image,
//! its wreck image, and one recolored image per team ([`TeamVisualSet`]). The
//! bundles live in a [`VisualRegistry`] that is built once through an
//! [`AssetService`] and never mutated afterwards; unit instances hold an
//! `Arc` to the bundle of their kind.
//!
//! # Team ids
//!
//! [`TeamId`] can only be constructed for ids in `[0, TEAM_COUNT)`, so
//! selecting a team visual can never index out of range.
//!
//! # Example
//!
//! ```
//! use warfront_core::visual::{TeamId, TEAM_COUNT};
//!
//! assert!(TeamId::new(0).is_ok());
//! assert!(TeamId::new(TEAM_COUNT as u8).is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::UnitTypeRegistry;
use crate::error::ConfigError;
use crate::services::AssetService;
use crate::unit::UnitKind;

/// Number of teams a match can have.
pub const TEAM_COUNT: usize = 8;

// =============================================================================
// Team Identification
// =============================================================================

/// A validated team identifier in `[0, TEAM_COUNT)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TeamId(u8);

impl TeamId {
    /// Creates a team id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTeam`] if `id >= TEAM_COUNT`.
    pub fn new(id: u8) -> Result<Self, ConfigError> {
        if usize::from(id) < TEAM_COUNT {
            Ok(Self(id))
        } else {
            Err(ConfigError::InvalidTeam {
                id,
                team_count: TEAM_COUNT,
            })
        }
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Returns the id as an index into per-team tables.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Iterates over every valid team id in ascending order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn all() -> impl Iterator<Item = Self> {
        (0..TEAM_COUNT).map(|i| Self(i as u8))
    }
}

impl TryFrom<u8> for TeamId {
    type Error = ConfigError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<TeamId> for u8 {
    fn from(team: TeamId) -> Self {
        team.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team:{}", self.0)
    }
}

// =============================================================================
// Visual Handles
// =============================================================================

/// Opaque handle to an image owned by the asset/render service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(u32);

impl VisualHandle {
    /// Wraps a raw handle issued by an asset service.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw handle.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// One recolored image per team.
///
/// Always holds exactly `TEAM_COUNT` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamVisualSet {
    handles: Vec<VisualHandle>,
}

impl TeamVisualSet {
    /// Recolors `base` once for every team.
    ///
    /// # Errors
    ///
    /// Propagates the first failure reported by the asset service.
    pub fn build(base: VisualHandle, assets: &mut dyn AssetService) -> Result<Self, ConfigError> {
        let handles = TeamId::all()
            .map(|team| assets.recolor_for_team(base, team))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { handles })
    }

    /// Returns the image for `team`.
    #[must_use]
    pub fn select(&self, team: TeamId) -> VisualHandle {
        self.handles[team.index()]
    }

    /// Returns every handle in team order.
    #[must_use]
    pub fn handles(&self) -> &[VisualHandle] {
        &self.handles
    }
}

/// All images of one unit kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindVisuals {
    /// Uncolored base image
    pub base: VisualHandle,
    /// Image shown once the unit is wrecked
    pub wreck: VisualHandle,
    /// Per-team recolors of `base`
    pub teams: TeamVisualSet,
}

impl KindVisuals {
    /// Returns the image a live unit of `team` is drawn with.
    #[must_use]
    pub fn select_visual(&self, team: TeamId) -> VisualHandle {
        self.teams.select(team)
    }
}

// =============================================================================
// Visual Registry
// =============================================================================

/// Load-once registry of [`KindVisuals`], keyed by unit kind.
#[derive(Debug, Clone, Default)]
pub struct VisualRegistry {
    kinds: BTreeMap<UnitKind, Arc<KindVisuals>>,
}

impl VisualRegistry {
    /// Loads images for every kind in `units`.
    ///
    /// Kinds are processed in ascending order so asset handles are issued
    /// deterministically.
    ///
    /// # Errors
    ///
    /// Returns the first asset failure; a partially loaded registry is never
    /// returned.
    pub fn load(
        units: &UnitTypeRegistry,
        assets: &mut dyn AssetService,
    ) -> Result<Self, ConfigError> {
        let mut kinds = BTreeMap::new();
        for descriptor in units.iter() {
            let base = assets.load_image(&descriptor.image)?;
            let wreck = assets.load_image(&descriptor.wreck_image)?;
            let teams = TeamVisualSet::build(base, assets)?;
            kinds.insert(descriptor.kind, Arc::new(KindVisuals { base, wreck, teams }));
        }
        info!(kinds = kinds.len(), teams = TEAM_COUNT, "unit visuals loaded");
        Ok(Self { kinds })
    }

    /// Returns the visuals of `kind`, if loaded.
    #[must_use]
    pub fn get(&self, kind: UnitKind) -> Option<&Arc<KindVisuals>> {
        self.kinds.get(&kind)
    }

    /// Returns the number of kinds with loaded visuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if nothing has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
