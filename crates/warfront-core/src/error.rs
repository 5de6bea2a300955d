//! Error types for the unit core.
//!
//! Two families exist:
//!
//! - [`ConfigError`]: raised while building the load-time registries
//!   (descriptors, team ids, visuals). These abort initialization.
//! - [`SimError`]: raised by id-based simulation entry points when the
//!   referenced unit does not exist or cannot be used.
//!
//! Redundant transitions (firing while cooling down, destroying a wreck) are
//! not errors; those operations return `None` instead.

use thiserror::Error;

use crate::unit::{UnitId, UnitKind};

/// Errors raised while loading unit configuration and assets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A team id outside `[0, TEAM_COUNT)`.
    #[error("team id {id} is out of range (expected 0..{team_count})")]
    InvalidTeam {
        /// The rejected id
        id: u8,
        /// Number of valid teams
        team_count: usize,
    },

    /// A descriptor failed validation.
    #[error("invalid descriptor for {kind}: {reason}")]
    InvalidDescriptor {
        /// Unit kind whose descriptor is malformed
        kind: UnitKind,
        /// What was wrong with it
        reason: String,
    },

    /// The same unit kind was described more than once.
    #[error("unit kind {0} is described more than once")]
    DuplicateKind(UnitKind),

    /// A unit kind required by the caller has no descriptor.
    #[error("no descriptor for unit kind {0}")]
    MissingKind(UnitKind),

    /// The asset service could not provide an image.
    #[error("failed to load image `{image}`: {reason}")]
    Asset {
        /// Image reference that failed
        image: String,
        /// Reason reported by the asset service
        reason: String,
    },

    /// The configuration document could not be parsed.
    #[error("malformed unit configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by id-based simulation entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// No unit with this id is in the active set.
    #[error("unit {0} is not in the active set")]
    UnknownUnit(UnitId),

    /// The referenced target has already been wrecked.
    #[error("unit {0} is a wreck and cannot be targeted")]
    TargetWrecked(UnitId),

    /// The unit-type registry has no descriptor for this kind.
    #[error("no descriptor registered for unit kind {0}")]
    MissingDescriptor(UnitKind),

    /// The visual registry has no visuals for this kind.
    #[error("no visuals loaded for unit kind {0}")]
    MissingVisuals(UnitKind),
}
