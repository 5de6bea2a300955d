//! Load-once registry of unit-type descriptors.
//!
//! The [`UnitTypeRegistry`] is built during initialization, either from the
//! built-in catalog or from a JSON document, and is shared read-only by the
//! simulation afterwards. Every descriptor is validated before the registry
//! is handed out, so a malformed configuration aborts initialization instead
//! of surfacing mid-match.
//!
//! # Configuration format
//!
//! ```json
//! {
//!   "units": [
//!     { "kind": "gun_boat", "category": "NAVAL", "width": 15, "height": 27, ... }
//!   ]
//! }
//! ```
//!
//! Field names follow [`UnitTypeDescriptor`]; category sets are written as
//! flag names joined by `|` (for example `"LAND | NAVAL"`).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::descriptor::{
    Argb, AttackParams, DestructionParams, ExplosionSize, MovementParams, ShotParams, SoundCue,
    TargetCategories, TurretParams, UnitTypeDescriptor,
};
use crate::error::ConfigError;
use crate::unit::UnitKind;

/// Serialized form of a unit catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// One descriptor per unit kind
    pub units: Vec<UnitTypeDescriptor>,
}

/// Immutable map from unit kind to its shared descriptor.
#[derive(Debug, Clone, Default)]
pub struct UnitTypeRegistry {
    descriptors: BTreeMap<UnitKind, Arc<UnitTypeDescriptor>>,
}

impl UnitTypeRegistry {
    /// Builds a registry from descriptors, validating each one.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidDescriptor`] if a descriptor fails validation
    /// - [`ConfigError::DuplicateKind`] if a kind appears twice
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = UnitTypeDescriptor>,
    ) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for descriptor in descriptors {
            if let Err(err) = descriptor.validate() {
                warn!(kind = %descriptor.kind, error = %err, "rejected unit descriptor");
                return Err(err);
            }
            let kind = descriptor.kind;
            if map.insert(kind, Arc::new(descriptor)).is_some() {
                warn!(kind = %kind, "duplicate unit descriptor");
                return Err(ConfigError::DuplicateKind(kind));
            }
        }
        info!(kinds = map.len(), "unit type registry built");
        Ok(Self { descriptors: map })
    }

    /// Parses and validates a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed documents, plus every error
    /// of [`from_descriptors`](Self::from_descriptors).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CatalogConfig = serde_json::from_str(json)?;
        Self::from_descriptors(config.units)
    }

    /// Returns the catalog shipped with the engine.
    #[must_use]
    pub fn builtin() -> Self {
        let descriptors = builtin_descriptors()
            .into_iter()
            .map(|d| (d.kind, Arc::new(d)))
            .collect();
        Self { descriptors }
    }

    /// Serializes the registry back into its configuration form.
    #[must_use]
    pub fn to_config(&self) -> CatalogConfig {
        CatalogConfig {
            units: self.iter().map(|d| UnitTypeDescriptor::clone(d)).collect(),
        }
    }

    /// Checks that every kind in `kinds` has a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKind`] for the first kind without one.
    pub fn require(&self, kinds: &[UnitKind]) -> Result<(), ConfigError> {
        match kinds.iter().find(|k| !self.descriptors.contains_key(k)) {
            Some(kind) => Err(ConfigError::MissingKind(*kind)),
            None => Ok(()),
        }
    }

    /// Returns the descriptor of `kind`, if registered.
    #[must_use]
    pub fn get(&self, kind: UnitKind) -> Option<&Arc<UnitTypeDescriptor>> {
        self.descriptors.get(&kind)
    }

    /// Iterates over descriptors in ascending kind order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<UnitTypeDescriptor>> + '_ {
        self.descriptors.values()
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no kind is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

// =============================================================================
// Built-in Catalog
// =============================================================================

fn builtin_descriptors() -> Vec<UnitTypeDescriptor> {
    vec![gun_boat(), missile_ship(), gunship()]
}

/// Light patrol boat with a fast-tracking deck gun. Cannot hit aircraft.
fn gun_boat() -> UnitTypeDescriptor {
    let radius = 12.0;
    UnitTypeDescriptor {
        kind: UnitKind::GunBoat,
        category: TargetCategories::NAVAL,
        width: 15,
        height: 27,
        radius,
        display_radius: radius - 2.0,
        max_hp: 170.0,
        altitude: 0.0,
        image: "gun_boat".to_string(),
        wreck_image: "gun_boat_dead".to_string(),
        movement: MovementParams {
            max_move_speed: 1.5,
            move_acceleration: 0.07,
            move_deceleration: 0.2,
            turn_speed: 2.8,
            arrival_radius: 4.0,
        },
        turret: TurretParams {
            turn_speed: 99.0,
            mount_offset: 3.0,
            barrel_length: 6.0,
        },
        attack: Some(AttackParams {
            max_attack_range: 120.0,
            shoot_delay: 60.0,
            initial_cooldown: 0.0,
            engages: TargetCategories::SURFACE,
            shot: ShotParams {
                direct_damage: 12.0,
                lifetime: 30.0,
                speed: 8.0,
                visible: false,
                color: Argb::from_argb(255, 180, 180, 0),
            },
            fire_sound: Some(SoundCue::new("gun_fire", 0.2)),
            muzzle_flash: true,
            muzzle_light: Some(Argb::from_signed(-1_118_720)),
        }),
        destruction: DestructionParams {
            explosion: ExplosionSize::Small,
            sound: None,
        },
    }
}

/// Slow escort with long-range missiles that reach aircraft.
fn missile_ship() -> UnitTypeDescriptor {
    let radius = 18.0;
    UnitTypeDescriptor {
        kind: UnitKind::MissileShip,
        category: TargetCategories::NAVAL,
        width: 22,
        height: 44,
        radius,
        display_radius: radius - 2.0,
        max_hp: 420.0,
        altitude: 0.0,
        image: "missile_ship".to_string(),
        wreck_image: "missile_ship_dead".to_string(),
        movement: MovementParams {
            max_move_speed: 0.9,
            move_acceleration: 0.03,
            move_deceleration: 0.1,
            turn_speed: 1.2,
            arrival_radius: 6.0,
        },
        turret: TurretParams {
            turn_speed: 6.0,
            mount_offset: -4.0,
            barrel_length: 5.0,
        },
        attack: Some(AttackParams {
            max_attack_range: 260.0,
            shoot_delay: 150.0,
            initial_cooldown: 30.0,
            engages: TargetCategories::all(),
            shot: ShotParams {
                direct_damage: 55.0,
                lifetime: 90.0,
                speed: 4.0,
                visible: true,
                color: Argb::from_argb(255, 240, 240, 240),
            },
            fire_sound: Some(SoundCue::new("missile_fire", 0.5)),
            muzzle_flash: false,
            muzzle_light: None,
        }),
        destruction: DestructionParams {
            explosion: ExplosionSize::Large,
            sound: Some(SoundCue::new("large_explosion", 0.8)),
        },
    }
}

/// Attack helicopter. Airborne, strikes surface targets only.
fn gunship() -> UnitTypeDescriptor {
    let radius = 14.0;
    UnitTypeDescriptor {
        kind: UnitKind::Gunship,
        category: TargetCategories::AIR,
        width: 28,
        height: 28,
        radius,
        display_radius: radius - 2.0,
        max_hp: 140.0,
        altitude: 20.0,
        image: "gunship".to_string(),
        wreck_image: "gunship_dead".to_string(),
        movement: MovementParams {
            max_move_speed: 2.4,
            move_acceleration: 0.12,
            move_deceleration: 0.15,
            turn_speed: 5.0,
            arrival_radius: 3.0,
        },
        turret: TurretParams {
            turn_speed: 12.0,
            mount_offset: 8.0,
            barrel_length: 4.0,
        },
        attack: Some(AttackParams {
            max_attack_range: 140.0,
            shoot_delay: 40.0,
            initial_cooldown: 0.0,
            engages: TargetCategories::SURFACE,
            shot: ShotParams {
                direct_damage: 16.0,
                lifetime: 25.0,
                speed: 9.0,
                visible: false,
                color: Argb::from_argb(255, 255, 200, 60),
            },
            fire_sound: Some(SoundCue::new("gun_fire", 0.3)),
            muzzle_flash: true,
            muzzle_light: Some(Argb::from_signed(-1_118_720)),
        }),
        destruction: DestructionParams {
            explosion: ExplosionSize::Small,
            sound: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod builtin_tests {
        use super::*;

        #[test]
        fn every_builtin_descriptor_validates() {
            let registry = UnitTypeRegistry::builtin();
            for descriptor in registry.iter() {
                descriptor
                    .validate()
                    .unwrap_or_else(|e| panic!("{}: {e}", descriptor.kind));
            }
        }

        #[test]
        fn builtin_covers_every_kind() {
            let registry = UnitTypeRegistry::builtin();
            assert!(registry.require(UnitKind::ALL).is_ok());
            assert_eq!(registry.len(), UnitKind::ALL.len());
        }

        #[test]
        fn gun_boat_matches_reference_figures() {
            let registry = UnitTypeRegistry::builtin();
            let d = registry.get(UnitKind::GunBoat).unwrap();

            assert_eq!((d.width, d.height), (15, 27));
            assert_eq!(d.radius, 12.0);
            assert_eq!(d.display_radius, 10.0);
            assert_eq!(d.max_hp, 170.0);
            assert_eq!(d.movement.max_move_speed, 1.5);
            assert_eq!(d.movement.turn_speed, 2.8);
            assert_eq!(d.movement.move_acceleration, 0.07);
            assert_eq!(d.movement.move_deceleration, 0.2);
            assert_eq!(d.turret.turn_speed, 99.0);

            let attack = d.attack.as_ref().unwrap();
            assert_eq!(attack.max_attack_range, 120.0);
            assert_eq!(attack.shoot_delay, 60.0);
            assert_eq!(attack.shot.direct_damage, 12.0);
            assert_eq!(attack.shot.lifetime, 30.0);
            assert_eq!(attack.shot.speed, 8.0);
            assert!(!attack.shot.visible);
            assert_eq!(attack.shot.color, Argb(0xFFB4_B400));
            assert_eq!(attack.fire_sound, Some(SoundCue::new("gun_fire", 0.2)));
            assert_eq!(attack.muzzle_light, Some(Argb(0xFFEE_EE00)));
            assert!(!attack.engages.contains(TargetCategories::AIR));
        }
    }

    mod json_tests {
        use super::*;

        #[test]
        fn config_roundtrip() {
            let registry = UnitTypeRegistry::builtin();
            let json = serde_json::to_string_pretty(&registry.to_config()).unwrap();
            let reloaded = UnitTypeRegistry::from_json(&json).unwrap();

            assert_eq!(reloaded.len(), registry.len());
            for descriptor in registry.iter() {
                assert_eq!(reloaded.get(descriptor.kind), Some(descriptor));
            }
        }

        #[test]
        fn engagement_sets_use_flag_names() {
            let json = serde_json::to_value(UnitTypeRegistry::builtin().to_config()).unwrap();
            let gun_boat = &json["units"][0];
            assert_eq!(gun_boat["kind"], "gun_boat");
            assert_eq!(gun_boat["category"], "NAVAL");
            assert_eq!(gun_boat["attack"]["engages"], "LAND | NAVAL");
        }

        #[test]
        fn rejects_malformed_json() {
            let err = UnitTypeRegistry::from_json("{\"units\": [").unwrap_err();
            assert!(matches!(err, ConfigError::Json(_)));
        }

        #[test]
        fn rejects_unknown_kind() {
            let mut config = serde_json::to_value(UnitTypeRegistry::builtin().to_config()).unwrap();
            config["units"][0]["kind"] = "battleship".into();
            let err = UnitTypeRegistry::from_json(&config.to_string()).unwrap_err();
            assert!(matches!(err, ConfigError::Json(_)));
        }

        #[test]
        fn rejects_invalid_descriptor() {
            let mut config = serde_json::to_value(UnitTypeRegistry::builtin().to_config()).unwrap();
            config["units"][0]["max_hp"] = (-5.0).into();
            let err = UnitTypeRegistry::from_json(&config.to_string()).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidDescriptor { kind: UnitKind::GunBoat, .. }
            ));
        }

        #[test]
        fn rejects_duplicate_kind() {
            let mut config = UnitTypeRegistry::builtin().to_config();
            config.units.push(config.units[0].clone());
            let err = UnitTypeRegistry::from_descriptors(config.units).unwrap_err();
            assert!(matches!(err, ConfigError::DuplicateKind(UnitKind::GunBoat)));
        }

        #[test]
        fn require_reports_missing_kind() {
            let config = UnitTypeRegistry::builtin().to_config();
            let only_boats = config
                .units
                .into_iter()
                .filter(|d| d.kind == UnitKind::GunBoat);
            let registry = UnitTypeRegistry::from_descriptors(only_boats).unwrap();
            let err = registry.require(UnitKind::ALL).unwrap_err();
            assert!(matches!(err, ConfigError::MissingKind(UnitKind::MissileShip)));
        }
    }
}
