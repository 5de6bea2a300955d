//! Static unit-type descriptors.
//!
//! A [`UnitTypeDescriptor`] holds everything that is shared by every instance
//! of one unit kind: footprint, hit points, movement rates, turret geometry,
//! weapon and destruction parameters. Descriptors are built once at load time
//! (see [`crate::catalog`]), validated, and then shared read-only through an
//! `Arc`.
//!
//! # Units
//!
//! - Distances are world units.
//! - Rates are per unit of simulation time (the `dt` passed to the update
//!   pass). The built-in catalog is tuned for `dt = 1.0` per frame.
//! - Angles and turn rates are in degrees.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::unit::UnitKind;

bitflags! {
    /// Categories a unit can belong to and that a weapon can engage.
    ///
    /// A descriptor's `category` is exactly one flag; a weapon's `engages`
    /// set may combine several.
    ///
    /// # Example
    ///
    /// ```
    /// use warfront_core::descriptor::TargetCategories;
    ///
    /// let surface_only = TargetCategories::LAND | TargetCategories::NAVAL;
    /// assert!(surface_only.intersects(TargetCategories::NAVAL));
    /// assert!(!surface_only.intersects(TargetCategories::AIR));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TargetCategories: u8 {
        /// Ground vehicles, structures and ground points
        const LAND = 1 << 0;
        /// Boats and other units on the water surface
        const NAVAL = 1 << 1;
        /// Airborne units
        const AIR = 1 << 2;
    }
}

impl TargetCategories {
    /// Everything that is not airborne.
    pub const SURFACE: Self = Self::LAND.union(Self::NAVAL);
}

/// A packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    /// Packs individual channels.
    #[must_use]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Reinterprets a signed color code, as used by engines that store colors
    /// in an `i32`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_signed(code: i32) -> Self {
        Self(code as u32)
    }

    /// Returns the alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Identifier of a sound asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(String);

impl SoundId {
    /// Creates a sound id.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sound together with the volume it is played at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    /// Sound asset to play
    pub sound: SoundId,
    /// Playback volume in `[0, 1]`
    pub volume: f32,
}

impl SoundCue {
    /// Creates a cue.
    #[must_use]
    pub fn new(sound: &str, volume: f32) -> Self {
        Self {
            sound: SoundId::new(sound),
            volume,
        }
    }
}

/// Size of the explosion emitted when a unit is wrecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplosionSize {
    /// Light craft
    Small,
    /// Heavy units
    Large,
}

/// Hull movement rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementParams {
    /// Top speed
    pub max_move_speed: f32,
    /// Speed gained per unit of time while speeding up
    pub move_acceleration: f32,
    /// Speed lost per unit of time while slowing down
    pub move_deceleration: f32,
    /// Hull turn rate in degrees per unit of time
    pub turn_speed: f32,
    /// Distance at which a move order counts as complete
    pub arrival_radius: f32,
}

/// Turret rate and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurretParams {
    /// Turret turn rate in degrees per unit of time
    pub turn_speed: f32,
    /// Distance of the turret pivot ahead of the hull center, along the hull heading
    pub mount_offset: f32,
    /// Distance from the turret pivot to the muzzle, along the turret direction
    pub barrel_length: f32,
}

/// Per-shot projectile parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotParams {
    /// Damage applied on a direct hit
    pub direct_damage: f32,
    /// Projectile lifetime in units of time
    pub lifetime: f32,
    /// Projectile speed
    pub speed: f32,
    /// Whether the projectile is drawn while travelling
    pub visible: bool,
    /// Projectile color
    pub color: Argb,
}

/// Weapon parameters. Units without a weapon have no `AttackParams`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackParams {
    /// Hard range cutoff
    pub max_attack_range: f32,
    /// Cooldown applied after every shot
    pub shoot_delay: f32,
    /// Cooldown a freshly spawned unit starts with
    #[serde(default)]
    pub initial_cooldown: f32,
    /// Categories this weapon may engage
    pub engages: TargetCategories,
    /// Projectile emitted per shot
    pub shot: ShotParams,
    /// Sound played at the muzzle on every shot
    pub fire_sound: Option<SoundCue>,
    /// Whether a muzzle flash is emitted on every shot
    #[serde(default)]
    pub muzzle_flash: bool,
    /// Color of the muzzle light, if any
    #[serde(default)]
    pub muzzle_light: Option<Argb>,
}

/// Parameters of the wreck transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestructionParams {
    /// Explosion emitted at the wreck position
    pub explosion: ExplosionSize,
    /// Sound played when the unit is wrecked
    #[serde(default)]
    pub sound: Option<SoundCue>,
}

/// Immutable description of a unit kind.
///
/// # Example
///
/// ```
/// use warfront_core::catalog::UnitTypeRegistry;
/// use warfront_core::unit::UnitKind;
///
/// let registry = UnitTypeRegistry::builtin();
/// let gun_boat = registry.get(UnitKind::GunBoat).unwrap();
/// assert_eq!(gun_boat.max_hp, 170.0);
/// assert!(gun_boat.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTypeDescriptor {
    /// Unit kind this descriptor belongs to
    pub kind: UnitKind,
    /// What this unit is, for other units' eligibility checks
    pub category: TargetCategories,
    /// Sprite width
    pub width: u32,
    /// Sprite height
    pub height: u32,
    /// Collision radius
    pub radius: f32,
    /// Radius used for selection and display
    pub display_radius: f32,
    /// Maximum hit points
    pub max_hp: f32,
    /// Height a fresh unit spawns at (non-zero for aircraft)
    #[serde(default)]
    pub altitude: f32,
    /// Base image reference
    pub image: String,
    /// Wreck image reference
    pub wreck_image: String,
    /// Hull movement
    pub movement: MovementParams,
    /// Turret rate and geometry
    pub turret: TurretParams,
    /// Weapon, if the unit can attack
    #[serde(default)]
    pub attack: Option<AttackParams>,
    /// Wreck transition
    pub destruction: DestructionParams,
}

impl UnitTypeDescriptor {
    /// Returns `true` if this unit kind carries a weapon.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.attack.is_some()
    }

    /// Checks the descriptor for values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDescriptor`] naming the first offending
    /// field.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason: &str| {
            Err(ConfigError::InvalidDescriptor {
                kind: self.kind,
                reason: reason.to_string(),
            })
        };

        if self.category.bits().count_ones() != 1 {
            return fail("category must be exactly one of LAND, NAVAL, AIR");
        }
        if self.width == 0 || self.height == 0 {
            return fail("width and height must be non-zero");
        }
        if !(self.radius > 0.0) {
            return fail("radius must be positive");
        }
        if !(self.display_radius > 0.0) || self.display_radius > self.radius {
            return fail("display_radius must be positive and no larger than radius");
        }
        if !(self.max_hp > 0.0) {
            return fail("max_hp must be positive");
        }
        if !(self.altitude >= 0.0) {
            return fail("altitude must be non-negative");
        }
        if self.image.is_empty() || self.wreck_image.is_empty() {
            return fail("image and wreck_image must be set");
        }

        let m = &self.movement;
        if !(m.max_move_speed >= 0.0) || !(m.move_acceleration >= 0.0) || !(m.turn_speed >= 0.0) {
            return fail("movement rates must be non-negative");
        }
        if m.max_move_speed > 0.0 && !(m.move_deceleration > 0.0) {
            return fail("move_deceleration must be positive for a mobile unit");
        }
        if !(m.arrival_radius >= 0.0) {
            return fail("arrival_radius must be non-negative");
        }

        let t = &self.turret;
        if !(t.turn_speed >= 0.0) || !(t.barrel_length >= 0.0) || !t.mount_offset.is_finite() {
            return fail("turret parameters must be finite and non-negative");
        }

        if let Some(attack) = &self.attack {
            if !(attack.max_attack_range > 0.0) {
                return fail("max_attack_range must be positive");
            }
            if !(attack.shoot_delay > 0.0) {
                return fail("shoot_delay must be positive");
            }
            if !(attack.initial_cooldown >= 0.0) {
                return fail("initial_cooldown must be non-negative");
            }
            if attack.engages.is_empty() {
                return fail("engages must name at least one category");
            }
            let shot = &attack.shot;
            if !(shot.direct_damage >= 0.0) || !(shot.lifetime > 0.0) || !(shot.speed > 0.0) {
                return fail("shot needs non-negative damage and positive lifetime and speed");
            }
            if let Some(cue) = &attack.fire_sound {
                if !(0.0..=1.0).contains(&cue.volume) {
                    return fail("fire_sound volume must be within [0, 1]");
                }
            }
        }

        if let Some(cue) = &self.destruction.sound {
            if !(0.0..=1.0).contains(&cue.volume) {
                return fail("destruction sound volume must be within [0, 1]");
            }
        }

        Ok(())
    }
}
