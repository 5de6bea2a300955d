//! Targeting and the attack state machine.
//!
//! A weapon-carrying unit cycles `Ready -> (fire) -> Cooldown -> Ready`.
//! Firing is a single synchronous transition: [`crate::unit::UnitInstance::fire`]
//! checks eligibility and range, emits a [`ProjectileSpawnRequest`], and
//! leaves the unit in `Cooldown` with the timer reset to the weapon's shoot
//! delay. Units without a weapon, and wrecks, sit in `Idle` forever.
//!
//! Target selection is not done here. An external targeting service assigns
//! a [`TargetOrder`]; the simulation resolves it into a [`Target`] every tick
//! and this module only answers "may I shoot this" and "is it in range".
//!
//! # Example
//!
//! ```
//! use warfront_core::attack::{AttackPhase, AttackState};
//! use warfront_core::catalog::UnitTypeRegistry;
//! use warfront_core::unit::UnitKind;
//!
//! let registry = UnitTypeRegistry::builtin();
//! let params = registry.get(UnitKind::GunBoat).unwrap().attack.as_ref();
//!
//! let mut state = AttackState::new(params);
//! assert_eq!(state.phase(), AttackPhase::Ready);
//!
//! state.start_cooldown(60.0);
//! assert_eq!(state.tick(59.0), AttackPhase::Cooldown);
//! assert_eq!(state.tick(1.0), AttackPhase::Ready);
//! ```

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::descriptor::{Argb, AttackParams, TargetCategories};
use crate::unit::UnitId;
use crate::visual::TeamId;

// =============================================================================
// Attack Phase
// =============================================================================

/// Resting phase of the attack state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPhase {
    /// No weapon, or wrecked. Never fires.
    Idle,
    /// Cooldown elapsed; the next eligible, in-range target is fired upon.
    Ready,
    /// Waiting for the cooldown timer to reach zero.
    Cooldown,
}

impl fmt::Display for AttackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Ready => write!(f, "Ready"),
            Self::Cooldown => write!(f, "Cooldown"),
        }
    }
}

/// Cooldown timer and standing target order of one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackState {
    phase: AttackPhase,
    cooldown: f32,
    order: Option<TargetOrder>,
}

impl AttackState {
    /// Spawn state for a unit with the given weapon.
    ///
    /// `None` yields an `Idle` state. A weapon with a positive
    /// `initial_cooldown` starts in `Cooldown`, otherwise in `Ready`.
    #[must_use]
    pub fn new(params: Option<&AttackParams>) -> Self {
        let (phase, cooldown) = match params {
            None => (AttackPhase::Idle, 0.0),
            Some(p) if p.initial_cooldown > 0.0 => (AttackPhase::Cooldown, p.initial_cooldown),
            Some(_) => (AttackPhase::Ready, 0.0),
        };
        Self {
            phase,
            cooldown,
            order: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    /// Remaining cooldown time. Zero unless in `Cooldown`.
    #[must_use]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Standing target order, if any.
    #[must_use]
    pub fn order(&self) -> Option<TargetOrder> {
        self.order
    }

    /// Advances the cooldown timer by `dt`.
    ///
    /// `Cooldown` becomes `Ready` once the timer reaches zero. Other phases
    /// and non-positive `dt` leave the state unchanged.
    pub fn tick(&mut self, dt: f32) -> AttackPhase {
        if self.phase == AttackPhase::Cooldown && dt > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
            if self.cooldown <= 0.0 {
                self.phase = AttackPhase::Ready;
            }
        }
        self.phase
    }

    /// Enters `Cooldown` for exactly `delay`.
    pub fn start_cooldown(&mut self, delay: f32) {
        self.phase = AttackPhase::Cooldown;
        self.cooldown = delay;
    }

    /// Sets the standing target order.
    pub fn set_order(&mut self, order: TargetOrder) {
        self.order = Some(order);
    }

    /// Clears the standing target order.
    pub fn clear_order(&mut self) {
        self.order = None;
    }

    /// Permanently stops the weapon: `Idle`, no cooldown, no order.
    pub fn disarm(&mut self) {
        self.phase = AttackPhase::Idle;
        self.cooldown = 0.0;
        self.order = None;
    }
}

// =============================================================================
// Targets
// =============================================================================

/// What the attack state machine needs to know about a unit it shoots at.
///
/// Built from the pre-update snapshot, so it never borrows the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetInfo {
    /// Target unit
    pub id: UnitId,
    /// Target's team
    pub team: TeamId,
    /// Target's position
    pub position: Vec2,
    /// Target's height
    pub height: f32,
    /// What the target is
    pub category: TargetCategories,
}

/// A resolved target for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A concrete unit
    Unit(TargetInfo),
    /// A point on the ground, shot at in a straight line
    Ground(Vec2),
}

impl Target {
    /// World position being shot at.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        match self {
            Self::Unit(info) => info.position,
            Self::Ground(point) => *point,
        }
    }

    /// Category used for eligibility. Ground points count as surface.
    #[must_use]
    pub fn category(&self) -> TargetCategories {
        match self {
            Self::Unit(info) => info.category,
            Self::Ground(_) => TargetCategories::SURFACE,
        }
    }

    /// Target unit, or `None` for a ground shot.
    #[must_use]
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Self::Unit(info) => Some(info.id),
            Self::Ground(_) => None,
        }
    }
}

/// Standing order assigned by the targeting service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetOrder {
    /// Engage this unit while it exists and is not wrecked
    Unit(UnitId),
    /// Keep firing at this point
    Ground(Vec2),
}

/// Returns `true` if `params` may engage `target`.
///
/// Only the category is checked; range and cooldown are separate.
#[must_use]
pub fn can_engage(params: &AttackParams, target: &Target) -> bool {
    params.engages.intersects(target.category())
}

/// Returns `true` if `target` lies within `max_attack_range` of `origin`.
#[must_use]
pub fn within_range(params: &AttackParams, origin: Vec2, target: &Target) -> bool {
    origin.distance(target.position()) <= params.max_attack_range
}

// =============================================================================
// Projectile Spawn Request
// =============================================================================

/// A fired shot, handed to the projectile subsystem.
///
/// The firing unit keeps no reference to the projectile once this has been
/// emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpawnRequest {
    /// Unit that fired
    pub source: UnitId,
    /// Team of the unit that fired
    pub team: TeamId,
    /// Turret end at the moment of firing
    pub origin: Vec2,
    /// Height the shot starts at
    pub height: f32,
    /// Travel direction in degrees (the turret direction)
    pub direction: f32,
    /// Target unit; `None` for a straight-line ground shot
    pub target: Option<UnitId>,
    /// Position the shot was aimed at
    pub aim_point: Vec2,
    /// Damage on a direct hit
    pub direct_damage: f32,
    /// Projectile lifetime
    pub lifetime: f32,
    /// Projectile speed
    pub speed: f32,
    /// Whether the projectile is drawn in flight
    pub visible: bool,
    /// Projectile color
    pub color: Argb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitTypeRegistry;
    use crate::unit::UnitKind;

    fn gun_boat_attack() -> AttackParams {
        let registry = UnitTypeRegistry::builtin();
        let descriptor = registry.get(UnitKind::GunBoat).unwrap();
        descriptor.attack.clone().unwrap()
    }

    fn target_at(x: f32, category: TargetCategories) -> Target {
        Target::Unit(TargetInfo {
            id: UnitId::new(99),
            team: TeamId::new(1).unwrap(),
            position: Vec2::new(x, 0.0),
            height: 0.0,
            category,
        })
    }

    mod phase_tests {
        use super::*;

        #[test]
        fn unarmed_unit_is_idle() {
            let mut state = AttackState::new(None);
            assert_eq!(state.phase(), AttackPhase::Idle);
            assert_eq!(state.tick(100.0), AttackPhase::Idle);
        }

        #[test]
        fn armed_unit_spawns_ready() {
            let params = gun_boat_attack();
            let state = AttackState::new(Some(&params));
            assert_eq!(state.phase(), AttackPhase::Ready);
            assert_eq!(state.cooldown(), 0.0);
        }

        #[test]
        fn initial_cooldown_starts_in_cooldown() {
            let mut params = gun_boat_attack();
            params.initial_cooldown = 30.0;
            let mut state = AttackState::new(Some(&params));
            assert_eq!(state.phase(), AttackPhase::Cooldown);
            assert_eq!(state.tick(29.0), AttackPhase::Cooldown);
            assert_eq!(state.tick(1.0), AttackPhase::Ready);
        }

        #[test]
        fn cooldown_never_goes_negative() {
            let mut state = AttackState::new(None);
            state.start_cooldown(10.0);
            state.tick(25.0);
            assert_eq!(state.cooldown(), 0.0);
            assert_eq!(state.phase(), AttackPhase::Ready);
        }

        #[test]
        fn non_positive_dt_is_ignored() {
            let mut state = AttackState::new(None);
            state.start_cooldown(10.0);
            state.tick(0.0);
            state.tick(-5.0);
            assert_eq!(state.cooldown(), 10.0);
        }

        #[test]
        fn disarm_clears_everything() {
            let params = gun_boat_attack();
            let mut state = AttackState::new(Some(&params));
            state.set_order(TargetOrder::Ground(Vec2::ONE));
            state.start_cooldown(60.0);

            state.disarm();

            assert_eq!(state.phase(), AttackPhase::Idle);
            assert_eq!(state.cooldown(), 0.0);
            assert!(state.order().is_none());
            assert_eq!(state.tick(100.0), AttackPhase::Idle);
        }
    }

    mod engagement_tests {
        use super::*;

        #[test]
        fn surface_weapon_ignores_aircraft_at_any_range() {
            let params = gun_boat_attack();
            for x in [0.0, 50.0, 119.0, 500.0] {
                assert!(!can_engage(&params, &target_at(x, TargetCategories::AIR)));
            }
        }

        #[test]
        fn surface_weapon_engages_boats_and_ground() {
            let params = gun_boat_attack();
            assert!(can_engage(&params, &target_at(50.0, TargetCategories::NAVAL)));
            assert!(can_engage(&params, &target_at(50.0, TargetCategories::LAND)));
            assert!(can_engage(&params, &Target::Ground(Vec2::new(10.0, 10.0))));
        }

        #[test]
        fn range_is_a_hard_cutoff() {
            let params = gun_boat_attack();
            let naval = TargetCategories::NAVAL;
            assert!(within_range(&params, Vec2::ZERO, &target_at(100.0, naval)));
            assert!(within_range(&params, Vec2::ZERO, &target_at(120.0, naval)));
            assert!(!within_range(&params, Vec2::ZERO, &target_at(120.5, naval)));
        }

        #[test]
        fn ground_target_has_no_unit() {
            let ground = Target::Ground(Vec2::new(3.0, 4.0));
            assert!(ground.unit().is_none());
            assert_eq!(ground.position(), Vec2::new(3.0, 4.0));
            assert_eq!(target_at(1.0, TargetCategories::NAVAL).unit(), Some(UnitId::new(99)));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cooldown_ends_exactly_when_ticks_cover_delay(
                steps in prop::collection::vec(0.5f32..10.0, 1..40),
            ) {
                let mut state = AttackState::new(None);
                state.start_cooldown(60.0);

                let mut elapsed = 0.0f32;
                for dt in steps {
                    let phase = state.tick(dt);
                    elapsed += dt;
                    if elapsed < 59.99 {
                        prop_assert_eq!(phase, AttackPhase::Cooldown);
                        prop_assert!(state.cooldown() > 0.0);
                    } else if elapsed > 60.01 {
                        prop_assert_eq!(phase, AttackPhase::Ready);
                        prop_assert_eq!(state.cooldown(), 0.0);
                    }
                }
            }
        }
    }
}
