//! Unit identity and the live unit instance.
//!
//! - [`UnitId`]: unique, ordered identifier assigned by the arena
//! - [`UnitKind`]: the closed set of unit variants
//! - [`UnitInstance`]: one live unit, composed of its shared descriptor and
//!   visuals plus per-instance state components
//!
//! # Behavior composition
//!
//! Every kind runs the same code. What differs between a gun boat and a
//! gunship is data: movement rates, turret geometry, weapon and engagement
//! set all come from the [`UnitTypeDescriptor`]. The instance only owns the
//! mutable state and sequences the subsystems over it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use warfront_core::catalog::UnitTypeRegistry;
//! use warfront_core::unit::{UnitId, UnitInstance, UnitKind};
//! use warfront_core::visual::{KindVisuals, TeamId, TeamVisualSet, VisualHandle};
//! use glam::Vec2;
//!
//! let registry = UnitTypeRegistry::builtin();
//! let descriptor = Arc::clone(registry.get(UnitKind::GunBoat).unwrap());
//! # struct Assets(u32);
//! # impl warfront_core::services::AssetService for Assets {
//! #     fn load_image(&mut self, _: &str) -> Result<VisualHandle, warfront_core::error::ConfigError> {
//! #         self.0 += 1; Ok(VisualHandle::new(self.0))
//! #     }
//! #     fn recolor_for_team(&mut self, _: VisualHandle, _: TeamId) -> Result<VisualHandle, warfront_core::error::ConfigError> {
//! #         self.0 += 1; Ok(VisualHandle::new(self.0))
//! #     }
//! # }
//! # let mut assets = Assets(0);
//! let visuals = Arc::new(KindVisuals {
//!     base: VisualHandle::new(1),
//!     wreck: VisualHandle::new(2),
//!     teams: TeamVisualSet::build(VisualHandle::new(1), &mut assets).unwrap(),
//! });
//!
//! let team = TeamId::new(3).unwrap();
//! let mut boat = UnitInstance::new(UnitId::new(0), descriptor, visuals, team, Vec2::ZERO, 0.0);
//! boat.order_move(Vec2::new(100.0, 0.0));
//! boat.advance(1.0);
//!
//! assert!(boat.position().x > 0.0);
//! ```

pub mod components;

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::attack::{
    self, AttackPhase, AttackState, ProjectileSpawnRequest, Target, TargetInfo, TargetOrder,
};
use crate::descriptor::UnitTypeDescriptor;
use crate::kinematics;
use crate::lifecycle::{DestructionEffect, DrawLayer, LifecycleState};
use crate::services::RenderRequest;
use crate::visual::{KindVisuals, TeamId, VisualHandle};

pub use components::{HealthState, MotionState, TransformState, TurretState};

// =============================================================================
// Identity
// =============================================================================

/// Unique identifier for a unit.
///
/// Assigned monotonically by the arena and never reused. Ordering by id is
/// the iteration order of every simulation pass.
///
/// # Example
///
/// ```
/// use warfront_core::unit::UnitId;
///
/// let a = UnitId::new(1);
/// let b = UnitId::new(2);
/// assert!(a < b);
/// assert_eq!(b.to_string(), "2");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(u64);

impl UnitId {
    /// Creates a `UnitId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UnitId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<UnitId> for u64 {
    fn from(id: UnitId) -> Self {
        id.0
    }
}

/// The unit variants the engine knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Light patrol boat with a deck gun
    GunBoat,
    /// Heavy escort with long-range missiles
    MissileShip,
    /// Attack helicopter
    Gunship,
}

impl UnitKind {
    /// Every kind, in order.
    pub const ALL: &'static [Self] = &[Self::GunBoat, Self::MissileShip, Self::Gunship];
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GunBoat => write!(f, "gun_boat"),
            Self::MissileShip => write!(f, "missile_ship"),
            Self::Gunship => write!(f, "gunship"),
        }
    }
}

// =============================================================================
// Unit Instance
// =============================================================================

/// A live unit.
///
/// Owned by the arena. The descriptor and visuals are shared with every
/// other unit of the same kind and never mutated.
#[derive(Debug, Clone)]
pub struct UnitInstance {
    id: UnitId,
    descriptor: Arc<UnitTypeDescriptor>,
    visuals: Arc<KindVisuals>,
    team: TeamId,
    visual: VisualHandle,
    transform: TransformState,
    motion: MotionState,
    turret: TurretState,
    health: HealthState,
    attack: AttackState,
    life: LifecycleState,
}

impl UnitInstance {
    /// Creates a unit at full health, stationary, with its turret along the
    /// hull heading.
    #[must_use]
    pub fn new(
        id: UnitId,
        descriptor: Arc<UnitTypeDescriptor>,
        visuals: Arc<KindVisuals>,
        team: TeamId,
        position: Vec2,
        heading: f32,
    ) -> Self {
        let heading = kinematics::normalize_degrees(heading);
        Self {
            id,
            visual: visuals.select_visual(team),
            transform: TransformState::new(position, descriptor.altitude, heading),
            motion: MotionState::default(),
            turret: TurretState {
                direction: heading,
                aim: None,
            },
            health: HealthState::full(descriptor.max_hp),
            attack: AttackState::new(descriptor.attack.as_ref()),
            life: LifecycleState::active(descriptor.category),
            descriptor,
            visuals,
            team,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the unit's id.
    #[must_use]
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Returns the unit's kind.
    #[must_use]
    pub fn kind(&self) -> UnitKind {
        self.descriptor.kind
    }

    /// Returns the shared descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &UnitTypeDescriptor {
        &self.descriptor
    }

    /// Returns the unit's team.
    #[must_use]
    pub fn team(&self) -> TeamId {
        self.team
    }

    /// Returns the image the unit is currently drawn with.
    #[must_use]
    pub fn visual(&self) -> VisualHandle {
        self.visual
    }

    /// Returns the hull center.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Returns the height above the surface.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.transform.height
    }

    /// Returns the hull heading in degrees.
    #[must_use]
    pub fn heading(&self) -> f32 {
        self.transform.heading
    }

    /// Returns the current speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.motion.speed
    }

    /// Returns the destination of the current move order.
    #[must_use]
    pub fn destination(&self) -> Option<Vec2> {
        self.motion.destination
    }

    /// Returns the turret direction in degrees.
    #[must_use]
    pub fn turret_direction(&self) -> f32 {
        self.turret.direction
    }

    /// Returns the remaining hit points.
    #[must_use]
    pub fn hp(&self) -> f32 {
        self.health.hp
    }

    /// Returns the hit points at spawn.
    #[must_use]
    pub fn max_hp(&self) -> f32 {
        self.health.max_hp
    }

    /// Whether the unit takes part in collision.
    #[must_use]
    pub fn is_collidable(&self) -> bool {
        self.life.is_collidable()
    }

    /// Layer the unit draws on.
    #[must_use]
    pub fn draw_layer(&self) -> DrawLayer {
        self.life.draw_layer()
    }

    /// Returns `true` once destroyed.
    #[must_use]
    pub fn is_wreck(&self) -> bool {
        self.life.is_wreck()
    }

    /// Returns the attack phase.
    #[must_use]
    pub fn attack_phase(&self) -> AttackPhase {
        self.attack.phase()
    }

    /// Returns the remaining cooldown.
    #[must_use]
    pub fn cooldown(&self) -> f32 {
        self.attack.cooldown()
    }

    /// Returns the standing target order.
    #[must_use]
    pub fn target_order(&self) -> Option<TargetOrder> {
        self.attack.order()
    }

    /// Describes this unit as a target for others.
    #[must_use]
    pub fn as_target(&self) -> TargetInfo {
        TargetInfo {
            id: self.id,
            team: self.team,
            position: self.transform.position,
            height: self.transform.height,
            category: self.descriptor.category,
        }
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Orders the unit to move to `destination`. Ignored by wrecks.
    pub fn order_move(&mut self, destination: Vec2) {
        if !self.is_wreck() {
            self.motion.destination = Some(destination);
        }
    }

    /// Cancels the move order; the unit decelerates to a halt.
    pub fn stop(&mut self) {
        self.motion.destination = None;
    }

    /// Sets the standing target order. Ignored by wrecks and unarmed units.
    pub fn assign_target(&mut self, order: TargetOrder) {
        if !self.is_wreck() && self.descriptor.can_attack() {
            self.attack.set_order(order);
        }
    }

    /// Clears the standing target order.
    pub fn clear_target(&mut self) {
        self.attack.clear_order();
    }

    /// Points the turret at `aim`, or back along the hull with `None`.
    pub fn aim_turret(&mut self, aim: Option<Vec2>) {
        if !self.is_wreck() {
            self.turret.aim = aim;
        }
    }

    /// Reassigns the unit to `team` and reselects its visual. A wreck keeps
    /// its wreck image.
    pub fn set_team(&mut self, team: TeamId) {
        self.team = team;
        if !self.is_wreck() {
            self.visual = self.visuals.select_visual(team);
        }
    }

    // -------------------------------------------------------------------------
    // Per-tick behavior
    // -------------------------------------------------------------------------

    /// Moves the hull and turns the turret by `dt`.
    pub fn advance(&mut self, dt: f32) {
        if self.is_wreck() {
            return;
        }
        let d = &self.descriptor;
        kinematics::advance_hull(&mut self.transform, &mut self.motion, &d.movement, dt);
        kinematics::track_turret(&mut self.turret, &self.transform, &d.turret, dt);
    }

    /// Advances the attack cooldown by `dt`.
    pub fn tick(&mut self, dt: f32) -> AttackPhase {
        self.attack.tick(dt)
    }

    /// Returns `true` if this unit's weapon may engage `target`.
    ///
    /// Unarmed units engage nothing.
    #[must_use]
    pub fn can_engage(&self, target: &Target) -> bool {
        self.descriptor
            .attack
            .as_ref()
            .is_some_and(|params| attack::can_engage(params, target))
    }

    /// Returns `true` if `target` is within weapon range of the hull center.
    #[must_use]
    pub fn within_range(&self, target: &Target) -> bool {
        self.descriptor
            .attack
            .as_ref()
            .is_some_and(|params| attack::within_range(params, self.transform.position, target))
    }

    /// World position of the tip of the barrel.
    #[must_use]
    pub fn turret_end(&self) -> Vec2 {
        let pivot = kinematics::turret_pivot(&self.transform, &self.descriptor.turret);
        pivot + kinematics::direction(self.turret.direction) * self.descriptor.turret.barrel_length
    }

    /// Fires at `target`.
    ///
    /// Returns `None` without changing anything unless the unit is `Ready`,
    /// may engage the target, and has it in range. On success the cooldown
    /// is reset to the weapon's shoot delay.
    pub fn fire(&mut self, target: &Target) -> Option<ProjectileSpawnRequest> {
        let params = self.descriptor.attack.as_ref()?;
        if self.attack.phase() != AttackPhase::Ready
            || !attack::can_engage(params, target)
            || !attack::within_range(params, self.transform.position, target)
        {
            return None;
        }

        self.attack.start_cooldown(params.shoot_delay);
        Some(ProjectileSpawnRequest {
            source: self.id,
            team: self.team,
            origin: self.turret_end(),
            height: self.transform.height,
            direction: self.turret.direction,
            target: target.unit(),
            aim_point: target.position(),
            direct_damage: params.shot.direct_damage,
            lifetime: params.shot.lifetime,
            speed: params.shot.speed,
            visible: params.shot.visible,
            color: params.shot.color,
        })
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Wrecks the unit.
    ///
    /// The first call swaps in the wreck image, disables collision, lowers
    /// the draw layer, halts the hull and disarms the weapon. Later calls
    /// return `None` and change nothing.
    pub fn destroy(&mut self) -> Option<DestructionEffect> {
        if !self.life.wreck() {
            return None;
        }

        self.visual = self.visuals.wreck;
        self.motion = MotionState::default();
        self.turret.aim = None;
        self.attack.disarm();

        Some(DestructionEffect {
            unit: self.id,
            position: self.transform.position,
            height: self.transform.height,
            explosion: self.descriptor.destruction.explosion,
            sound: self.descriptor.destruction.sound.clone(),
        })
    }

    /// Subtracts `amount` hit points and wrecks the unit when they reach
    /// zero. Wrecks and non-positive amounts are ignored.
    pub fn apply_damage(&mut self, amount: f32) -> Option<DestructionEffect> {
        if self.is_wreck() || amount.is_nan() || amount <= 0.0 {
            return None;
        }
        if self.health.take(amount) {
            self.destroy()
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Draw
    // -------------------------------------------------------------------------

    /// Builds this unit's render request. Reads only.
    #[must_use]
    pub fn draw(&self) -> RenderRequest {
        RenderRequest {
            unit: self.id,
            kind: self.descriptor.kind,
            team: self.team,
            visual: self.visual,
            position: self.transform.position,
            height: self.transform.height,
            heading: self.transform.heading,
            turret_direction: (!self.is_wreck()).then_some(self.turret.direction),
            layer: self.life.draw_layer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TargetCategories;
    use crate::tests::{gun_boat, unit_of_kind};

    const EPS: f32 = 1e-4;

    fn naval_target(x: f32) -> Target {
        Target::Unit(TargetInfo {
            id: UnitId::new(99),
            team: TeamId::new(1).unwrap(),
            position: Vec2::new(x, 0.0),
            height: 0.0,
            category: TargetCategories::NAVAL,
        })
    }

    fn air_target(x: f32) -> Target {
        Target::Unit(TargetInfo {
            id: UnitId::new(98),
            team: TeamId::new(1).unwrap(),
            position: Vec2::new(x, 0.0),
            height: 20.0,
            category: TargetCategories::AIR,
        })
    }

    mod identity_tests {
        use super::*;

        #[test]
        fn unit_id_formats() {
            let id = UnitId::new(42);
            assert_eq!(format!("{id}"), "42");
            assert_eq!(format!("{id:?}"), "UnitId(42)");
            assert_eq!(u64::from(id), 42);
            assert_eq!(UnitId::from(7), UnitId::new(7));
        }

        #[test]
        fn unit_kind_serializes_snake_case() {
            for kind in UnitKind::ALL {
                let json = serde_json::to_string(kind).unwrap();
                assert_eq!(json, format!("\"{kind}\""));
                let back: UnitKind = serde_json::from_str(&json).unwrap();
                assert_eq!(back, *kind);
            }
        }
    }

    mod spawn_tests {
        use super::*;

        #[test]
        fn fresh_unit_state() {
            let boat = gun_boat(0, Vec2::new(10.0, 20.0));

            assert_eq!(boat.hp(), 170.0);
            assert_eq!(boat.max_hp(), 170.0);
            assert_eq!(boat.speed(), 0.0);
            assert!(boat.is_collidable());
            assert!(!boat.is_wreck());
            assert_eq!(boat.attack_phase(), AttackPhase::Ready);
            assert_eq!(boat.draw_layer(), DrawLayer::Surface);
            assert_eq!(boat.turret_direction(), boat.heading());
        }

        #[test]
        fn aircraft_spawn_at_altitude() {
            let gunship = unit_of_kind(UnitKind::Gunship, 0, Vec2::ZERO);
            assert!(gunship.height() > 0.0);
            assert_eq!(gunship.draw_layer(), DrawLayer::Air);
        }

        #[test]
        fn visual_follows_team() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            let team_visual = boat.visual();

            boat.set_team(TeamId::new(5).unwrap());

            assert_eq!(boat.team().as_u8(), 5);
            assert_ne!(boat.visual(), team_visual);
            assert_eq!(boat.visual(), boat.visuals.select_visual(boat.team()));
        }
    }

    mod fire_tests {
        use super::*;

        #[test]
        fn first_shot_succeeds_second_is_noop() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            let target = naval_target(100.0);

            let shot = boat.fire(&target).unwrap();
            assert_eq!(shot.direct_damage, 12.0);
            assert_eq!(shot.speed, 8.0);
            assert_eq!(shot.lifetime, 30.0);
            assert!(!shot.visible);
            assert_eq!(shot.target, Some(UnitId::new(99)));
            assert_eq!(boat.cooldown(), 60.0);
            assert_eq!(boat.attack_phase(), AttackPhase::Cooldown);

            assert!(boat.fire(&target).is_none());
            assert_eq!(boat.cooldown(), 60.0);
        }

        #[test]
        fn ready_again_after_ticks_cover_delay() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            let target = naval_target(100.0);
            boat.fire(&target).unwrap();

            for _ in 0..59 {
                assert_eq!(boat.tick(1.0), AttackPhase::Cooldown);
                assert!(boat.fire(&target).is_none());
            }
            assert_eq!(boat.tick(1.0), AttackPhase::Ready);
            assert!(boat.fire(&target).is_some());
        }

        #[test]
        fn out_of_range_leaves_state_untouched() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            assert!(boat.fire(&naval_target(121.0)).is_none());
            assert_eq!(boat.attack_phase(), AttackPhase::Ready);
            assert_eq!(boat.cooldown(), 0.0);
        }

        #[test]
        fn surface_unit_never_engages_aircraft() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            let close = air_target(10.0);
            assert!(!boat.can_engage(&close));
            assert!(boat.within_range(&close));
            assert!(boat.fire(&close).is_none());

            // still refused after a full cooldown cycle
            boat.fire(&naval_target(50.0)).unwrap();
            for _ in 0..60 {
                boat.tick(1.0);
            }
            assert_eq!(boat.attack_phase(), AttackPhase::Ready);
            assert!(!boat.can_engage(&close));
            assert!(boat.fire(&close).is_none());
        }

        #[test]
        fn missile_ship_engages_aircraft() {
            let ship = unit_of_kind(UnitKind::MissileShip, 0, Vec2::ZERO);
            assert!(ship.can_engage(&air_target(100.0)));
        }

        #[test]
        fn ground_shot_has_no_target_reference() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            let shot = boat.fire(&Target::Ground(Vec2::new(50.0, 0.0))).unwrap();
            assert!(shot.target.is_none());
            assert_eq!(shot.aim_point, Vec2::new(50.0, 0.0));
        }

        #[test]
        fn shot_leaves_from_turret_end() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            let turret = boat.descriptor().turret;
            let shot = boat.fire(&naval_target(100.0)).unwrap();

            let expected = turret.mount_offset + turret.barrel_length;
            assert!((shot.origin - Vec2::new(expected, 0.0)).length() < EPS);
            assert_eq!(shot.origin, boat.turret_end());
            assert_eq!(shot.direction, boat.turret_direction());
        }
    }

    mod movement_tests {
        use super::*;

        #[test]
        fn zero_dt_is_noop() {
            let mut boat = gun_boat(0, Vec2::new(5.0, 5.0));
            boat.order_move(Vec2::new(100.0, 100.0));
            boat.aim_turret(Some(Vec2::new(-50.0, 0.0)));
            let (pos, heading, speed, turret) =
                (boat.position(), boat.heading(), boat.speed(), boat.turret_direction());

            boat.advance(0.0);

            assert_eq!(boat.position(), pos);
            assert_eq!(boat.heading(), heading);
            assert_eq!(boat.speed(), speed);
            assert_eq!(boat.turret_direction(), turret);
        }

        #[test]
        fn turret_tracks_while_hull_moves_elsewhere() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            boat.order_move(Vec2::new(500.0, 0.0));
            boat.aim_turret(Some(Vec2::new(0.0, 100.0)));

            boat.advance(1.0);

            assert!(boat.heading().abs() < EPS);
            assert!(boat.turret_direction() > 80.0);
        }
    }

    mod destroy_tests {
        use super::*;

        #[test]
        fn destroy_is_idempotent() {
            let mut boat = gun_boat(0, Vec2::new(3.0, 4.0));
            boat.order_move(Vec2::new(100.0, 0.0));
            boat.advance(1.0);
            boat.assign_target(TargetOrder::Ground(Vec2::ONE));

            let effect = boat.destroy().unwrap();
            assert_eq!(effect.unit, boat.id());
            assert_eq!(effect.position, boat.position());
            assert!(boat.is_wreck());
            assert!(!boat.is_collidable());
            assert_eq!(boat.visual(), boat.visuals.wreck);
            assert_eq!(boat.draw_layer(), DrawLayer::Wreck);
            assert_eq!(boat.speed(), 0.0);
            assert!(boat.destination().is_none());
            assert!(boat.target_order().is_none());
            assert_eq!(boat.attack_phase(), AttackPhase::Idle);

            assert!(boat.destroy().is_none());
            assert!(!boat.is_collidable());
        }

        #[test]
        fn wreck_ignores_orders_and_team_visuals() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            boat.destroy();

            boat.order_move(Vec2::new(10.0, 0.0));
            boat.set_team(TeamId::new(2).unwrap());
            assert!(boat.fire(&naval_target(10.0)).is_none());

            assert!(boat.destination().is_none());
            assert_eq!(boat.visual(), boat.visuals.wreck);
            assert_eq!(boat.team().as_u8(), 2);
        }

        #[test]
        fn lethal_damage_destroys_once() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            assert!(boat.apply_damage(100.0).is_none());
            assert_eq!(boat.hp(), 70.0);

            assert!(boat.apply_damage(100.0).is_some());
            assert_eq!(boat.hp(), 0.0);
            assert!(boat.is_wreck());

            assert!(boat.apply_damage(100.0).is_none());
        }

        #[test]
        fn nan_or_negative_damage_is_ignored() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            assert!(boat.apply_damage(f32::NAN).is_none());
            assert!(boat.apply_damage(-5.0).is_none());
            assert!(boat.apply_damage(0.0).is_none());

            assert_eq!(boat.hp(), boat.max_hp());
            assert!(!boat.is_wreck());
        }

        #[test]
        fn wreck_draws_without_turret() {
            let mut boat = gun_boat(0, Vec2::ZERO);
            assert!(boat.draw().turret_direction.is_some());
            boat.destroy();
            let request = boat.draw();
            assert!(request.turret_direction.is_none());
            assert_eq!(request.layer, DrawLayer::Wreck);
            assert_eq!(request.visual, boat.visuals.wreck);
        }
    }
}
