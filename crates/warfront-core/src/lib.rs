//! # Warfront Core
//!
//! Unit combat-and-movement core for the Warfront RTS simulation.
//!
//! Every unit variant (gun boat, missile ship, gunship) runs the same code.
//! What differs is a [`UnitTypeDescriptor`]: movement rates, turret geometry,
//! weapon parameters, engagement categories and visuals. A unit is a shared
//! descriptor plus per-instance state components.
//!
//! ## Architecture
//!
//! - **Catalog**: load-once unit-type descriptors, built in or from JSON
//! - **Visuals**: load-once team-recolored images per kind
//! - **Units**: per-instance transform, motion, turret, health, attack and
//!   lifecycle state in an id-ordered [`Arena`]
//! - **Simulation**: update pass, output dispatch, then a read-only draw pass
//! - **Resolvers**: route queued outputs to the audio, effects and projectile
//!   services
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warfront_core::{Simulation, UnitTypeRegistry, UnitKind, TargetOrder};
//!
//! let mut sim = Simulation::load(UnitTypeRegistry::builtin(), &mut assets)?;
//! let boat = sim.spawn(UnitKind::GunBoat, team, Vec2::ZERO, 0.0)?;
//! sim.assign_target(boat, TargetOrder::Ground(Vec2::new(80.0, 0.0)))?;
//! sim.step(1.0, &mut services, &mut renderer);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod arena;
pub mod attack;
pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod kinematics;
pub mod lifecycle;
pub mod output;
pub mod resolver;
pub mod services;
pub mod simulation;
pub mod unit;
pub mod visual;

pub use arena::Arena;
pub use attack::{AttackPhase, ProjectileSpawnRequest, Target, TargetOrder};
pub use catalog::UnitTypeRegistry;
pub use descriptor::{TargetCategories, UnitTypeDescriptor};
pub use error::{ConfigError, SimError};
pub use lifecycle::DrawLayer;
pub use services::{RenderFrame, RenderRequest, Services};
pub use simulation::Simulation;
pub use unit::{UnitId, UnitInstance, UnitKind};
pub use visual::{TeamId, VisualHandle};

#[cfg(test)]
mod tests;
