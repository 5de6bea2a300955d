//! Test helpers: recording services, stub assets and unit factories.
//!
//! Every recorder keeps the calls it received in order so tests can compare
//! whole call logs, not just counts.

use std::sync::Arc;

use glam::Vec2;

use crate::attack::ProjectileSpawnRequest;
use crate::catalog::UnitTypeRegistry;
use crate::descriptor::{Argb, ExplosionSize, SoundId};
use crate::error::ConfigError;
use crate::output::{EffectRequest, SoundRequest};
use crate::services::{
    AssetService, AudioService, EffectsService, ProjectileSink, RenderFrame, Renderer, Services,
};
use crate::simulation::Simulation;
use crate::unit::{UnitId, UnitInstance, UnitKind};
use crate::visual::{TeamId, VisualHandle, VisualRegistry};

// =============================================================================
// Stub Assets
// =============================================================================

/// Asset service that hands out sequential handles.
#[derive(Debug, Default)]
pub struct StubAssets {
    next: u32,
    fail_on: Option<String>,
    /// Image names requested so far
    pub loaded: Vec<String>,
}

impl StubAssets {
    /// Stub that fails when asked for `image`.
    pub fn failing_on(image: &str) -> Self {
        Self {
            fail_on: Some(image.to_string()),
            ..Self::default()
        }
    }

    fn issue(&mut self) -> VisualHandle {
        self.next += 1;
        VisualHandle::new(self.next)
    }
}

impl AssetService for StubAssets {
    fn load_image(&mut self, image: &str) -> Result<VisualHandle, ConfigError> {
        if self.fail_on.as_deref() == Some(image) {
            return Err(ConfigError::Asset {
                image: image.to_string(),
                reason: "not found".to_string(),
            });
        }
        self.loaded.push(image.to_string());
        Ok(self.issue())
    }

    fn recolor_for_team(
        &mut self,
        _base: VisualHandle,
        _team: TeamId,
    ) -> Result<VisualHandle, ConfigError> {
        Ok(self.issue())
    }
}

// =============================================================================
// Recording Services
// =============================================================================

/// Records every sound played.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    /// Sounds, in call order
    pub sounds: Vec<SoundRequest>,
}

impl AudioService for RecordingAudio {
    fn play_sound(&mut self, sound: &SoundId, volume: f32, position: Vec2) {
        self.sounds.push(SoundRequest {
            sound: sound.clone(),
            volume,
            position,
        });
    }
}

/// Records every effect emitted.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    /// Effects, in call order
    pub effects: Vec<EffectRequest>,
}

impl EffectsService for RecordingEffects {
    fn emit_explosion(&mut self, position: Vec2, height: f32, size: ExplosionSize) {
        self.effects.push(EffectRequest::Explosion {
            position,
            height,
            size,
        });
    }

    fn emit_muzzle_flash(&mut self, position: Vec2, height: f32, direction: f32) {
        self.effects.push(EffectRequest::MuzzleFlash {
            position,
            height,
            direction,
        });
    }

    fn emit_light(&mut self, position: Vec2, height: f32, color: Argb) {
        self.effects.push(EffectRequest::Light {
            position,
            height,
            color,
        });
    }
}

/// Records every projectile spawned.
#[derive(Debug, Default)]
pub struct RecordingProjectiles {
    /// Requests, in call order
    pub spawned: Vec<ProjectileSpawnRequest>,
}

impl ProjectileSink for RecordingProjectiles {
    fn spawn_projectile(&mut self, request: ProjectileSpawnRequest) {
        self.spawned.push(request);
    }
}

/// The three per-tick recorders together.
#[derive(Debug, Default)]
pub struct ServiceRecorder {
    /// Audio log
    pub audio: RecordingAudio,
    /// Effects log
    pub effects: RecordingEffects,
    /// Projectile log
    pub projectiles: RecordingProjectiles,
}

impl ServiceRecorder {
    /// Borrows the recorders as a [`Services`] bundle.
    pub fn services(&mut self) -> Services<'_> {
        Services::new(&mut self.audio, &mut self.effects, &mut self.projectiles)
    }
}

/// Records every frame submitted.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Frames, in submission order
    pub frames: Vec<RenderFrame>,
}

impl Renderer for RecordingRenderer {
    fn submit(&mut self, frame: &RenderFrame) {
        self.frames.push(frame.clone());
    }
}

// =============================================================================
// Factories
// =============================================================================

/// Installs a test-writer subscriber so `tracing` output shows up under
/// `cargo test -- --nocapture`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Shorthand for a valid team id.
pub fn team(id: u8) -> TeamId {
    TeamId::new(id).unwrap()
}

/// Builds a unit of `kind` for team 0, heading 0, from the builtin catalog.
pub fn unit_of_kind(kind: UnitKind, id: u64, position: Vec2) -> UnitInstance {
    let units = UnitTypeRegistry::builtin();
    let visuals = VisualRegistry::load(&units, &mut StubAssets::default()).unwrap();
    UnitInstance::new(
        UnitId::new(id),
        Arc::clone(units.get(kind).unwrap()),
        Arc::clone(visuals.get(kind).unwrap()),
        team(0),
        position,
        0.0,
    )
}

/// Builds a gun boat for team 0 facing east.
pub fn gun_boat(id: u64, position: Vec2) -> UnitInstance {
    unit_of_kind(UnitKind::GunBoat, id, position)
}

/// An empty simulation over the builtin catalog and stub visuals.
pub fn test_simulation() -> Simulation {
    Simulation::load(UnitTypeRegistry::builtin(), &mut StubAssets::default()).unwrap()
}

/// Steps `sim` `ticks` times with `dt`, recording everything.
pub fn run_recorded(
    sim: &mut Simulation,
    ticks: usize,
    dt: f32,
) -> (ServiceRecorder, RecordingRenderer) {
    let mut recorder = ServiceRecorder::default();
    let mut renderer = RecordingRenderer::default();
    for _ in 0..ticks {
        sim.step(dt, &mut recorder.services(), &mut renderer);
    }
    (recorder, renderer)
}
