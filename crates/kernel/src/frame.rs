use glam::Vec3;
use std::time::Instant;
use terrawalk_common::{PlayerConfig, TerrainScale, WalkConfig};
use terrawalk_input::InputIntent;
use terrawalk_terrain::{ElevationField, HeightSampler};

use crate::clock::{FrameClock, FrameStats};
use crate::controller::CharacterController;
use crate::player::{Contact, PlayerState};

/// Outcome of one frame, for the renderer and the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Integration step actually used, after clamping.
    pub dt: f32,
    /// False when the look collaborator was inactive and the controller was skipped.
    pub simulated: bool,
    pub position: Vec3,
    pub contact: Contact,
}

/// Drives the character controller once per displayed frame.
///
/// Owns the elevation field, so a loop cannot exist before the field has been
/// loaded. Rendering is left to the caller; this only advances the simulation.
#[derive(Debug)]
pub struct FrameLoop {
    field: ElevationField,
    scale: TerrainScale,
    controller: CharacterController,
    player: PlayerState,
    clock: FrameClock,
    stats: FrameStats,
    frame: u64,
}

impl FrameLoop {
    pub fn new(field: ElevationField, scale: TerrainScale, player: PlayerConfig) -> Self {
        let spawn = PlayerState::spawn(player.spawn);
        tracing::info!(
            size = field.size(),
            world_size = scale.world_size,
            spawn = %player.spawn,
            "frame loop ready"
        );
        Self {
            field,
            scale,
            controller: CharacterController::new(player),
            player: spawn,
            clock: FrameClock::new(),
            stats: FrameStats::default(),
            frame: 0,
        }
    }

    pub fn from_config(field: ElevationField, config: &WalkConfig) -> Self {
        Self::new(field, config.terrain.scale(), config.player.clone())
    }

    /// Run one frame at wall-clock time `now`.
    ///
    /// The elapsed time since the previous frame is clamped before integration.
    /// When `active` is false (pointer not captured) the clock still advances but
    /// the player is left untouched.
    pub fn advance(&mut self, now: Instant, input: &InputIntent, active: bool) -> FrameReport {
        let elapsed = self.clock.tick(now);
        // The first tick has nothing to measure against.
        if !elapsed.is_zero() {
            self.stats.record(elapsed);
        }
        self.step(elapsed.as_secs_f32(), input, active)
    }

    /// Run one frame with an explicit step, e.g. for headless simulation.
    pub fn step(&mut self, dt: f32, input: &InputIntent, active: bool) -> FrameReport {
        self.frame += 1;
        let _span = tracing::info_span!("frame", frame = self.frame).entered();
        let dt = self.controller.clamp_dt(dt);

        if active {
            let sampler = HeightSampler::new(&self.field, self.scale);
            self.controller
                .update(&mut self.player, input, &sampler, dt);
        }

        tracing::trace!(
            dt,
            active,
            position = %self.player.position,
            contact = %self.player.contact,
            "frame complete"
        );

        FrameReport {
            frame: self.frame,
            dt,
            simulated: active,
            position: self.player.position,
            contact: self.player.contact,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Put the player back at `position`, airborne and at rest.
    pub fn respawn(&mut self, position: Vec3) {
        tracing::debug!(%position, "respawn");
        self.player = PlayerState::spawn(position);
    }

    pub fn field(&self) -> &ElevationField {
        &self.field
    }

    pub fn scale(&self) -> &TerrainScale {
        &self.scale
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Ground elevation under a world position.
    pub fn ground_height(&self, x: f32, z: f32) -> f32 {
        HeightSampler::new(&self.field, self.scale).sample(x, z)
    }
}
