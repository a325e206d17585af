use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, trace, warn};

use crate::components::{CollisionChannel, LightKindTag, LightSource, LocalTransform, Player};
use crate::detection::config::DetectionConfig;
use crate::detection::diagnostics::{DebugChannel, DiagnosticsSink};
use crate::detection::evaluate::{DetectionContext, Illuminance, LightEvaluator, Outcome};
use crate::detection::occlusion::OcclusionQuery;
use crate::detection::registry::LightRegistry;
use crate::engine::time::FixedRateGate;
use crate::error::DetectionError;

/// Length of the downward floor probe from the player origin.
pub const FLOOR_PROBE_DISTANCE: f32 = 100.0;
/// A floor hit closer than this counts as standing on it.
pub const FLOOR_STANDING_DISTANCE: f32 = 98.0;
/// Detection point height above a detected floor.
pub const FLOOR_DETECTION_RAISE: f32 = 10.0;
/// Approximate feet height below the player origin when no floor is found.
pub const FEET_OFFSET: f32 = 93.98;

/// Pick the point light exposure is measured at: just above the floor under
/// the player, or the approximate feet position when airborne.
pub fn probe_detection_point(player: Vec3, occlusion: &dyn OcclusionQuery) -> Vec3 {
    let probe_end = player - Vec3::Y * FLOOR_PROBE_DISTANCE;
    match occlusion.trace(player, probe_end, CollisionChannel::Ground) {
        Some(hit) if hit.point.distance(player) < FLOOR_STANDING_DISTANCE => {
            trace!("floor distance: {}", hit.point.distance(player));
            hit.point + Vec3::Y * FLOOR_DETECTION_RAISE
        }
        _ => {
            trace!("no floor under player");
            player - Vec3::Y * FEET_OFFSET
        }
    }
}

/// Fixed-rate light exposure meter for the player.
pub struct LightDetector {
    config: DetectionConfig,
    registry: LightRegistry,
    player: Entity,
    gate: FixedRateGate,
    illuminance: f32,
    detection_point: Option<Vec3>,
}

impl LightDetector {
    /// Find the player, scan the world for lights and arm the update gate.
    pub fn new(world: &World, config: DetectionConfig) -> Result<Self, DetectionError> {
        let player = world
            .query::<(&Player, &LocalTransform)>()
            .iter()
            .map(|(entity, _)| entity)
            .next()
            .ok_or(DetectionError::MissingPlayer)?;
        Self::with_player(world, player, config)
    }

    pub fn with_player(
        world: &World,
        player: Entity,
        config: DetectionConfig,
    ) -> Result<Self, DetectionError> {
        config.validate()?;
        if world.get::<&LocalTransform>(player).is_err() {
            return Err(DetectionError::MissingPlayer);
        }

        let mut registry = LightRegistry::new();
        let found = registry.discover(world, config.discovery);
        debug!("light detector tracking {found} lights for player {player:?}");

        Ok(Self {
            gate: FixedRateGate::new(config.update_frequency),
            config,
            registry,
            player,
            illuminance: 0.0,
            detection_point: None,
        })
    }

    /// Last published illuminance total.
    pub fn illuminance(&self) -> f32 {
        self.illuminance
    }

    /// Detection point used by the last pass, if one ran.
    pub fn detection_point(&self) -> Option<Vec3> {
        self.detection_point
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn registry(&self) -> &LightRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LightRegistry {
        &mut self.registry
    }

    pub fn set_update_frequency(&mut self, frequency: f32) -> Result<(), DetectionError> {
        let next = DetectionConfig {
            update_frequency: frequency,
            ..self.config.clone()
        };
        next.validate()?;
        self.config = next;
        self.gate.set_frequency(frequency);
        Ok(())
    }

    pub fn set_forgiveness_buffer(&mut self, buffer: f32) -> Result<(), DetectionError> {
        let next = DetectionConfig {
            forgiveness_buffer: buffer,
            ..self.config.clone()
        };
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// Advance by one host frame. Returns the new total when a pass ran.
    pub fn tick(
        &mut self,
        world: &World,
        dt: f32,
        occlusion: &dyn OcclusionQuery,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> Option<f32> {
        if self.gate.advance(dt) {
            Some(self.update_detection(world, occlusion, diagnostics))
        } else {
            None
        }
    }

    /// Run one full detection pass and publish its total.
    pub fn update_detection(
        &mut self,
        world: &World,
        occlusion: &dyn OcclusionQuery,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> f32 {
        self.illuminance = 0.0;

        let player_position = match world.get::<&LocalTransform>(self.player) {
            Ok(transform) => transform.position,
            Err(_) => {
                warn!("player {:?} is gone, skipping light detection", self.player);
                self.detection_point = None;
                return self.illuminance;
            }
        };

        let ctx = DetectionContext {
            player_position,
            detection_point: probe_detection_point(player_position, occlusion),
            forgiveness_buffer: self.config.forgiveness_buffer,
        };

        let mut total = Illuminance::default();
        let mut evaluator = LightEvaluator {
            ctx: &ctx,
            config: &self.config,
            occlusion,
            diagnostics: &mut *diagnostics,
        };
        for (tag, entity) in self.registry.iter() {
            let enabled = match tag {
                LightKindTag::Point | LightKindTag::Spot => true,
                LightKindTag::Rect => self.config.evaluate_rect_lights,
                LightKindTag::Directional => self.config.evaluate_directional_light,
            };
            if !enabled {
                continue;
            }

            let Ok(light) = world.get::<&LightSource>(entity) else {
                trace!("light {entity:?} no longer exists");
                continue;
            };
            let position = match world.get::<&LocalTransform>(entity) {
                Ok(transform) => transform.position,
                Err(_) if tag == LightKindTag::Directional => Vec3::ZERO,
                Err(_) => {
                    trace!("{tag:?} light {entity:?} has no transform");
                    continue;
                }
            };

            match evaluator.evaluate(&light, position) {
                Outcome::Contributes(contribution) => {
                    trace!("{tag:?} light {entity:?} contributes {contribution:?}");
                    total.apply(contribution);
                }
                Outcome::Skipped(reason) => {
                    trace!("{tag:?} light {entity:?} skipped: {reason:?}");
                }
            }
        }

        self.illuminance = total.value();
        self.detection_point = Some(ctx.detection_point);

        if self.config.debug.enabled(DebugChannel::Total) {
            diagnostics.message(
                DebugChannel::Total,
                &format!("Current Intensity Total: {}", self.illuminance),
            );
        }
        self.illuminance
    }
}
