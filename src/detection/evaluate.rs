//! Per-light contribution tests.
//!
//! Every evaluator answers one question for one light: does it reach the
//! detection point this pass, and if so what does it add. Skips are plain
//! outcomes, never errors, and never affect the other lights.

use std::f32::consts::PI;

use glam::Vec3;
use log::trace;

use crate::components::{
    CollisionChannel, DirectionalLight, LightKind, LightSource, PointLight, RectLight, SpotLight,
};
use crate::detection::config::{ContributionMode, DetectionConfig};
use crate::detection::diagnostics::{DebugChannel, DiagnosticsSink};
use crate::detection::frustum::{
    BoundingPlanes, RectFrustum, FAR_BOTTOM_RIGHT, FAR_TOP_LEFT, NEAR_BOTTOM_LEFT,
    NEAR_BOTTOM_RIGHT, NEAR_TOP_LEFT, NEAR_TOP_RIGHT,
};
use crate::detection::occlusion::OcclusionQuery;

pub const CENTIMETRES_TO_METRES: f32 = 0.01;
/// Photometric terms divide by distance; clamp so a light on the point stays finite.
const MIN_PHOTOMETRIC_DISTANCE: f32 = 0.01;
/// How far behind the player the directional light is placed for its trace.
pub const DIRECTIONAL_TRACE_DISTANCE: f32 = 5000.0;

/// Per-pass inputs shared by every evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionContext {
    pub player_position: Vec3,
    pub detection_point: Vec3,
    pub forgiveness_buffer: f32,
}

impl DetectionContext {
    /// The buffer is added to the squared radius as-is.
    fn in_range(&self, distance_sq: f32, range: f32) -> bool {
        distance_sq <= range * range + self.forgiveness_buffer
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contribution {
    /// Replace the total with [`Illuminance::LIT`].
    Lit,
    /// Add to the total.
    Add(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Invisible,
    NoIntensity,
    OutOfRange,
    OutsideCone,
    Occluded,
    OutsideBeam,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Contributes(Contribution),
    Skipped(SkipReason),
}

/// Running illuminance total for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Illuminance(f32);

impl Illuminance {
    pub const LIT: f32 = 1.0;

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn apply(&mut self, contribution: Contribution) {
        match contribution {
            Contribution::Lit => self.0 = Self::LIT,
            Contribution::Add(amount) => self.0 += amount,
        }
    }
}

fn metres(distance: f32) -> f32 {
    (distance * CENTIMETRES_TO_METRES).max(MIN_PHOTOMETRIC_DISTANCE)
}

pub struct LightEvaluator<'a> {
    pub ctx: &'a DetectionContext,
    pub config: &'a DetectionConfig,
    pub occlusion: &'a dyn OcclusionQuery,
    pub diagnostics: &'a mut dyn DiagnosticsSink,
}

impl<'a> LightEvaluator<'a> {
    /// `position` is the light's world position; directional lights ignore it.
    pub fn evaluate(&mut self, light: &LightSource, position: Vec3) -> Outcome {
        match &light.kind {
            LightKind::Point(point) => self.point(light, point, position),
            LightKind::Spot(spot) => self.spot(light, spot, position),
            LightKind::Rect(rect) => self.rect(light, rect, position),
            LightKind::Directional(dir) => self.directional(light, dir),
        }
    }

    fn sink(&mut self, channel: DebugChannel) -> Option<&mut (dyn DiagnosticsSink + 'a)> {
        if self.config.debug.enabled(channel) {
            Some(&mut *self.diagnostics)
        } else {
            None
        }
    }

    fn point(&mut self, light: &LightSource, point: &PointLight, position: Vec3) -> Outcome {
        if !light.visible {
            return Outcome::Skipped(SkipReason::Invisible);
        }
        if light.intensity <= 0.0 {
            return Outcome::Skipped(SkipReason::NoIntensity);
        }

        let target = self.ctx.detection_point;
        if let Some(sink) = self.sink(DebugChannel::Point) {
            sink.line(DebugChannel::Point, position, target);
        }

        let distance_sq = position.distance_squared(target);
        if !self.ctx.in_range(distance_sq, point.attenuation_radius) {
            return Outcome::Skipped(SkipReason::OutOfRange);
        }

        if self.config.occlude_point_lights
            && self.occlusion.is_blocked(position, target, CollisionChannel::Ground)
        {
            return Outcome::Skipped(SkipReason::Occluded);
        }

        let contribution = match self.config.mode {
            ContributionMode::Binary => Contribution::Lit,
            ContributionMode::Photometric => {
                Contribution::Add(light.intensity / (4.0 * PI * metres(distance_sq.sqrt())))
            }
        };
        Outcome::Contributes(contribution)
    }

    fn spot(&mut self, light: &LightSource, spot: &SpotLight, position: Vec3) -> Outcome {
        if !light.visible {
            return Outcome::Skipped(SkipReason::Invisible);
        }

        let target = self.ctx.detection_point;
        let displacement = target - position;
        if let Some(sink) = self.sink(DebugChannel::Spot) {
            sink.line(DebugChannel::Spot, position, target);
        }

        // A point sitting on the light counts as on-axis.
        let distance_sq = displacement.length_squared();
        let distance = distance_sq.sqrt();
        let cos_between = if distance > 0.0 {
            (displacement.dot(spot.direction) / distance).clamp(-1.0, 1.0)
        } else {
            1.0
        };
        let outer_rad = spot.outer_cone_deg.to_radians();
        let cone_height = spot.attenuation_radius * (outer_rad.cos() / cos_between);
        if !self.ctx.in_range(distance_sq, cone_height) {
            return Outcome::Skipped(SkipReason::OutOfRange);
        }

        let to_target = displacement.try_normalize().unwrap_or(spot.direction);
        let angle_deg = spot.direction.dot(to_target).clamp(-1.0, 1.0).acos().to_degrees();
        if angle_deg > spot.outer_cone_deg {
            return Outcome::Skipped(SkipReason::OutsideCone);
        }

        if let Some(hit) = self.occlusion.trace(position, target, CollisionChannel::Ground) {
            trace!("spot light at {position} blocked by {:?} at {}", hit.entity, hit.point);
            if let Some(sink) = self.sink(DebugChannel::Spot) {
                sink.message(DebugChannel::Spot, &format!("blocked by {:?}", hit.entity));
            }
            return Outcome::Skipped(SkipReason::Occluded);
        }
        if light.intensity <= 0.0 {
            return Outcome::Skipped(SkipReason::NoIntensity);
        }

        let contribution = match self.config.mode {
            ContributionMode::Binary => Contribution::Lit,
            ContributionMode::Photometric => {
                let mut power = light.intensity;
                let penumbra = spot.outer_cone_deg - spot.inner_cone_deg;
                if angle_deg > spot.inner_cone_deg && penumbra > 0.0 {
                    power *= 1.0 - (angle_deg - spot.inner_cone_deg) / penumbra;
                }
                // Cap area of the cone's spherical sector at this distance.
                let sector = (2.0 * PI * (1.0 - outer_rad.cos())).max(f32::EPSILON);
                Contribution::Add(power / (sector * metres(distance)))
            }
        };
        Outcome::Contributes(contribution)
    }

    fn rect(&mut self, light: &LightSource, rect: &RectLight, position: Vec3) -> Outcome {
        if !light.visible {
            return Outcome::Skipped(SkipReason::Invisible);
        }

        let target = self.ctx.detection_point;
        let distance_sq = position.distance_squared(target);
        if !self.ctx.in_range(distance_sq, rect.attenuation_radius) {
            return Outcome::Skipped(SkipReason::OutOfRange);
        }
        if self.occlusion.is_blocked(position, target, CollisionChannel::Ground) {
            return Outcome::Skipped(SkipReason::Occluded);
        }

        // Size and barn doors may change at runtime, so the beam is rebuilt every pass.
        let frustum = RectFrustum::build(position, rect);
        let planes = BoundingPlanes::from_frustum(&frustum);

        if let Some(sink) = self.sink(DebugChannel::Rect) {
            let c = &frustum.corners;
            for corner in c {
                sink.point(DebugChannel::Rect, *corner);
            }
            sink.plane(DebugChannel::Rect, &planes.top, (c[NEAR_BOTTOM_RIGHT] + c[NEAR_BOTTOM_LEFT]) * 0.5);
            sink.plane(DebugChannel::Rect, &planes.right, (c[NEAR_TOP_LEFT] + c[NEAR_BOTTOM_LEFT]) * 0.5);
            sink.plane(DebugChannel::Rect, &planes.bottom, (c[NEAR_TOP_LEFT] + c[NEAR_TOP_RIGHT]) * 0.5);
            sink.plane(DebugChannel::Rect, &planes.left, (c[NEAR_TOP_RIGHT] + c[NEAR_BOTTOM_RIGHT]) * 0.5);
            sink.line(DebugChannel::Rect, position, target);
            trace!("rect beam far corners {} .. {}", c[FAR_TOP_LEFT], c[FAR_BOTTOM_RIGHT]);
        }

        if !planes.contains(target) {
            return Outcome::Skipped(SkipReason::OutsideBeam);
        }
        Outcome::Contributes(Contribution::Add(
            light.intensity / (2.0 * PI * metres(distance_sq.sqrt())),
        ))
    }

    fn directional(&mut self, light: &LightSource, dir: &DirectionalLight) -> Outcome {
        if !light.visible {
            return Outcome::Skipped(SkipReason::Invisible);
        }

        let player = self.ctx.player_position;
        let origin = player - dir.direction * DIRECTIONAL_TRACE_DISTANCE;
        if let Some(sink) = self.sink(DebugChannel::Directional) {
            sink.line(DebugChannel::Directional, origin, player);
        }

        if self.occlusion.is_blocked(origin, player, CollisionChannel::Visibility) {
            return Outcome::Skipped(SkipReason::Occluded);
        }
        Outcome::Contributes(Contribution::Add(light.intensity))
    }
}
