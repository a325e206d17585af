use glam::Vec3;
use hecs::Entity;

use crate::components::CollisionChannel;

/// Result of a blocking segment trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub point: Vec3,
    /// Distance from the trace start to `point`.
    pub distance: f32,
    pub entity: Option<Entity>,
}

/// Segment occlusion service: "is there geometry between `start` and `end`
/// on `channel`", answering with the nearest hit.
pub trait OcclusionQuery {
    fn trace(&self, start: Vec3, end: Vec3, channel: CollisionChannel) -> Option<TraceHit>;

    fn is_blocked(&self, start: Vec3, end: Vec3, channel: CollisionChannel) -> bool {
        self.trace(start, end, channel).is_some()
    }
}

impl<T: OcclusionQuery + ?Sized> OcclusionQuery for &T {
    fn trace(&self, start: Vec3, end: Vec3, channel: CollisionChannel) -> Option<TraceHit> {
        (**self).trace(start, end, channel)
    }
}

/// Occlusion service for scenes with no geometry at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcclusion;

impl OcclusionQuery for NoOcclusion {
    fn trace(&self, _start: Vec3, _end: Vec3, _channel: CollisionChannel) -> Option<TraceHit> {
        None
    }
}
