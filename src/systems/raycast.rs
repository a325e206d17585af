use glam::Vec3;
use hecs::World;

use crate::components::{Collider, CollisionChannel, LocalTransform, Occluder};
use crate::detection::occlusion::{OcclusionQuery, TraceHit};

/// Segment traces against every `Occluder` collider in a world.
pub struct WorldOcclusion<'w> {
    world: &'w World,
}

impl<'w> WorldOcclusion<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }
}

impl OcclusionQuery for WorldOcclusion<'_> {
    /// Nearest hit strictly after `start` and no further than `end`.
    fn trace(&self, start: Vec3, end: Vec3, channel: CollisionChannel) -> Option<TraceHit> {
        let segment = end - start;
        let max_distance = segment.length();
        // Zero-length segment: nothing can lie between the endpoints.
        let dir = segment.try_normalize()?;
        let mut best: Option<TraceHit> = None;

        for (entity, (occluder, collider, transform)) in self
            .world
            .query::<(&Occluder, &Collider, &LocalTransform)>()
            .iter()
        {
            if !occluder.0.contains(channel) {
                continue;
            }
            let center = transform.position;

            let t = match collider {
                Collider::Sphere { radius } => ray_sphere_intersection(start, dir, center, *radius),
                Collider::Capsule { radius, height } => {
                    ray_capsule_intersection(start, dir, center, *radius, *height)
                }
                Collider::Box { half_extents } => {
                    ray_aabb_intersection(start, dir, center, *half_extents)
                }
                Collider::Plane { normal, offset } => {
                    ray_plane_intersection(start, dir, *normal, *offset)
                }
            };

            if let Some(t) = t {
                if t > 0.0 && t <= max_distance {
                    let is_closer = best.as_ref().map_or(true, |b| t < b.distance);
                    if is_closer {
                        best = Some(TraceHit {
                            point: start + dir * t,
                            distance: t,
                            entity: Some(entity),
                        });
                    }
                }
            }
        }

        best
    }
}

fn ray_sphere_intersection(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let a = dir.dot(dir);
    let b = 2.0 * oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 > 0.0 {
        Some(t1)
    } else if t2 > 0.0 {
        Some(t2)
    } else {
        None
    }
}

fn ray_capsule_intersection(
    origin: Vec3,
    dir: Vec3,
    center: Vec3,
    radius: f32,
    height: f32,
) -> Option<f32> {
    let half_h = height * 0.5;
    let top = center + Vec3::Y * half_h;
    let bottom = center - Vec3::Y * half_h;

    // Three spheres along the axis: coarse, but enough for a pillar or a body.
    [
        ray_sphere_intersection(origin, dir, top, radius),
        ray_sphere_intersection(origin, dir, bottom, radius),
        ray_sphere_intersection(origin, dir, center, radius),
    ]
    .into_iter()
    .flatten()
    .filter(|t| *t > 0.0)
    .reduce(f32::min)
}

fn ray_aabb_intersection(origin: Vec3, dir: Vec3, center: Vec3, half: Vec3) -> Option<f32> {
    let min = center - half;
    let max = center + half;
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d.abs() < 1e-8 {
            // Parallel to this slab: either inside it for the whole ray or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
    }

    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    // Origin inside the box: report the exit.
    Some(if tmin < 0.0 { tmax } else { tmin })
}

fn ray_plane_intersection(origin: Vec3, dir: Vec3, normal: Vec3, offset: f32) -> Option<f32> {
    let denom = normal.dot(dir);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (offset - normal.dot(origin)) / denom;
    (t > 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::components::ChannelMask;

    fn ground_only() -> Occluder {
        Occluder(ChannelMask::only(CollisionChannel::Ground))
    }

    #[test]
    fn sphere_between_endpoints_blocks() {
        let mut world = World::new();
        let ball = world.spawn((
            LocalTransform::new(Vec3::new(0.0, 50.0, 0.0)),
            Collider::Sphere { radius: 10.0 },
            ground_only(),
        ));
        let occlusion = WorldOcclusion::new(&world);
        let hit = occlusion
            .trace(Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO, CollisionChannel::Ground)
            .expect("sphere should block");
        assert_eq!(hit.entity, Some(ball));
        assert_abs_diff_eq!(hit.distance, 40.0, epsilon = 1e-3);
        assert!(hit.point.abs_diff_eq(Vec3::new(0.0, 60.0, 0.0), 1e-3));
    }

    #[test]
    fn geometry_beyond_the_segment_does_not_block() {
        let mut world = World::new();
        world.spawn((
            LocalTransform::new(Vec3::new(0.0, -50.0, 0.0)),
            Collider::Sphere { radius: 10.0 },
            ground_only(),
        ));
        let occlusion = WorldOcclusion::new(&world);
        assert!(!occlusion.is_blocked(Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO, CollisionChannel::Ground));
    }

    #[test]
    fn channels_filter_occluders() {
        let mut world = World::new();
        world.spawn((
            LocalTransform::new(Vec3::new(0.0, 50.0, 0.0)),
            Collider::Box { half_extents: Vec3::splat(10.0) },
            Occluder(ChannelMask::only(CollisionChannel::Visibility)),
        ));
        // No Occluder at all: never traced.
        world.spawn((
            LocalTransform::new(Vec3::new(0.0, 30.0, 0.0)),
            Collider::Sphere { radius: 10.0 },
        ));
        let occlusion = WorldOcclusion::new(&world);
        let a = Vec3::new(0.5, 100.0, 0.5);
        let b = Vec3::new(0.5, 0.0, 0.5);
        assert!(!occlusion.is_blocked(a, b, CollisionChannel::Ground));
        assert!(occlusion.is_blocked(a, b, CollisionChannel::Visibility));
    }

    #[test]
    fn nearest_hit_wins() {
        let mut world = World::new();
        world.spawn((
            LocalTransform::new(Vec3::new(0.0, 20.0, 0.0)),
            Collider::Sphere { radius: 5.0 },
            ground_only(),
        ));
        let near = world.spawn((
            LocalTransform::new(Vec3::new(0.0, 70.0, 0.0)),
            Collider::Capsule { radius: 5.0, height: 10.0 },
            ground_only(),
        ));
        let occlusion = WorldOcclusion::new(&world);
        let hit = occlusion
            .trace(Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO, CollisionChannel::Ground)
            .unwrap();
        assert_eq!(hit.entity, Some(near));
        // Top sphere of the capsule sits at y = 75, radius 5.
        assert_abs_diff_eq!(hit.distance, 20.0, epsilon = 1e-3);
    }

    #[test]
    fn ground_plane_catches_downward_probe() {
        let mut world = World::new();
        world.spawn((
            LocalTransform::new(Vec3::ZERO),
            Collider::Plane { normal: Vec3::Y, offset: 0.0 },
            ground_only(),
        ));
        let occlusion = WorldOcclusion::new(&world);
        let hit = occlusion
            .trace(Vec3::new(4.0, 95.0, 4.0), Vec3::new(4.0, -5.0, 4.0), CollisionChannel::Ground)
            .unwrap();
        assert!(hit.point.abs_diff_eq(Vec3::new(4.0, 0.0, 4.0), 1e-3));
        // Parallel to the plane: no hit.
        assert!(!occlusion.is_blocked(Vec3::new(0.0, 10.0, 0.0), Vec3::new(100.0, 10.0, 0.0), CollisionChannel::Ground));
    }

    #[test]
    fn vertical_trace_along_box_face_hits() {
        let mut world = World::new();
        let block = world.spawn((
            LocalTransform::new(Vec3::new(0.0, 50.0, 0.0)),
            Collider::Box { half_extents: Vec3::splat(10.0) },
            ground_only(),
        ));
        let occlusion = WorldOcclusion::new(&world);
        // x sits exactly on the +x face, z exactly on the box centre.
        let hit = occlusion
            .trace(Vec3::new(10.0, 100.0, 0.0), Vec3::new(10.0, 0.0, 0.0), CollisionChannel::Ground)
            .unwrap();
        assert_eq!(hit.entity, Some(block));
        assert_abs_diff_eq!(hit.distance, 40.0, epsilon = 1e-3);
        assert!(!occlusion.is_blocked(
            Vec3::new(10.5, 100.0, 0.0),
            Vec3::new(10.5, 0.0, 0.0),
            CollisionChannel::Ground
        ));
    }

    #[test]
    fn zero_length_trace_is_clear() {
        let mut world = World::new();
        world.spawn((
            LocalTransform::new(Vec3::ZERO),
            Collider::Sphere { radius: 10.0 },
            ground_only(),
        ));
        let occlusion = WorldOcclusion::new(&world);
        assert!(!occlusion.is_blocked(Vec3::ZERO, Vec3::ZERO, CollisionChannel::Ground));
    }
}
