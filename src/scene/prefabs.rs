use glam::Vec3;
use hecs::{Entity, World};

use crate::components::*;

/// Player capsule proportions, in centimetres.
const PLAYER_RADIUS: f32 = 34.0;
const PLAYER_HEIGHT: f32 = 184.0;

/// Spawn the infinite ground plane at `height`. Blocks every channel.
pub fn spawn_ground(world: &mut World, height: f32) -> Entity {
    world.spawn((
        LocalTransform::new(Vec3::new(0.0, height, 0.0)),
        Collider::Plane {
            normal: Vec3::Y,
            offset: height,
        },
        Occluder(ChannelMask::ALL),
    ))
}

/// Spawn a static axis-aligned box. `pos` is the world-space center.
pub fn spawn_static_box(
    world: &mut World,
    pos: Vec3,
    half_extents: Vec3,
    blocks: ChannelMask,
) -> Entity {
    world.spawn((
        LocalTransform::new(pos),
        Collider::Box { half_extents },
        Occluder(blocks),
    ))
}

/// Spawn the player. Its collider is not an occluder, so traces aimed at the
/// player are never blocked by the player's own body.
pub fn spawn_player(world: &mut World, pos: Vec3) -> Entity {
    world.spawn((
        LocalTransform::new(pos),
        Collider::Capsule {
            radius: PLAYER_RADIUS,
            height: PLAYER_HEIGHT,
        },
        Player,
    ))
}

/// Spawn a directional light (sun-like, no position).
pub fn spawn_directional_light(world: &mut World, direction: Vec3, intensity: f32) -> Entity {
    world.spawn((LightSource::directional(intensity, direction),))
}

/// Spawn a point light at `pos`.
pub fn spawn_point_light(world: &mut World, pos: Vec3, intensity: f32, radius: f32) -> Entity {
    world.spawn((LocalTransform::new(pos), LightSource::point(intensity, radius)))
}

/// Spawn a spot light at `pos` pointing in `direction`.
pub fn spawn_spot_light(
    world: &mut World,
    pos: Vec3,
    direction: Vec3,
    intensity: f32,
    inner_deg: f32,
    outer_deg: f32,
    radius: f32,
) -> Entity {
    world.spawn((
        LocalTransform::new(pos),
        LightSource::spot(intensity, radius, direction, inner_deg, outer_deg),
    ))
}

/// Spawn a rectangular area light centred at `pos`.
pub fn spawn_rect_light(world: &mut World, pos: Vec3, intensity: f32, rect: RectLight) -> Entity {
    world.spawn((LocalTransform::new(pos), LightSource::rect(intensity, rect)))
}
