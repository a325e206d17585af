use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{ChannelMask, CollisionChannel, Patrol, RectLight};
use crate::scene::prefabs::{
    spawn_directional_light, spawn_ground, spawn_player, spawn_point_light, spawn_rect_light,
    spawn_spot_light, spawn_static_box,
};

/// Player origin height above the floor while standing.
pub const PLAYER_STANDING_HEIGHT: f32 = 92.0;

/// Build a corridor the player patrols through: a lamp, a spot light
/// shadowed by a pillar, a wall panel and an awning against the sun.
/// Returns the player entity.
pub fn load_test_scene(world: &mut World) -> Entity {
    spawn_ground(world, 0.0);

    // Pillar between the spot light and the middle of the corridor.
    spawn_static_box(
        world,
        Vec3::new(-350.0, 150.0, 0.0),
        Vec3::new(30.0, 150.0, 30.0),
        ChannelMask::ALL,
    );
    // Awning over the east end; only the sun's visibility traces care.
    spawn_static_box(
        world,
        Vec3::new(600.0, 320.0, 0.0),
        Vec3::new(250.0, 10.0, 200.0),
        ChannelMask::only(CollisionChannel::Visibility),
    );

    let start = Vec3::new(-900.0, PLAYER_STANDING_HEIGHT, 0.0);
    let end = Vec3::new(900.0, PLAYER_STANDING_HEIGHT, 0.0);
    let player = spawn_player(world, start);
    let _ = world.insert_one(player, Patrol::new(start, end, 300.0));

    spawn_point_light(world, Vec3::new(300.0, 250.0, 0.0), 8.0, 350.0);
    spawn_spot_light(
        world,
        Vec3::new(-500.0, 400.0, 0.0),
        Vec3::new(0.3, -1.0, 0.0),
        12.0,
        20.0,
        35.0,
        900.0,
    );
    spawn_rect_light(
        world,
        Vec3::new(-850.0, 200.0, 0.0),
        20.0,
        RectLight {
            forward: Vec3::new(1.0, -0.4, 0.0),
            up: Vec3::new(0.4, 1.0, 0.0),
            attenuation_radius: 600.0,
            source_width: 120.0,
            source_height: 60.0,
            barn_door_length: 40.0,
            barn_door_angle: 35.0,
        },
    );
    spawn_directional_light(world, Vec3::new(-0.3, -1.0, -0.2), 0.5);

    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LightSource, Player};

    #[test]
    fn scene_has_player_and_every_light_kind() {
        let mut world = World::new();
        let player = load_test_scene(&mut world);
        assert!(world.get::<&Player>(player).is_ok());
        assert!(world.get::<&Patrol>(player).is_ok());
        let lights = world.query::<&LightSource>().iter().count();
        assert_eq!(lights, 4);
        for (_, light) in world.query::<&LightSource>().iter() {
            assert!(light.validate().is_ok(), "{light:?}");
        }
    }
}
