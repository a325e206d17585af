use hecs::World;

use crate::components::{LocalTransform, Patrol};

/// Move every patrolling entity toward its current waypoint, turning around on arrival.
pub fn patrol_system(world: &mut World, dt: f32) {
    for (_entity, (local, patrol)) in world.query_mut::<(&mut LocalTransform, &mut Patrol)>() {
        let to_target = patrol.target() - local.position;
        let remaining = to_target.length();
        let step = patrol.speed * dt;

        if remaining <= step {
            local.position = patrol.target();
            patrol.returning = !patrol.returning;
        } else {
            local.position += to_target / remaining * step;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn walks_to_waypoint_and_turns_around() {
        let mut world = World::new();
        let walker = world.spawn((
            LocalTransform::new(Vec3::ZERO),
            Patrol::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 50.0),
        ));

        patrol_system(&mut world, 1.0);
        assert_eq!(world.get::<&LocalTransform>(walker).unwrap().position.x, 50.0);

        patrol_system(&mut world, 1.0);
        assert_eq!(world.get::<&LocalTransform>(walker).unwrap().position.x, 100.0);
        assert!(world.get::<&Patrol>(walker).unwrap().returning);

        patrol_system(&mut world, 0.5);
        assert_eq!(world.get::<&LocalTransform>(walker).unwrap().position.x, 75.0);
    }
}
