pub mod lighting;

use glam::Vec3;

pub use lighting::{
    DirectionalLight, LightKind, LightKindTag, LightSource, PointLight, RectLight, SpotLight,
};

/// World-space placement. Scene units are centimetres, Y is up.
#[derive(Debug, Clone, Copy)]
pub struct LocalTransform {
    pub position: Vec3,
}

impl LocalTransform {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Marker: this entity is the player.
pub struct Player;

/// Walks an entity back and forth between two waypoints.
#[derive(Debug, Clone, Copy)]
pub struct Patrol {
    pub from: Vec3,
    pub to: Vec3,
    /// Scene units per second.
    pub speed: f32,
    pub returning: bool,
}

impl Patrol {
    pub fn new(from: Vec3, to: Vec3, speed: f32) -> Self {
        Self {
            from,
            to,
            speed,
            returning: false,
        }
    }

    pub fn target(&self) -> Vec3 {
        if self.returning {
            self.from
        } else {
            self.to
        }
    }
}

/// Collision shape attached to an entity, centred on its `LocalTransform`.
#[derive(Debug, Clone, Copy)]
pub enum Collider {
    Sphere { radius: f32 },
    Capsule { radius: f32, height: f32 },
    Box { half_extents: Vec3 },
    /// Infinite plane `normal·p = offset`, independent of the entity position.
    Plane { normal: Vec3, offset: f32 },
}

/// Trace channels. Ground covers gameplay occlusion and the floor probe;
/// Visibility is the general channel used by the directional light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionChannel {
    Ground,
    Visibility,
}

impl CollisionChannel {
    const fn bit(self) -> u8 {
        match self {
            CollisionChannel::Ground => 0b01,
            CollisionChannel::Visibility => 0b10,
        }
    }
}

/// Set of channels a collider blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelMask(u8);

impl ChannelMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b11);

    pub const fn only(channel: CollisionChannel) -> Self {
        Self(channel.bit())
    }

    pub const fn with(self, channel: CollisionChannel) -> Self {
        Self(self.0 | channel.bit())
    }

    pub const fn contains(self, channel: CollisionChannel) -> bool {
        self.0 & channel.bit() != 0
    }
}

/// Marks an entity's collider as blocking traces on the given channels.
/// Colliders without it (the player, for instance) are invisible to traces.
pub struct Occluder(pub ChannelMask);
