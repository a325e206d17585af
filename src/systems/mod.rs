mod patrol;
mod raycast;

pub use patrol::patrol_system;
pub use raycast::WorldOcclusion;
