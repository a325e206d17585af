pub mod components;
pub mod detection;
pub mod engine;
pub mod error;
pub mod scene;
pub mod systems;

pub use detection::{DetectionConfig, LightDetector};
pub use error::DetectionError;
