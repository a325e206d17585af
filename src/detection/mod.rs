//! Player light exposure: which registered lights reach the player's feet,
//! evaluated at a fixed rate and folded into one illuminance scalar.

pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod evaluate;
pub mod frustum;
pub mod occlusion;
pub mod registry;

pub use config::{ContributionMode, DebugToggles, DetectionConfig, DiscoveryFilter};
pub use detector::{probe_detection_point, LightDetector};
pub use diagnostics::{DebugChannel, DiagnosticsSink, LogDiagnostics, NoopDiagnostics};
pub use evaluate::{Contribution, DetectionContext, Illuminance, LightEvaluator, Outcome, SkipReason};
pub use frustum::{BoundingPlanes, Plane, RectFrustum};
pub use occlusion::{NoOcclusion, OcclusionQuery, TraceHit};
pub use registry::LightRegistry;
