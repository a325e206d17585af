use std::time::Duration;

use clap::Parser;
use hecs::World;
use log::info;

use umbra::detection::{
    ContributionMode, DebugToggles, DetectionConfig, DiscoveryFilter, LightDetector,
    LogDiagnostics,
};
use umbra::engine::time::FrameTimer;
use umbra::error::DetectionError;
use umbra::scene::test_scene::load_test_scene;
use umbra::systems::{patrol_system, WorldOcclusion};

#[derive(Parser)]
#[command(name = "umbra", about = "Headless player light-exposure meter")]
struct Args {
    /// Detection passes per second
    #[arg(long, default_value_t = 50.0)]
    frequency: f32,
    /// Slack added to squared-distance range tests
    #[arg(long, default_value_t = 0.0)]
    forgiveness_buffer: f32,
    /// Weight point and spot lights by distance instead of a lit/unlit flag
    #[arg(long)]
    photometric: bool,
    /// Also evaluate rectangular area lights
    #[arg(long)]
    rect_lights: bool,
    /// Also evaluate the main directional light
    #[arg(long)]
    directional_light: bool,
    /// Trace point lights for occlusion
    #[arg(long)]
    occlude_point_lights: bool,
    /// Simulated duration in seconds
    #[arg(long, default_value_t = 12.0)]
    seconds: f32,
    /// Host frame rate to simulate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Sleep between frames and use wall-clock deltas
    #[arg(long)]
    realtime: bool,
    #[arg(long)]
    debug_total: bool,
    #[arg(long)]
    debug_point: bool,
    #[arg(long)]
    debug_spot: bool,
    #[arg(long)]
    debug_rect: bool,
    #[arg(long)]
    debug_directional: bool,
}

impl Args {
    fn detection_config(&self) -> DetectionConfig {
        DetectionConfig {
            update_frequency: self.frequency,
            forgiveness_buffer: self.forgiveness_buffer,
            mode: if self.photometric {
                ContributionMode::Photometric
            } else {
                ContributionMode::Binary
            },
            evaluate_rect_lights: self.rect_lights,
            evaluate_directional_light: self.directional_light,
            occlude_point_lights: self.occlude_point_lights,
            discovery: if self.rect_lights || self.directional_light {
                DiscoveryFilter::All
            } else {
                DiscoveryFilter::PointAndSpot
            },
            debug: DebugToggles {
                illuminance_total: self.debug_total,
                point_lights: self.debug_point,
                spot_lights: self.debug_spot,
                rect_lights: self.debug_rect,
                directional_light: self.debug_directional,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    if !(args.fps.is_finite() && args.fps > 0.0) {
        return Err(DetectionError::config(format!("fps must be > 0, got {}", args.fps)).into());
    }

    let mut world = World::new();
    let player = load_test_scene(&mut world);
    let mut detector = LightDetector::with_player(&world, player, args.detection_config())?;
    info!(
        "tracking {} lights at {} Hz",
        detector.registry().len(),
        detector.config().update_frequency
    );

    let mut diagnostics = LogDiagnostics;
    let mut timer = FrameTimer::new();
    let frame_dt = 1.0 / args.fps;
    let mut elapsed = 0.0;
    let mut last_total: Option<f32> = None;

    while elapsed < args.seconds {
        let dt = if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(frame_dt));
            timer.tick();
            timer.dt
        } else {
            frame_dt
        };
        elapsed += dt;

        patrol_system(&mut world, dt);

        let occlusion = WorldOcclusion::new(&world);
        if let Some(total) = detector.tick(&world, dt, &occlusion, &mut diagnostics) {
            if last_total != Some(total) {
                let at = detector.detection_point().unwrap_or_default();
                info!("t={elapsed:.2}s detection point {at:.0} illuminance {total:.3}");
                last_total = Some(total);
            }
        }
    }

    println!("final illuminance: {}", detector.illuminance());
    Ok(())
}
