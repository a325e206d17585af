use glam::Vec3;
use log::debug;

use crate::detection::frustum::Plane;

/// Which debug toggle a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugChannel {
    Total,
    Point,
    Spot,
    Rect,
    Directional,
}

/// Receiver for debug visuals. Every method defaults to a no-op; the
/// detector only calls it for channels whose toggle is enabled.
pub trait DiagnosticsSink {
    fn line(&mut self, _channel: DebugChannel, _from: Vec3, _to: Vec3) {}

    fn point(&mut self, _channel: DebugChannel, _at: Vec3) {}

    /// `center` is where a renderer would anchor a quad for the plane.
    fn plane(&mut self, _channel: DebugChannel, _plane: &Plane, _center: Vec3) {}

    fn message(&mut self, _channel: DebugChannel, _text: &str) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl DiagnosticsSink for NoopDiagnostics {}

/// Writes every diagnostic through the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn line(&mut self, channel: DebugChannel, from: Vec3, to: Vec3) {
        debug!("[{channel:?}] line {from} -> {to}");
    }

    fn point(&mut self, channel: DebugChannel, at: Vec3) {
        debug!("[{channel:?}] point {at}");
    }

    fn plane(&mut self, channel: DebugChannel, plane: &Plane, center: Vec3) {
        debug!("[{channel:?}] plane n={} w={:.3} at {center}", plane.normal, plane.w);
    }

    fn message(&mut self, channel: DebugChannel, text: &str) {
        debug!("[{channel:?}] {text}");
    }
}
