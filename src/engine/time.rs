use std::time::Instant;

/// Wall-clock frame delta, sampled once per host frame.
pub struct FrameTimer {
    last: Instant,
    pub dt: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-rate gate driven by variable frame deltas.
///
/// Counts down one period; when the countdown reaches zero the gate opens
/// once and rearms with a full period. Time beyond the period is dropped,
/// so a long frame never produces more than one pass.
#[derive(Debug, Clone)]
pub struct FixedRateGate {
    period: f32,
    remaining: f32,
}

impl FixedRateGate {
    /// `frequency` is in passes per second and must be > 0.
    pub fn new(frequency: f32) -> Self {
        let period = 1.0 / frequency;
        Self {
            period,
            remaining: period,
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.period = 1.0 / frequency;
        self.remaining = self.remaining.min(self.period);
    }

    /// Returns `true` when a pass should run this frame.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = self.period;
            true
        } else {
            false
        }
    }
}
