use crate::detection::diagnostics::DebugChannel;
use crate::error::DetectionError;

/// How a contributing light is folded into the illuminance total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContributionMode {
    /// Any contributing point or spot light sets the total to 1.0.
    #[default]
    Binary,
    /// Point and spot lights add an inverse-distance weighted term.
    Photometric,
}

/// Which lights the startup scan collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryFilter {
    /// Point and spot lights only.
    #[default]
    PointAndSpot,
    All,
}

/// Independent switches for diagnostics output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugToggles {
    pub illuminance_total: bool,
    pub point_lights: bool,
    pub spot_lights: bool,
    pub rect_lights: bool,
    pub directional_light: bool,
}

impl DebugToggles {
    pub fn enabled(&self, channel: DebugChannel) -> bool {
        match channel {
            DebugChannel::Total => self.illuminance_total,
            DebugChannel::Point => self.point_lights,
            DebugChannel::Spot => self.spot_lights,
            DebugChannel::Rect => self.rect_lights,
            DebugChannel::Directional => self.directional_light,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Detection passes per second.
    pub update_frequency: f32,
    /// Slack added to squared-distance range tests (scene units squared).
    pub forgiveness_buffer: f32,
    pub mode: ContributionMode,
    pub evaluate_rect_lights: bool,
    pub evaluate_directional_light: bool,
    /// Trace point lights against the ground channel before counting them.
    pub occlude_point_lights: bool,
    pub discovery: DiscoveryFilter,
    pub debug: DebugToggles,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            update_frequency: 50.0,
            forgiveness_buffer: 0.0,
            mode: ContributionMode::Binary,
            evaluate_rect_lights: false,
            evaluate_directional_light: false,
            occlude_point_lights: false,
            discovery: DiscoveryFilter::PointAndSpot,
            debug: DebugToggles::default(),
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), DetectionError> {
        if !(self.update_frequency.is_finite() && self.update_frequency > 0.0) {
            return Err(DetectionError::config(format!(
                "update_frequency must be finite and > 0, got {}",
                self.update_frequency
            )));
        }
        if !self.forgiveness_buffer.is_finite() {
            return Err(DetectionError::config("forgiveness_buffer must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipping_behaviour() {
        let config = DetectionConfig::default();
        assert_eq!(config.update_frequency, 50.0);
        assert_eq!(config.mode, ContributionMode::Binary);
        assert!(!config.evaluate_rect_lights);
        assert!(!config.evaluate_directional_light);
        assert_eq!(config.discovery, DiscoveryFilter::PointAndSpot);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_frequency() {
        for frequency in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let config = DetectionConfig {
                update_frequency: frequency,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(DetectionError::InvalidConfig(_))));
        }
    }

    #[test]
    fn toggles_map_to_channels() {
        let toggles = DebugToggles {
            spot_lights: true,
            ..Default::default()
        };
        assert!(toggles.enabled(DebugChannel::Spot));
        assert!(!toggles.enabled(DebugChannel::Point));
        assert!(!toggles.enabled(DebugChannel::Total));
    }
}
