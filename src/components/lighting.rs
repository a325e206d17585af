use glam::Vec3;

/// A light the detector can evaluate. Position comes from the entity's
/// `LocalTransform`; directional lights ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
    /// Unitless brightness, never negative.
    pub intensity: f32,
    pub visible: bool,
    pub kind: LightKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    Point(PointLight),
    Spot(SpotLight),
    Rect(RectLight),
    Directional(DirectionalLight),
}

/// Discriminant of [`LightKind`], in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LightKindTag {
    Point,
    Spot,
    Rect,
    Directional,
}

impl LightKindTag {
    pub const ALL: [LightKindTag; 4] = [
        LightKindTag::Point,
        LightKindTag::Spot,
        LightKindTag::Rect,
        LightKindTag::Directional,
    ];
}

/// Omnidirectional light with a hard attenuation range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub attenuation_radius: f32,
}

/// Cone light. Angles are half-angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub direction: Vec3,
    pub attenuation_radius: f32,
    pub inner_cone_deg: f32,
    pub outer_cone_deg: f32,
}

/// Rectangular area light shaped by barn doors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectLight {
    pub forward: Vec3,
    pub up: Vec3,
    pub attenuation_radius: f32,
    pub source_width: f32,
    pub source_height: f32,
    pub barn_door_length: f32,
    /// Degrees.
    pub barn_door_angle: f32,
}

/// Infinitely distant light. `direction` points from the light into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
}

impl RectLight {
    /// Lateral axis of the emitting rectangle.
    ///
    /// The frustum corner winding expects a left-handed right axis, which in
    /// glam's right-handed space is `up × forward`.
    pub fn right(&self) -> Vec3 {
        self.up.cross(self.forward).normalize_or_zero()
    }
}

impl LightSource {
    pub fn point(intensity: f32, attenuation_radius: f32) -> Self {
        Self {
            intensity,
            visible: true,
            kind: LightKind::Point(PointLight { attenuation_radius }),
        }
    }

    pub fn spot(
        intensity: f32,
        attenuation_radius: f32,
        direction: Vec3,
        inner_cone_deg: f32,
        outer_cone_deg: f32,
    ) -> Self {
        Self {
            intensity,
            visible: true,
            kind: LightKind::Spot(SpotLight {
                direction: direction.normalize_or_zero(),
                attenuation_radius,
                inner_cone_deg,
                outer_cone_deg,
            }),
        }
    }

    pub fn rect(intensity: f32, mut rect: RectLight) -> Self {
        rect.forward = rect.forward.normalize_or_zero();
        rect.up = rect.up.normalize_or_zero();
        Self {
            intensity,
            visible: true,
            kind: LightKind::Rect(rect),
        }
    }

    pub fn directional(intensity: f32, direction: Vec3) -> Self {
        Self {
            intensity,
            visible: true,
            kind: LightKind::Directional(DirectionalLight {
                direction: direction.normalize_or_zero(),
            }),
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn tag(&self) -> LightKindTag {
        match self.kind {
            LightKind::Point(_) => LightKindTag::Point,
            LightKind::Spot(_) => LightKindTag::Spot,
            LightKind::Rect(_) => LightKindTag::Rect,
            LightKind::Directional(_) => LightKindTag::Directional,
        }
    }

    /// Check the data-model invariants. Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(format!("intensity must be finite and >= 0, got {}", self.intensity));
        }
        match &self.kind {
            LightKind::Point(point) => check_radius(point.attenuation_radius),
            LightKind::Spot(spot) => {
                check_radius(spot.attenuation_radius)?;
                check_direction("direction", spot.direction)?;
                if !(spot.inner_cone_deg >= 0.0 && spot.outer_cone_deg >= spot.inner_cone_deg) {
                    return Err(format!(
                        "cone angles must satisfy 0 <= inner <= outer, got inner {} outer {}",
                        spot.inner_cone_deg, spot.outer_cone_deg
                    ));
                }
                Ok(())
            }
            LightKind::Rect(rect) => {
                check_radius(rect.attenuation_radius)?;
                check_direction("forward", rect.forward)?;
                check_direction("up", rect.up)?;
                if rect.right() == Vec3::ZERO {
                    return Err("forward and up must not be parallel".to_string());
                }
                for (name, value) in [
                    ("source_width", rect.source_width),
                    ("source_height", rect.source_height),
                    ("barn_door_length", rect.barn_door_length),
                ] {
                    if !value.is_finite() || value < 0.0 {
                        return Err(format!("{name} must be finite and >= 0, got {value}"));
                    }
                }
                if !rect.barn_door_angle.is_finite() {
                    return Err("barn_door_angle must be finite".to_string());
                }
                Ok(())
            }
            LightKind::Directional(dir) => check_direction("direction", dir.direction),
        }
    }
}

fn check_radius(radius: f32) -> Result<(), String> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(format!("attenuation radius must be finite and >= 0, got {radius}"))
    }
}

fn check_direction(name: &str, v: Vec3) -> Result<(), String> {
    if v.is_finite() && v.length_squared() > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a finite non-zero vector"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_normalize_directions() {
        let spot = LightSource::spot(1.0, 100.0, Vec3::new(0.0, -4.0, 0.0), 10.0, 20.0);
        match spot.kind {
            LightKind::Spot(s) => assert_eq!(s.direction, Vec3::NEG_Y),
            _ => panic!("expected spot"),
        }
    }

    #[test]
    fn validate_rejects_broken_invariants() {
        assert!(LightSource::point(1.0, 10.0).validate().is_ok());
        assert!(LightSource::point(-1.0, 10.0).validate().is_err());
        assert!(LightSource::point(1.0, -10.0).validate().is_err());
        assert!(LightSource::spot(1.0, 10.0, Vec3::X, 30.0, 20.0).validate().is_err());
        assert!(LightSource::spot(1.0, 10.0, Vec3::ZERO, 10.0, 20.0).validate().is_err());
        assert!(LightSource::directional(1.0, Vec3::ZERO).validate().is_err());

        let parallel = RectLight {
            forward: Vec3::X,
            up: Vec3::X,
            attenuation_radius: 100.0,
            source_width: 10.0,
            source_height: 10.0,
            barn_door_length: 5.0,
            barn_door_angle: 45.0,
        };
        assert!(LightSource::rect(1.0, parallel).validate().is_err());
    }

    #[test]
    fn rect_right_is_up_cross_forward() {
        let rect = RectLight {
            forward: Vec3::X,
            up: Vec3::Y,
            attenuation_radius: 100.0,
            source_width: 10.0,
            source_height: 10.0,
            barn_door_length: 5.0,
            barn_door_angle: 45.0,
        };
        assert_eq!(rect.right(), Vec3::NEG_Z);
    }

    #[test]
    fn tags_follow_evaluation_order() {
        assert!(LightKindTag::Point < LightKindTag::Spot);
        assert!(LightKindTag::Spot < LightKindTag::Rect);
        assert!(LightKindTag::Rect < LightKindTag::Directional);
        assert_eq!(LightSource::directional(1.0, Vec3::NEG_Y).tag(), LightKindTag::Directional);
    }
}
