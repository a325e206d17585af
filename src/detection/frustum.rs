//! Beam volume of a rectangular light.
//!
//! The barn doors turn the emitting rectangle into a truncated pyramid:
//! a near rectangle at the light and a wider far rectangle at the end of
//! the doors. Four half-space planes built from its corners bound the beam.

use glam::{Quat, Vec3};

use crate::components::RectLight;

pub const NEAR_TOP_LEFT: usize = 0;
pub const NEAR_TOP_RIGHT: usize = 1;
pub const NEAR_BOTTOM_RIGHT: usize = 2;
pub const NEAR_BOTTOM_LEFT: usize = 3;
pub const FAR_TOP_LEFT: usize = 4;
pub const FAR_TOP_RIGHT: usize = 5;
pub const FAR_BOTTOM_RIGHT: usize = 6;
pub const FAR_BOTTOM_LEFT: usize = 7;

/// Eight corners: near TL, TR, BR, BL then far TL, TR, BR, BL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectFrustum {
    pub corners: [Vec3; 8],
}

impl RectFrustum {
    pub fn build(position: Vec3, rect: &RectLight) -> Self {
        let right = rect.right();
        let up = rect.up;
        let half_w = right * (rect.source_width * 0.5);
        let half_h = up * (rect.source_height * 0.5);

        let mut corners = [Vec3::ZERO; 8];
        corners[NEAR_TOP_LEFT] = position - half_w + half_h;
        corners[NEAR_TOP_RIGHT] = position + half_w + half_h;
        corners[NEAR_BOTTOM_RIGHT] = position + half_w - half_h;
        corners[NEAR_BOTTOM_LEFT] = position - half_w - half_h;

        // The top door swings up by the barn-door angle; the far rectangle
        // grows by the door's lateral reach on every side.
        let door = Quat::from_axis_angle(right, (-rect.barn_door_angle).to_radians())
            * (rect.forward * rect.barn_door_length);
        let reach = rect.barn_door_length * rect.barn_door_angle.to_radians().sin();
        let far_width = 2.0 * reach + rect.source_width;
        let far_height = 2.0 * reach + rect.source_height;

        corners[FAR_TOP_LEFT] = corners[NEAR_TOP_LEFT] + door - right * reach;
        corners[FAR_TOP_RIGHT] = corners[FAR_TOP_LEFT] + right * far_width;
        corners[FAR_BOTTOM_RIGHT] = corners[FAR_TOP_RIGHT] - up * far_height;
        corners[FAR_BOTTOM_LEFT] = corners[FAR_BOTTOM_RIGHT] - right * far_width;

        Self { corners }
    }
}

/// Plane `normal·p = w`. Positive signed distance is on the side `normal` points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub w: f32,
}

impl Plane {
    pub fn from_normal_point(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            w: normal.dot(point),
        }
    }

    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.w
    }
}

/// Half-spaces bounding the beam, oriented so the interior is positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingPlanes {
    pub top: Plane,
    pub right: Plane,
    pub bottom: Plane,
    pub left: Plane,
}

/// Corner triples `(a, anchor, b)` per plane; the normal is `(a-anchor)×(b-anchor)`.
/// The triples are tied to the corner winding above and are not symmetric.
pub const TOP_TRIPLE: [usize; 3] = [NEAR_BOTTOM_LEFT, NEAR_BOTTOM_RIGHT, FAR_TOP_LEFT];
pub const RIGHT_TRIPLE: [usize; 3] = [NEAR_TOP_LEFT, NEAR_BOTTOM_LEFT, FAR_TOP_RIGHT];
pub const BOTTOM_TRIPLE: [usize; 3] = [FAR_BOTTOM_LEFT, NEAR_TOP_RIGHT, NEAR_TOP_LEFT];
pub const LEFT_TRIPLE: [usize; 3] = [FAR_TOP_LEFT, NEAR_BOTTOM_RIGHT, NEAR_TOP_RIGHT];

impl BoundingPlanes {
    pub fn from_frustum(frustum: &RectFrustum) -> Self {
        let c = &frustum.corners;
        let plane = |[a, anchor, b]: [usize; 3]| {
            let normal = (c[a] - c[anchor]).cross(c[b] - c[anchor]).normalize_or_zero();
            Plane::from_normal_point(normal, c[anchor]).flipped()
        };
        Self {
            top: plane(TOP_TRIPLE),
            right: plane(RIGHT_TRIPLE),
            bottom: plane(BOTTOM_TRIPLE),
            left: plane(LEFT_TRIPLE),
        }
    }

    pub fn as_array(&self) -> [Plane; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// True only when `point` is strictly on the positive side of all four planes.
    pub fn contains(&self, point: Vec3) -> bool {
        self.as_array()
            .iter()
            .all(|plane| plane.signed_distance(point) > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn panel(angle: f32) -> RectLight {
        RectLight {
            forward: Vec3::X,
            up: Vec3::Y,
            attenuation_radius: 1000.0,
            source_width: 100.0,
            source_height: 50.0,
            barn_door_length: 20.0,
            barn_door_angle: angle,
        }
    }

    #[test]
    fn near_corners_lie_in_the_light_plane() {
        let pos = Vec3::new(10.0, 300.0, -40.0);
        let rect = panel(30.0);
        let frustum = RectFrustum::build(pos, &rect);
        for corner in &frustum.corners[..4] {
            assert_abs_diff_eq!((*corner - pos).dot(rect.forward), 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn near_corner_order_is_tl_tr_br_bl() {
        let rect = panel(0.0);
        let c = RectFrustum::build(Vec3::ZERO, &rect).corners;
        let right = rect.right();
        assert!(c[NEAR_TOP_LEFT].y > 0.0 && c[NEAR_TOP_LEFT].dot(right) < 0.0);
        assert!(c[NEAR_TOP_RIGHT].y > 0.0 && c[NEAR_TOP_RIGHT].dot(right) > 0.0);
        assert!(c[NEAR_BOTTOM_RIGHT].y < 0.0 && c[NEAR_BOTTOM_RIGHT].dot(right) > 0.0);
        assert!(c[NEAR_BOTTOM_LEFT].y < 0.0 && c[NEAR_BOTTOM_LEFT].dot(right) < 0.0);
    }

    #[test]
    fn closed_doors_extrude_the_rectangle() {
        let rect = panel(0.0);
        let c = RectFrustum::build(Vec3::ZERO, &rect).corners;
        for i in 0..4 {
            assert!(c[i + 4].abs_diff_eq(c[i] + Vec3::X * 20.0, 1e-4));
        }
    }

    #[test]
    fn open_doors_widen_the_far_rectangle() {
        let rect = panel(30.0);
        let c = RectFrustum::build(Vec3::ZERO, &rect).corners;
        // reach = 20 * sin(30deg) = 10 on each side
        assert_abs_diff_eq!(c[FAR_TOP_LEFT].distance(c[FAR_TOP_RIGHT]), 120.0, epsilon = 1e-3);
        assert_abs_diff_eq!(c[FAR_TOP_RIGHT].distance(c[FAR_BOTTOM_RIGHT]), 70.0, epsilon = 1e-3);
        assert_abs_diff_eq!(c[FAR_BOTTOM_RIGHT].distance(c[FAR_BOTTOM_LEFT]), 120.0, epsilon = 1e-3);
        // The top door tilts upward: forward 20*cos(30), up 20*sin(30).
        let door = c[FAR_TOP_LEFT] - c[NEAR_TOP_LEFT] + rect.right() * 10.0;
        assert!(door.abs_diff_eq(Vec3::new(20.0 * 30f32.to_radians().cos(), 10.0, 0.0), 1e-3));
    }

    #[test]
    fn planes_pass_through_their_defining_corners() {
        let frustum = RectFrustum::build(Vec3::new(5.0, 200.0, 5.0), &panel(30.0));
        let planes = BoundingPlanes::from_frustum(&frustum);
        let pairs = [
            (planes.top, TOP_TRIPLE),
            (planes.right, RIGHT_TRIPLE),
            (planes.bottom, BOTTOM_TRIPLE),
            (planes.left, LEFT_TRIPLE),
        ];
        for (plane, triple) in pairs {
            assert_abs_diff_eq!(plane.normal.length(), 1.0, epsilon = 1e-5);
            for idx in triple {
                assert_abs_diff_eq!(plane.signed_distance(frustum.corners[idx]), 0.0, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn beam_interior_is_positive() {
        for angle in [0.0, 30.0] {
            let frustum = RectFrustum::build(Vec3::ZERO, &panel(angle));
            let planes = BoundingPlanes::from_frustum(&frustum);
            assert!(planes.contains(Vec3::new(50.0, 0.0, 0.0)));
            assert!(planes.contains(Vec3::new(200.0, 0.0, 0.0)));
            assert!(!planes.contains(Vec3::new(-50.0, 0.0, 0.0)));
        }
    }

    #[test]
    fn flip_negates_distance() {
        let plane = Plane::from_normal_point(Vec3::Y, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(plane.signed_distance(Vec3::new(3.0, 5.0, 1.0)), 3.0);
        assert_eq!(plane.flipped().signed_distance(Vec3::new(3.0, 5.0, 1.0)), -3.0);
    }
}
