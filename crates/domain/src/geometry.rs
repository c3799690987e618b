//! Minimal 3D geometry: positions, sizes and axis-aligned boxes.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point or extent in world space (studs).
///
/// Serialized as a `[x, y, z]` array so config files stay compact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// `true` when no component is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// `true` when every component is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.x > 0.0 && self.y > 0.0 && self.z > 0.0
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Axis-aligned bounding box described by its center and full size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub size: Vec3,
}

impl Aabb {
    #[must_use]
    pub const fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    /// Boxes that share a face or edge count as overlapping.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let d = self.center - other.center;
        d.x.abs() * 2.0 <= self.size.x + other.size.x
            && d.y.abs() * 2.0 <= self.size.y + other.size.y
            && d.z.abs() * 2.0 <= self.size.z + other.size.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_detect_non_finite_components() {
        assert!(Vec3::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Vec3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn should_deserialize_from_array() {
        #[derive(Deserialize)]
        struct Wrapper {
            position: Vec3,
        }
        let parsed: Wrapper = serde_json::from_str(r#"{"position": [1.0, 0.5, -10.0]}"#).unwrap();
        assert_eq!(parsed.position, Vec3::new(1.0, 0.5, -10.0));
    }

    #[test]
    fn should_compute_length_and_scale() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        assert!((v.length() - 5.0).abs() < f64::EPSILON);
        assert_eq!(v.scale(0.5), Vec3::new(1.5, 0.0, 2.0));
    }

    #[test]
    fn should_overlap_when_boxes_intersect() {
        let pad = Aabb::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(6.0, 1.0, 6.0));
        let torso = Aabb::new(Vec3::new(2.0, 2.0, 1.0), Vec3::new(2.0, 2.0, 1.0));
        assert!(pad.overlaps(&torso));
    }

    #[test]
    fn should_not_overlap_when_boxes_are_apart() {
        let pad = Aabb::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(6.0, 1.0, 6.0));
        let torso = Aabb::new(Vec3::new(10.0, 2.0, 0.0), Vec3::new(2.0, 2.0, 1.0));
        assert!(!pad.overlaps(&torso));
    }

    #[test]
    fn should_overlap_when_boxes_touch_faces() {
        let a = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        assert!(a.overlaps(&b));
    }
}
