//! Footprint geometry for placed objects.
//!
//! A [`Footprint`] is the axis-aligned rectangle enclosing an object's base after
//! rotating it about its center by a yaw angle. The bound is conservative (the AABB
//! of the rotated box, not the oriented box itself); collision tests built on it are
//! approximate pre-placement guards.
use glam::{Vec2, Vec3};

/// Axis-aligned 2D rectangle enclosing a rotated object base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Minimum corner (min x, min y).
    pub min: Vec2,
    /// Maximum corner (max x, max y).
    pub max: Vec2,
    /// Placement position the footprint was computed for.
    pub center: Vec2,
}

impl Footprint {
    /// Compute the footprint of a `size.x` by `size.y` rectangle centered at `center`
    /// and rotated by `yaw_degrees`.
    pub fn rotated(center: Vec2, size: Vec2, yaw_degrees: f32) -> Self {
        let half = size * 0.5;
        let (sin, cos) = yaw_degrees.to_radians().sin_cos();

        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ];

        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for c in corners {
            let rotated = Vec2::new(c.x * cos - c.y * sin, c.x * sin + c.y * cos);
            let p = center + rotated;
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max, center }
    }

    /// Footprint of an unrotated rectangle.
    pub fn axis_aligned(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
            center,
        }
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.max.y
    }

    /// Extent along x.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Returns true if `self`, grown by `tolerance` on every side, intersects `other`.
    ///
    /// Intervals are closed, so touching boxes overlap.
    pub fn overlaps(&self, other: &Footprint, tolerance: f32) -> bool {
        self.min.x - tolerance <= other.max.x
            && self.max.x + tolerance >= other.min.x
            && self.min.y - tolerance <= other.max.y
            && self.max.y + tolerance >= other.min.y
    }

    /// Returns true if `p` lies inside the footprint (inclusive).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Planar footprint size of a mesh with half-extent `box_extent` under `scale`.
///
/// Only the x and y components contribute; height is ignored.
#[inline]
pub fn footprint_size(box_extent: Vec3, scale: Vec3) -> Vec2 {
    Vec2::new(box_extent.x * scale.x, box_extent.y * scale.y)
}

/// Heading of the line `start -> end` in degrees, measured counter-clockwise from +x.
///
/// A zero-length line has heading 0.
pub fn heading_degrees(start: Vec2, end: Vec2) -> f32 {
    let d = end - start;
    if d == Vec2::ZERO {
        return 0.0;
    }
    d.y.atan2(d.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn zero_rotation_reproduces_axis_aligned_box() {
        let center = Vec2::new(12.0, -4.0);
        let size = Vec2::new(30.0, 10.0);
        let rotated = Footprint::rotated(center, size, 0.0);
        assert_eq!(rotated, Footprint::axis_aligned(center, size));
        assert_eq!(rotated.min, Vec2::new(-3.0, -9.0));
        assert_eq!(rotated.max, Vec2::new(27.0, 1.0));
    }

    #[test]
    fn quarter_turn_swaps_extents() {
        let fp = Footprint::rotated(Vec2::ZERO, Vec2::new(30.0, 10.0), 90.0);
        assert!((fp.width() - 10.0).abs() < EPS);
        assert!((fp.depth() - 30.0).abs() < EPS);
        assert!((fp.min_x() + 5.0).abs() < EPS);
        assert!((fp.max_y() - 15.0).abs() < EPS);
    }

    #[test]
    fn diagonal_rotation_grows_bound() {
        let fp = Footprint::rotated(Vec2::ZERO, Vec2::new(10.0, 10.0), 45.0);
        let expected = 10.0 * std::f32::consts::SQRT_2;
        assert!((fp.width() - expected).abs() < EPS);
        assert!((fp.depth() - expected).abs() < EPS);
    }

    #[test]
    fn center_is_preserved() {
        let fp = Footprint::rotated(Vec2::new(5.0, 7.0), Vec2::new(4.0, 2.0), 33.0);
        assert_eq!(fp.center, Vec2::new(5.0, 7.0));
        assert!(fp.contains(fp.center));
    }

    #[test]
    fn overlap_respects_tolerance() {
        let a = Footprint::axis_aligned(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Footprint::axis_aligned(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        // Gap of 10 between the boxes.
        assert!(!a.overlaps(&b, 0.0));
        assert!(!a.overlaps(&b, 9.0));
        assert!(a.overlaps(&b, 10.0));
    }

    #[test]
    fn overlap_requires_both_axes() {
        let a = Footprint::axis_aligned(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Footprint::axis_aligned(Vec2::new(2.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b, 1.0));
    }

    #[test]
    fn footprint_size_scales_planar_axes() {
        let size = footprint_size(Vec3::new(10.0, 4.0, 99.0), Vec3::new(2.0, 0.5, 3.0));
        assert_eq!(size, Vec2::new(20.0, 2.0));
    }

    #[test]
    fn heading_of_axis_lines() {
        assert_eq!(heading_degrees(Vec2::ZERO, Vec2::new(5.0, 0.0)), 0.0);
        assert!((heading_degrees(Vec2::ZERO, Vec2::new(0.0, 5.0)) - 90.0).abs() < EPS);
        assert!((heading_degrees(Vec2::ZERO, Vec2::new(-5.0, 0.0)) - 180.0).abs() < EPS);
        assert_eq!(heading_degrees(Vec2::ONE, Vec2::ONE), 0.0);
    }
}
