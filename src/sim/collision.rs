//! Collision detection
//!
//! Every pair test in the game uses the same forgiving proximity check: two
//! centers overlap when both axis distances are within the sum of the two
//! half-extents. At the corners it accepts more than a circle test would.

use glam::Vec2;

/// Something that can take part in a proximity test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub center: Vec2,
    pub half_extent: f32,
}

impl Hitbox {
    pub fn new(center: Vec2, half_extent: f32) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Proximity test against another hitbox
    pub fn touches(&self, other: &Hitbox) -> bool {
        overlaps(self.center, self.half_extent, other.center, other.half_extent)
    }
}

/// `|dx| <= h1 + h2 && |dy| <= h1 + h2`
#[inline]
pub fn overlaps(a: Vec2, half_a: f32, b: Vec2, half_b: f32) -> bool {
    let reach = half_a + half_b;
    let delta = (a - b).abs();
    delta.x <= reach && delta.y <= reach
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_reach() {
        assert!(overlaps(Vec2::new(0.0, 0.0), 15.0, Vec2::new(29.0, -29.0), 15.0));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        assert!(overlaps(Vec2::new(0.0, 0.0), 15.0, Vec2::new(30.0, 30.0), 15.0));
        assert!(!overlaps(Vec2::new(0.0, 0.0), 15.0, Vec2::new(30.1, 0.0), 15.0));
    }

    #[test]
    fn test_one_axis_is_not_enough() {
        // Same column but far apart vertically
        assert!(!overlaps(Vec2::new(100.0, 0.0), 15.0, Vec2::new(100.0, 200.0), 15.0));
    }

    #[test]
    fn test_generous_at_corners() {
        // A circle test would reject this diagonal; the proximity test accepts it
        let a = Hitbox::new(Vec2::ZERO, 10.0);
        let b = Hitbox::new(Vec2::new(19.0, 19.0), 10.0);
        assert!(a.touches(&b));
        assert!(a.center.distance(b.center) > 20.0);
    }
}
