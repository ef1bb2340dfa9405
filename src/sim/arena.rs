//! Hexagonal platform geometry
//!
//! The platform is a regular flat-top hexagon centred on the origin of the
//! ground (XZ) plane. Its three edge-normal axes sit at 30°, 90° and 150°, so
//! a point is inside when its projection on every axis is within the apothem.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::PLATFORM_RADIUS;

/// Tolerance for points sitting exactly on an edge after clamping
const EDGE_EPSILON: f32 = 1e-4;

/// Edge normals of a flat-top hexagon (x, z)
const EDGE_NORMALS: [Vec2; 3] = [
    Vec2::new(0.866_025_4, 0.5),
    Vec2::new(0.0, 1.0),
    Vec2::new(-0.866_025_4, 0.5),
];

/// The play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Circumradius (centre to corner)
    pub radius: f32,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            radius: PLATFORM_RADIUS,
        }
    }
}

impl Platform {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Centre to edge midpoint
    #[inline]
    pub fn apothem(&self) -> f32 {
        self.radius * 0.866_025_4
    }

    /// Hexagonal "norm" of a point relative to a given apothem (≤ 1 inside)
    fn norm_for(p: Vec3, apothem: f32) -> f32 {
        let q = Vec2::new(p.x, p.z);
        let extent = EDGE_NORMALS
            .iter()
            .map(|n| q.dot(*n).abs())
            .fold(0.0_f32, f32::max);
        if apothem <= 0.0 {
            if extent > 0.0 { f32::INFINITY } else { 0.0 }
        } else {
            extent / apothem
        }
    }

    /// Hexagonal norm of `p`: 0 at the centre, 1 on the edge
    pub fn hex_norm(&self, p: Vec3) -> f32 {
        Self::norm_for(p, self.apothem())
    }

    /// Whether `p` is on the platform
    pub fn contains(&self, p: Vec3) -> bool {
        self.hex_norm(p) <= 1.0 + EDGE_EPSILON
    }

    /// Whether a disc of radius `margin` centred on `p` fits on the platform
    pub fn contains_inset(&self, p: Vec3, margin: f32) -> bool {
        Self::norm_for(p, self.apothem() - margin) <= 1.0 + EDGE_EPSILON
    }

    /// Pull `p` back onto the platform shrunk by `margin`
    ///
    /// Points already inside are returned unchanged. Points outside are scaled
    /// toward the centre until they touch the inset edge. Height is dropped.
    pub fn clamp(&self, p: Vec3, margin: f32) -> Vec3 {
        let p = crate::flatten(p);
        let inset = self.apothem() - margin;
        if inset <= 0.0 {
            return Vec3::ZERO;
        }
        let norm = Self::norm_for(p, inset);
        if norm <= 1.0 {
            p
        } else {
            p / norm
        }
    }

    /// Uniform random point on the platform shrunk by `margin`
    pub fn random_point<R: Rng>(&self, rng: &mut R, margin: f32) -> Vec3 {
        let inset = self.apothem() - margin;
        if inset <= 0.0 {
            return Vec3::ZERO;
        }
        // Circumradius of the inset hexagon bounds the sample square
        let bound = inset / 0.866_025_4;
        for _ in 0..64 {
            let p = Vec3::new(
                rng.random_range(-bound..=bound),
                0.0,
                rng.random_range(-bound..=bound),
            );
            if Self::norm_for(p, inset) <= 1.0 {
                return p;
            }
        }
        // Acceptance is ~65% per draw, so this is practically unreachable
        Vec3::ZERO
    }

    /// Corner positions, for the presentation layer
    pub fn corners(&self) -> [Vec3; 6] {
        std::array::from_fn(|i| {
            let angle = i as f32 * std::f32::consts::FRAC_PI_3;
            Vec3::new(self.radius * angle.cos(), 0.0, self.radius * angle.sin())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_corners_are_on_edge() {
        let platform = Platform::new(10.0);
        for corner in platform.corners() {
            assert!((platform.hex_norm(corner) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_contains_center_and_edges() {
        let platform = Platform::new(10.0);
        assert!(platform.contains(Vec3::ZERO));
        // Edge midpoint straight along +Z is at the apothem
        assert!(platform.contains(Vec3::new(0.0, 0.0, platform.apothem())));
        assert!(!platform.contains(Vec3::new(0.0, 0.0, platform.apothem() + 0.1)));
        // Corner along +X sits at the full radius
        assert!(platform.contains(Vec3::new(9.99, 0.0, 0.0)));
        assert!(!platform.contains(Vec3::new(10.1, 0.0, 0.0)));
    }

    #[test]
    fn test_clamp_leaves_inside_points() {
        let platform = Platform::new(10.0);
        let p = Vec3::new(1.0, 0.0, -2.0);
        assert_eq!(platform.clamp(p, 0.5), p);
    }

    #[test]
    fn test_clamp_pulls_outside_points_to_inset_edge() {
        let platform = Platform::new(10.0);
        let clamped = platform.clamp(Vec3::new(0.0, 0.0, 50.0), 0.5);
        assert!((clamped.z - (platform.apothem() - 0.5)).abs() < 1e-4);
        assert!(clamped.x.abs() < 1e-6);
    }

    #[test]
    fn test_clamp_degenerate_margin() {
        let platform = Platform::new(1.0);
        assert_eq!(platform.clamp(Vec3::new(3.0, 0.0, 3.0), 5.0), Vec3::ZERO);
    }

    #[test]
    fn test_random_points_inside() {
        let platform = Platform::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = platform.random_point(&mut rng, 1.0);
            assert!(platform.contains_inset(p, 1.0));
            assert_eq!(p.y, 0.0);
        }
    }

    proptest! {
        #[test]
        fn clamp_never_leaves_platform(
            x in -100.0f32..100.0,
            z in -100.0f32..100.0,
            margin in 0.0f32..3.0,
        ) {
            let platform = Platform::default();
            let clamped = platform.clamp(Vec3::new(x, 4.0, z), margin);
            prop_assert!(platform.contains_inset(clamped, margin));
            prop_assert_eq!(clamped.y, 0.0);
        }

        #[test]
        fn random_point_inside_for_any_seed(seed in any::<u64>()) {
            let platform = Platform::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = platform.random_point(&mut rng, 0.5);
            prop_assert!(platform.contains_inset(p, 0.5));
        }
    }
}
