//! The built-in demonstration animation.
//!
//! Four transforms driven by elapsed time: a spinning cube, a cube
//! orbiting the origin, a pyramid orbiting further out while spinning
//! faster, and a static vertical line. All are closed-form functions of
//! time. No integration, so any elapsed-time value reproduces the same
//! matrices.

use glam::{Mat4, Vec3};

/// Spin rate of the slow yaw component on the center cube.
const SPIN_YAW_RATE: f32 = 0.037;

/// The four showcase transforms at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowcaseTransforms {
    /// Center cube, tumbling in place.
    pub cube_spin: Mat4,
    /// Small cube carried around the origin.
    pub cube_orbit: Mat4,
    /// Small pyramid on a wider orbit, spinning at double rate.
    pub pyramid_orbit: Mat4,
    /// The vertical marker line; never moves.
    pub line: Mat4,
}

impl ShowcaseTransforms {
    /// Evaluate every transform at elapsed time `t` (seconds).
    pub fn at(t: f32) -> Self {
        Self {
            cube_spin: Mat4::from_rotation_x(t) * Mat4::from_rotation_y(t * SPIN_YAW_RATE),
            cube_orbit: Mat4::from_rotation_y(t)
                * Mat4::from_translation(Vec3::new(2.0, 0.0, 2.0))
                * Mat4::from_scale(Vec3::splat(0.3)),
            pyramid_orbit: Mat4::from_translation(Vec3::new(4.0, 0.0, 2.0))
                * Mat4::from_scale(Vec3::splat(0.2))
                * Mat4::from_rotation_y(t * 2.0),
            line: Mat4::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn translation(m: Mat4) -> Vec3 {
        (m * Vec4::new(0.0, 0.0, 0.0, 1.0)).truncate()
    }

    #[test]
    fn deterministic_for_equal_times() {
        assert_eq!(ShowcaseTransforms::at(3.25), ShowcaseTransforms::at(3.25));
        assert_ne!(
            ShowcaseTransforms::at(0.5).cube_spin,
            ShowcaseTransforms::at(1.5).cube_spin
        );
    }

    #[test]
    fn time_zero_is_the_rest_pose() {
        let rest = ShowcaseTransforms::at(0.0);
        assert_eq!(rest.cube_spin, Mat4::IDENTITY);
        assert_eq!(rest.line, Mat4::IDENTITY);
        assert_eq!(translation(rest.cube_orbit), Vec3::new(2.0, 0.0, 2.0));
        assert_eq!(translation(rest.pyramid_orbit), Vec3::new(4.0, 0.0, 2.0));
    }

    #[test]
    fn spinner_stays_at_the_origin() {
        for t in [0.0, 1.0, 2.7, 100.0] {
            assert_eq!(translation(ShowcaseTransforms::at(t).cube_spin), Vec3::ZERO);
        }
    }

    #[test]
    fn orbit_keeps_a_constant_radius() {
        let radius = Vec3::new(2.0, 0.0, 2.0).length();
        for t in [0.1, 1.0, 4.2, 9.9] {
            let pos = translation(ShowcaseTransforms::at(t).cube_orbit);
            assert!((pos.length() - radius).abs() < 1e-4);
            assert!(pos.y.abs() < 1e-6);
        }
    }

    #[test]
    fn nested_orbit_pivot_is_fixed() {
        // The pyramid spins in place around its own translated pivot.
        for t in [0.3, 2.0, 7.5] {
            let pos = translation(ShowcaseTransforms::at(t).pyramid_orbit);
            assert_eq!(pos, Vec3::new(4.0, 0.0, 2.0));
        }
    }

    #[test]
    fn line_never_moves() {
        assert_eq!(ShowcaseTransforms::at(12.0).line, Mat4::IDENTITY);
    }
}
