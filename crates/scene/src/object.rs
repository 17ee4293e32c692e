use glam::{Mat4, Vec3};
use orrery_assets::AssetId;

/// A loaded scene object: a world position, uniform scale and Y-axis
/// rotation over shared mesh data, with an optional shared texture.
///
/// Created once at load time and read-only during rendering. The world
/// matrix is derived fresh from the fields on every query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameObject {
    position: Vec3,
    scale: f32,
    rotation_y: f32,
    mesh: AssetId,
    texture: Option<AssetId>,
}

impl GameObject {
    pub fn new(
        position: Vec3,
        scale: f32,
        rotation_y: f32,
        mesh: AssetId,
        texture: Option<AssetId>,
    ) -> Self {
        Self {
            position,
            scale,
            rotation_y,
            mesh,
            texture,
        }
    }

    /// World transform: rotate about Y, scale uniformly, then translate.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::splat(self.scale))
            * Mat4::from_rotation_y(self.rotation_y)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn mesh(&self) -> AssetId {
        self.mesh
    }

    pub fn texture(&self) -> Option<AssetId> {
        self.texture
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn world_matrix_places_the_origin_at_the_position() {
        let obj = GameObject::new(
            Vec3::new(4.0, 0.0, 2.0),
            0.2,
            1.3,
            AssetId(1),
            None,
        );
        let origin = obj.world_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin.truncate(), Vec3::new(4.0, 0.0, 2.0));
    }

    #[test]
    fn rotation_applies_before_scale_and_translation() {
        let obj = GameObject::new(
            Vec3::new(1.0, 0.0, 0.0),
            2.0,
            std::f32::consts::FRAC_PI_2,
            AssetId(1),
            None,
        );
        // +X in model space swings to -Z, doubles, then translates.
        let p = obj.world_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.z - -2.0).abs() < 1e-5);
    }

    #[test]
    fn texture_presence_mirrors_the_reference() {
        let with = GameObject::new(Vec3::ZERO, 1.0, 0.0, AssetId(1), Some(AssetId(2)));
        let without = GameObject::new(Vec3::ZERO, 1.0, 0.0, AssetId(1), None);
        assert!(with.has_texture());
        assert!(!without.has_texture());
    }
}
