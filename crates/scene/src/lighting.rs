use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Lighting constants uploaded with every draw: a single directional
/// light with diffuse, ambient and specular terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub diffuse_light: Vec4,
    pub diffuse_material: Vec4,
    pub ambient_light: Vec4,
    pub ambient_material: Vec4,
    pub specular_light: Vec4,
    pub specular_material: Vec4,
    pub specular_power: f32,
    pub light_dir: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            diffuse_light: Vec4::new(0.6, 0.6, 0.6, 1.0),
            diffuse_material: Vec4::ONE,
            ambient_light: Vec4::new(0.1, 0.1, 0.1, 1.0),
            ambient_material: Vec4::ONE,
            specular_light: Vec4::new(0.8, 0.8, 0.8, 1.0),
            specular_material: Vec4::ONE,
            specular_power: 10.0,
            light_dir: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}
