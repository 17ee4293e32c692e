use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use orrery_common::FrameContext;
use orrery_scene::Scene;

/// The per-draw constant block consumed by both shader stages.
///
/// Field order and padding mirror the WGSL `FrameUniforms` struct: the
/// vec3 fields each share a 16-byte slot with the f32 that follows them,
/// and the trailing flag is padded out to 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub world: [[f32; 4]; 4],
    pub diffuse_light: [f32; 4],
    pub diffuse_material: [f32; 4],
    pub ambient_light: [f32; 4],
    pub ambient_material: [f32; 4],
    pub specular_light: [f32; 4],
    pub specular_material: [f32; 4],
    pub light_dir: [f32; 3],
    pub elapsed: f32,
    pub camera_pos: [f32; 3],
    pub specular_power: f32,
    pub has_texture: u32,
    pub _pad: [u32; 3],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            world: Mat4::IDENTITY.to_cols_array_2d(),
            diffuse_light: [0.0; 4],
            diffuse_material: [0.0; 4],
            ambient_light: [0.0; 4],
            ambient_material: [0.0; 4],
            specular_light: [0.0; 4],
            specular_material: [0.0; 4],
            light_dir: [0.0; 3],
            elapsed: 0.0,
            camera_pos: [0.0; 3],
            specular_power: 0.0,
            has_texture: 0,
            _pad: [0; 3],
        }
    }
}

impl FrameUniforms {
    /// The parts shared by every draw this frame: camera matrices,
    /// lighting, elapsed time. World matrix and texture flag stay at
    /// their defaults until a draw writes its own.
    pub fn frame_base(scene: &Scene, ctx: &FrameContext) -> Self {
        let lighting = &scene.lighting;
        Self {
            projection: scene.rig.projection().to_cols_array_2d(),
            view: scene.rig.view().to_cols_array_2d(),
            world: Mat4::IDENTITY.to_cols_array_2d(),
            diffuse_light: lighting.diffuse_light.to_array(),
            diffuse_material: lighting.diffuse_material.to_array(),
            ambient_light: lighting.ambient_light.to_array(),
            ambient_material: lighting.ambient_material.to_array(),
            specular_light: lighting.specular_light.to_array(),
            specular_material: lighting.specular_material.to_array(),
            light_dir: lighting.light_dir.to_array(),
            elapsed: ctx.elapsed,
            camera_pos: scene.rig.eye().to_array(),
            specular_power: lighting.specular_power,
            has_texture: 0,
            _pad: [0; 3],
        }
    }

    /// Specialize the base for one draw command.
    pub fn for_draw(mut self, world: Mat4, has_texture: bool) -> Self {
        self.world = world.to_cols_array_2d();
        self.has_texture = u32::from(has_texture);
        self
    }
}
