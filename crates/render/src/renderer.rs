use crate::plan::{frame_plan, Drawable};
use glam::Vec4;
use orrery_common::FrameContext;
use orrery_scene::{ActiveCamera, Scene};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and the tick's frame context, then
/// produces output. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene state.
    fn render(&self, scene: &Scene, ctx: &FrameContext) -> Self::Output;
}

/// Text renderer for headless use: CLI output, logging, and tests.
///
/// Produces a human-readable dump of the frame: active camera, camera
/// position, and the draw list in submission order.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, ctx: &FrameContext) -> String {
        let mut out = String::new();
        let eye = scene.rig.eye();
        let camera = match scene.rig.active() {
            ActiveCamera::Fixed(i) => format!("fixed[{i}]"),
            ActiveCamera::FreeLook => "free-look".to_string(),
        };
        out.push_str(&format!(
            "=== Frame (t={:.3}s, dt={:.3}s) ===\n",
            ctx.elapsed, ctx.delta
        ));
        out.push_str(&format!(
            "Camera: {camera} eye=({:.2}, {:.2}, {:.2})\n",
            eye.x, eye.y, eye.z
        ));

        let plan = frame_plan(scene);
        out.push_str(&format!("Draws: {}\n", plan.len()));
        for command in &plan {
            let name = match command.drawable {
                Drawable::Cube => "cube".to_string(),
                Drawable::Pyramid => "pyramid".to_string(),
                Drawable::Line => "line".to_string(),
                Drawable::Object(i) => format!("object[{i}]"),
            };
            let pos = (command.world * Vec4::new(0.0, 0.0, 0.0, 1.0)).truncate();
            out.push_str(&format!(
                "  {name:<10} pos=({:.2}, {:.2}, {:.2}) textured={}\n",
                pos.x, pos.y, pos.z, command.has_texture
            ));
        }
        out
    }
}
