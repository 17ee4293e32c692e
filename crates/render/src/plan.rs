use glam::Mat4;
use orrery_scene::Scene;

/// What a draw command renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawable {
    /// The built-in cube mesh.
    Cube,
    /// The built-in pyramid mesh.
    Pyramid,
    /// The built-in two-vertex line.
    Line,
    /// A loaded game object, by index into the scene's object list.
    Object(usize),
}

/// One entry in the frame's submission sequence: which drawable, its
/// world transform, and whether a texture should be sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub drawable: Drawable,
    pub world: Mat4,
    pub has_texture: bool,
}

/// Build the frame's draw list in strict submission order: the spinning
/// cube, the orbiting cube, the pyramid, the line, then every game
/// object. A scene with zero objects still yields the four built-in
/// draws.
///
/// The built-in cubes sample the default cube texture when one is
/// installed; the pyramid and line are untextured.
pub fn frame_plan(scene: &Scene) -> Vec<DrawCommand> {
    let mut plan = Vec::with_capacity(4 + scene.objects.len());
    plan.push(DrawCommand {
        drawable: Drawable::Cube,
        world: scene.showcase.cube_spin,
        has_texture: true,
    });
    plan.push(DrawCommand {
        drawable: Drawable::Cube,
        world: scene.showcase.cube_orbit,
        has_texture: true,
    });
    plan.push(DrawCommand {
        drawable: Drawable::Pyramid,
        world: scene.showcase.pyramid_orbit,
        has_texture: false,
    });
    plan.push(DrawCommand {
        drawable: Drawable::Line,
        world: scene.showcase.line,
        has_texture: false,
    });
    for (index, object) in scene.objects.iter().enumerate() {
        plan.push(DrawCommand {
            drawable: Drawable::Object(index),
            world: object.world_matrix(),
            has_texture: object.has_texture(),
        });
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_assets::AssetId;
    use orrery_common::FrameContext;
    use orrery_scene::{CameraRig, GameObject};

    fn scene_with_objects(count: usize) -> Scene {
        let mut scene = Scene::new(CameraRig::demo(1.0));
        for i in 0..count {
            scene.objects.push(GameObject::new(
                Vec3::new(i as f32, 0.0, 0.0),
                1.0,
                0.0,
                AssetId(i as u64),
                (i % 2 == 1).then_some(AssetId(100 + i as u64)),
            ));
        }
        scene
    }

    #[test]
    fn empty_scene_still_draws_the_built_ins() {
        let plan = frame_plan(&scene_with_objects(0));
        let drawables: Vec<_> = plan.iter().map(|c| c.drawable).collect();
        assert_eq!(
            drawables,
            vec![
                Drawable::Cube,
                Drawable::Cube,
                Drawable::Pyramid,
                Drawable::Line
            ]
        );
    }

    #[test]
    fn objects_follow_the_built_ins_in_load_order() {
        let plan = frame_plan(&scene_with_objects(3));
        assert_eq!(plan.len(), 7);
        assert_eq!(plan[4].drawable, Drawable::Object(0));
        assert_eq!(plan[5].drawable, Drawable::Object(1));
        assert_eq!(plan[6].drawable, Drawable::Object(2));
    }

    #[test]
    fn each_command_carries_its_own_transform() {
        let mut scene = scene_with_objects(2);
        scene.update(&FrameContext {
            delta: 0.016,
            elapsed: 2.0,
        });
        let plan = frame_plan(&scene);

        assert_eq!(plan[0].world, scene.showcase.cube_spin);
        assert_eq!(plan[1].world, scene.showcase.cube_orbit);
        assert_eq!(plan[2].world, scene.showcase.pyramid_orbit);
        assert_eq!(plan[3].world, Mat4::IDENTITY);
        assert_eq!(plan[4].world, scene.objects[0].world_matrix());
        assert_eq!(plan[5].world, scene.objects[1].world_matrix());
        // No cross-contamination between consecutive commands.
        assert_ne!(plan[4].world, plan[5].world);
    }

    #[test]
    fn texture_flags_follow_the_objects() {
        let plan = frame_plan(&scene_with_objects(2));
        assert!(!plan[4].has_texture);
        assert!(plan[5].has_texture);
    }

    #[test]
    fn plan_ignores_the_active_camera() {
        let mut scene = scene_with_objects(1);
        let before = frame_plan(&scene);
        scene.rig.select(orrery_scene::ActiveCamera::Fixed(3));
        assert_eq!(frame_plan(&scene), before);
    }
}
