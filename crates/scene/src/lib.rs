//! Scene model: cameras, game objects, demo animation, scene descriptions.
//!
//! # Invariants
//! - Showcase transforms are pure functions of elapsed time.
//! - Camera selection changes which source feeds the frame constants;
//!   it never touches object transforms.
//! - Game objects are immutable once loaded.

pub mod camera;
pub mod description;
pub mod lighting;
pub mod object;
pub mod showcase;

use orrery_assets::{AssetError, AssetStore};
use orrery_common::FrameContext;
use orrery_input::CameraAction;
use std::path::Path;

pub use camera::{ActiveCamera, Camera, CameraRig, LookCamera};
pub use description::{ObjectDesc, SceneFile};
pub use lighting::Lighting;
pub use object::GameObject;
pub use showcase::ShowcaseTransforms;

/// Errors from loading a scene description and its assets.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene description parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Everything the renderer reads each frame: the camera rig, the loaded
/// game objects, lighting constants and the current showcase transforms.
pub struct Scene {
    pub rig: CameraRig,
    pub objects: Vec<GameObject>,
    pub lighting: Lighting,
    pub showcase: ShowcaseTransforms,
}

impl Scene {
    /// An empty scene: demo cameras, no game objects.
    pub fn new(rig: CameraRig) -> Self {
        Self {
            rig,
            objects: Vec::new(),
            lighting: Lighting::default(),
            showcase: ShowcaseTransforms::at(0.0),
        }
    }

    /// Load a scene description file and import the assets it references.
    ///
    /// Mesh and texture paths are resolved relative to the file's
    /// directory. Any import failure is fatal to loading.
    pub fn load(
        path: impl AsRef<Path>,
        rig: CameraRig,
        store: &mut AssetStore,
    ) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let file = SceneFile::from_path(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_description(&file, base, rig, store)
    }

    /// Build a scene from an already-parsed description.
    pub fn from_description(
        file: &SceneFile,
        base: &Path,
        rig: CameraRig,
        store: &mut AssetStore,
    ) -> Result<Self, SceneError> {
        let mut scene = Self::new(rig);
        for desc in &file.gameobjects {
            let mesh = store.import_obj(base.join(&desc.mesh_location))?;
            let texture = match desc.texture_path() {
                Some(tex) => Some(store.import_texture(base.join(tex))?),
                None => None,
            };
            scene.objects.push(GameObject::new(
                desc.start_position(),
                desc.scale,
                desc.rotation_y,
                mesh,
                texture,
            ));
        }
        tracing::info!(
            version = %file.version,
            objects = scene.objects.len(),
            assets = store.len(),
            "scene loaded"
        );
        Ok(scene)
    }

    /// Advance the demo animation to the tick's elapsed time.
    ///
    /// Purely a function of `ctx.elapsed`; replaying the same contexts
    /// reproduces the same transforms.
    pub fn update(&mut self, ctx: &FrameContext) {
        self.showcase = ShowcaseTransforms::at(ctx.elapsed);
    }

    /// Route a camera action to the rig.
    pub fn apply(&mut self, action: CameraAction) {
        self.rig.apply(action);
    }
}

pub fn crate_info() -> &'static str {
    "orrery-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_scene_has_showcase_only() {
        let scene = Scene::new(CameraRig::demo(16.0 / 9.0));
        assert!(scene.objects.is_empty());
        assert_eq!(scene.showcase, ShowcaseTransforms::at(0.0));
    }

    #[test]
    fn update_is_a_function_of_elapsed_time() {
        let mut a = Scene::new(CameraRig::demo(1.0));
        let mut b = Scene::new(CameraRig::demo(1.0));
        a.update(&FrameContext {
            delta: 0.016,
            elapsed: 2.5,
        });
        b.update(&FrameContext {
            delta: 1.0,
            elapsed: 2.5,
        });
        assert_eq!(a.showcase, b.showcase);
    }

    #[test]
    fn load_scene_with_objects() {
        let dir = tempfile::tempdir().unwrap();
        let obj_path = dir.path().join("tri.obj");
        let mut obj = std::fs::File::create(&obj_path).unwrap();
        writeln!(obj, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();

        let scene_path = dir.path().join("scene.json");
        std::fs::write(
            &scene_path,
            r#"{
                "version": "1.0",
                "Gameobjects": [
                    {
                        "MeshLocation": "tri.obj",
                        "RotationY": 1.5,
                        "Scale": 2.0,
                        "HasTexture": 0,
                        "StartPosX": 1.0,
                        "StartPosY": 2.0,
                        "StartPosZ": 3.0
                    }
                ]
            }"#,
        )
        .unwrap();

        let mut store = AssetStore::new();
        let scene = Scene::load(&scene_path, CameraRig::demo(1.0), &mut store).unwrap();
        assert_eq!(scene.objects.len(), 1);
        assert!(!scene.objects[0].has_texture());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_mesh_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let scene_path = dir.path().join("scene.json");
        std::fs::write(
            &scene_path,
            r#"{
                "version": "1.0",
                "Gameobjects": [
                    {
                        "MeshLocation": "nope.obj",
                        "RotationY": 0.0,
                        "Scale": 1.0,
                        "HasTexture": 0,
                        "StartPosX": 0.0,
                        "StartPosY": 0.0,
                        "StartPosZ": 0.0
                    }
                ]
            }"#,
        )
        .unwrap();

        let mut store = AssetStore::new();
        let result = Scene::load(&scene_path, CameraRig::demo(1.0), &mut store);
        assert!(matches!(result, Err(SceneError::Asset(_))));
    }
}
