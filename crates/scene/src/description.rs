//! The external scene description file.
//!
//! The JSON field names are the file format and are kept verbatim; the
//! `HasTexture` integer flag in particular is part of that format even
//! though the model represents texture presence as an `Option`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level scene description: a version string and an array of object
/// descriptors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub version: String,
    #[serde(rename = "Gameobjects")]
    pub gameobjects: Vec<ObjectDesc>,
}

/// One object descriptor as it appears in the scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDesc {
    #[serde(rename = "MeshLocation")]
    pub mesh_location: String,
    #[serde(rename = "TextureLocation", default)]
    pub texture_location: Option<String>,
    #[serde(rename = "RotationY")]
    pub rotation_y: f32,
    #[serde(rename = "Scale")]
    pub scale: f32,
    #[serde(rename = "HasTexture")]
    pub has_texture: i32,
    #[serde(rename = "StartPosX")]
    pub start_pos_x: f32,
    #[serde(rename = "StartPosY")]
    pub start_pos_y: f32,
    #[serde(rename = "StartPosZ")]
    pub start_pos_z: f32,
}

impl SceneFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, crate::SceneError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_str_json(&text)?)
    }

    pub fn from_str_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ObjectDesc {
    pub fn start_position(&self) -> Vec3 {
        Vec3::new(self.start_pos_x, self.start_pos_y, self.start_pos_z)
    }

    /// The texture path, when the descriptor both flags a texture and
    /// names one.
    pub fn texture_path(&self) -> Option<&str> {
        if self.has_texture == 1 {
            self.texture_location.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "1.0",
        "Gameobjects": [
            {
                "MeshLocation": "models/crate.obj",
                "TextureLocation": "textures/crate.png",
                "RotationY": 0.7,
                "Scale": 1.5,
                "HasTexture": 1,
                "StartPosX": -2.0,
                "StartPosY": 0.0,
                "StartPosZ": 5.0
            },
            {
                "MeshLocation": "models/rock.obj",
                "RotationY": 0.0,
                "Scale": 1.0,
                "HasTexture": 0,
                "StartPosX": 0.0,
                "StartPosY": 1.0,
                "StartPosZ": 0.0
            }
        ]
    }"#;

    #[test]
    fn parses_the_scene_file_field_names() {
        let file = SceneFile::from_str_json(SAMPLE).unwrap();
        assert_eq!(file.version, "1.0");
        assert_eq!(file.gameobjects.len(), 2);

        let first = &file.gameobjects[0];
        assert_eq!(first.mesh_location, "models/crate.obj");
        assert_eq!(first.texture_path(), Some("textures/crate.png"));
        assert_eq!(first.start_position(), Vec3::new(-2.0, 0.0, 5.0));
    }

    #[test]
    fn missing_texture_location_is_allowed() {
        let file = SceneFile::from_str_json(SAMPLE).unwrap();
        let second = &file.gameobjects[1];
        assert_eq!(second.texture_location, None);
        assert_eq!(second.texture_path(), None);
    }

    #[test]
    fn texture_flag_zero_suppresses_a_named_texture() {
        let text = r#"{
            "version": "1.0",
            "Gameobjects": [{
                "MeshLocation": "m.obj",
                "TextureLocation": "t.png",
                "RotationY": 0.0,
                "Scale": 1.0,
                "HasTexture": 0,
                "StartPosX": 0.0,
                "StartPosY": 0.0,
                "StartPosZ": 0.0
            }]
        }"#;
        let file = SceneFile::from_str_json(text).unwrap();
        assert_eq!(file.gameobjects[0].texture_path(), None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SceneFile::from_str_json("{\"version\": }").is_err());
    }
}
