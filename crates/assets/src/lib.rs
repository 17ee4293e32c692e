//! Mesh and texture import plus a content-addressed registry.
//!
//! Assets are identified by a hash of their payload. The renderer consumes
//! assets by ID, never by raw file paths, and the registry is read-only
//! once the scene has loaded.

pub mod obj;

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

pub use obj::parse_obj;

/// Content-addressed asset ID computed from the asset payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

/// One interleaved mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

/// CPU-side mesh: interleaved vertices and triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshAsset {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// CPU-side texture: RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAsset {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Errors from asset import and lookup.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("malformed OBJ ({path} line {line}): {reason}")]
    MalformedObj {
        path: String,
        line: usize,
        reason: String,
    },
    #[error("asset not found: {0:?}")]
    NotFound(AssetId),
}

/// An entry in the registry.
#[derive(Debug, Clone)]
pub enum Asset {
    Mesh(MeshAsset),
    Texture(TextureAsset),
}

/// Content-addressed asset registry.
///
/// Registering identical payloads yields the same ID, so scenes that
/// reference one mesh or texture many times load it once.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    assets: BTreeMap<AssetId, Asset>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh and return its content-addressed ID.
    pub fn register_mesh(&mut self, mesh: MeshAsset) -> AssetId {
        let mut hasher = Sha256::new();
        for v in &mesh.vertices {
            for f in v.position.iter().chain(&v.normal).chain(&v.texcoord) {
                hasher.update(f.to_le_bytes());
            }
        }
        for i in &mesh.indices {
            hasher.update(i.to_le_bytes());
        }
        let id = Self::truncate(hasher);
        self.assets.insert(id, Asset::Mesh(mesh));
        id
    }

    /// Register a texture and return its content-addressed ID.
    pub fn register_texture(&mut self, texture: TextureAsset) -> AssetId {
        let mut hasher = Sha256::new();
        hasher.update(texture.width.to_le_bytes());
        hasher.update(texture.height.to_le_bytes());
        hasher.update(&texture.pixels);
        let id = Self::truncate(hasher);
        self.assets.insert(id, Asset::Texture(texture));
        id
    }

    /// Import a Wavefront OBJ file and register the mesh.
    pub fn import_obj(&mut self, path: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mesh = parse_obj(&path.display().to_string(), &text)?;
        tracing::debug!(
            path = %path.display(),
            vertices = mesh.vertices.len(),
            indices = mesh.indices.len(),
            "imported mesh"
        );
        Ok(self.register_mesh(mesh))
    }

    /// Import an image file (PNG or JPEG) and register it as RGBA8.
    pub fn import_texture(&mut self, path: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        tracing::debug!(path = %path.display(), width, height, "imported texture");
        Ok(self.register_texture(TextureAsset {
            name: path.display().to_string(),
            width,
            height,
            pixels: decoded.into_raw(),
        }))
    }

    pub fn get_mesh(&self, id: AssetId) -> Result<&MeshAsset, AssetError> {
        match self.assets.get(&id) {
            Some(Asset::Mesh(m)) => Ok(m),
            _ => Err(AssetError::NotFound(id)),
        }
    }

    pub fn get_texture(&self, id: AssetId) -> Result<&TextureAsset, AssetError> {
        match self.assets.get(&id) {
            Some(Asset::Texture(t)) => Ok(t),
            _ => Err(AssetError::NotFound(id)),
        }
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn truncate(hasher: Sha256) -> AssetId {
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        AssetId(u64::from_le_bytes(bytes))
    }
}

pub fn crate_info() -> &'static str {
    "orrery-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn triangle() -> MeshAsset {
        MeshAsset {
            name: "tri".into(),
            vertices: vec![
                MeshVertex {
                    position: [0.0, 0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    texcoord: [0.0, 0.0],
                },
                MeshVertex {
                    position: [1.0, 0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    texcoord: [1.0, 0.0],
                },
                MeshVertex {
                    position: [0.0, 1.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    texcoord: [0.0, 1.0],
                },
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn register_and_fetch_mesh() {
        let mut store = AssetStore::new();
        let id = store.register_mesh(triangle());
        let mesh = store.get_mesh(id).unwrap();
        assert_eq!(mesh.index_count(), 3);
    }

    #[test]
    fn content_addressed_dedup() {
        let mut store = AssetStore::new();
        let a = store.register_mesh(triangle());
        let b = store.register_mesh(triangle());
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mesh_lookup_with_texture_id_fails() {
        let mut store = AssetStore::new();
        let id = store.register_texture(TextureAsset {
            name: "white".into(),
            width: 1,
            height: 1,
            pixels: vec![255; 4],
        });
        assert!(matches!(store.get_mesh(id), Err(AssetError::NotFound(_))));
        assert!(store.get_texture(id).is_ok());
    }

    #[test]
    fn import_obj_from_file() {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();

        let mut store = AssetStore::new();
        let id = store.import_obj(file.path()).unwrap();
        let mesh = store.get_mesh(id).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn import_texture_from_file() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        img.save_with_format(file.path(), image::ImageFormat::Png)
            .unwrap();

        let mut store = AssetStore::new();
        let id = store.import_texture(file.path()).unwrap();
        let tex = store.get_texture(id).unwrap();
        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(tex.pixels.len(), 16);
    }
}
