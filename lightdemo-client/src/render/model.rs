//! GPU side models and the cache they are loaded through.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

use image::{DynamicImage, Rgba, RgbaImage};
use lightdemo_core::{MeshData, ObjData};

use crate::abs::{Mesh, Texture};

/// A mesh and the texture it is drawn with. Cloning shares the GPU resources.
#[derive(Clone)]
pub struct Model {
    mesh: Rc<Mesh>,
    texture: Rc<Texture>,
}

impl Model {
    pub fn new(mesh: Rc<Mesh>, texture: Rc<Texture>) -> Self {
        Self { mesh, texture }
    }

    /// Binds the texture to unit 0 and draws the mesh.
    pub fn draw(&self) {
        self.texture.bind(0);
        self.mesh.draw();
    }
}

/// Loads meshes and textures, uploading each distinct file only once.
pub struct AssetCache {
    gl: Arc<glow::Context>,
    meshes: HashMap<PathBuf, Rc<Mesh>>,
    textures: HashMap<PathBuf, Rc<Texture>>,
    blank: Option<Rc<Texture>>,
}

impl AssetCache {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self {
            gl: Arc::clone(gl),
            meshes: HashMap::new(),
            textures: HashMap::new(),
            blank: None,
        }
    }

    /// Returns the model made of the OBJ file at `mesh` and the image at `texture`.
    ///
    /// Untextured models get a single white texel so the same shaders can draw them.
    pub fn model(&mut self, mesh: &Path, texture: Option<&Path>) -> Result<Model, String> {
        let mesh = self.mesh(mesh)?;
        let texture = match texture {
            Some(path) => self.texture(path)?,
            None => self.blank()?,
        };
        Ok(Model::new(mesh, texture))
    }

    fn mesh(&mut self, path: &Path) -> Result<Rc<Mesh>, String> {
        if let Some(mesh) = self.meshes.get(path) {
            return Ok(Rc::clone(mesh));
        }

        let data = load_mesh_data(path)
            .map_err(|e| format!("Failed to load mesh '{}': {}", path.display(), e))?;
        let mesh = Rc::new(Mesh::new(
            &self.gl,
            &data.vertices,
            &data.indices,
            glow::TRIANGLES,
        )?);
        log::debug!(
            "Uploaded mesh '{}' ({} vertices, {} triangles)",
            path.display(),
            data.vertices.len(),
            data.triangle_count()
        );
        self.meshes.insert(path.to_path_buf(), Rc::clone(&mesh));
        Ok(mesh)
    }

    fn texture(&mut self, path: &Path) -> Result<Rc<Texture>, String> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(Rc::clone(texture));
        }

        let texture = Rc::new(Texture::load(&self.gl, path)?);
        self.textures.insert(path.to_path_buf(), Rc::clone(&texture));
        Ok(texture)
    }

    fn blank(&mut self) -> Result<Rc<Texture>, String> {
        if let Some(texture) = &self.blank {
            return Ok(Rc::clone(texture));
        }

        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([255; 4])));
        let texture = Rc::new(Texture::new(&self.gl, &image)?);
        self.blank = Some(Rc::clone(&texture));
        Ok(texture)
    }
}

/// Reads an OBJ file into drawable vertex data.
///
/// Files that carry neither texture coordinates nor normals only need one vertex per position.
fn load_mesh_data(path: &Path) -> Result<MeshData, lightdemo_core::ObjError> {
    let obj = ObjData::load(path)?;
    if obj.texcoords.is_empty() && obj.normals.is_empty() {
        MeshData::positions_only(&obj)
    } else {
        MeshData::from_obj(&obj)
    }
}

#[cfg(test)]
mod tests {
    use lightdemo_core::obj::ObjErrorKind;

    use super::*;

    fn asset(path: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(path)
    }

    #[test]
    fn test_bundled_meshes() {
        let cube = load_mesh_data(&asset("models/cube.obj")).unwrap();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);

        let octahedron = load_mesh_data(&asset("models/octahedron.obj")).unwrap();
        assert_eq!(octahedron.vertices.len(), 24);
        assert_eq!(octahedron.triangle_count(), 8);
    }

    #[test]
    fn test_missing_mesh() {
        let err = load_mesh_data(&asset("models/missing.obj")).unwrap_err();
        assert_eq!(err.line, 0);
        assert!(matches!(err.kind, ObjErrorKind::Io(_)));
    }
}
