//! The loaded scene and its lifecycle.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use corelib::Vec3;

use crate::{
    assemble::{self, SceneBounds},
    device::TextureDevice,
    error::AssetResult,
    material::Material,
    mesh::MeshData,
    obj::ObjLoader,
    report::LoadReport,
    scene::{Face, Geometry, GroupObject},
    source::{DiskFs, SourceFs},
};

/// Owns every pool, material and texture of one loaded OBJ scene.
///
/// A load either replaces the whole scene or, if the scene file cannot be
/// read, leaves the previous one in place. Not internally synchronised.
pub struct Model {
    fs: Box<dyn SourceFs>,
    device: Arc<dyn TextureDevice>,
    geometry: Geometry,
    bounds: SceneBounds,
    source_path: PathBuf,
    loaded: bool,
}

impl Model {
    /// Empty model reading from the real filesystem.
    pub fn new(device: Arc<dyn TextureDevice>) -> Self {
        Self::with_source(DiskFs, device)
    }

    /// Empty model reading through `fs`.
    pub fn with_source(fs: impl SourceFs + 'static, device: Arc<dyn TextureDevice>) -> Self {
        Self {
            fs: Box::new(fs),
            device,
            geometry: Geometry::new(),
            bounds: SceneBounds::empty(),
            source_path: PathBuf::new(),
            loaded: false,
        }
    }

    /// Load `path` from disk into a new model.
    pub fn open(
        path: impl AsRef<Path>,
        device: Arc<dyn TextureDevice>,
    ) -> AssetResult<(Self, LoadReport)> {
        let mut model = Self::new(device);
        let report = model.load(path)?;
        Ok((model, report))
    }

    /// Parse `path` and its material libraries, replacing the current scene.
    ///
    /// Only an unreadable scene file is an error; in that case the model is
    /// left exactly as it was. Everything else is collected in the report.
    pub fn load(&mut self, path: impl AsRef<Path>) -> AssetResult<LoadReport> {
        let path = path.as_ref();
        log::info!("Loading model {:?}", path);

        let mut report = LoadReport::new();
        let mut geometry = ObjLoader::new(&*self.fs, &self.device).load(path, &mut report)?;

        let bounds = match assemble::assemble(&mut geometry) {
            Ok(bounds) => bounds,
            Err(err) => {
                report.warn(err);
                SceneBounds::empty()
            }
        };

        // Old textures are released when the previous geometry drops here.
        self.geometry = geometry;
        self.bounds = bounds;
        self.source_path = path.to_path_buf();
        self.loaded = true;

        log::info!(
            "Model {:?} loaded: radius {:.3}, center {:?}, {} warning(s)",
            path,
            self.bounds.radius,
            self.bounds.center,
            report.warnings.len()
        );
        Ok(report)
    }

    /// Drop every object, pool entry, material and texture.
    pub fn unload(&mut self) {
        if self.loaded {
            log::info!("Unloading model {:?}", self.source_path);
        }
        self.geometry = Geometry::new();
        self.bounds = SceneBounds::empty();
        self.source_path = PathBuf::new();
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Bounding-sphere radius (half the box diagonal).
    pub fn radius(&self) -> f32 {
        self.bounds.radius
    }

    /// Mean vertex position.
    pub fn center(&self) -> Vec3 {
        self.bounds.center
    }

    pub fn bounds(&self) -> &SceneBounds {
        &self.bounds
    }

    pub fn bounding_corners(&self) -> &[Vec3; 8] {
        &self.bounds.corners
    }

    /// Path of the last successfully loaded scene file.
    pub fn path(&self) -> &Path {
        &self.source_path
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn objects(&self) -> &[GroupObject] {
        &self.geometry.objects
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.geometry.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.geometry.normals
    }

    pub fn texcoords(&self) -> &[Vec3] {
        &self.geometry.texcoords
    }

    pub fn materials(&self) -> &[Material] {
        &self.geometry.materials
    }

    /// Material a face is bound to, if any.
    pub fn face_material(&self, face: &Face) -> Option<&Material> {
        face.material.and_then(|id| self.geometry.material(id))
    }

    /// Flatten the scene into an indexed triangle list.
    pub fn mesh_data(&self) -> AssetResult<MeshData> {
        MeshData::from_geometry(&self.geometry)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("source_path", &self.source_path)
            .field("loaded", &self.loaded)
            .field("objects", &self.geometry.objects.len())
            .field("vertices", &self.geometry.vertices.len())
            .field("materials", &self.geometry.materials.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}
