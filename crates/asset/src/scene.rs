//! Parsed scene graph: attribute pools, objects, faces, materials.

use corelib::Vec3;

use crate::material::{Material, MaterialId};

/// Name of the implicit object that collects faces outside any `g` group.
pub const DEFAULT_OBJECT: &str = "default";

/// A polygon. Every reference is an index into the owning scene's pools;
/// the three lists are independent in length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
    pub vertices: Vec<usize>,
    pub texcoords: Vec<usize>,
    pub normals: Vec<usize>,
    pub material: Option<MaterialId>,
    /// Mean of the vertex positions.
    pub center: Vec3,
    /// See [`corelib::face::normal`]; `None` below three vertices.
    pub normal: Option<Vec3>,
}

/// Faces collected under one `g` directive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupObject {
    pub object_name: String,
    pub group_name: String,
    pub faces: Vec<Face>,
}

impl GroupObject {
    pub fn new(object_name: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            group_name: group_name.into(),
            faces: Vec::new(),
        }
    }
}

/// Everything one OBJ file (plus its libraries) produces.
///
/// `objects[0]` is always the default object.
#[derive(Debug)]
pub struct Geometry {
    pub objects: Vec<GroupObject>,
    pub vertices: Vec<Vec3>,
    pub texcoords: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub materials: Vec<Material>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    pub fn new() -> Self {
        Self {
            objects: vec![GroupObject::new(DEFAULT_OBJECT, "")],
            vertices: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
            materials: Vec::new(),
        }
    }

    pub fn default_object(&self) -> &GroupObject {
        &self.objects[0]
    }

    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.objects.iter().flat_map(|o| o.faces.iter())
    }

    pub fn face_count(&self) -> usize {
        self.objects.iter().map(|o| o.faces.len()).sum()
    }

    /// First material with this exact name, in pool order.
    pub fn find_material(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .position(|m| m.name == name)
            .map(MaterialId)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn face_positions<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = Vec3> + 'a {
        face.vertices.iter().map(|&i| self.vertices[i])
    }

    pub fn face_texcoords<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = Vec3> + 'a {
        face.texcoords.iter().map(|&i| self.texcoords[i])
    }

    pub fn face_normals<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = Vec3> + 'a {
        face.normals.iter().map(|&i| self.normals[i])
    }
}
