//! CPU-side triangle mesh flattened from a parsed scene, ready for upload.

use std::collections::HashMap;

use corelib::Vec3;

use crate::{
    error::{AssetError, AssetResult},
    scene::Geometry,
};

/// Vertex with position/normal/uv. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Fan-triangulate every face with at least three vertices.
    ///
    /// Corners sharing the same (vertex, texcoord, normal) references are
    /// emitted once. Corners without a normal take the face normal (or +Z
    /// for degenerate faces) and are never shared across faces.
    pub fn from_geometry(geometry: &Geometry) -> AssetResult<Self> {
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        struct Key(usize, Option<usize>, Option<usize>, Option<usize>);

        let mut unique: HashMap<Key, u32> = HashMap::new();
        let mut vertices: Vec<MeshVertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut corner_indices: Vec<u32> = Vec::new();

        for (face_no, face) in geometry.faces().enumerate() {
            if face.vertices.len() < 3 {
                continue;
            }
            let fallback = face.normal.and_then(Vec3::try_normalize).unwrap_or(Vec3::Z);

            corner_indices.clear();
            for (corner, &vi) in face.vertices.iter().enumerate() {
                let ti = face.texcoords.get(corner).copied();
                let ni = face.normals.get(corner).copied();
                let key = Key(vi, ti, ni, ni.is_none().then_some(face_no));

                let index = match unique.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        let position = geometry.vertices[vi].to_array();
                        let uv = ti
                            .map(|i| {
                                let t = geometry.texcoords[i];
                                [t.x, t.y]
                            })
                            .unwrap_or([0.0, 0.0]);
                        let normal = ni
                            .map(|i| geometry.normals[i])
                            .unwrap_or(fallback)
                            .to_array();

                        let idx = u32::try_from(vertices.len())
                            .map_err(|_| AssetError::MeshTooLarge(vertices.len()))?;
                        vertices.push(MeshVertex::new(position, normal, uv));
                        unique.insert(key, idx);
                        idx
                    }
                };
                corner_indices.push(index);
            }

            // Triangulate fan
            for tri in 1..(corner_indices.len() - 1) {
                indices.push(corner_indices[0]);
                indices.push(corner_indices[tri]);
                indices.push(corner_indices[tri + 1]);
            }
        }

        Ok(Self::new(vertices, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assemble, scene::Face};
    use corelib::vec3;

    fn quad() -> Geometry {
        let mut g = Geometry::new();
        g.vertices = vec![
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            vec3(1.0, 1.0, 0.0),
            vec3(0.0, 1.0, 0.0),
        ];
        g
    }

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![MeshVertex::default()], vec![0]);
        assert!(data.is_valid());
        assert!(!MeshData::default().is_valid());
    }

    #[test]
    fn quad_fans_into_two_triangles() {
        let mut g = quad();
        g.normals = vec![Vec3::Z];
        g.objects[0].faces.push(Face {
            vertices: vec![0, 1, 2, 3],
            normals: vec![0, 0, 0, 0],
            ..Default::default()
        });
        let mesh = MeshData::from_geometry(&g).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn shared_corners_are_deduplicated() {
        let mut g = quad();
        g.normals = vec![Vec3::Z];
        for tri in [[0, 1, 2], [0, 2, 3]] {
            g.objects[0].faces.push(Face {
                vertices: tri.to_vec(),
                normals: vec![0; 3],
                ..Default::default()
            });
        }
        let mesh = MeshData::from_geometry(&g).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn missing_normals_use_face_normal() {
        let mut g = quad();
        g.objects[0].faces.push(Face {
            vertices: vec![0, 1, 2],
            ..Default::default()
        });
        g.objects[0].faces.push(Face {
            vertices: vec![0, 1],
            ..Default::default()
        });
        assemble::derive_faces(&mut g);
        let mesh = MeshData::from_geometry(&g).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.normal) - Vec3::Z).length() < 1e-6);
            assert_eq!(v.uv, [0.0, 0.0]);
        }
    }
}
