//! Derived geometry over a finished parse: per-face centroid and normal,
//! scene bounds and bounding sphere.

use corelib::{
    Vec3,
    bounds::{self, Aabb},
    face,
};

use crate::{
    error::{AssetError, AssetResult},
    scene::Geometry,
};

/// Scene-wide bounding volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBounds {
    pub aabb: Aabb,
    /// Mean of all vertices, not the box centre.
    pub center: Vec3,
    /// Half the box diagonal.
    pub radius: f32,
    /// See [`Aabb::corners`] for the order.
    pub corners: [Vec3; 8],
}

impl SceneBounds {
    /// Zeroed bounds for a scene without vertices.
    pub const fn empty() -> Self {
        Self {
            aabb: Aabb::new(Vec3::ZERO, Vec3::ZERO),
            center: Vec3::ZERO,
            radius: 0.0,
            corners: [Vec3::ZERO; 8],
        }
    }

    pub fn from_vertices(vertices: &[Vec3]) -> AssetResult<Self> {
        let points = || vertices.iter().copied();
        let aabb = Aabb::from_points(points()).ok_or(AssetError::EmptyVertexPool)?;
        let center = bounds::mean(points()).ok_or(AssetError::EmptyVertexPool)?;
        Ok(Self {
            aabb,
            center,
            radius: aabb.radius(),
            corners: aabb.corners(),
        })
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fill in every face's centre and normal from its resolved vertices.
pub fn derive_faces(geometry: &mut Geometry) {
    let mut positions = Vec::new();
    let Geometry {
        objects, vertices, ..
    } = geometry;
    for f in objects.iter_mut().flat_map(|o| o.faces.iter_mut()) {
        positions.clear();
        positions.extend(f.vertices.iter().map(|&i| vertices[i]));
        f.center = face::centroid(&positions);
        f.normal = face::normal(&positions);
    }
}

/// Post-process a parsed scene. Faces are always derived; bounds fail with
/// [`AssetError::EmptyVertexPool`] when there is nothing to bound.
pub fn assemble(geometry: &mut Geometry) -> AssetResult<SceneBounds> {
    derive_faces(geometry);
    SceneBounds::from_vertices(&geometry.vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Face;
    use corelib::vec3;

    #[test]
    fn two_points_radius_and_center() {
        let b = SceneBounds::from_vertices(&[vec3(0.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0)]).unwrap();
        assert!((b.radius - 1.0).abs() < 1e-6);
        assert!((b.center - vec3(1.0, 0.0, 0.0)).length() < 1e-6);
        assert_eq!(b.corners[6], vec3(0.0, 0.0, 0.0));
        assert_eq!(b.corners[7], vec3(2.0, 0.0, 0.0));
    }

    #[test]
    fn single_vertex_has_zero_radius() {
        let b = SceneBounds::from_vertices(&[vec3(5.0, -1.0, 2.0)]).unwrap();
        assert_eq!(b.radius, 0.0);
        assert_eq!(b.center, vec3(5.0, -1.0, 2.0));
    }

    #[test]
    fn empty_pool_is_reported() {
        let mut g = Geometry::new();
        assert!(matches!(assemble(&mut g), Err(AssetError::EmptyVertexPool)));
    }

    #[test]
    fn faces_get_center_and_normal() {
        let mut g = Geometry::new();
        g.vertices = vec![
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
        ];
        g.objects[0].faces.push(Face {
            vertices: vec![0, 1, 2],
            ..Default::default()
        });
        g.objects[0].faces.push(Face {
            vertices: vec![0, 1],
            ..Default::default()
        });
        assemble(&mut g).unwrap();
        let tri = &g.objects[0].faces[0];
        assert!((tri.center - vec3(1.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-6);
        assert!(tri.normal.unwrap().z > 0.0);
        let line = &g.objects[0].faces[1];
        assert_eq!(line.center, vec3(0.5, 0.0, 0.0));
        assert!(line.normal.is_none());
    }
}
