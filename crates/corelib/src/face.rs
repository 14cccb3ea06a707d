//! Per-face derived geometry.

use crate::{Vec3, bounds};

/// Centroid of a polygon's vertices; the origin for an empty polygon.
pub fn centroid(vertices: &[Vec3]) -> Vec3 {
    bounds::mean(vertices.iter().copied()).unwrap_or(Vec3::ZERO)
}

/// Face normal from the first three vertices, `None` below three.
///
/// This is the cross product of the two *normalized* edges `v0 - v1` and
/// `v0 - v2`; the result itself is not renormalized, so its length is the
/// sine of the angle at `v0`. Consumers that need a unit normal must
/// normalize it.
pub fn normal(vertices: &[Vec3]) -> Option<Vec3> {
    match vertices {
        [v0, v1, v2, ..] => {
            let e1 = (*v0 - *v1).normalize();
            let e2 = (*v0 - *v2).normalize();
            Some(e1.cross(e2))
        }
        _ => None,
    }
}
