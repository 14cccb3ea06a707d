//! Core types: math re-exports, bounding volumes, face geometry helpers.

pub use glam::{Vec3, vec3};

pub mod bounds;
pub mod face;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_ops_match_expectations() {
        let a = vec3(1.0, 0.0, 0.0);
        let b = vec3(0.0, 1.0, 0.0);
        assert_eq!(a.cross(b), Vec3::Z);
        assert_eq!(a.dot(b), 0.0);
        assert!((vec3(3.0, 4.0, 0.0).length() - 5.0).abs() < 1e-6);
        assert!((a.distance(b) - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn normalizing_zero_is_not_finite() {
        // Same as dividing by a zero length; callers must not rely on it.
        let n = Vec3::ZERO.normalize();
        assert!(!n.is_finite());
    }
}
