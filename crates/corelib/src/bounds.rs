//! Axis-aligned bounds over a point cloud.

use crate::Vec3;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| {
            Self::new(acc.min.min(p), acc.max.max(p))
        }))
    }

    #[inline]
    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).length()
    }

    /// Half the diagonal. Encloses the box but is not a minimal sphere.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.diagonal() / 2.0
    }

    /// The eight corners in a fixed order (lower case = min, upper case = max):
    ///
    /// `0 (X,y,z)  1 (x,Y,z)  2 (x,y,Z)  3 (x,Y,Z)  4 (X,Y,z)  5 (X,y,Z)  6 (x,y,z)  7 (X,Y,Z)`
    ///
    /// Index 6 is always `min` and index 7 always `max`.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            lo,
            hi,
        ]
    }
}

/// Arithmetic mean of a point set. `None` when empty.
pub fn mean<I>(points: I) -> Option<Vec3>
where
    I: IntoIterator<Item = Vec3>,
{
    let (sum, count) = points
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(sum, n), p| (sum + p, n + 1));
    (count > 0).then(|| sum / count as f32)
}
