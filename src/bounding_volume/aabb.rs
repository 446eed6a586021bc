//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};

/// An Axis-Aligned Bounding Box (AABB).
///
/// Defined by its minimum and maximum corners. Its edges are always parallel
/// to the coordinate axes, so intersection and extent queries reduce to
/// coordinate comparisons.
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with the smallest coordinates on each axis.
    pub mins: Point<Real>,
    /// The point with the largest coordinates on each axis.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Computes the AABB of a set of points.
    ///
    /// An empty set yields an inverted AABB with negative extents on every
    /// axis.
    pub fn from_points<'a, I>(points: I) -> Aabb
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut mins = Point::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point::new(-Real::MAX, -Real::MAX, -Real::MAX);

        for pt in points {
            mins.coords = mins.coords.inf(&pt.coords);
            maxs.coords = maxs.coords.sup(&pt.coords);
        }

        Aabb { mins, maxs }
    }

    /// The center of this AABB.
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extent of this AABB along each axis.
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }
}
