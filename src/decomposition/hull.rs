use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use na::Matrix3;
use num::Zero;

/// One convex polyhedron produced by decomposition.
///
/// Owned geometry, never mutated after construction. Volume and centroid are
/// derived from the triangle data by signed-tetrahedron summation since the
/// engine boundary only exposes vertex and index buffers.
#[derive(Clone, Debug)]
pub struct Hull {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    volume: Real,
    centroid: Point<Real>,
    aabb: Aabb,
}

impl Hull {
    /// Callers guarantee `vertices` is non-empty and every index is in
    /// range; the extraction path checks both before construction.
    pub(crate) fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Hull {
        let aabb = Aabb::from_points(&vertices);
        let (volume, centroid) = signed_volume_and_centroid(&vertices, &indices);

        Hull {
            vertices,
            indices,
            volume,
            centroid,
            aabb,
        }
    }

    /// The hull vertices, in engine order.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The hull triangles as index triples, in engine order.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The enclosed volume.
    pub fn volume(&self) -> Real {
        self.volume
    }

    /// The centroid of the enclosed volume.
    pub fn centroid(&self) -> Point<Real> {
        self.centroid
    }

    /// The axis-aligned bounds of the hull vertices.
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }
}

/// Volume and centroid of a closed triangle surface, by summing signed
/// tetrahedra between the origin and each triangle.
fn signed_volume_and_centroid(
    vertices: &[Point<Real>],
    indices: &[[u32; 3]],
) -> (Real, Point<Real>) {
    let mut volume = 0.0;
    let mut weighted = Vector::zeros();

    for tri in indices {
        let a = vertices[tri[0] as usize];
        let b = vertices[tri[1] as usize];
        let c = vertices[tri[2] as usize];

        let vol = tetrahedron_signed_volume(&a, &b, &c);
        // Center of the tetrahedron (origin, a, b, c).
        let center = (a.coords + b.coords + c.coords) / na::convert::<f64, Real>(4.0);

        weighted += center * vol;
        volume += vol;
    }

    if volume.is_zero() {
        // Flat geometry; fall back to the vertex average.
        let sum = vertices.iter().fold(Vector::zeros(), |acc, pt| acc + pt.coords);
        let centroid = Point::from(sum / na::convert::<f64, Real>(vertices.len() as f64));
        return (0.0, centroid);
    }

    let centroid = Point::from(weighted / volume);
    (volume.abs(), centroid)
}

/// Signed volume of the tetrahedron (origin, a, b, c).
fn tetrahedron_signed_volume(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Real {
    let mat = Matrix3::new(a.x, b.x, c.x, a.y, b.y, c.y, a.z, b.z, c.z);
    mat.determinant() / na::convert::<f64, Real>(6.0)
}
