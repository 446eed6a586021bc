//! Flat-buffer marshaling between host meshes and the engine boundary.
//!
//! The engine consumes one `f64` triple per vertex and one `u32` triple per
//! triangle, and hands hull geometry back in the same shape. Host geometry
//! uses the crate scalar [`Real`], so packing widens and unpacking narrows.
//! No algorithmic logic lives here; only format adaptation with strict
//! layout checks.

use crate::engine::TriangleLayout;
use crate::math::{Point, Real};

/// Buffer/count mismatch discovered while reconstructing engine output.
///
/// Engines report buffer contents and element counts independently; a
/// mismatch means the hull cannot be interpreted and must be dropped, never
/// silently truncated.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The vertex buffer is shorter than the reported vertex count requires.
    #[error("vertex buffer holds {actual} scalars but {expected} are required for {count} vertices")]
    VertexBufferTooShort {
        /// The vertex count reported by the engine.
        count: u32,
        /// Scalars required to satisfy the reported count.
        expected: usize,
        /// Scalars actually present in the buffer.
        actual: usize,
    },
    /// The triangle buffer is shorter than the reported count requires.
    #[error("triangle buffer holds {actual} indices but {expected} are required by the reported count {count}")]
    TriangleBufferTooShort {
        /// The count reported by the engine, in the engine's layout.
        count: u32,
        /// Indices required to satisfy the reported count.
        expected: usize,
        /// Indices actually present in the buffer.
        actual: usize,
    },
    /// A per-corner buffer reported a count that does not form whole
    /// triangles.
    #[error("per-corner triangle count {count} is not a multiple of 3")]
    PartialTriangle {
        /// The corner count reported by the engine.
        count: u32,
    },
    /// A reconstructed triangle referenced a vertex beyond the hull's vertex
    /// count.
    #[error("triangle index {index} exceeds the hull vertex count {vertex_count}")]
    IndexOutOfBounds {
        /// The offending index value.
        index: u32,
        /// The vertex count reported for the hull.
        vertex_count: u32,
    },
}

/// Flattens a host mesh into the scalar and index buffers the engine
/// consumes.
///
/// The mesh must be non-empty; feeding an empty mesh to the engine is a
/// caller contract violation.
pub fn pack(vertices: &[Point<Real>], indices: &[[u32; 3]]) -> (Vec<f64>, Vec<u32>) {
    assert!(
        !vertices.is_empty() && !indices.is_empty(),
        "cannot pack an empty mesh"
    );

    let mut positions = Vec::with_capacity(vertices.len() * 3);
    for pt in vertices {
        positions.push(na::convert::<Real, f64>(pt.x));
        positions.push(na::convert::<Real, f64>(pt.y));
        positions.push(na::convert::<Real, f64>(pt.z));
    }

    let mut flat = Vec::with_capacity(indices.len() * 3);
    for tri in indices {
        flat.extend_from_slice(tri);
    }

    (positions, flat)
}

/// Interprets `count` consecutive scalar triples as vertex positions,
/// narrowing to the host scalar type.
pub fn unpack_vertices(raw: &[f64], count: u32) -> Result<Vec<Point<Real>>, FormatError> {
    let expected = count as usize * 3;
    if raw.len() < expected {
        return Err(FormatError::VertexBufferTooShort {
            count,
            expected,
            actual: raw.len(),
        });
    }

    let mut vertices = Vec::with_capacity(count as usize);
    for triple in raw[..expected].chunks_exact(3) {
        vertices.push(Point::new(
            na::convert(triple[0]),
            na::convert(triple[1]),
            na::convert(triple[2]),
        ));
    }

    Ok(vertices)
}

/// Interprets an engine triangle buffer as index triples, in the layout the
/// engine binding declared.
///
/// The buffer length is checked against the reported count before anything
/// is read; a shortfall surfaces as an error instead of truncated geometry.
pub fn unpack_triangles(
    raw: &[u32],
    count: u32,
    layout: TriangleLayout,
) -> Result<Vec<[u32; 3]>, FormatError> {
    let (triangles, needed) = match layout {
        TriangleLayout::PerTriangle => (count as usize, count as usize * 3),
        TriangleLayout::PerCorner => {
            if count % 3 != 0 {
                return Err(FormatError::PartialTriangle { count });
            }
            (count as usize / 3, count as usize)
        }
    };

    if raw.len() < needed {
        return Err(FormatError::TriangleBufferTooShort {
            count,
            expected: needed,
            actual: raw.len(),
        });
    }

    let mut indices = Vec::with_capacity(triangles);
    for tri in raw[..needed].chunks_exact(3) {
        indices.push([tri[0], tri[1], tri[2]]);
    }

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::{pack, unpack_triangles, unpack_vertices, FormatError};
    use crate::engine::TriangleLayout;
    use crate::math::Point;

    #[test]
    fn pack_flattens_in_declaration_order() {
        let vertices = vec![Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0)];
        let indices = vec![[0, 1, 0]];

        let (positions, flat) = pack(&vertices, &indices);
        assert_eq!(positions, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(flat, vec![0, 1, 0]);
    }

    #[test]
    fn vertices_round_trip_through_the_engine_layout() {
        let vertices = vec![
            Point::new(0.5, -1.5, 2.0),
            Point::new(3.0, 0.25, -4.0),
            Point::new(-0.125, 8.0, 1.0),
        ];
        let indices = vec![[0, 1, 2]];

        let (positions, flat) = pack(&vertices, &indices);
        let back = unpack_vertices(&positions, 3).unwrap();
        let tris = unpack_triangles(&flat, 1, TriangleLayout::PerTriangle).unwrap();

        assert_eq!(back, vertices);
        assert_eq!(tris, indices);
    }

    #[test]
    fn short_vertex_buffer_is_an_error() {
        let raw = [0.0; 5];
        let err = unpack_vertices(&raw, 2).unwrap_err();
        assert_eq!(
            err,
            FormatError::VertexBufferTooShort {
                count: 2,
                expected: 6,
                actual: 5,
            }
        );
    }

    #[test]
    fn per_triangle_layout_requires_three_indices_per_triangle() {
        // Two whole triangles plus a truncated third.
        let raw = [0, 1, 2, 0, 2, 3, 0];
        let err = unpack_triangles(&raw, 3, TriangleLayout::PerTriangle).unwrap_err();
        assert_eq!(
            err,
            FormatError::TriangleBufferTooShort {
                count: 3,
                expected: 9,
                actual: 7,
            }
        );
    }

    #[test]
    fn per_corner_layout_counts_individual_indices() {
        let raw = [0, 1, 2, 0, 2, 3];
        let tris = unpack_triangles(&raw, 6, TriangleLayout::PerCorner).unwrap();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn per_corner_count_must_form_whole_triangles() {
        let raw = [0, 1, 2, 0];
        let err = unpack_triangles(&raw, 4, TriangleLayout::PerCorner).unwrap_err();
        assert_eq!(err, FormatError::PartialTriangle { count: 4 });
    }

    #[test]
    fn the_two_layouts_are_not_interchangeable() {
        // Interpreted per-corner, this describes exactly one triangle; the
        // same count interpreted per-triangle would demand nine indices.
        let raw = [0, 1, 2];
        assert!(unpack_triangles(&raw, 3, TriangleLayout::PerCorner).is_ok());
        assert!(unpack_triangles(&raw, 3, TriangleLayout::PerTriangle).is_err());
    }

    #[test]
    fn excess_buffer_content_is_ignored() {
        let raw = [7.0, 8.0, 9.0, 99.0];
        let vertices = unpack_vertices(&raw, 1).unwrap();
        assert_eq!(vertices, vec![Point::new(7.0, 8.0, 9.0)]);
    }

    #[test]
    #[should_panic(expected = "cannot pack an empty mesh")]
    fn packing_an_empty_mesh_is_a_contract_violation() {
        let _ = pack(&[], &[]);
    }
}
