use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use std::fmt;
use std::hash::Hash;

/// A host mesh eligible for decomposition.
///
/// This is the boundary with the host application's mesh storage; scene
/// graphs, asset systems, and plain buffers all fit behind it.
pub trait MeshSource {
    /// Identity under which generated output is tracked across runs.
    type Key: Clone + Eq + Hash + fmt::Debug;

    /// The identity of this source.
    fn key(&self) -> Self::Key;

    /// Whether vertex positions can be retrieved at all.
    fn is_readable(&self) -> bool;

    /// Vertex positions. Only called when [`is_readable`](Self::is_readable)
    /// returns `true`.
    fn vertices(&self) -> &[Point<Real>];

    /// Triangles as index triples into [`vertices`](Self::vertices).
    fn indices(&self) -> &[[u32; 3]];

    /// Axis-aligned bounds of the mesh.
    fn local_aabb(&self) -> Aabb;
}

/// Indicated an inconsistency while building a [`SourceMesh`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceMeshError {
    /// A source mesh must contain at least one triangle.
    #[error("a source mesh must contain at least one triangle")]
    EmptyIndices,
    /// A triangle referenced a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        /// Position of the offending triangle.
        triangle: u32,
        /// The offending index value.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: u32,
    },
}

/// A plain in-memory mesh source.
///
/// Immutable once built; construction checks that every triangle index is in
/// range. Zero-extent bounds are deliberately not rejected here: the
/// orchestrator filters degenerate sources as skips rather than failures.
#[derive(Clone, Debug)]
pub struct SourceMesh {
    id: u64,
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    aabb: Aabb,
}

impl SourceMesh {
    /// Builds a source mesh from its vertex and index buffers.
    pub fn new(
        id: u64,
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<SourceMesh, SourceMeshError> {
        if indices.is_empty() {
            return Err(SourceMeshError::EmptyIndices);
        }

        for (triangle, tri) in indices.iter().enumerate() {
            for &index in tri {
                if index as usize >= vertices.len() {
                    return Err(SourceMeshError::IndexOutOfBounds {
                        triangle: triangle as u32,
                        index,
                        vertex_count: vertices.len() as u32,
                    });
                }
            }
        }

        let aabb = Aabb::from_points(&vertices);
        Ok(SourceMesh {
            id,
            vertices,
            indices,
            aabb,
        })
    }

    /// The identity under which this mesh's output is tracked.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl MeshSource for SourceMesh {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }

    fn is_readable(&self) -> bool {
        true
    }

    fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    fn local_aabb(&self) -> Aabb {
        self.aabb
    }
}
