use crate::decomposition::buffers::{self, FormatError};
use crate::decomposition::hull::Hull;
use crate::decomposition::job::{DecompositionJob, JobState};

/// Rebuilds standalone convex sub-meshes from a completed job's engine
/// buffers.
///
/// Vertex and triangle buffers are fetched through two independent engine
/// calls with independently reported counts; every count is validated
/// against its buffer before any mesh is constructed.
pub struct HullReconstructor<'a> {
    job: &'a DecompositionJob,
}

impl<'a> HullReconstructor<'a> {
    /// Panics if the job has not completed.
    pub fn new(job: &'a DecompositionJob) -> HullReconstructor<'a> {
        assert_eq!(
            job.state(),
            JobState::Completed,
            "hull reconstruction requires a completed job"
        );
        HullReconstructor { job }
    }

    /// Rebuilds hull `index`.
    ///
    /// Returns `Ok(None)` when the engine reports zero vertices for the
    /// hull; degenerate hulls are expected output and never abort a batch.
    /// Any buffer/count mismatch surfaces as a [`FormatError`] before a hull
    /// is constructed.
    pub fn extract(&self, index: u32) -> Result<Option<Hull>, FormatError> {
        let (raw_vertices, vertex_count) = self.job.hull_vertices(index);
        if vertex_count == 0 {
            return Ok(None);
        }
        let vertices = buffers::unpack_vertices(raw_vertices, vertex_count)?;

        // Separate engine call; its count is reported independently of the
        // vertex retrieval above.
        let (raw_triangles, triangle_count) = self.job.hull_triangles(index);
        let indices =
            buffers::unpack_triangles(raw_triangles, triangle_count, self.job.triangle_layout())?;

        for tri in &indices {
            for &vertex_index in tri {
                if vertex_index >= vertex_count {
                    return Err(FormatError::IndexOutOfBounds {
                        index: vertex_index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Some(Hull::new(vertices, indices)))
    }

    /// Rebuilds every hull of the job, preserving the engine's enumeration
    /// order.
    ///
    /// Degenerate (zero-vertex) hulls are omitted. A malformed hull
    /// surfaces its error in place without aborting the remaining hulls.
    pub fn extract_all(&self) -> Vec<Result<Hull, FormatError>> {
        let count = self.job.hull_count();
        let mut hulls = Vec::with_capacity(count as usize);

        for index in 0..count {
            match self.extract(index) {
                Ok(Some(hull)) => hulls.push(Ok(hull)),
                Ok(None) => (),
                Err(err) => hulls.push(Err(err)),
            }
        }

        hulls
    }
}
