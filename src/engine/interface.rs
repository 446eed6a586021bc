use crate::engine::EngineRecord;

/// The convention an engine binding uses to report hull triangle buffers.
///
/// Decomposition engine APIs are observed to use either convention, and the
/// two are not interchangeable: interpreting one as the other silently
/// corrupts triangle windings. The binding declares its convention here and
/// the extraction path consumes it explicitly instead of guessing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangleLayout {
    /// The reported count is a number of triangles; the buffer holds one
    /// three-index struct per triangle (fields `i0`, `i1`, `i2`, stride 3).
    PerTriangle,
    /// The reported count is a number of individual corner indices; the
    /// caller groups three consecutive entries into one triangle.
    PerCorner,
}

/// The native decomposition engine could not be located or initialized.
///
/// This is distinct from a mesh-specific decomposition failure: it means no
/// engine instance could be produced at all for the current batch item.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum EngineUnavailableError {
    /// No engine backend could be located on this system.
    #[error("no decomposition engine backend could be located")]
    BackendNotFound,
    /// The backend was found but refused to initialize.
    #[error("the decomposition engine failed to initialize: {0}")]
    InitializationFailed(String),
}

/// An external approximate convex decomposition engine.
///
/// Implementations typically wrap a native library; the synthetic engines
/// used by this crate's tests implement it in-process.
pub trait DecompositionEngine {
    /// Acquires a fresh engine instance for a single decomposition run.
    fn create_instance(&self) -> Result<Box<dyn EngineInstance>, EngineUnavailableError>;

    /// The triangle-buffer convention used by this binding's hull queries.
    fn triangle_layout(&self) -> TriangleLayout;
}

/// One running or completed decomposition instance.
///
/// Instances are not assumed re-entrant: a given instance must only ever be
/// driven by the single job that acquired it, from creation to release.
pub trait EngineInstance {
    /// Runs the decomposition on the given flat buffers.
    ///
    /// `positions` holds three `f64` components per vertex and `indices`
    /// three entries per triangle. Returns `false` if the engine rejected the
    /// mesh (voxelization failure or hull budget exceeded).
    fn compute(&mut self, positions: &[f64], indices: &[u32], record: &EngineRecord) -> bool;

    /// Whether the instance has finished computing.
    ///
    /// Engines running with internal worker threads may return from
    /// [`compute`](Self::compute) before the run has finished; completion is
    /// then signalled here.
    fn is_ready(&self) -> bool;

    /// Number of convex hulls produced by a finished run.
    fn hull_count(&self) -> u32;

    /// The raw vertex component buffer and reported vertex count of hull
    /// `index`.
    ///
    /// The buffer and the count are reported independently by the engine;
    /// callers must validate the buffer length against the count before
    /// interpreting it. The buffer is owned by the instance and dies with it.
    fn hull_vertices(&self, index: u32) -> (&[f64], u32);

    /// The raw triangle index buffer and reported count of hull `index`, in
    /// the convention declared by [`DecompositionEngine::triangle_layout`].
    ///
    /// This is a separate engine call from
    /// [`hull_vertices`](Self::hull_vertices); the two are not atomic with
    /// respect to each other.
    fn hull_triangles(&self, index: u32) -> (&[u32], u32);

    /// Index of the hull nearest to `point` and its distance, for engines
    /// that support the query.
    fn nearest_hull(&self, point: &[f64; 3]) -> Option<(u32, f64)> {
        let _ = point;
        None
    }

    /// Releases the native resources behind this instance.
    ///
    /// Called exactly once by the owning [`EngineHandle`](crate::engine::EngineHandle).
    fn release(&mut self);
}
