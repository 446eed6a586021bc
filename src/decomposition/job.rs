use crate::decomposition::DecompositionParameters;
use crate::engine::{
    DecompositionEngine, EngineHandle, EngineUnavailableError, TriangleLayout,
};
use crate::math::{Point, Real};
use std::thread;
use std::time::Duration;

/// How long the submitting thread sleeps between readiness polls of an
/// engine that computes on internal worker threads.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Lifecycle states of a [`DecompositionJob`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JobState {
    /// The engine instance is acquired but nothing was submitted yet.
    Created,
    /// The mesh was handed to the engine.
    Submitted,
    /// The engine finished; hull queries are now valid.
    Completed,
    /// The engine rejected the mesh. Not retryable with the same input.
    Failed,
}

/// The engine reported a failure while decomposing one mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecompositionError {
    /// Voxelization failed or the hull budget was exceeded.
    #[error("the decomposition engine reported a failure for this mesh")]
    EngineRejected,
}

/// One invocation of the external engine against one source mesh.
///
/// The job exclusively owns its engine instance from creation to release;
/// the handle is dropped-safe, so the instance is freed on every exit path
/// including unwinding.
pub struct DecompositionJob {
    handle: EngineHandle,
    layout: TriangleLayout,
    state: JobState,
}

impl DecompositionJob {
    /// Acquires one engine instance for this job.
    pub fn create(engine: &dyn DecompositionEngine) -> Result<DecompositionJob, EngineUnavailableError> {
        let instance = engine.create_instance()?;
        Ok(DecompositionJob {
            handle: EngineHandle::new(instance),
            layout: engine.triangle_layout(),
            state: JobState::Created,
        })
    }

    /// Submits the packed mesh buffers and blocks until the engine reports
    /// completion.
    ///
    /// When `params.run_async` is set the engine may parallelize internally
    /// and return from its compute call early; this method then polls the
    /// instance until it is ready, so callers never observe a half-finished
    /// job. A reported failure releases the engine instance immediately.
    pub fn submit(
        &mut self,
        positions: &[f64],
        indices: &[u32],
        params: &DecompositionParameters,
    ) -> Result<(), DecompositionError> {
        assert_eq!(
            self.state,
            JobState::Created,
            "a decomposition job can only be submitted once"
        );
        self.state = JobState::Submitted;

        let record = params.to_engine_record();
        if !self.handle.instance_mut().compute(positions, indices, &record) {
            self.state = JobState::Failed;
            self.handle.release();
            return Err(DecompositionError::EngineRejected);
        }

        while !self.handle.instance().is_ready() {
            thread::sleep(READY_POLL_INTERVAL);
        }

        self.state = JobState::Completed;
        Ok(())
    }

    /// Number of hulls the engine produced.
    ///
    /// Panics unless the job completed; querying earlier is a programming
    /// error, not a recoverable condition.
    pub fn hull_count(&self) -> u32 {
        assert_eq!(
            self.state,
            JobState::Completed,
            "hull count queried before the job completed"
        );
        self.handle.instance().hull_count()
    }

    /// Index and distance of the hull nearest to `point`, for engines that
    /// support the query. Panics unless the job completed.
    pub fn nearest_hull(&self, point: &Point<Real>) -> Option<(u32, f64)> {
        assert_eq!(
            self.state,
            JobState::Completed,
            "nearest hull queried before the job completed"
        );
        let point = [
            na::convert::<Real, f64>(point.x),
            na::convert::<Real, f64>(point.y),
            na::convert::<Real, f64>(point.z),
        ];
        self.handle.instance().nearest_hull(&point)
    }

    pub(crate) fn hull_vertices(&self, index: u32) -> (&[f64], u32) {
        self.handle.instance().hull_vertices(index)
    }

    pub(crate) fn hull_triangles(&self, index: u32) -> (&[u32], u32) {
        self.handle.instance().hull_triangles(index)
    }

    /// The triangle-buffer convention declared by the engine binding.
    pub fn triangle_layout(&self) -> TriangleLayout {
        self.layout
    }

    /// The current lifecycle state.
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Releases the engine instance. Idempotent; dropping the job has the
    /// same effect.
    pub fn release(&mut self) {
        self.handle.release();
    }
}
