use crate::decomposition::{
    buffers, DecompositionError, DecompositionJob, DecompositionParameters, Hull,
    HullReconstructor, ParameterError,
};
use crate::engine::{DecompositionEngine, EngineUnavailableError};
use crate::orchestration::lifecycle::{OutputFactory, OutputLifecycleManager};
use crate::orchestration::source::MeshSource;
use log::{debug, warn};

/// Why a source was excluded before a job was created for it.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DegenerateInputError {
    /// The source mesh positions cannot be retrieved.
    #[error("the source mesh is not readable")]
    Unreadable,
    /// The source mesh bounding box has a zero extent on at least one axis.
    #[error("the source mesh bounding box has a zero extent on at least one axis")]
    ZeroExtent,
    /// The source mesh has no triangles.
    #[error("the source mesh has no triangles")]
    Empty,
}

/// Per-source reason a batch entry produced no output.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// Filtered out before any engine call.
    #[error("{0}")]
    Degenerate(DegenerateInputError),
    /// No engine instance could be acquired for this source.
    #[error("{0}")]
    EngineUnavailable(EngineUnavailableError),
    /// The engine reported a decomposition failure for this source.
    #[error("{0}")]
    Decomposition(DecompositionError),
}

/// Outcome of one batch entry.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchOutcome {
    /// Decomposition succeeded and the output set was committed.
    Decomposed {
        /// Number of committed hulls.
        hulls: usize,
    },
    /// The source produced no output for the given reason.
    Skipped(SkipReason),
    /// Decomposition succeeded but the host factory refused the output
    /// mid-commit; the source's generated set was left empty.
    CommitFailed,
}

impl BatchOutcome {
    /// Committed hull count; zero for skipped or failed entries.
    pub fn hull_count(&self) -> usize {
        match self {
            BatchOutcome::Decomposed { hulls } => *hulls,
            _ => 0,
        }
    }
}

/// One row of a batch report, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchEntry<K> {
    /// Source identity.
    pub key: K,
    /// What happened for this source.
    pub outcome: BatchOutcome,
}

/// Top-level driver: filters candidate sources, runs one job per survivor,
/// reconstructs hulls and commits the results through the lifecycle manager.
pub struct DecompositionOrchestrator<'a> {
    engine: &'a dyn DecompositionEngine,
}

impl<'a> DecompositionOrchestrator<'a> {
    /// Creates an orchestrator driving the given engine.
    pub fn new(engine: &'a dyn DecompositionEngine) -> DecompositionOrchestrator<'a> {
        DecompositionOrchestrator { engine }
    }

    /// Runs one decomposition batch over `sources`.
    ///
    /// Parameters are validated once, before any engine call; a validation
    /// failure reports every out-of-range field and aborts the whole batch.
    /// Unreadable or degenerate sources are logged and skipped, never
    /// failures. A per-source engine failure skips that source and leaves
    /// the rest of the batch unaffected.
    ///
    /// Output is committed only after every job in the batch has finished,
    /// and per source it is all-or-nothing: a host factory failure leaves
    /// that source's generated set empty, never half-populated.
    pub fn run<S, F>(
        &self,
        sources: &[S],
        params: &DecompositionParameters,
        factory: &mut F,
        outputs: &mut OutputLifecycleManager<S::Key, F>,
    ) -> Result<Vec<BatchEntry<S::Key>>, ParameterError>
    where
        S: MeshSource,
        F: OutputFactory,
    {
        params.validate()?;

        let mut entries = Vec::with_capacity(sources.len());
        let mut staged: Vec<(usize, S::Key, Vec<Hull>)> = Vec::new();

        for source in sources {
            let key = source.key();
            match self.decompose(source, params) {
                Ok(hulls) => {
                    debug!("source {:?}: {} hulls reconstructed", key, hulls.len());
                    let count = hulls.len();
                    staged.push((entries.len(), key.clone(), hulls));
                    entries.push(BatchEntry {
                        key,
                        outcome: BatchOutcome::Decomposed { hulls: count },
                    });
                }
                Err(reason) => {
                    warn!("skipping source {:?}: {}", key, reason);
                    entries.push(BatchEntry {
                        key,
                        outcome: BatchOutcome::Skipped(reason),
                    });
                }
            }
        }

        // Every job has finished; only now is any output touched, so one
        // engine failure can never block the other sources' results.
        for (slot, key, hulls) in staged {
            match outputs.replace(factory, key, &hulls) {
                Ok(count) => entries[slot].outcome = BatchOutcome::Decomposed { hulls: count },
                Err(err) => {
                    warn!(
                        "host factory rejected output for source {:?}: {}",
                        entries[slot].key, err
                    );
                    entries[slot].outcome = BatchOutcome::CommitFailed;
                }
            }
        }

        Ok(entries)
    }

    fn decompose<S: MeshSource>(
        &self,
        source: &S,
        params: &DecompositionParameters,
    ) -> Result<Vec<Hull>, SkipReason> {
        if !source.is_readable() {
            return Err(SkipReason::Degenerate(DegenerateInputError::Unreadable));
        }

        // An empty vertex set yields an inverted AABB, so it is caught by
        // the extent filter as well.
        let extents = source.local_aabb().extents();
        if !(extents.x > 0.0 && extents.y > 0.0 && extents.z > 0.0) {
            return Err(SkipReason::Degenerate(DegenerateInputError::ZeroExtent));
        }

        if source.indices().is_empty() {
            return Err(SkipReason::Degenerate(DegenerateInputError::Empty));
        }

        let (positions, indices) = buffers::pack(source.vertices(), source.indices());

        let mut job =
            DecompositionJob::create(self.engine).map_err(SkipReason::EngineUnavailable)?;
        job.submit(&positions, &indices, params)
            .map_err(SkipReason::Decomposition)?;

        let reconstructor = HullReconstructor::new(&job);
        let mut hulls = Vec::new();
        for result in reconstructor.extract_all() {
            match result {
                Ok(hull) => hulls.push(hull),
                Err(err) => warn!("dropping malformed hull: {}", err),
            }
        }

        job.release();
        Ok(hulls)
    }
}
