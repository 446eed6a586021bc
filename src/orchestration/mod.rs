//! Batch driving and lifecycle management of generated collider output.

pub use self::lifecycle::{OutputFactory, OutputLifecycleManager};
pub use self::orchestrator::{
    BatchEntry, BatchOutcome, DecompositionOrchestrator, DegenerateInputError, SkipReason,
};
pub use self::source::{MeshSource, SourceMesh, SourceMeshError};

mod lifecycle;
mod orchestrator;
mod source;
