//! Parameter validation, engine jobs, and hull reconstruction.

pub use self::buffers::FormatError;
pub use self::hull::Hull;
pub use self::job::{DecompositionError, DecompositionJob, JobState};
pub use self::parameters::{
    DecompositionParameters, FillMode, ParameterError, ParameterViolation,
};
pub use self::reconstruct::HullReconstructor;

pub mod buffers;
mod hull;
mod job;
mod parameters;
mod reconstruct;
