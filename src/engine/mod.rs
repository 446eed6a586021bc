//! Boundary with the external approximate convex decomposition engine.
//!
//! The decomposition algorithm itself is not part of this crate. Everything
//! the orchestration layer needs from it is expressed through the
//! [`DecompositionEngine`] and [`EngineInstance`] traits, and the instance
//! acquired for one run is owned by an [`EngineHandle`] that guarantees a
//! single release on every exit path.

pub use self::handle::EngineHandle;
pub use self::interface::{
    DecompositionEngine, EngineInstance, EngineUnavailableError, TriangleLayout,
};
pub use self::record::EngineRecord;

mod handle;
mod interface;
mod record;
