/*!
carve
========

**carve** is an orchestration layer for approximate convex decomposition of
triangle meshes, written with the rust programming language. It marshals host
meshes in and out of an external decomposition engine, validates the engine's
parameter surface, rebuilds the returned convex hulls as standalone meshes,
and manages the lifecycle of previously generated collider output so repeated
runs never leak or accumulate.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::manual_range_contains)]

pub extern crate nalgebra as na;
extern crate num_traits as num;

pub mod bounding_volume;
pub mod decomposition;
pub mod engine;
pub mod orchestration;

mod real {
    /// The scalar type used for host geometry throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used for host geometry throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point3, Vector3};

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;
}
