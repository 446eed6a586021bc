use std::ffi::c_void;

/// Fixed-layout parameter block consumed by the external engine.
///
/// Field order and widths are part of the engine calling convention and must
/// not be reordered. Build one with
/// [`DecompositionParameters::to_engine_record`](crate::decomposition::DecompositionParameters::to_engine_record).
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct EngineRecord {
    /// Reserved slot for an engine-side progress callback. Always null here.
    pub callback: *mut c_void,
    /// Reserved slot for an engine-side log sink. Always null here.
    pub logger: *mut c_void,
    /// Reserved slot for an engine-side task runner. Always null here.
    pub task_runner: *mut c_void,
    /// Hard cap on the number of output hulls.
    pub max_convex_hulls: u32,
    /// Maximum number of voxels generated during the voxelization stage.
    pub resolution: u32,
    /// Concavity tolerance, in percent, terminating the recursion.
    pub min_volume_percent_error: f64,
    /// Maximum recursion depth.
    pub max_recursion_depth: i32,
    /// Project output hull vertices onto the source surface.
    pub shrink_wrap: bool,
    /// Interior fill policy: 0 flood fill, 1 surface only, 2 raycast fill.
    pub fill_mode: u32,
    /// Maximum number of vertices in any output hull.
    pub max_vertices_per_hull: u32,
    /// Allow the engine to use additional worker threads.
    pub run_async: bool,
    /// Voxel patch edge length below which recursion stops.
    pub min_edge_length: u32,
    /// Search for the best split plane location. Experimental.
    pub find_best_plane: bool,
}
