use crate::engine::EngineRecord;
use std::fmt;
use std::ptr;

/// Policy deciding which voxels are "inside" the source mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillMode {
    /// Flood fill from the outside after voxelization. Meshes with holes can
    /// fail and produce hollow results.
    FloodFill,
    /// Only consider the surface, producing "skins" with hollow centers.
    SurfaceOnly,
    /// Use raycasting to tell inside from outside.
    RaycastFill,
}

impl FillMode {
    /// The discriminant understood by the external engine.
    pub fn engine_code(self) -> u32 {
        match self {
            FillMode::FloodFill => 0,
            FillMode::SurfaceOnly => 1,
            FillMode::RaycastFill => 2,
        }
    }
}

/// One out-of-range parameter field.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterViolation {
    /// Name of the offending field.
    pub field: &'static str,
    /// The rejected value, rendered as text.
    pub value: String,
    /// The accepted range.
    pub expected: &'static str,
}

impl fmt::Display for ParameterViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {} (expected {})", self.field, self.value, self.expected)
    }
}

/// Validation failure listing every out-of-range field at once, so a single
/// pass surfaces all problems instead of just the first.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("invalid decomposition parameters: {}", render_violations(.violations))]
pub struct ParameterError {
    /// All detected violations, in field declaration order.
    pub violations: Vec<ParameterViolation>,
}

fn render_violations(violations: &[ParameterViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bounded configuration record controlling the external decomposition
/// engine.
///
/// Every numeric field carries an enforced range; [`validate`](Self::validate)
/// checks them all before a run is attempted and
/// [`clamped`](Self::clamped) forces them into range instead.
#[derive(Clone, Debug, PartialEq)]
pub struct DecompositionParameters {
    /// Hard cap on the number of output hulls. Must be at least 1.
    pub max_convex_hulls: u32,
    /// Voxel grid budget during voxelization, in `[10_000, 64_000_000]`.
    pub voxel_resolution: u32,
    /// Concavity tolerance, in percent, terminating the recursion, in
    /// `[0, 100]`.
    pub min_volume_error_percent: f64,
    /// Recursive split depth cap, in `[1, 32]`.
    pub max_recursion_depth: u32,
    /// Project output hull vertices onto the source surface for precision.
    pub shrink_wrap: bool,
    /// Interior-determination policy.
    pub fill_mode: FillMode,
    /// Per-hull vertex budget, in `[4, 1024]`.
    pub max_vertices_per_hull: u32,
    /// Allow the engine to use additional worker threads internally. This
    /// never makes the submitting call return before completion.
    pub run_async: bool,
    /// Recursion stops once a voxel patch has an edge length below this on
    /// all three sides, in `[1, 4]`.
    pub min_edge_length: u32,
    /// Search split planes exhaustively for the best location. Experimental
    /// and slower.
    pub find_best_plane: bool,
}

impl Default for DecompositionParameters {
    fn default() -> Self {
        Self {
            max_convex_hulls: 64,
            voxel_resolution: 400_000,
            min_volume_error_percent: 1.0,
            max_recursion_depth: 10,
            shrink_wrap: true,
            fill_mode: FillMode::FloodFill,
            max_vertices_per_hull: 64,
            run_async: true,
            min_edge_length: 2,
            find_best_plane: false,
        }
    }
}

impl DecompositionParameters {
    /// Checks every field against its declared range.
    ///
    /// On failure the returned error enumerates all out-of-range fields, not
    /// just the first one encountered.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let mut violations = Vec::new();

        if self.max_convex_hulls < 1 {
            violations.push(ParameterViolation {
                field: "max_convex_hulls",
                value: self.max_convex_hulls.to_string(),
                expected: ">= 1",
            });
        }

        if self.voxel_resolution < 10_000 || self.voxel_resolution > 64_000_000 {
            violations.push(ParameterViolation {
                field: "voxel_resolution",
                value: self.voxel_resolution.to_string(),
                expected: "[10000, 64000000]",
            });
        }

        if !(self.min_volume_error_percent >= 0.0 && self.min_volume_error_percent <= 100.0) {
            violations.push(ParameterViolation {
                field: "min_volume_error_percent",
                value: self.min_volume_error_percent.to_string(),
                expected: "[0, 100]",
            });
        }

        if self.max_recursion_depth < 1 || self.max_recursion_depth > 32 {
            violations.push(ParameterViolation {
                field: "max_recursion_depth",
                value: self.max_recursion_depth.to_string(),
                expected: "[1, 32]",
            });
        }

        if self.max_vertices_per_hull < 4 || self.max_vertices_per_hull > 1024 {
            violations.push(ParameterViolation {
                field: "max_vertices_per_hull",
                value: self.max_vertices_per_hull.to_string(),
                expected: "[4, 1024]",
            });
        }

        if self.min_edge_length < 1 || self.min_edge_length > 4 {
            violations.push(ParameterViolation {
                field: "min_edge_length",
                value: self.min_edge_length.to_string(),
                expected: "[1, 4]",
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ParameterError { violations })
        }
    }

    /// Returns a copy with every numeric field clamped into its declared
    /// range. The result always passes [`validate`](Self::validate).
    pub fn clamped(&self) -> Self {
        let min_volume_error_percent = if self.min_volume_error_percent.is_nan() {
            0.0
        } else {
            self.min_volume_error_percent.clamp(0.0, 100.0)
        };

        Self {
            max_convex_hulls: self.max_convex_hulls.max(1),
            voxel_resolution: self.voxel_resolution.clamp(10_000, 64_000_000),
            min_volume_error_percent,
            max_recursion_depth: self.max_recursion_depth.clamp(1, 32),
            max_vertices_per_hull: self.max_vertices_per_hull.clamp(4, 1024),
            min_edge_length: self.min_edge_length.clamp(1, 4),
            ..self.clone()
        }
    }

    /// Produces the fixed-layout record the external engine consumes.
    pub fn to_engine_record(&self) -> EngineRecord {
        EngineRecord {
            callback: ptr::null_mut(),
            logger: ptr::null_mut(),
            task_runner: ptr::null_mut(),
            max_convex_hulls: self.max_convex_hulls,
            resolution: self.voxel_resolution,
            min_volume_percent_error: self.min_volume_error_percent,
            max_recursion_depth: self.max_recursion_depth as i32,
            shrink_wrap: self.shrink_wrap,
            fill_mode: self.fill_mode.engine_code(),
            max_vertices_per_hull: self.max_vertices_per_hull,
            run_async: self.run_async,
            min_edge_length: self.min_edge_length,
            find_best_plane: self.find_best_plane,
        }
    }
}
