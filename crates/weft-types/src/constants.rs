//! Numeric constants shared by the assembly and mesh layers.

/// Default tolerance for the matrix validation predicates
/// (`is_symmetric`, `approx_eq` and their dense counterparts).
///
/// Intentionally far below f32 machine epsilon: the checks are meant
/// as "bitwise equal within floating-point noise" assertions on
/// assembled operators, not loose engineering comparisons. Do not
/// relax this without revisiting every call site.
pub const CHECK_TOLERANCE: f32 = 1e-20;

/// Length-squared threshold below which a normal is considered
/// degenerate and left unnormalized.
pub const NORMAL_EPSILON: f32 = 1e-10;

/// Blocks are 3x3: one scalar row/column per spatial axis.
pub const BLOCK_DIM: usize = 3;
