mod core;
mod distance;
mod simplify;

pub use self::core::{Point2, Point3, PointN, Tolerance, Vec2, Vec3, VecN};
pub use distance::{distance, point_segment_distance};
pub use simplify::{
    SimplifyDiagnostics, SimplifyError, simplify, simplify_indices, simplify_with_diagnostics,
};

#[cfg(feature = "parallel")]
pub use simplify::simplify_parallel;
