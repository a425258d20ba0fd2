#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Curve simplification for dense polylines in any fixed dimension.
//!
//! Given an ordered sequence of points sampled from a curve, [`simplify`]
//! returns the sparse subsequence that stays within a caller-supplied
//! perpendicular-distance tolerance of the original shape
//! (Ramer-Douglas-Peucker). One generic code path serves 2D, 3D, and any
//! other fixed dimension via [`PointN`].

pub mod geom;

pub use geom::{
    Point2, Point3, PointN, SimplifyDiagnostics, SimplifyError, Tolerance, Vec2, Vec3, VecN,
    distance, point_segment_distance, simplify, simplify_indices, simplify_with_diagnostics,
};

#[cfg(feature = "parallel")]
pub use geom::simplify_parallel;
