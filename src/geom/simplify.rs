//! Polyline simplification via the Ramer-Douglas-Peucker algorithm,
//! generalized over the point dimension.
//!
//! # Algorithm
//!
//! 1. Treat the chord between the first and last point as a candidate
//!    replacement for everything in between
//! 2. Find the interior point farthest from the chord (chord-clamped
//!    perpendicular distance; stable left-to-right scan, first index wins
//!    on ties)
//! 3. If that deviation exceeds epsilon, keep the point and split the range
//!    at it; otherwise discard every interior point of the range
//!
//! Ranges are processed through an explicit work list rather than native
//! recursion, so adversarial inputs cannot exhaust the call stack. Accepted
//! split points accumulate in a keep-mask and the output is materialized in
//! one ordered pass, which makes the result independent of range processing
//! order.
//!
//! # Complexity
//!
//! O(N log N) for curves with balanced splits, O(N²) worst case (for
//! example a fine-tolerance monotonic staircase, where every split strips a
//! single point). The quadratic bound is inherent to the algorithm and is
//! deliberately not worked around here; the `parallel` feature changes the
//! evaluation strategy, never the output.
//!
//! # Limitations
//!
//! Each discarded point is validated against the chord of the split
//! decision that discarded it, not re-checked against the final simplified
//! polyline. The epsilon guarantee is therefore local per split. This is
//! the standard Douglas-Peucker behavior, not a defect of this
//! implementation.

use serde::Serialize;

use super::core::PointN;
use super::distance::point_segment_distance;

/// Errors that can occur during simplification.
#[derive(Debug, thiserror::Error)]
pub enum SimplifyError {
    /// Epsilon was negative, NaN, or infinite.
    #[error("epsilon must be non-negative and finite, got {0}")]
    InvalidEpsilon(f64),

    /// The range work list grew past its structural bound.
    ///
    /// Pending ranges have disjoint interiors, so the work list can never
    /// legitimately hold more entries than the input has points. Hitting
    /// this is reported instead of risking silent corruption.
    #[error("work list exceeded {limit} pending ranges")]
    WorkListExhausted { limit: usize },
}

/// Diagnostics for a simplification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimplifyDiagnostics {
    /// Number of input points.
    pub input_point_count: usize,
    /// Number of output points.
    pub output_point_count: usize,
    /// Number of points removed.
    pub points_removed: usize,
    /// Number of range splits performed (equals the retained interior
    /// points).
    pub splits: usize,
    /// Largest deviation among discarded points, measured against the
    /// chord that discarded them. Never exceeds epsilon.
    pub max_discarded_deviation: f64,
}

/// Simplify a polyline to within `epsilon` of its original shape.
///
/// Returns an index-order-preserving subsequence of `points`. For any
/// non-empty input the first and last points are always retained; inputs
/// with fewer than three points are returned unchanged.
///
/// # Errors
/// Returns [`SimplifyError::InvalidEpsilon`] if `epsilon` is negative, NaN,
/// or infinite, before any work is done.
pub fn simplify<const D: usize>(
    points: &[PointN<D>],
    epsilon: f64,
) -> Result<Vec<PointN<D>>, SimplifyError> {
    simplify_with_diagnostics(points, epsilon).map(|(points, _)| points)
}

/// Simplify a polyline, also reporting run diagnostics.
///
/// # Errors
/// Returns [`SimplifyError::InvalidEpsilon`] for a negative, NaN, or
/// infinite `epsilon`.
pub fn simplify_with_diagnostics<const D: usize>(
    points: &[PointN<D>],
    epsilon: f64,
) -> Result<(Vec<PointN<D>>, SimplifyDiagnostics), SimplifyError> {
    validate_epsilon(epsilon)?;

    let mut diagnostics = SimplifyDiagnostics {
        input_point_count: points.len(),
        ..Default::default()
    };

    if points.len() < 3 {
        diagnostics.output_point_count = points.len();
        return Ok((points.to_vec(), diagnostics));
    }

    let keep = keep_mask(points, epsilon, &mut diagnostics)?;
    let simplified: Vec<PointN<D>> = points
        .iter()
        .zip(&keep)
        .filter(|&(_, kept)| *kept)
        .map(|(&p, _)| p)
        .collect();

    diagnostics.output_point_count = simplified.len();
    diagnostics.points_removed = points.len() - simplified.len();
    log::debug!(
        "simplified {} -> {} points (epsilon {epsilon}, {} splits)",
        diagnostics.input_point_count,
        diagnostics.output_point_count,
        diagnostics.splits,
    );

    Ok((simplified, diagnostics))
}

/// Simplify a polyline, returning the retained indices in ascending order
/// instead of the points themselves.
///
/// Useful when the caller carries per-point attributes alongside the
/// coordinates and needs to subset them consistently.
///
/// # Errors
/// Returns [`SimplifyError::InvalidEpsilon`] for a negative, NaN, or
/// infinite `epsilon`.
pub fn simplify_indices<const D: usize>(
    points: &[PointN<D>],
    epsilon: f64,
) -> Result<Vec<usize>, SimplifyError> {
    validate_epsilon(epsilon)?;

    if points.len() < 3 {
        return Ok((0..points.len()).collect());
    }

    let mut diagnostics = SimplifyDiagnostics::default();
    let keep = keep_mask(points, epsilon, &mut diagnostics)?;
    Ok(keep
        .iter()
        .enumerate()
        .filter(|&(_, kept)| *kept)
        .map(|(index, _)| index)
        .collect())
}

fn validate_epsilon(epsilon: f64) -> Result<(), SimplifyError> {
    // `>=` is false for NaN, so this also rejects NaN.
    if epsilon.is_finite() && epsilon >= 0.0 {
        Ok(())
    } else {
        Err(SimplifyError::InvalidEpsilon(epsilon))
    }
}

/// Build the keep-mask for an input of at least three points.
fn keep_mask<const D: usize>(
    points: &[PointN<D>],
    epsilon: f64,
    diagnostics: &mut SimplifyDiagnostics,
) -> Result<Vec<bool>, SimplifyError> {
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut max_discarded = 0.0_f64;
    split_range(points, epsilon, 0, points.len() - 1, &mut max_discarded, &mut |index| {
        log::trace!("split at index {index}");
        keep[index] = true;
        diagnostics.splits += 1;
    })?;
    diagnostics.max_discarded_deviation = max_discarded;

    Ok(keep)
}

/// Work-list core: process the range `[start, end]` and report every
/// accepted split index through `accept`.
///
/// `max_discarded` is raised to the largest interior deviation seen on a
/// chord that was accepted as-is.
fn split_range<const D: usize>(
    points: &[PointN<D>],
    epsilon: f64,
    start: usize,
    end: usize,
    max_discarded: &mut f64,
    accept: &mut impl FnMut(usize),
) -> Result<(), SimplifyError> {
    // Pending ranges have disjoint interiors within [start, end].
    let limit = end - start + 1;
    let mut pending = vec![(start, end)];

    while let Some((lo, hi)) = pending.pop() {
        if hi <= lo + 1 {
            continue;
        }

        let (split_index, max_distance) = farthest_interior(points, lo, hi);
        if max_distance > epsilon {
            accept(split_index);
            if pending.len() + 2 > limit {
                return Err(SimplifyError::WorkListExhausted { limit });
            }
            pending.push((split_index, hi));
            pending.push((lo, split_index));
        } else if max_distance > *max_discarded {
            *max_discarded = max_distance;
        }
    }

    Ok(())
}

/// Scan the interior of `[start, end]` for the point farthest from the
/// chord. Strict `>` keeps the first index on ties.
fn farthest_interior<const D: usize>(
    points: &[PointN<D>],
    start: usize,
    end: usize,
) -> (usize, f64) {
    let chord_start = points[start];
    let chord_end = points[end];

    let mut max_index = start;
    let mut max_distance = -1.0;
    for index in start + 1..end {
        let d = point_segment_distance(points[index], chord_start, chord_end);
        if d > max_distance {
            max_distance = d;
            max_index = index;
        }
    }
    (max_index, max_distance)
}

// ─────────────────────────────────────────────────────────────────────────────
// Parallel evaluation (feature = "parallel")
// ─────────────────────────────────────────────────────────────────────────────

/// Range length below which parallel splitting is not worth the overhead.
#[cfg(feature = "parallel")]
const PARALLEL_CUTOFF: usize = 1024;

/// Cap on parallel recursion depth; past it, ranges fall back to the
/// sequential work list, keeping native recursion shallow even on
/// adversarial inputs.
#[cfg(feature = "parallel")]
const PARALLEL_DEPTH_LIMIT: u32 = 16;

/// Simplify a polyline, evaluating independent range splits on the rayon
/// thread pool.
///
/// The two halves produced by a split only read disjoint slices of the
/// input, so they are joined with no shared mutable state. Produces the
/// exact same subsequence as [`simplify`].
///
/// # Errors
/// Returns [`SimplifyError::InvalidEpsilon`] for a negative, NaN, or
/// infinite `epsilon`.
#[cfg(feature = "parallel")]
pub fn simplify_parallel<const D: usize>(
    points: &[PointN<D>],
    epsilon: f64,
) -> Result<Vec<PointN<D>>, SimplifyError> {
    validate_epsilon(epsilon)?;

    if points.len() < 3 {
        return Ok(points.to_vec());
    }

    let breakpoints = parallel_breakpoints(points, epsilon, 0, points.len() - 1, 0)?;

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    for index in breakpoints {
        keep[index] = true;
    }

    Ok(points
        .iter()
        .zip(&keep)
        .filter(|&(_, kept)| *kept)
        .map(|(&p, _)| p)
        .collect())
}

/// Collect accepted split indices for `[start, end]`, recursing in parallel
/// until a range is small enough (or deep enough) to hand to the sequential
/// work list.
#[cfg(feature = "parallel")]
fn parallel_breakpoints<const D: usize>(
    points: &[PointN<D>],
    epsilon: f64,
    start: usize,
    end: usize,
    depth: u32,
) -> Result<Vec<usize>, SimplifyError> {
    if end <= start + 1 {
        return Ok(Vec::new());
    }

    if depth >= PARALLEL_DEPTH_LIMIT || end - start < PARALLEL_CUTOFF {
        let mut accepted = Vec::new();
        let mut max_discarded = 0.0_f64;
        split_range(points, epsilon, start, end, &mut max_discarded, &mut |index| {
            accepted.push(index);
        })?;
        return Ok(accepted);
    }

    let (split_index, max_distance) = farthest_interior(points, start, end);
    if max_distance <= epsilon {
        return Ok(Vec::new());
    }

    let (left, right) = rayon::join(
        || parallel_breakpoints(points, epsilon, start, split_index, depth + 1),
        || parallel_breakpoints(points, epsilon, split_index, end, depth + 1),
    );

    let mut accepted = left?;
    accepted.push(split_index);
    accepted.extend(right?);
    Ok(accepted)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::core::{Point2, Point3};

    #[test]
    fn test_collinear_collapses_to_endpoints() {
        let points = [
            Point2::xy(0.0, 0.0),
            Point2::xy(1.0, 0.0),
            Point2::xy(2.0, 0.0),
            Point2::xy(3.0, 0.0),
        ];
        let simplified = simplify(&points, 0.0).unwrap();
        assert_eq!(simplified, vec![Point2::xy(0.0, 0.0), Point2::xy(3.0, 0.0)]);
    }

    #[test]
    fn test_single_deviation_is_retained() {
        let points = [Point2::xy(0.0, 0.0), Point2::xy(1.0, 5.0), Point2::xy(2.0, 0.0)];
        let simplified = simplify(&points, 1.0).unwrap();
        assert_eq!(simplified, points.to_vec());
    }

    #[test]
    fn test_deviation_within_epsilon_is_discarded() {
        let points = [Point2::xy(0.0, 0.0), Point2::xy(1.0, 0.5), Point2::xy(2.0, 0.0)];
        let simplified = simplify(&points, 1.0).unwrap();
        assert_eq!(simplified, vec![Point2::xy(0.0, 0.0), Point2::xy(2.0, 0.0)]);
    }

    #[test]
    fn test_boundary_sizes_returned_unchanged() {
        let empty: [Point2; 0] = [];
        assert_eq!(simplify(&empty, 1.0).unwrap(), Vec::<Point2>::new());

        let single = [Point2::xy(1.0, 2.0)];
        assert_eq!(simplify(&single, 0.0).unwrap(), single.to_vec());

        let pair = [Point2::xy(0.0, 0.0), Point2::xy(0.0, 0.0)];
        assert_eq!(simplify(&pair, 5.0).unwrap(), pair.to_vec());
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        let points = [Point2::xy(0.0, 0.0), Point2::xy(1.0, 1.0), Point2::xy(2.0, 0.0)];
        assert!(matches!(
            simplify(&points, -0.1),
            Err(SimplifyError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn test_nan_and_infinite_epsilon_rejected() {
        let points = [Point2::xy(0.0, 0.0), Point2::xy(1.0, 1.0), Point2::xy(2.0, 0.0)];
        assert!(matches!(
            simplify(&points, f64::NAN),
            Err(SimplifyError::InvalidEpsilon(_))
        ));
        assert!(matches!(
            simplify(&points, f64::INFINITY),
            Err(SimplifyError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn test_closed_loop_degenerate_chord() {
        // Start and end coincide; the chord is a point and interior
        // deviations are plain point distances.
        let points = [
            Point2::xy(0.0, 0.0),
            Point2::xy(1.0, 1.0),
            Point2::xy(0.0, 0.0),
        ];
        let simplified = simplify(&points, 1.0).unwrap();
        assert_eq!(simplified, points.to_vec());

        let collapsed = simplify(&points, 2.0).unwrap();
        assert_eq!(collapsed, vec![Point2::xy(0.0, 0.0), Point2::xy(0.0, 0.0)]);
    }

    #[test]
    fn test_duplicate_interior_points_collapse() {
        let points = [
            Point2::xy(0.0, 0.0),
            Point2::xy(0.0, 0.0),
            Point2::xy(0.0, 0.0),
            Point2::xy(5.0, 0.0),
        ];
        let simplified = simplify(&points, 0.0).unwrap();
        assert_eq!(simplified, vec![Point2::xy(0.0, 0.0), Point2::xy(5.0, 0.0)]);
    }

    #[test]
    fn test_indices_match_points() {
        let points = [
            Point3::xyz(0.0, 0.0, 0.0),
            Point3::xyz(1.0, 0.1, 0.0),
            Point3::xyz(2.0, -2.0, 0.0),
            Point3::xyz(3.0, 0.1, 0.0),
            Point3::xyz(4.0, 0.0, 0.0),
        ];
        let simplified = simplify(&points, 0.5).unwrap();
        let indices = simplify_indices(&points, 0.5).unwrap();

        let by_index: Vec<Point3> = indices.iter().map(|&i| points[i]).collect();
        assert_eq!(by_index, simplified);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(indices.first(), Some(&0));
        assert_eq!(indices.last(), Some(&(points.len() - 1)));
    }

    #[test]
    fn test_indices_short_inputs() {
        let pair = [Point2::xy(0.0, 0.0), Point2::xy(1.0, 0.0)];
        assert_eq!(simplify_indices(&pair, 0.0).unwrap(), vec![0, 1]);
        let empty: [Point2; 0] = [];
        assert_eq!(simplify_indices(&empty, 0.0).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        // Both interior points deviate by exactly 1.0; the left-to-right
        // scan must pick index 1 first. Either way the output set is
        // stable across runs.
        let points = [
            Point2::xy(0.0, 0.0),
            Point2::xy(1.0, 1.0),
            Point2::xy(2.0, 1.0),
            Point2::xy(3.0, 0.0),
        ];
        let first = simplify(&points, 0.5).unwrap();
        let second = simplify(&points, 0.5).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, points.to_vec());
    }

    #[test]
    fn test_diagnostics_counts_are_consistent() {
        let points = [
            Point2::xy(0.0, 0.0),
            Point2::xy(1.0, 0.01),
            Point2::xy(2.0, 3.0),
            Point2::xy(3.0, 0.01),
            Point2::xy(4.0, 0.0),
        ];
        let (simplified, diagnostics) = simplify_with_diagnostics(&points, 0.5).unwrap();

        assert_eq!(diagnostics.input_point_count, 5);
        assert_eq!(diagnostics.output_point_count, simplified.len());
        assert_eq!(
            diagnostics.points_removed,
            diagnostics.input_point_count - diagnostics.output_point_count
        );
        // Every retained interior point was accepted by exactly one split.
        assert_eq!(diagnostics.splits, simplified.len() - 2);
        assert!(diagnostics.max_discarded_deviation <= 0.5);
    }

    #[test]
    fn test_zero_epsilon_keeps_every_deviating_point() {
        let points = [
            Point2::xy(0.0, 0.0),
            Point2::xy(1.0, 1.0),
            Point2::xy(2.0, 0.0),
            Point2::xy(3.0, 1.0),
            Point2::xy(4.0, 0.0),
        ];
        let simplified = simplify(&points, 0.0).unwrap();
        assert_eq!(simplified, points.to_vec());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let points: Vec<Point2> = (0..10_000)
            .map(|i| {
                let x = f64::from(i) * 0.01;
                Point2::xy(x, (x * 3.0).sin() + (x * 0.5).cos())
            })
            .collect();

        let sequential = simplify(&points, 0.05).unwrap();
        let parallel = simplify_parallel(&points, 0.05).unwrap();
        assert_eq!(sequential, parallel);
    }
}
