//! Pure distance kernels shared by the simplifier.
//!
//! Distance to a segment is measured against the chord itself, not the
//! infinite line: the projection parameter is clamped to [0, 1] before the
//! foot point is evaluated. This matters at concave/convex transitions,
//! where the nearest point on the extended line can lie outside the chord.

use super::core::{PointN, Tolerance};

/// Euclidean distance between two points.
#[must_use]
pub fn distance<const D: usize>(a: PointN<D>, b: PointN<D>) -> f64 {
    a.distance_to(b)
}

/// Chord-clamped perpendicular distance from `p` to the segment `a`-`b`.
///
/// A degenerate segment (both endpoints coincident within
/// [`Tolerance::ZERO_LENGTH`]) has no direction to project onto; the
/// distance degenerates to the plain point distance to `a`. Total for all
/// inputs, never divides by zero.
#[must_use]
pub fn point_segment_distance<const D: usize>(p: PointN<D>, a: PointN<D>, b: PointN<D>) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let ab_len_sq = ab.dot(ab);
    if ab_len_sq <= Tolerance::ZERO_LENGTH.eps {
        return ap.length();
    }
    let t = (ap.dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    let foot = a + ab.mul_scalar(t);
    p.distance_to(foot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::core::{Point2, Point3};

    #[test]
    fn test_distance_matches_l2_norm() {
        let a = Point3::xyz(1.0, 2.0, 3.0);
        let b = Point3::xyz(4.0, 6.0, 3.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn test_perpendicular_above_segment_interior() {
        let a = Point2::xy(0.0, 0.0);
        let b = Point2::xy(10.0, 0.0);
        let p = Point2::xy(5.0, 3.0);
        assert!((point_segment_distance(p, a, b) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_beyond_segment_ends() {
        let a = Point2::xy(0.0, 0.0);
        let b = Point2::xy(10.0, 0.0);

        // Past the end: distance is to the endpoint, not the extended line.
        let past_end = Point2::xy(13.0, 4.0);
        assert!((point_segment_distance(past_end, a, b) - 5.0).abs() < 1e-12);

        // Before the start.
        let before_start = Point2::xy(-3.0, 4.0);
        assert!((point_segment_distance(before_start, a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_segment_is_point_distance() {
        let a = Point3::xyz(1.0, 1.0, 1.0);
        let p = Point3::xyz(1.0, 5.0, 1.0);
        assert_eq!(point_segment_distance(p, a, a), distance(p, a));
    }

    #[test]
    fn test_point_on_segment() {
        let a = Point2::xy(0.0, 0.0);
        let b = Point2::xy(4.0, 4.0);
        let p = Point2::xy(2.0, 2.0);
        assert!(point_segment_distance(p, a, b) < 1e-12);
    }

    #[test]
    fn test_3d_offset_from_diagonal() {
        let a = Point3::xyz(0.0, 0.0, 0.0);
        let b = Point3::xyz(0.0, 0.0, 10.0);
        let p = Point3::xyz(3.0, 4.0, 5.0);
        assert!((point_segment_distance(p, a, b) - 5.0).abs() < 1e-12);
    }
}
