use std::ops::{Add, Div, Index, Mul, Neg, Sub};

// ─────────────────────────────────────────────────────────────────────────────
// VecN
// ─────────────────────────────────────────────────────────────────────────────

/// A displacement vector in D-dimensional Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VecN<const D: usize> {
    coords: [f64; D],
}

/// 2D vector.
pub type Vec2 = VecN<2>;
/// 3D vector.
pub type Vec3 = VecN<3>;

impl<const D: usize> VecN<D> {
    /// Zero vector.
    pub const ZERO: Self = Self::new([0.0; D]);

    #[must_use]
    pub const fn new(coords: [f64; D]) -> Self {
        Self { coords }
    }

    /// Convert to an array.
    #[must_use]
    pub const fn to_array(self) -> [f64; D] {
        self.coords
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn dot(self, rhs: Self) -> f64 {
        let mut acc = 0.0;
        for i in 0..D {
            acc += self.coords[i] * rhs.coords[i];
        }
        acc
    }

    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > 0.0 {
            Some(self.div_scalar(len))
        } else {
            None
        }
    }

    /// Linear interpolation between two vectors.
    /// Returns `self * (1 - t) + rhs * t`.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        let mut coords = self.coords;
        for i in 0..D {
            coords[i] += (rhs.coords[i] - coords[i]) * t;
        }
        Self { coords }
    }

    #[must_use]
    pub fn mul_scalar(self, s: f64) -> Self {
        let mut coords = self.coords;
        for c in &mut coords {
            *c *= s;
        }
        Self { coords }
    }

    #[must_use]
    pub fn div_scalar(self, s: f64) -> Self {
        let mut coords = self.coords;
        for c in &mut coords {
            *c /= s;
        }
        Self { coords }
    }
}

impl<const D: usize> Default for VecN<D> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: usize> From<[f64; D]> for VecN<D> {
    fn from(coords: [f64; D]) -> Self {
        Self::new(coords)
    }
}

impl<const D: usize> From<VecN<D>> for [f64; D] {
    fn from(v: VecN<D>) -> Self {
        v.to_array()
    }
}

impl<const D: usize> Index<usize> for VecN<D> {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.coords[i]
    }
}

impl<const D: usize> Add for VecN<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        let mut coords = self.coords;
        for i in 0..D {
            coords[i] += rhs.coords[i];
        }
        Self { coords }
    }
}

impl<const D: usize> Sub for VecN<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        let mut coords = self.coords;
        for i in 0..D {
            coords[i] -= rhs.coords[i];
        }
        Self { coords }
    }
}

impl<const D: usize> Mul<f64> for VecN<D> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

impl<const D: usize> Mul<VecN<D>> for f64 {
    type Output = VecN<D>;
    fn mul(self, rhs: VecN<D>) -> Self::Output {
        rhs.mul_scalar(self)
    }
}

impl<const D: usize> Div<f64> for VecN<D> {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        self.div_scalar(rhs)
    }
}

impl<const D: usize> Neg for VecN<D> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.mul_scalar(-1.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PointN
// ─────────────────────────────────────────────────────────────────────────────

/// A position in D-dimensional Euclidean space.
///
/// Value-equality only; a point has no identity beyond its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointN<const D: usize> {
    coords: [f64; D],
}

/// 2D point.
pub type Point2 = PointN<2>;
/// 3D point.
pub type Point3 = PointN<3>;

impl<const D: usize> PointN<D> {
    /// The origin.
    pub const ORIGIN: Self = Self::new([0.0; D]);

    #[must_use]
    pub const fn new(coords: [f64; D]) -> Self {
        Self { coords }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; D] {
        self.coords
    }

    /// Convert the point to a position vector from the origin.
    #[must_use]
    pub const fn to_vec(self) -> VecN<D> {
        VecN::new(self.coords)
    }

    #[must_use]
    pub fn add_vec(self, v: VecN<D>) -> Self {
        let mut coords = self.coords;
        let v = v.to_array();
        for i in 0..D {
            coords[i] += v[i];
        }
        Self { coords }
    }

    #[must_use]
    pub fn sub_point(self, rhs: Self) -> VecN<D> {
        let mut coords = self.coords;
        for i in 0..D {
            coords[i] -= rhs.coords[i];
        }
        VecN::new(coords)
    }

    /// Linear interpolation between two points.
    /// Returns `self * (1 - t) + rhs * t`.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        let mut coords = self.coords;
        for i in 0..D {
            coords[i] += (rhs.coords[i] - coords[i]) * t;
        }
        Self { coords }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.sub_point(other).length()
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn distance_squared_to(self, other: Self) -> f64 {
        self.sub_point(other).length_squared()
    }
}

impl Point2 {
    /// Convenience constructor for the 2D alias.
    #[must_use]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new([x, y])
    }
}

impl Point3 {
    /// Convenience constructor for the 3D alias.
    #[must_use]
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new([x, y, z])
    }
}

impl<const D: usize> Default for PointN<D> {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl<const D: usize> From<[f64; D]> for PointN<D> {
    fn from(coords: [f64; D]) -> Self {
        Self::new(coords)
    }
}

impl<const D: usize> From<PointN<D>> for [f64; D] {
    fn from(p: PointN<D>) -> Self {
        p.to_array()
    }
}

impl<const D: usize> From<VecN<D>> for PointN<D> {
    fn from(v: VecN<D>) -> Self {
        Self::new(v.to_array())
    }
}

impl<const D: usize> From<PointN<D>> for VecN<D> {
    fn from(p: PointN<D>) -> Self {
        p.to_vec()
    }
}

impl<const D: usize> Index<usize> for PointN<D> {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.coords[i]
    }
}

impl<const D: usize> Add<VecN<D>> for PointN<D> {
    type Output = Self;
    fn add(self, rhs: VecN<D>) -> Self::Output {
        self.add_vec(rhs)
    }
}

impl<const D: usize> Sub<VecN<D>> for PointN<D> {
    type Output = Self;
    fn sub(self, rhs: VecN<D>) -> Self::Output {
        self.add_vec(-rhs)
    }
}

impl<const D: usize> Sub for PointN<D> {
    type Output = VecN<D>;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_point(rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Tolerance configuration for geometric comparisons.
///
/// Named constants avoid epsilon scatter:
/// - `Tolerance::DEFAULT` - general geometry comparisons (1e-9)
/// - `Tolerance::ZERO_LENGTH` - detecting degenerate/zero-length segments (1e-12)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default geometric tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Tolerance for detecting zero-length/degenerate segments (1e-12).
    /// Applied to squared lengths when checking if a chord collapses to a point.
    pub const ZERO_LENGTH: Self = Self { eps: 1e-12 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    #[must_use]
    pub fn approx_eq_f64(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_point<const D: usize>(self, a: PointN<D>, b: PointN<D>) -> bool {
        a.distance_squared_to(b) <= self.eps_squared()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
