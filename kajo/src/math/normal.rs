use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Add, Mul, Neg};

use super::vector::Vec3;

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Normals.html

/// A three-dimensional surface normal.
///
/// A distinct type from [Vec3] since normals transform covariantly, through
/// the inverse transpose of the placement matrix. Note that a `Normal` is not
/// necessarily normalized as it is merely a vector perpendicular to a surface
/// at a position on it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normal {
    /// The x component of the normal.
    pub x: f32,
    /// The y component of the normal.
    pub y: f32,
    /// The z component of the normal.
    pub z: f32,
}

impl Normal {
    /// Creates a new `Normal`.
    ///
    /// Has a debug assert that checks for NaNs.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        let n = Self { x, y, z };
        debug_assert!(!n.has_nans());
        n
    }

    /// Checks if any component of this `Normal` is NaN.
    #[inline]
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Calculates the dot product of this `Normal` and a [Vec3].
    #[inline]
    pub fn dot_v(&self, v: Vec3) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Returns the length of this `Normal`.
    #[inline]
    pub fn len(&self) -> f32 {
        self.dot_v(Vec3::from(*self)).sqrt()
    }

    /// Returns this `Normal` normalized.
    #[inline]
    pub fn normalized(&self) -> Self {
        let l = self.len();
        Self::new(self.x / l, self.y / l, self.z / l)
    }
}

impl From<Vec3> for Normal {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Neg for Normal {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Normal {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Mul<f32> for Normal {
    type Output = Self;

    fn mul(self, other: f32) -> Self {
        Self::new(self.x * other, self.y * other, self.z * other)
    }
}

impl AbsDiffEq for Normal {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Normal {
    fn default_max_relative() -> Self::Epsilon {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
