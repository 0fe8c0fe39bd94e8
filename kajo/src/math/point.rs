use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Sub};

use super::vector::{Vec2, Vec3};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Points.html

// Note about Point ops:
// Some don't really make mathematical sense but are useful in weighted sums
// point + point = point
// point * scalar = point

/// A two-dimensional point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point2 {
    /// The x component of the point.
    pub x: f32,
    /// The y component of the point.
    pub y: f32,
}

/// A three-dimensional point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point3 {
    /// The x component of the point.
    pub x: f32,
    /// The y component of the point.
    pub y: f32,
    /// The z component of the point.
    pub z: f32,
}

impl Point2 {
    /// Creates a new `Point2`.
    ///
    /// Has a debug assert that checks for NaNs.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        let p = Self { x, y };
        debug_assert!(!p.has_nans());
        p
    }

    /// Creates a new `Point2` filled with zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Checks if any component of this `Point2` is NaN.
    #[inline]
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl Point3 {
    /// Creates a new `Point3`.
    ///
    /// Has a debug assert that checks for NaNs.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        let p = Self { x, y, z };
        debug_assert!(!p.has_nans());
        p
    }

    /// Creates a new `Point3` filled with zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a new `Point3` with `v` in every component.
    #[inline]
    pub fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Checks if any component of this `Point3` is NaN.
    #[inline]
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the distance between the two points.
    #[inline]
    pub fn dist(&self, other: Self) -> f32 {
        (*self - other).len()
    }

    /// Returns the component-wise minimum of the two points.
    #[inline]
    pub fn min(&self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Returns the component-wise maximum of the two points.
    #[inline]
    pub fn max(&self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

macro_rules! impl_point_ops {
    ( $( $point:ident, $vec:ident { $( $c:ident )+ } ),+ ) => {
        $(
            impl Add<$vec> for $point {
                type Output = Self;

                fn add(self, other: $vec) -> Self {
                    Self::new($( self.$c + other.$c ),+)
                }
            }

            impl Add for $point {
                type Output = Self;

                fn add(self, other: Self) -> Self {
                    Self::new($( self.$c + other.$c ),+)
                }
            }

            impl Sub<$vec> for $point {
                type Output = Self;

                fn sub(self, other: $vec) -> Self {
                    Self::new($( self.$c - other.$c ),+)
                }
            }

            impl Sub for $point {
                type Output = $vec;

                fn sub(self, other: Self) -> $vec {
                    $vec::new($( self.$c - other.$c ),+)
                }
            }

            impl AddAssign<$vec> for $point {
                fn add_assign(&mut self, other: $vec) {
                    $( self.$c += other.$c; )+
                }
            }

            impl Mul<f32> for $point {
                type Output = Self;

                fn mul(self, other: f32) -> Self {
                    Self::new($( self.$c * other ),+)
                }
            }

            impl Div<f32> for $point {
                type Output = Self;

                fn div(self, other: f32) -> Self {
                    Self::new($( self.$c / other ),+)
                }
            }

            impl AbsDiffEq for $point {
                type Epsilon = f32;

                fn default_epsilon() -> Self::Epsilon {
                    f32::default_epsilon()
                }

                fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                    $( self.$c.abs_diff_eq(&other.$c, epsilon) )&&+
                }
            }

            impl RelativeEq for $point {
                fn default_max_relative() -> Self::Epsilon {
                    f32::default_max_relative()
                }

                fn relative_eq(
                    &self,
                    other: &Self,
                    epsilon: Self::Epsilon,
                    max_relative: Self::Epsilon,
                ) -> bool {
                    $( self.$c.relative_eq(&other.$c, epsilon, max_relative) )&&+
                }
            }
        )+
    };
}

impl_point_ops!(Point2, Vec2 { x y }, Point3, Vec3 { x y z });

impl Index<usize> for Point3 {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point3 index {} out of bounds", i),
        }
    }
}

impl IndexMut<usize> for Point3 {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Point3 index {} out of bounds", i),
        }
    }
}
