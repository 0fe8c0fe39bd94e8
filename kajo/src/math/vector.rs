use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use super::normal::Normal;

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Vectors.html

/// A two-dimensional vector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vec2 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
}

/// A three-dimensional vector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vec2 {
    /// Creates a new `Vec2`.
    ///
    /// Has a debug assert that checks for NaNs.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        let v = Self { x, y };
        debug_assert!(!v.has_nans());
        v
    }

    /// Creates a new `Vec2` filled with zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Checks if any component of this `Vec2` is NaN.
    #[inline]
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Returns the dot product of the two vectors.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl Vec3 {
    /// Creates a new `Vec3`.
    ///
    /// Has a debug assert that checks for NaNs.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        let v = Self { x, y, z };
        debug_assert!(!v.has_nans());
        v
    }

    /// Creates a new `Vec3` filled with zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a new `Vec3` filled with ones.
    #[inline]
    pub fn ones() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }

    /// Checks if any component of this `Vec3` is NaN.
    #[inline]
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the dot product of the two vectors.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the dot product of this `Vec3` and a [Normal].
    #[inline]
    pub fn dot_n(&self, other: Normal) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of the two vectors.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        // f64 intermediates protect against catastrophic cancellation
        let x = f64::from(self.y) * f64::from(other.z) - f64::from(self.z) * f64::from(other.y);
        let y = f64::from(self.z) * f64::from(other.x) - f64::from(self.x) * f64::from(other.z);
        let z = f64::from(self.x) * f64::from(other.y) - f64::from(self.y) * f64::from(other.x);
        Self::new(x as f32, y as f32, z as f32)
    }

    /// Returns the squared length of this `Vec3`.
    #[inline]
    pub fn len_sqr(&self) -> f32 {
        self.dot(*self)
    }

    /// Returns the length of this `Vec3`.
    #[inline]
    pub fn len(&self) -> f32 {
        self.len_sqr().sqrt()
    }

    /// Returns this `Vec3` normalized.
    #[inline]
    pub fn normalized(&self) -> Self {
        *self / self.len()
    }

    /// Returns this `Vec3` with the absolute value of each component.
    #[inline]
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Returns the index of the component with the largest value.
    #[inline]
    pub fn max_dimension(&self) -> usize {
        if self.x > self.y && self.x > self.z {
            0
        } else if self.y > self.z {
            1
        } else {
            2
        }
    }

    /// Returns this `Vec3` with components shuffled to `x`, `y`, `z`.
    #[inline]
    pub fn permuted(&self, x: usize, y: usize, z: usize) -> Self {
        Self::new(self[x], self[y], self[z])
    }
}

impl From<Normal> for Vec3 {
    fn from(n: Normal) -> Self {
        Self::new(n.x, n.y, n.z)
    }
}

macro_rules! impl_vec_ops {
    ( $( $vec:ident { $( $c:ident )+ } ),+ ) => {
        $(
            impl Neg for $vec {
                type Output = Self;

                fn neg(self) -> Self {
                    Self::new($( -self.$c ),+)
                }
            }

            impl Add for $vec {
                type Output = Self;

                fn add(self, other: Self) -> Self {
                    Self::new($( self.$c + other.$c ),+)
                }
            }

            impl Sub for $vec {
                type Output = Self;

                fn sub(self, other: Self) -> Self {
                    Self::new($( self.$c - other.$c ),+)
                }
            }

            impl Mul<f32> for $vec {
                type Output = Self;

                fn mul(self, other: f32) -> Self {
                    Self::new($( self.$c * other ),+)
                }
            }

            impl Div<f32> for $vec {
                type Output = Self;

                fn div(self, other: f32) -> Self {
                    Self::new($( self.$c / other ),+)
                }
            }

            impl AddAssign for $vec {
                fn add_assign(&mut self, other: Self) {
                    $( self.$c += other.$c; )+
                }
            }

            impl SubAssign for $vec {
                fn sub_assign(&mut self, other: Self) {
                    $( self.$c -= other.$c; )+
                }
            }

            impl MulAssign<f32> for $vec {
                fn mul_assign(&mut self, other: f32) {
                    $( self.$c *= other; )+
                }
            }

            impl DivAssign<f32> for $vec {
                fn div_assign(&mut self, other: f32) {
                    $( self.$c /= other; )+
                }
            }

            impl AbsDiffEq for $vec {
                type Epsilon = f32;

                fn default_epsilon() -> Self::Epsilon {
                    f32::default_epsilon()
                }

                fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                    $( self.$c.abs_diff_eq(&other.$c, epsilon) )&&+
                }
            }

            impl RelativeEq for $vec {
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

impl_vec_ops!(Vec2 { x y }, Vec3 { x y z });

impl Index<usize> for Vec3 {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index {} out of bounds", i),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index {} out of bounds", i),
        }
    }
}
