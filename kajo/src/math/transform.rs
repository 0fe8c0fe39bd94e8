use std::ops::Mul;

use super::{
    bounds::Bounds3, matrix::Matrix4x4, normal::Normal, point::Point3, ray::Ray, vector::Vec3,
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transforms/Transforms.html

/// An invertible affine placement.
///
/// The inverse is computed once at construction and cached; a `Transform` is
/// immutable after that. Points, vectors and normals each go through the
/// matrix with their own semantics via the `Mul` impls below.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    m: Matrix4x4,
    m_inv: Matrix4x4,
}

impl Transform {
    /// Creates a new `Transform` from raw [Matrix4x4] rows.
    pub fn new(m: [[f32; 4]; 4]) -> Self {
        let m = Matrix4x4::new(m);
        Self::new_m(m)
    }

    /// Creates a new `Transform` from a [Matrix4x4].
    pub fn new_m(m: Matrix4x4) -> Self {
        let m_inv = m.inverted();
        Self::new_full(m, m_inv)
    }

    /// Creates a new `Transform` from a [Matrix4x4] and its inverse.
    pub fn new_full(m: Matrix4x4, m_inv: Matrix4x4) -> Self {
        debug_assert!(!m.has_nans());
        debug_assert!(!m_inv.has_nans());
        Self { m, m_inv }
    }

    /// Creates a new identity `Transform`.
    pub fn default() -> Self {
        let m = Matrix4x4::identity();
        Self::new_full(m, m)
    }

    /// Returns a reference to the [Matrix4x4] of this `Transform`.
    pub fn m(&self) -> &Matrix4x4 {
        &self.m
    }

    /// Returns a reference to the inverse [Matrix4x4] of this `Transform`.
    pub fn m_inv(&self) -> &Matrix4x4 {
        &self.m_inv
    }

    /// Returns the inverse of this `Transform`.
    ///
    /// Free, both matrices are already cached.
    pub fn inverted(&self) -> Self {
        Self::new_full(self.m_inv, self.m)
    }

    /// Checks if this `Transform` is the identity transform.
    pub fn is_identity(&self) -> bool {
        self.m == Matrix4x4::identity()
    }

    /// Checks if this `Transform` swaps the handedness of the coordinate system.
    pub fn swaps_handedness(&self) -> bool {
        let m = &self.m.m;
        let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        det < 0.0
    }
}

impl<'a> Mul<Vec3> for &'a Transform {
    type Output = Vec3;

    fn mul(self, other: Vec3) -> Vec3 {
        let m = &self.m.m;
        let Vec3 { x, y, z } = other;
        Vec3::new(
            m[0][0] * x + m[0][1] * y + m[0][2] * z,
            m[1][0] * x + m[1][1] * y + m[1][2] * z,
            m[2][0] * x + m[2][1] * y + m[2][2] * z,
        )
    }
}

impl<'a> Mul<Point3> for &'a Transform {
    type Output = Point3;

    fn mul(self, other: Point3) -> Point3 {
        let m = &self.m.m;
        let Point3 { x, y, z } = other;
        let xp = m[0][0] * x + m[0][1] * y + m[0][2] * z + m[0][3];
        let yp = m[1][0] * x + m[1][1] * y + m[1][2] * z + m[1][3];
        let zp = m[2][0] * x + m[2][1] * y + m[2][2] * z + m[2][3];
        let wp = m[3][0] * x + m[3][1] * y + m[3][2] * z + m[3][3];
        if wp == 1.0 {
            Point3::new(xp, yp, zp)
        } else {
            Point3::new(xp, yp, zp) / wp
        }
    }
}

impl<'a> Mul<Normal> for &'a Transform {
    type Output = Normal;

    fn mul(self, other: Normal) -> Normal {
        let m_inv = &self.m_inv.m;
        let Normal { x, y, z } = other;
        // Transpose the inverse matrix through accesses
        Normal::new(
            m_inv[0][0] * x + m_inv[1][0] * y + m_inv[2][0] * z,
            m_inv[0][1] * x + m_inv[1][1] * y + m_inv[2][1] * z,
            m_inv[0][2] * x + m_inv[1][2] * y + m_inv[2][2] * z,
        )
    }
}

impl<'a> Mul<Ray> for &'a Transform {
    type Output = Ray;

    fn mul(self, other: Ray) -> Ray {
        // The direction is mapped without renormalization so the parameter
        // range stays valid as is
        Ray::new(self * other.o, self * other.d, other.t_max, other.time)
    }
}

impl<'a> Mul<Bounds3> for &'a Transform {
    type Output = Bounds3;

    fn mul(self, other: Bounds3) -> Bounds3 {
        let mi = other.p_min;
        let ma = other.p_max;

        let mut ret = Bounds3::default();
        ret = ret.union_p(self * mi);
        ret = ret.union_p(self * Point3::new(ma.x, mi.y, mi.z));
        ret = ret.union_p(self * Point3::new(mi.x, ma.y, mi.z));
        ret = ret.union_p(self * Point3::new(mi.x, mi.y, ma.z));
        ret = ret.union_p(self * Point3::new(ma.x, ma.y, mi.z));
        ret = ret.union_p(self * Point3::new(ma.x, mi.y, ma.z));
        ret = ret.union_p(self * Point3::new(mi.x, ma.y, ma.z));
        ret = ret.union_p(self * ma);
        ret
    }
}

impl<'a, 'b> Mul<&'b Transform> for &'a Transform {
    type Output = Transform;

    fn mul(self, other: &Transform) -> Transform {
        Transform::new_full(&self.m * &other.m, &other.m_inv * &self.m_inv)
    }
}
