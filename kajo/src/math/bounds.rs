use std::ops::Index;

use super::{point::Point3, ray::Ray, vector::Vec3};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Bounding_Boxes.html

/// A three-dimensional axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3 {
    /// The minimum extent of the bounds.
    pub p_min: Point3,
    /// The maximum extent of the bounds.
    pub p_max: Point3,
}

impl Bounds3 {
    /// Creates a new `Bounds3` spanning the two points.
    pub fn new(p0: Point3, p1: Point3) -> Self {
        Self {
            p_min: p0.min(p1),
            p_max: p0.max(p1),
        }
    }

    /// Creates a new degenerate `Bounds3` that unions cleanly with anything.
    pub fn default() -> Self {
        Self {
            p_min: Point3::splat(f32::MAX),
            p_max: Point3::splat(f32::MIN),
        }
    }

    /// Returns the union of this `Bounds3` and a [Point3].
    pub fn union_p(&self, p: Point3) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Returns the union of the two bounds.
    pub fn union_b(&self, other: Self) -> Self {
        Self {
            p_min: self.p_min.min(other.p_min),
            p_max: self.p_max.max(other.p_max),
        }
    }

    /// Returns the [Vec3] from `p_min` to `p_max`.
    pub fn diagonal(&self) -> Vec3 {
        self.p_max - self.p_min
    }

    /// Finds the axis with the maximum extent in this `Bounds3`.
    pub fn maximum_extent(&self) -> usize {
        let d = self.diagonal();
        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }

    /// Checks if `ray` hits this `Bounds3`.
    /// `inv_dir` and `dir_is_neg` precomputed from `ray` are supplied as an optimization.
    pub fn intersect(&self, ray: Ray, inv_dir: Vec3, dir_is_neg: [bool; 3]) -> bool {
        // X-slabs test
        let mut t0 = (self[dir_is_neg[0] as usize].x - ray.o.x) * inv_dir.x;
        let mut t1 = (self[1 - (dir_is_neg[0] as usize)].x - ray.o.x) * inv_dir.x;

        // Y,Z -slabs test
        for i in 1..3 {
            let ti0 = (self[dir_is_neg[i] as usize][i] - ray.o[i]) * inv_dir[i];
            let ti1 = (self[1 - (dir_is_neg[i] as usize)][i] - ray.o[i]) * inv_dir[i];
            if t0 > ti1 || ti0 > t1 {
                return false;
            }
            t0 = t0.max(ti0);
            t1 = t1.min(ti1);
        }

        t0 < ray.t_max && t1 > 0.0
    }
}

impl Index<usize> for Bounds3 {
    type Output = Point3;

    fn index(&self, i: usize) -> &Point3 {
        match i {
            0 => &self.p_min,
            1 => &self.p_max,
            _ => panic!("Bounds3 index {} out of bounds", i),
        }
    }
}
