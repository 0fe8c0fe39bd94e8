use super::{point::Point3, vector::Vec3};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Rays.html

/// A ray with an active parameter range of `(0, t_max]`.
///
/// `d` is not required to be normalized; hit distances are always expressed
/// in units of `d` so the parameterization survives space changes as long as
/// the direction is mapped without renormalization.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub o: Point3,
    pub d: Vec3,
    pub t_max: f32,
    /// Scalar payload for time-dependent consumers. Intersection code passes
    /// it through untouched.
    pub time: f32,
}

impl Ray {
    /// Creates a new `Ray`.
    pub fn new(o: Point3, d: Vec3, t_max: f32, time: f32) -> Self {
        let ret = Self { o, d, t_max, time };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Creates a new infinite `Ray` from origin toward positive y.
    pub fn default() -> Self {
        Self {
            o: Point3::zeros(),
            d: Vec3::new(0.0, 1.0, 0.0),
            t_max: f32::INFINITY,
            time: 0.0,
        }
    }

    /// Checks if any of the members in this `Ray` contain NaNs.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans() || self.t_max.is_nan() || self.time.is_nan()
    }

    /// Finds the [Point3] on this `Ray` at distance `t`.
    pub fn point(&self, t: f32) -> Point3 {
        self.o + self.d * t
    }
}
