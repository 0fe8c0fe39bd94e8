use super::Shape;
use crate::{
    interaction::{Provenance, SurfaceInteraction},
    math::{Bounds3, Normal, Point2, Point3, Ray, Transform, Vec3},
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Spheres.html

/// A sphere of `radius` around its object space origin, placed by `to_world`.
pub struct Sphere {
    to_world: Transform,
    to_object: Transform,
    swaps_handedness: bool,
    radius: f32,
}

impl Sphere {
    /// Creates a new `Sphere`.
    pub fn new(to_world: &Transform, radius: f32) -> Self {
        Self {
            to_world: to_world.clone(),
            to_object: to_world.inverted(),
            swaps_handedness: to_world.swaps_handedness(),
            radius,
        }
    }

    /// Solves the object space quadratic for the nearest accepted hit.
    ///
    /// The incoming direction is used as is so the returned `t` is in the
    /// caller's parameterization, world and object space alike.
    fn intersect_t(&self, ray: Ray) -> Option<f32> {
        let Ray { o, d, t_max, .. } = &self.to_object * ray;

        // Quadratic coefficients
        let a = d.x * d.x + d.y * d.y + d.z * d.z;
        let b = 2.0 * (d.x * o.x + d.y * o.y + d.z * o.z);
        let c = o.x * o.x + o.y * o.y + o.z * o.z - self.radius * self.radius;

        // Solve quadratic equation for ts
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let rd = disc.sqrt();

        let q = if b < 0.0 {
            -0.5 * (b - rd)
        } else {
            -0.5 * (b + rd)
        };

        // Find hit points
        let mut t0 = q / a;
        let mut t1 = c / q;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_max || t1 <= 0.0 {
            return None;
        }
        let mut t = t0;
        if t <= 0.0 {
            t = t1;
            if t > t_max {
                return None;
            }
        }

        Some(t)
    }
}

impl Shape for Sphere {
    fn ray_intersect(&self, ray: Ray) -> Option<SurfaceInteraction> {
        let t = self.intersect_t(ray)?;

        let object_ray = &self.to_object * ray;
        // Reproject onto the sphere to clean up accumulated error
        let p_object = {
            let p = object_ray.point(t);
            p * (self.radius / p.dist(Point3::zeros()))
        };

        // Spherical parameterization, theta from +z
        let mut phi = p_object.y.atan2(p_object.x);
        if phi < 0.0 {
            phi += 2.0 * std::f32::consts::PI;
        }
        let theta = (p_object.z / self.radius).clamp(-1.0, 1.0).acos();
        let uv = Point2::new(
            phi / (2.0 * std::f32::consts::PI),
            theta / std::f32::consts::PI,
        );

        let z_radius = (p_object.x * p_object.x + p_object.y * p_object.y).sqrt();
        let (cos_phi, sin_phi) = if z_radius == 0.0 {
            // Pole, any frame works as long as both placements agree
            (1.0, 0.0)
        } else {
            (p_object.x / z_radius, p_object.y / z_radius)
        };
        let dp_du = Vec3::new(
            -2.0 * std::f32::consts::PI * p_object.y,
            2.0 * std::f32::consts::PI * p_object.x,
            0.0,
        );
        let dp_dv = Vec3::new(p_object.z * cos_phi, p_object.z * sin_phi, -z_radius)
            * std::f32::consts::PI;

        let n = Normal::new(
            p_object.x / self.radius,
            p_object.y / self.radius,
            p_object.z / self.radius,
        );
        // A reflecting placement flips the geometric orientation, same as it
        // flips winding for baked meshes
        let mut n_world = (&self.to_world * n).normalized();
        if self.swaps_handedness {
            n_world = -n_world;
        }

        Some(SurfaceInteraction {
            t,
            time: ray.time,
            p: &self.to_world * p_object,
            n: n_world,
            sh_n: n_world,
            dp_du: &self.to_world * dp_du,
            dp_dv: &self.to_world * dp_dv,
            uv,
            wo: -ray.d,
            prim_index: 0,
            provenance: Provenance::None,
        })
    }

    fn ray_test(&self, ray: Ray) -> bool {
        self.intersect_t(ray).is_some()
    }

    fn normal_derivative(&self, si: &SurfaceInteraction, _shading_frame: bool) -> (Vec3, Vec3) {
        // n(u, v) = p(u, v) / r so the derivatives are the position
        // derivatives over the radius, in whatever space si is in
        (si.dp_du / self.radius, si.dp_dv / self.radius)
    }

    fn world_bound(&self) -> Bounds3 {
        &self.to_world
            * Bounds3::new(
                Point3::splat(-self.radius),
                Point3::splat(self.radius),
            )
    }
}
