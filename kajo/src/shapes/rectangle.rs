use super::Shape;
use crate::{
    interaction::{Provenance, SurfaceInteraction},
    math::{Bounds3, Normal, Point2, Point3, Ray, Transform, Vec3},
};

/// The `[-1, 1]²` quad in the object space xy-plane, placed by `to_world`.
///
/// Parameterized so `uv` spans `[0, 1]²` with u along x and v along y. The
/// geometric normal is the object space +z axis regardless of which side the
/// ray arrives from.
pub struct Rectangle {
    to_world: Transform,
    to_object: Transform,
    swaps_handedness: bool,
}

impl Rectangle {
    /// Creates a new `Rectangle`.
    pub fn new(to_world: &Transform) -> Self {
        Self {
            to_world: to_world.clone(),
            to_object: to_world.inverted(),
            swaps_handedness: to_world.swaps_handedness(),
        }
    }

    fn intersect_local(&self, ray: Ray) -> Option<(f32, Point3)> {
        let Ray { o, d, t_max, .. } = &self.to_object * ray;

        if d.z == 0.0 {
            // Parallel to the plane
            return None;
        }
        let t = -o.z / d.z;
        if t <= 0.0 || t > t_max {
            return None;
        }

        let p = o + d * t;
        if p.x.abs() > 1.0 || p.y.abs() > 1.0 {
            return None;
        }

        Some((t, p))
    }
}

impl Shape for Rectangle {
    fn ray_intersect(&self, ray: Ray) -> Option<SurfaceInteraction> {
        let (t, p_object) = self.intersect_local(ray)?;

        // A reflecting placement flips the geometric orientation, same as it
        // flips winding for baked meshes
        let mut n = (&self.to_world * Normal::new(0.0, 0.0, 1.0)).normalized();
        if self.swaps_handedness {
            n = -n;
        }

        Some(SurfaceInteraction {
            t,
            time: ray.time,
            p: &self.to_world * Point3::new(p_object.x, p_object.y, 0.0),
            n,
            sh_n: n,
            dp_du: &self.to_world * Vec3::new(2.0, 0.0, 0.0),
            dp_dv: &self.to_world * Vec3::new(0.0, 2.0, 0.0),
            uv: Point2::new((p_object.x + 1.0) * 0.5, (p_object.y + 1.0) * 0.5),
            wo: -ray.d,
            prim_index: 0,
            provenance: Provenance::None,
        })
    }

    fn ray_test(&self, ray: Ray) -> bool {
        self.intersect_local(ray).is_some()
    }

    fn normal_derivative(&self, _si: &SurfaceInteraction, _shading_frame: bool) -> (Vec3, Vec3) {
        // Constant normal over a plane, degenerate by definition
        (Vec3::zeros(), Vec3::zeros())
    }

    fn world_bound(&self) -> Bounds3 {
        // Padded along z so the slab test stays well-defined for an
        // axis-aligned placement
        &self.to_world
            * Bounds3::new(
                Point3::new(-1.0, -1.0, -1e-4),
                Point3::new(1.0, 1.0, 1e-4),
            )
    }
}
