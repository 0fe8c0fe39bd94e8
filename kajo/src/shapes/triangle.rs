use std::sync::Arc;

use super::{mesh::Mesh, Shape};
use crate::{
    interaction::{Provenance, SurfaceInteraction},
    math::{Bounds3, Normal, Point2, Ray, Vec3},
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Triangle_Meshes.html

/// A single triangle of a [Mesh].
pub struct Triangle {
    mesh: Arc<Mesh>,
    vertices: [usize; 3],
    index: u32,
}

/// Builds the [Triangle] shapes of `mesh`, in face order.
pub fn mesh_triangles(mesh: &Arc<Mesh>) -> Vec<Arc<dyn Shape>> {
    (0..mesh.triangle_count())
        .map(|i| Arc::new(Triangle::new(Arc::clone(mesh), i)) as Arc<dyn Shape>)
        .collect()
}

impl Triangle {
    /// Creates a new `Triangle` for face `index` of `mesh`.
    /// Expects counter clockwise winding.
    pub fn new(mesh: Arc<Mesh>, index: usize) -> Self {
        let first_vertex = index * 3;
        let vertices = [
            mesh.indices[first_vertex],
            mesh.indices[first_vertex + 1],
            mesh.indices[first_vertex + 2],
        ];

        Self {
            mesh,
            vertices,
            index: index as u32,
        }
    }

    /// The uvs of this face, falling back to a unit parameterization when the
    /// mesh carries none.
    fn uvs(&self) -> [Point2; 3] {
        if self.mesh.uvs.is_empty() {
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
            ]
        } else {
            [
                self.mesh.uvs[self.vertices[0]],
                self.mesh.uvs[self.vertices[1]],
                self.mesh.uvs[self.vertices[2]],
            ]
        }
    }

    /// Runs the watertight ray test, returning the hit distance and
    /// barycentrics.
    fn intersect_watertight(&self, ray: Ray) -> Option<(f32, [f32; 3])> {
        // pbrt's ray-triangle test performs the test in a coordinate space
        // where the ray lies on the +z axis. This way we don't get incorrect
        // misses e.g. on rays that intersect directly on an edge.

        let (p0t, p1t, p2t, sz) = {
            let p0 = self.mesh.points[self.vertices[0]];
            let p1 = self.mesh.points[self.vertices[1]];
            let p2 = self.mesh.points[self.vertices[2]];

            // Do things in relation to ray's origin
            let mut p0t = p0 - ray.o;
            let mut p1t = p1 - ray.o;
            let mut p2t = p2 - ray.o;

            // Permute direction so that Z is largest
            // This ensures there is a non-zero magnitude on Z
            let kz = ray.d.abs().max_dimension();
            let kx = if kz < 2 { kz + 1 } else { 0 };
            let ky = if kx < 2 { kx + 1 } else { 0 };
            p0t = p0t.permuted(kx, ky, kz);
            p1t = p1t.permuted(kx, ky, kz);
            p2t = p2t.permuted(kx, ky, kz);
            let d = ray.d.permuted(kx, ky, kz);

            // Shear to get +Z forward
            // Defer shearing Z since we won't need it if we don't intersect
            let sx = -d.x / d.z;
            let sy = -d.y / d.z;
            let sz = 1.0 / d.z;
            p0t.x += sx * p0t.z;
            p0t.y += sy * p0t.z;
            p1t.x += sx * p1t.z;
            p1t.y += sy * p1t.z;
            p2t.x += sx * p2t.z;
            p2t.y += sy * p2t.z;

            (p0t, p1t, p2t, sz)
        };

        // Edge coefficients
        let (e0, e1, e2) = {
            // No need for Z since we know d is on +Z
            let e0 = p1t.x * p2t.y - p1t.y * p2t.x;
            let e1 = p2t.x * p0t.y - p2t.y * p0t.x;
            let e2 = p0t.x * p1t.y - p0t.y * p1t.x;

            // Fall back to f64 if we're exactly on any edge
            if (e0 == 0.0) || (e1 == 0.0) || (e2 == 0.0) {
                let e0 = (p1t.x as f64) * (p2t.y as f64) - (p1t.y as f64) * (p2t.x as f64);
                let e1 = (p2t.x as f64) * (p0t.y as f64) - (p2t.y as f64) * (p0t.x as f64);
                let e2 = (p0t.x as f64) * (p1t.y as f64) - (p0t.y as f64) * (p1t.x as f64);
                (e0 as f32, e1 as f32, e2 as f32)
            } else {
                (e0, e1, e2)
            }
        };

        // Edge test, i.e. if we miss the triangle
        if ((e0 < 0.0) || (e1 < 0.0) || (e2 < 0.0)) && ((e0 > 0.0) || (e1 > 0.0) || (e2 > 0.0)) {
            return None;
        }

        // Determinant test, i.e. if we hit the triangle edge-on
        let det = e0 + e1 + e2;
        if det == 0.0 {
            return None;
        }

        // Scaled hit distance
        let p0z = p0t.z * sz;
        let p1z = p1t.z * sz;
        let p2z = p2t.z * sz;
        let t_scaled = e0 * p0z + e1 * p1z + e2 * p2z;

        // Test against ray range
        if ((det < 0.0) && ((t_scaled >= 0.0) || (t_scaled < ray.t_max * det)))
            || ((det > 0.0) && ((t_scaled <= 0.0) || (t_scaled > ray.t_max * det)))
        {
            return None;
        }

        let inv_det = 1.0 / det;
        Some((
            t_scaled * inv_det,
            [e0 * inv_det, e1 * inv_det, e2 * inv_det],
        ))
    }

    /// Solves `dp_du`, `dp_dv` from the uv deltas, with an arbitrary frame
    /// around the geometric normal as the fallback for a degenerate
    /// parameterization.
    fn position_derivative(&self) -> (Vec3, Vec3) {
        let p0 = self.mesh.points[self.vertices[0]];
        let p1 = self.mesh.points[self.vertices[1]];
        let p2 = self.mesh.points[self.vertices[2]];
        let [uv0, uv1, uv2] = self.uvs();

        let duv02 = uv0 - uv2;
        let duv12 = uv1 - uv2;
        let dp02 = p0 - p2;
        let dp12 = p1 - p2;

        let det = duv02.x * duv12.y - duv02.y * duv12.x;
        if det.abs() < 1e-8 {
            let n = dp02.cross(dp12);
            if n.len_sqr() == 0.0 {
                // Degenerate face
                return (Vec3::zeros(), Vec3::zeros());
            }
            return coordinate_system(n.normalized());
        }

        let inv_det = 1.0 / det;
        (
            (dp02 * duv12.y - dp12 * duv02.y) * inv_det,
            (dp12 * duv02.x - dp02 * duv12.x) * inv_det,
        )
    }
}

/// Returns two vectors that form an orthonormal frame with `v`.
fn coordinate_system(v: Vec3) -> (Vec3, Vec3) {
    let v2 = if v.x.abs() > v.y.abs() {
        Vec3::new(-v.z, 0.0, v.x) / (v.x * v.x + v.z * v.z).sqrt()
    } else {
        Vec3::new(0.0, v.z, -v.y) / (v.y * v.y + v.z * v.z).sqrt()
    };
    (v2, v.cross(v2))
}

impl Shape for Triangle {
    fn ray_intersect(&self, ray: Ray) -> Option<SurfaceInteraction> {
        let (t, b) = self.intersect_watertight(ray)?;

        let p0 = self.mesh.points[self.vertices[0]];
        let p1 = self.mesh.points[self.vertices[1]];
        let p2 = self.mesh.points[self.vertices[2]];
        let [uv0, uv1, uv2] = self.uvs();

        // Barycentric interpolation is more robust than ray.point(t) for
        // grazing hits
        let p = p0 * b[0] + p1 * b[1] + p2 * b[2];
        let uv = Point2::new(
            b[0] * uv0.x + b[1] * uv1.x + b[2] * uv2.x,
            b[0] * uv0.y + b[1] * uv1.y + b[2] * uv2.y,
        );

        let (dp_du, dp_dv) = self.position_derivative();

        // Our vertex positions are baked into construction space so the
        // winding already accounts for a handedness-swapping placement, no
        // flip needed like in pbrt
        let n = Normal::from((p1 - p0).cross(p2 - p0).normalized());

        let sh_n = if self.mesh.normals.is_empty() {
            n
        } else {
            let n0 = self.mesh.normals[self.vertices[0]];
            let n1 = self.mesh.normals[self.vertices[1]];
            let n2 = self.mesh.normals[self.vertices[2]];
            (n0 * b[0] + n1 * b[1] + n2 * b[2]).normalized()
        };

        Some(SurfaceInteraction {
            t,
            time: ray.time,
            p,
            n,
            sh_n,
            dp_du,
            dp_dv,
            uv,
            wo: -ray.d,
            prim_index: self.index,
            provenance: Provenance::None,
        })
    }

    fn ray_test(&self, ray: Ray) -> bool {
        self.intersect_watertight(ray).is_some()
    }

    fn normal_derivative(&self, _si: &SurfaceInteraction, shading_frame: bool) -> (Vec3, Vec3) {
        // The face is flat so the geometric normal is constant; only the
        // interpolated shading normal varies over the surface
        if !shading_frame || self.mesh.normals.is_empty() {
            return (Vec3::zeros(), Vec3::zeros());
        }

        let n0 = Vec3::from(self.mesh.normals[self.vertices[0]]);
        let n1 = Vec3::from(self.mesh.normals[self.vertices[1]]);
        let n2 = Vec3::from(self.mesh.normals[self.vertices[2]]);
        let [uv0, uv1, uv2] = self.uvs();

        let duv02 = uv0 - uv2;
        let duv12 = uv1 - uv2;
        let dn02 = n0 - n2;
        let dn12 = n1 - n2;

        let det = duv02.x * duv12.y - duv02.y * duv12.x;
        if det.abs() < 1e-8 {
            return (Vec3::zeros(), Vec3::zeros());
        }

        let inv_det = 1.0 / det;
        (
            (dn02 * duv12.y - dn12 * duv02.y) * inv_det,
            (dn12 * duv02.x - dn02 * duv12.x) * inv_det,
        )
    }

    fn world_bound(&self) -> Bounds3 {
        Bounds3::new(
            self.mesh.points[self.vertices[0]],
            self.mesh.points[self.vertices[1]],
        )
        .union_p(self.mesh.points[self.vertices[2]])
    }
}
