use std::sync::Arc;

use crate::{
    math::{Normal, Point2, Point3, Vec3},
    shapes::Shape,
};

// Based on Physically Based Rendering 3rd ed.
// https://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Interactions#SurfaceInteraction

/// Which scene entry produced a hit.
///
/// A tagged union instead of two nullable fields so that a successful hit
/// structurally has exactly one of the two: the directly hit shape, or the
/// instance the hit went through.
#[derive(Clone)]
pub enum Provenance {
    /// No aggregate has claimed the hit yet. Interactions returned from
    /// scene queries never carry this.
    None,
    /// The hit was found against this shape directly.
    Shape(Arc<dyn Shape>),
    /// The hit went through this instance. The payload is the instance
    /// itself, typed through the common shape contract.
    Instance(Arc<dyn Shape>),
}

impl Provenance {
    /// Checks if the hit was found against a shape directly.
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Checks if the hit went through an instance.
    pub fn is_instanced(&self) -> bool {
        matches!(self, Self::Instance(_))
    }

    /// Returns the shape or instance that claimed the hit.
    pub fn hit_shape(&self) -> Option<&Arc<dyn Shape>> {
        match self {
            Self::None => None,
            Self::Shape(s) | Self::Instance(s) => Some(s),
        }
    }
}

/// Info for a point on a surface.
///
/// All spatial fields are in the space of the aggregate that answered the
/// query: world space for scene queries, group-local inside a shape group
/// before the owning instance maps the record out.
pub struct SurfaceInteraction {
    /// Hit distance in units of the query ray's direction.
    pub t: f32,
    /// Time copied from the query ray.
    pub time: f32,
    /// Hit position.
    pub p: Point3,
    /// Geometric surface normal.
    pub n: Normal,
    /// Shading normal. Same as `n` for shapes without shading geometry.
    pub sh_n: Normal,
    /// Positional derivative along the surface parameterization u.
    pub dp_du: Vec3,
    /// Positional derivative along the surface parameterization v.
    pub dp_dv: Vec3,
    /// Surface parameterization coordinates.
    pub uv: Point2,
    /// Direction back toward the ray origin, unnormalized.
    pub wo: Vec3,
    /// Index of the hit primitive within the aggregate that produced it: the
    /// face index within a mesh, the registration-order index within a shape
    /// group. 0 for standalone analytic shapes.
    pub prim_index: u32,
    /// The scene entry that produced the hit.
    pub provenance: Provenance,
}

impl SurfaceInteraction {
    /// Computes (∂n/∂u, ∂n/∂v) at this interaction by dispatching through
    /// its provenance. Returns zero vectors for an unclaimed interaction or
    /// a degenerate parameterization; callers check magnitude before using
    /// the result as a direction.
    pub fn normal_derivative(&self, shading_frame: bool) -> (Vec3, Vec3) {
        match self.provenance.hit_shape() {
            Some(shape) => shape.normal_derivative(self, shading_frame),
            None => (Vec3::zeros(), Vec3::zeros()),
        }
    }
}
