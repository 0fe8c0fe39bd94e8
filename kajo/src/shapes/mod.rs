mod instance;
mod mesh;
mod rectangle;
mod shape_group;
mod sphere;
mod triangle;

pub use instance::Instance;
pub use mesh::Mesh;
pub use rectangle::Rectangle;
pub use shape_group::{GroupHandle, ShapeGroup};
pub use sphere::Sphere;
pub use triangle::{mesh_triangles, Triangle};

use crate::{
    interaction::SurfaceInteraction,
    math::{Bounds3, Ray, Vec3},
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Basic_Shape_Interface.html#Shape

/// The query contract every scene entry answers, primitive or instance.
///
/// Queries are read-only; implementations hold no mutable state so a built
/// scene can be queried from any number of threads at once.
pub trait Shape: Send + Sync {
    /// Intersects [Ray] with this shape, returning the nearest interaction
    /// within `(0, ray.t_max]`.
    ///
    /// Primitives return [Provenance::None] and get claimed by the owning
    /// aggregate; an instance claims its hits itself.
    ///
    /// [Provenance::None]: crate::interaction::Provenance::None
    fn ray_intersect(&self, ray: Ray) -> Option<SurfaceInteraction>;

    /// Checks if [Ray] hits this shape. Used for shadow rays; implementations
    /// override this when they can answer without building an interaction.
    fn ray_test(&self, ray: Ray) -> bool {
        self.ray_intersect(ray).is_some()
    }

    /// Computes (∂n/∂u, ∂n/∂v) at `si`, in the space of `si`'s fields.
    /// Degenerate parameterizations yield zero vectors.
    fn normal_derivative(&self, si: &SurfaceInteraction, shading_frame: bool) -> (Vec3, Vec3);

    /// Returns the AABB of this shape in the space it was constructed in.
    fn world_bound(&self) -> Bounds3;

    /// `true` for instances. Aggregates use this to pick the provenance arm
    /// when stamping hits.
    fn is_instance(&self) -> bool {
        false
    }
}
