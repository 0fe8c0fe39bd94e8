use std::{sync::Arc, time::Instant};

use super::Shape;
use crate::{
    bvh::{BoundingVolumeHierarchy, SplitMethod},
    interaction::SurfaceInteraction,
    kajo_debug,
    math::{Bounds3, Ray, Vec3},
};

/// Handle to a [ShapeGroup] registered in a scene's group arena.
///
/// Stable for the lifetime of the arena; resolving one can only fail at
/// instance construction time, never during queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GroupHandle(pub(crate) usize);

/// An immutable bundle of primitives with its own acceleration structure.
///
/// Built once in whatever space its primitives were constructed in and only
/// reachable through [Instance]s, any number of which may reference one
/// group at the same time. The group knows nothing about them.
///
/// [Instance]: super::Instance
pub struct ShapeGroup {
    bvh: BoundingVolumeHierarchy,
    // Registration order; hit records name primitives by their index here
    shapes: Vec<Arc<dyn Shape>>,
}

impl ShapeGroup {
    /// Creates a new `ShapeGroup` over `shapes`.
    ///
    /// An empty group is valid and reports no intersections.
    pub fn new(shapes: Vec<Arc<dyn Shape>>) -> Self {
        let build_start = Instant::now();

        let bvh = BoundingVolumeHierarchy::new(shapes.clone(), 1, SplitMethod::Middle);

        kajo_debug!(
            "ShapeGroup: Built hierarchy over {} shapes in {:.2}ms",
            shapes.len(),
            build_start.elapsed().as_secs_f32() * 1e3
        );

        Self { bvh, shapes }
    }

    /// Returns the number of primitives in this group.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Returns the primitive registered at `prim_index`.
    pub fn shape(&self, prim_index: u32) -> Option<&Arc<dyn Shape>> {
        self.shapes.get(prim_index as usize)
    }

    /// Returns the AABB of the group in its local space.
    pub fn local_bound(&self) -> Bounds3 {
        self.bvh.bounds()
    }

    /// Finds the nearest hit for the group-local `ray`.
    ///
    /// The interaction is in group-local coordinates with provenance stamped
    /// to the hit primitive and `prim_index` set to its index within the
    /// group.
    pub fn ray_intersect(&self, ray: Ray) -> Option<SurfaceInteraction> {
        self.bvh.intersect(ray)
    }

    /// Checks if the group-local `ray` hits anything.
    pub fn ray_test(&self, ray: Ray) -> bool {
        self.bvh.intersect_test(ray)
    }

    /// Computes (∂n/∂u, ∂n/∂v) for a group-local interaction by dispatching
    /// to the primitive `si.prim_index` names. Zero vectors for an index the
    /// group doesn't know.
    pub fn normal_derivative(&self, si: &SurfaceInteraction, shading_frame: bool) -> (Vec3, Vec3) {
        match self.shape(si.prim_index) {
            Some(shape) => shape.normal_derivative(si, shading_frame),
            None => (Vec3::zeros(), Vec3::zeros()),
        }
    }
}
