use std::{sync::Arc, time::Instant};

use crate::{
    interaction::{Provenance, SurfaceInteraction},
    kajo_info,
    math::{Ray, Transform, Vec3},
    shapes::{GroupHandle, Instance, Shape, ShapeGroup},
    Result,
};

/// One-time, single-threaded construction of a [Scene].
///
/// All registration happens here; once `build` returns, the scene is
/// immutable and safe to query from any number of threads.
pub struct SceneBuilder {
    groups: Vec<Arc<ShapeGroup>>,
    shapes: Vec<Arc<dyn Shape>>,
    build_start: Instant,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            shapes: Vec::new(),
            build_start: Instant::now(),
        }
    }

    /// Registers `group` in the scene's group arena and returns its handle.
    ///
    /// Registered groups are only queried through instances referencing
    /// them, never directly.
    pub fn register_group(&mut self, group: ShapeGroup) -> GroupHandle {
        self.groups.push(Arc::new(group));
        GroupHandle(self.groups.len() - 1)
    }

    /// Adds a top-level shape.
    pub fn add_shape(&mut self, shape: Arc<dyn Shape>) {
        self.shapes.push(shape);
    }

    /// Adds top-level shapes, e.g. the triangles of a mesh.
    pub fn add_shapes(&mut self, shapes: Vec<Arc<dyn Shape>>) {
        self.shapes.extend(shapes);
    }

    /// Adds an [Instance] of a registered group placed at `to_world`.
    ///
    /// Errors on a handle the arena doesn't know; a dangling reference is a
    /// construction problem and never makes it into a queryable scene.
    pub fn add_instance(&mut self, group: GroupHandle, to_world: &Transform) -> Result<()> {
        let group = self
            .groups
            .get(group.0)
            .ok_or_else(|| format!("Scene: No shape group registered for handle {:?}", group))?;
        self.shapes.push(Instance::new(Arc::clone(group), to_world));
        Ok(())
    }

    /// Freezes the content into an immutable [Scene].
    pub fn build(self) -> Scene {
        kajo_info!(
            "Scene: {} top-level shapes, {} shape groups, built in {:.2}ms",
            self.shapes.len(),
            self.groups.len(),
            self.build_start.elapsed().as_secs_f32() * 1e3
        );

        Scene {
            shapes: self.shapes,
            _groups: self.groups,
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable collection of top-level shapes, primitives and instances
/// alike, plus the group arena the instances reference.
pub struct Scene {
    shapes: Vec<Arc<dyn Shape>>,
    // The arena keeps groups alive for as long as the scene, also the ones
    // no instance ended up referencing
    _groups: Vec<Arc<ShapeGroup>>,
}

impl Scene {
    /// Finds the nearest hit for `ray` across all top-level shapes.
    ///
    /// The interaction is in world space with provenance claimed by the
    /// top-level entry that produced it: the instance arm for hits through
    /// instancing, the shape arm otherwise.
    pub fn ray_intersect(&self, mut ray: Ray) -> Option<SurfaceInteraction> {
        let mut hit: Option<SurfaceInteraction> = None;

        for shape in &self.shapes {
            if let Some(mut si) = shape.ray_intersect(ray) {
                if hit.as_ref().map_or(true, |old| si.t < old.t) {
                    ray.t_max = si.t;
                    // Instances arrive with their hits already claimed;
                    // direct primitives get claimed here
                    if !shape.is_instance() {
                        si.provenance = Provenance::Shape(shape.clone());
                    }
                    hit = Some(si);
                }
            }
        }

        hit
    }

    /// Checks if `ray` hits anything, returning on the first confirmed hit.
    pub fn ray_test(&self, ray: Ray) -> bool {
        self.shapes.iter().any(|s| s.ray_test(ray))
    }

    /// Computes (∂n/∂u, ∂n/∂v) at `si` through its provenance.
    pub fn normal_derivative(&self, si: &SurfaceInteraction, shading_frame: bool) -> (Vec3, Vec3) {
        si.normal_derivative(shading_frame)
    }
}
