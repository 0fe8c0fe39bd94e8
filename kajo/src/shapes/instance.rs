use std::sync::{Arc, Weak};

use super::{shape_group::ShapeGroup, Shape};
use crate::{
    interaction::{Provenance, SurfaceInteraction},
    math::{Bounds3, Ray, Transform, Vec3},
};

/// A placement of a [ShapeGroup] at a world transform.
///
/// Behaves like an independent shape under the query contract: the ray is
/// mapped into the group's local space, intersection is delegated to the
/// shared group, and the resulting interaction is mapped back out. Any
/// number of instances may reference the same group.
pub struct Instance {
    to_world: Transform,
    to_object: Transform,
    swaps_handedness: bool,
    group: Arc<ShapeGroup>,
    // Handed out when claiming hits; always upgradable since construction
    // only goes through the Arc
    weak_self: Weak<Instance>,
}

impl Instance {
    /// Creates a new `Instance` of `group` at `to_world`.
    ///
    /// Returned in an [Arc] so hits can reference the instance that claimed
    /// them.
    pub fn new(group: Arc<ShapeGroup>, to_world: &Transform) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            to_world: to_world.clone(),
            to_object: to_world.inverted(),
            swaps_handedness: to_world.swaps_handedness(),
            group,
            weak_self: Weak::clone(weak),
        })
    }

    /// Returns the placement of this `Instance`.
    pub fn to_world(&self) -> &Transform {
        &self.to_world
    }
}

impl Shape for Instance {
    fn ray_intersect(&self, ray: Ray) -> Option<SurfaceInteraction> {
        // The direction is mapped without renormalization so local hit
        // distances are already in the caller's parameterization and t needs
        // no rescaling on the way back out
        let si = self.group.ray_intersect(&self.to_object * ray)?;

        // Normals go through the inverse transpose and get renormalized;
        // tangents are plain vectors. A reflecting placement flips the
        // geometric orientation the same way baked-in vertices would.
        let mut n = (&self.to_world * si.n).normalized();
        let mut sh_n = (&self.to_world * si.sh_n).normalized();
        if self.swaps_handedness {
            n = -n;
            sh_n = -sh_n;
        }

        Some(SurfaceInteraction {
            t: si.t,
            time: si.time,
            p: &self.to_world * si.p,
            n,
            sh_n,
            dp_du: &self.to_world * si.dp_du,
            dp_dv: &self.to_world * si.dp_dv,
            uv: si.uv,
            wo: &self.to_world * si.wo,
            prim_index: si.prim_index,
            // The primitive stamped inside the group stays recoverable
            // through prim_index; the hit itself now belongs to this instance
            provenance: match self.weak_self.upgrade() {
                Some(instance) => Provenance::Instance(instance),
                None => Provenance::None,
            },
        })
    }

    fn ray_test(&self, ray: Ray) -> bool {
        self.group.ray_test(&self.to_object * ray)
    }

    fn normal_derivative(&self, si: &SurfaceInteraction, shading_frame: bool) -> (Vec3, Vec3) {
        // Map the record back into group space and dispatch to the primitive
        // it names; t, time, uv and prim_index are space independent
        let mut n = (&self.to_object * si.n).normalized();
        let mut sh_n = (&self.to_object * si.sh_n).normalized();
        if self.swaps_handedness {
            n = -n;
            sh_n = -sh_n;
        }
        let local_si = SurfaceInteraction {
            t: si.t,
            time: si.time,
            p: &self.to_object * si.p,
            n,
            sh_n,
            dp_du: &self.to_object * si.dp_du,
            dp_dv: &self.to_object * si.dp_dv,
            uv: si.uv,
            wo: &self.to_object * si.wo,
            prim_index: si.prim_index,
            provenance: Provenance::None,
        };

        let (dn_du, dn_dv) = self.group.normal_derivative(&local_si, shading_frame);

        // Degenerate local tangents pass through as zeros
        (&self.to_world * dn_du, &self.to_world * dn_dv)
    }

    fn world_bound(&self) -> Bounds3 {
        &self.to_world * self.group.local_bound()
    }

    fn is_instance(&self) -> bool {
        true
    }
}
