use std::sync::Arc;

use crate::{
    interaction::{Provenance, SurfaceInteraction},
    math::{Bounds3, Point3, Ray, Vec3},
    shapes::Shape,
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Primitives_and_Intersection_Acceleration/Bounding_Volume_Hierarchies.html

#[derive(Copy, Clone, Debug)]
pub enum SplitMethod {
    Middle,
    EqualCounts,
}

/// A flattened BVH over a fixed set of shapes.
///
/// Coordinates are whatever space the shapes were constructed in; the
/// hierarchy itself never transforms anything.
pub struct BoundingVolumeHierarchy {
    split_method: SplitMethod,
    max_shapes_in_node: usize,
    nodes: Vec<BVHNode>,
    shapes: Vec<Arc<dyn Shape>>,
    // Construction-order index of each shape in the reordered array
    shape_indices: Vec<u32>,
}

impl BoundingVolumeHierarchy {
    /// Creates a new `BoundingVolumeHierarchy` for the given [Shape]s.
    ///
    /// An empty `shapes` is valid and produces a hierarchy that reports no
    /// intersections.
    pub fn new(
        shapes: Vec<Arc<dyn Shape>>,
        max_shapes_in_node: usize,
        split_method: SplitMethod,
    ) -> Self {
        let mut shape_info = Vec::new();
        for (i, s) in shapes.iter().enumerate() {
            let b = s.world_bound();
            shape_info.push(BVHPrimitiveInfo {
                shape_index: i,
                bounds: b,
                centroid: b.p_min + (b.diagonal() / 2.0),
            });
        }

        let mut ret = Self {
            split_method,
            max_shapes_in_node: max_shapes_in_node.max(1),
            nodes: Vec::new(),
            shapes,
            shape_indices: Vec::new(),
        };

        let mut ordered_shapes = Vec::new();
        let (root, node_count) =
            ret.recursive_build(&mut shape_info, 0, ret.shapes.len(), &mut ordered_shapes);

        let (shape_indices, shapes) = ordered_shapes.into_iter().unzip();
        ret.shape_indices = shape_indices;
        ret.shapes = shapes;

        ret.nodes = vec![BVHNode::default(); node_count];
        ret.flatten_tree(root, 0);

        ret
    }

    /// Returns the bounds of the whole hierarchy.
    pub fn bounds(&self) -> Bounds3 {
        self.nodes
            .first()
            .map_or_else(Bounds3::default, |n| n.bounds)
    }

    /// Finds the nearest hit for `ray`, with [Provenance] stamped to the hit
    /// shape and `prim_index` restamped to the shape's construction-order
    /// index.
    pub fn intersect(&self, mut ray: Ray) -> Option<SurfaceInteraction> {
        let mut hit: Option<SurfaceInteraction> = None;

        let inv_dir = Vec3::new(1.0 / ray.d.x, 1.0 / ray.d.y, 1.0 / ray.d.z);
        let dir_is_neg = [inv_dir.x < 0.0, inv_dir.y < 0.0, inv_dir.z < 0.0];

        let mut current_node_index = 0;
        let mut to_visit_index = 0;
        let mut to_visit_stack = [0; 64];
        loop {
            let node = self.nodes[current_node_index];
            if node.bounds.intersect(ray, inv_dir, dir_is_neg) {
                match node.content {
                    NodeContent::Interior {
                        second_child_index,
                        split_axis,
                    } => {
                        // Traverse children front to back
                        if dir_is_neg[split_axis as usize] {
                            to_visit_stack[to_visit_index] = current_node_index + 1;
                            to_visit_index += 1;
                            current_node_index = second_child_index as usize;
                        } else {
                            to_visit_stack[to_visit_index] = second_child_index as usize;
                            to_visit_index += 1;
                            current_node_index += 1;
                        }
                    }
                    NodeContent::Leaf {
                        first_shape_index,
                        shape_count,
                    } => {
                        let shape_range = (first_shape_index as usize)
                            ..((first_shape_index + u32::from(shape_count)) as usize);
                        for (shape, &shape_index) in self.shapes[shape_range.clone()]
                            .iter()
                            .zip(&self.shape_indices[shape_range])
                        {
                            if let Some(mut new_hit) = shape.ray_intersect(ray) {
                                if hit.as_ref().map_or(true, |old| new_hit.t < old.t) {
                                    ray.t_max = new_hit.t;
                                    new_hit.prim_index = shape_index;
                                    new_hit.provenance = Provenance::Shape(shape.clone());
                                    hit = Some(new_hit);
                                }
                            }
                        }

                        if to_visit_index == 0 {
                            break;
                        }

                        to_visit_index -= 1;
                        current_node_index = to_visit_stack[to_visit_index];
                    }
                    NodeContent::Uninitialized => unreachable!(),
                }
            } else {
                if to_visit_index == 0 {
                    break;
                }
                to_visit_index -= 1;
                current_node_index = to_visit_stack[to_visit_index];
            }
        }
        hit
    }

    /// Checks if `ray` hits anything, returning on the first confirmed hit
    /// without building an interaction.
    pub fn intersect_test(&self, ray: Ray) -> bool {
        let inv_dir = Vec3::new(1.0 / ray.d.x, 1.0 / ray.d.y, 1.0 / ray.d.z);
        let dir_is_neg = [inv_dir.x < 0.0, inv_dir.y < 0.0, inv_dir.z < 0.0];

        let mut current_node_index = 0;
        let mut to_visit_index = 0;
        let mut to_visit_stack = [0; 64];
        loop {
            let node = self.nodes[current_node_index];
            if node.bounds.intersect(ray, inv_dir, dir_is_neg) {
                match node.content {
                    NodeContent::Interior {
                        second_child_index, ..
                    } => {
                        to_visit_stack[to_visit_index] = second_child_index as usize;
                        to_visit_index += 1;
                        current_node_index += 1;
                    }
                    NodeContent::Leaf {
                        first_shape_index,
                        shape_count,
                    } => {
                        let shape_range = (first_shape_index as usize)
                            ..((first_shape_index + u32::from(shape_count)) as usize);
                        if self.shapes[shape_range].iter().any(|s| s.ray_test(ray)) {
                            return true;
                        }

                        if to_visit_index == 0 {
                            break;
                        }

                        to_visit_index -= 1;
                        current_node_index = to_visit_stack[to_visit_index];
                    }
                    NodeContent::Uninitialized => unreachable!(),
                }
            } else {
                if to_visit_index == 0 {
                    break;
                }
                to_visit_index -= 1;
                current_node_index = to_visit_stack[to_visit_index];
            }
        }
        false
    }

    /// Builds the BVH
    fn recursive_build(
        &mut self,
        shape_info: &mut [BVHPrimitiveInfo],
        start: usize,
        end: usize,
        ordered_shapes: &mut Vec<(u32, Arc<dyn Shape>)>,
    ) -> (Box<BVHBuildNode>, usize) {
        let bounds = shape_info[start..end]
            .iter()
            .fold(Bounds3::default(), |b, s| b.union_b(s.bounds));
        let first_shape_index = ordered_shapes.len();

        let shape_count = end - start;
        macro_rules! init_leaf {
            () => {{
                ordered_shapes.extend(
                    shape_info[start..end]
                        .iter()
                        .map(|s| (s.shape_index as u32, self.shapes[s.shape_index].clone())),
                );
                (
                    BVHBuildNode::leaf(first_shape_index, shape_count, bounds),
                    1,
                )
            }};
        }

        if shape_count <= self.max_shapes_in_node {
            init_leaf!()
        } else {
            let centroid_bounds = shape_info[start..end]
                .iter()
                .fold(Bounds3::default(), |b, s| b.union_p(s.centroid));
            let axis = centroid_bounds.maximum_extent();

            if centroid_bounds.p_max[axis] == centroid_bounds.p_min[axis] {
                init_leaf!()
            } else {
                let mut mid = start;
                // We need to fall back to 'equal counts' if 'middle' fails
                let split_method = match self.split_method {
                    SplitMethod::Middle => {
                        let mid_value =
                            (centroid_bounds.p_min[axis] + centroid_bounds.p_max[axis]) / 2.0;
                        mid = itertools::partition(&mut shape_info[start..end], |s| {
                            s.centroid[axis] < mid_value
                        }) + start;

                        if mid != start && mid != end {
                            SplitMethod::Middle
                        } else {
                            SplitMethod::EqualCounts
                        }
                    }
                    SplitMethod::EqualCounts => SplitMethod::EqualCounts,
                };

                match split_method {
                    SplitMethod::Middle => {}
                    SplitMethod::EqualCounts => {
                        mid = (start + end) / 2;
                        shape_info[start..end].select_nth_unstable_by(mid - start, |a, b| {
                            a.centroid[axis]
                                .partial_cmp(&b.centroid[axis])
                                .unwrap_or(std::cmp::Ordering::Equal)
                        });
                    }
                }

                assert_ne!(mid, start, "BVH: Split failed");

                let (child0, child0_node_count) =
                    self.recursive_build(shape_info, start, mid, ordered_shapes);
                let (child1, child1_node_count) =
                    self.recursive_build(shape_info, mid, end, ordered_shapes);
                (
                    BVHBuildNode::interior(axis, child0, child1),
                    1 + child0_node_count + child1_node_count,
                )
            }
        }
    }

    fn flatten_tree(&mut self, root: Box<BVHBuildNode>, mut next_index: usize) -> usize {
        match root.content {
            BuildNodeContent::Interior {
                children: [child0, child1],
                split_axis,
            } => {
                let self_index = next_index;
                let second_child_index = self.flatten_tree(child0, self_index + 1);
                next_index = self.flatten_tree(child1, second_child_index);
                self.nodes[self_index] =
                    BVHNode::interior(root.bounds, second_child_index, split_axis);
            }
            BuildNodeContent::Leaf {
                first_shape_index,
                shape_count,
            } => {
                self.nodes[next_index] = BVHNode::leaf(root.bounds, first_shape_index, shape_count);
                next_index += 1;
            }
        }
        next_index
    }
}

struct BVHPrimitiveInfo {
    shape_index: usize,
    bounds: Bounds3,
    centroid: Point3,
}

#[derive(Copy, Clone)]
enum NodeContent {
    Interior {
        second_child_index: u32,
        split_axis: u8,
    },
    Leaf {
        first_shape_index: u32,
        shape_count: u16,
    },
    Uninitialized,
}

#[derive(Copy, Clone)]
struct BVHNode {
    bounds: Bounds3,
    content: NodeContent,
}

impl BVHNode {
    fn default() -> Self {
        Self {
            bounds: Bounds3::default(),
            content: NodeContent::Uninitialized,
        }
    }

    fn interior(bounds: Bounds3, second_child_index: usize, split_axis: usize) -> Self {
        Self {
            bounds,
            content: NodeContent::Interior {
                second_child_index: second_child_index as u32,
                split_axis: split_axis as u8,
            },
        }
    }

    fn leaf(bounds: Bounds3, first_shape_index: usize, shape_count: usize) -> Self {
        Self {
            bounds,
            content: NodeContent::Leaf {
                first_shape_index: first_shape_index as u32,
                shape_count: shape_count as u16,
            },
        }
    }
}

enum BuildNodeContent {
    Interior {
        children: [Box<BVHBuildNode>; 2],
        split_axis: usize,
    },
    Leaf {
        // Index into the ordered shape array
        first_shape_index: usize,
        shape_count: usize,
    },
}

struct BVHBuildNode {
    bounds: Bounds3,
    content: BuildNodeContent,
}

impl BVHBuildNode {
    fn interior(split_axis: usize, child0: Box<BVHBuildNode>, child1: Box<BVHBuildNode>) -> Box<Self> {
        Box::new(Self {
            bounds: child0.bounds.union_b(child1.bounds),
            content: BuildNodeContent::Interior {
                children: [child0, child1],
                split_axis,
            },
        })
    }

    fn leaf(first_shape_index: usize, shape_count: usize, bounds: Bounds3) -> Box<Self> {
        Box::new(Self {
            bounds,
            content: BuildNodeContent::Leaf {
                first_shape_index,
                shape_count,
            },
        })
    }
}
