use crate::{
    math::{Normal, Point2, Point3, Transform},
    Result,
};

/// Stores the geometry data of a triangle mesh.
///
/// Positions and normals are baked into the construction space by `to_world`
/// at build time so per-ray work needs no matrix at all. [Triangle]s reference
/// their `Mesh` through an [Arc].
///
/// [Triangle]: super::Triangle
/// [Arc]: std::sync::Arc
pub struct Mesh {
    /// Triangle vertex indices stored as triplets.
    pub indices: Vec<usize>,
    /// Vertex positions in construction space.
    pub points: Vec<Point3>,
    /// Optional per-vertex shading normals, in construction space.
    pub normals: Vec<Normal>,
    /// Optional per-vertex texture coordinates.
    pub uvs: Vec<Point2>,
    /// Whether the baked transform flips handedness. The winding of the baked
    /// positions flips with it, as do the shading normals.
    pub transform_swaps_handedness: bool,
}

impl Mesh {
    /// Creates a new `Mesh`, baking `to_world` into the vertex data.
    ///
    /// `normals` and `uvs` may be empty; when present their length has to
    /// match `points`.
    pub fn new(
        to_world: &Transform,
        indices: Vec<usize>,
        mut points: Vec<Point3>,
        mut normals: Vec<Normal>,
        uvs: Vec<Point2>,
    ) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(format!(
                "Mesh: index count {} is not a multiple of 3",
                indices.len()
            )
            .into());
        }
        if let Some(&i) = indices.iter().find(|&&i| i >= points.len()) {
            return Err(format!("Mesh: index {} out of bounds for {} points", i, points.len()).into());
        }
        if !normals.is_empty() && normals.len() != points.len() {
            return Err(format!(
                "Mesh: got {} normals for {} points",
                normals.len(),
                points.len()
            )
            .into());
        }
        if !uvs.is_empty() && uvs.len() != points.len() {
            return Err(
                format!("Mesh: got {} uvs for {} points", uvs.len(), points.len()).into(),
            );
        }

        for p in &mut points {
            *p = to_world * *p;
        }

        // A reflecting transform flips the winding of the baked positions, so
        // the shading normals flip with it to keep the two sides consistent
        let transform_swaps_handedness = to_world.swaps_handedness();
        for n in &mut normals {
            *n = (to_world * *n).normalized();
            if transform_swaps_handedness {
                *n = -*n;
            }
        }

        Ok(Self {
            indices,
            points,
            normals,
            uvs,
            transform_swaps_handedness,
        })
    }

    /// Returns the number of triangles in this `Mesh`.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
