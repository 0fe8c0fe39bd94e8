mod bvh;
mod interaction;
mod macros;
pub mod math;
mod scene;
pub mod shapes;

pub use bvh::{BoundingVolumeHierarchy, SplitMethod};
pub use interaction::{Provenance, SurfaceInteraction};
pub use scene::{Scene, SceneBuilder};

/// Crate-wide result with a boxed error payload.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
