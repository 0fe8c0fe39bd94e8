mod bounds;
mod matrix;
mod normal;
mod point;
mod ray;
mod transform;
pub mod transforms;
mod vector;

pub use bounds::Bounds3;
pub use matrix::Matrix4x4;
pub use normal::Normal;
pub use point::{Point2, Point3};
pub use ray::Ray;
pub use transform::Transform;
pub use vector::{Vec2, Vec3};
