use super::{matrix::Matrix4x4, transform::Transform, vector::Vec3};

/// Creates a new [Transform] that is a translation by `delta`.
pub fn translation(delta: Vec3) -> Transform {
    let m = Matrix4x4::new([
        [1.0, 0.0, 0.0, delta.x],
        [0.0, 1.0, 0.0, delta.y],
        [0.0, 0.0, 1.0, delta.z],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let m_inv = Matrix4x4::new([
        [1.0, 0.0, 0.0, -delta.x],
        [0.0, 1.0, 0.0, -delta.y],
        [0.0, 0.0, 1.0, -delta.z],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m_inv)
}

/// Creates a new [Transform] that is a scaling by `x`, `y` and `z`.
pub fn scale(x: f32, y: f32, z: f32) -> Transform {
    let m = Matrix4x4::new([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let m_inv = Matrix4x4::new([
        [1.0 / x, 0.0, 0.0, 0.0],
        [0.0, 1.0 / y, 0.0, 0.0],
        [0.0, 0.0, 1.0 / z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m_inv)
}

/// Creates a new [Transform] that is a uniform scaling by `s`.
pub fn uniform_scale(s: f32) -> Transform {
    scale(s, s, s)
}

/// Creates a new [Transform] that is a rotation of `theta` radians around the x-axis.
pub fn rotation_x(theta: f32) -> Transform {
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let m = Matrix4x4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cos_theta, -sin_theta, 0.0],
        [0.0, sin_theta, cos_theta, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m.transposed())
}

/// Creates a new [Transform] that is a rotation of `theta` radians around the y-axis.
pub fn rotation_y(theta: f32) -> Transform {
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let m = Matrix4x4::new([
        [cos_theta, 0.0, sin_theta, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-sin_theta, 0.0, cos_theta, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m.transposed())
}

/// Creates a new [Transform] that is a rotation of `theta` radians around the z-axis.
pub fn rotation_z(theta: f32) -> Transform {
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let m = Matrix4x4::new([
        [cos_theta, -sin_theta, 0.0, 0.0],
        [sin_theta, cos_theta, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m.transposed())
}

/// Creates a new [Transform] that is a rotation of `theta` radians around `axis`.
pub fn rotation(theta: f32, axis: Vec3) -> Transform {
    let a = axis.normalized();
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let m = Matrix4x4::new([
        [
            a.x * a.x + (1.0 - a.x * a.x) * cos_theta,
            a.x * a.y * (1.0 - cos_theta) - a.z * sin_theta,
            a.x * a.z * (1.0 - cos_theta) + a.y * sin_theta,
            0.0,
        ],
        [
            a.x * a.y * (1.0 - cos_theta) + a.z * sin_theta,
            a.y * a.y + (1.0 - a.y * a.y) * cos_theta,
            a.y * a.z * (1.0 - cos_theta) - a.x * sin_theta,
            0.0,
        ],
        [
            a.x * a.z * (1.0 - cos_theta) - a.y * sin_theta,
            a.y * a.z * (1.0 - cos_theta) + a.x * sin_theta,
            a.z * a.z + (1.0 - a.z * a.z) * cos_theta,
            0.0,
        ],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m.transposed())
}
