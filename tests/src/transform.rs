#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use kajo::math::{
        transforms::{rotation_y, scale, translation, uniform_scale},
        Bounds3, Matrix4x4, Normal, Point3, Ray, Transform, Vec3,
    };

    // These are by no means exhaustive. We throw some simple cases at the
    // implementation to catch obvious typos

    #[test]
    fn new() {
        let md = [
            [2.0, 0.0, 0.0, 1.0],
            [0.0, 3.0, 0.0, 2.0],
            [0.0, 0.0, 4.0, 3.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let m = Matrix4x4::new(md);
        let mi = m.inverted();

        let t0 = Transform::new(md);
        let t1 = Transform::new_m(m);
        let t2 = Transform::new_full(m, mi);
        assert_eq!(t0.m(), &m);
        assert_eq!(t0.m_inv(), &mi);
        assert_eq!(t0, t1);
        assert_eq!(t1, t2);
    }

    #[test]
    fn cached_inverse() {
        let t = &(&translation(Vec3::new(1.0, -2.0, 3.0)) * &rotation_y(0.7)) * &scale(2.0, 0.5, 3.0);
        let product = t.m() * t.m_inv();
        assert_abs_diff_eq!(product, Matrix4x4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn inverted() {
        let t = &translation(Vec3::new(1.0, 2.0, 3.0)) * &scale(2.0, 2.0, 2.0);
        let ti = t.inverted();
        assert_eq!(t.m(), ti.m_inv());
        assert_eq!(t.m_inv(), ti.m());

        let p = Point3::new(-1.0, 5.0, 0.5);
        assert_abs_diff_eq!(&ti * (&t * p), p, epsilon = 1e-6);
    }

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert!(t.is_identity());

        let p = Point3::new(1.0, 2.0, 3.0);
        let v = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(&t * p, p);
        assert_eq!(&t * v, v);
    }

    #[test]
    fn point_application() {
        let t = translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(&t * Point3::zeros(), Point3::new(1.0, 2.0, 3.0));

        let t = scale(2.0, 3.0, 4.0);
        assert_eq!(
            &t * Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn vector_application_ignores_translation() {
        let t = translation(Vec3::new(10.0, 20.0, 30.0));
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(&t * v, v);

        let t = scale(2.0, 1.0, 1.0);
        assert_eq!(&t * v, Vec3::new(2.0, 2.0, 3.0));
    }

    #[test]
    fn normal_application_uses_inverse_transpose() {
        // A normal of a plane tilted 45 degrees in xy, scaled 2x along x.
        // The plain vector transform would tilt it the wrong way.
        let t = scale(2.0, 1.0, 1.0);
        let n = (&t * Normal::new(1.0, 1.0, 0.0)).normalized();
        let expected = Normal::new(0.5, 1.0, 0.0).normalized();
        assert_abs_diff_eq!(n, expected, epsilon = 1e-6);

        // The transformed normal stays perpendicular to the transformed
        // tangent
        let tangent = &t * Vec3::new(1.0, -1.0, 0.0);
        assert_abs_diff_eq!(n.dot_v(tangent), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn normal_application_under_rotation() {
        // Rotations are rigid so normals and vectors transform the same way
        let t = rotation_y(0.3);
        let n = Normal::new(0.0, 0.0, 1.0);
        let v = Vec3::new(0.0, 0.0, 1.0);
        assert_abs_diff_eq!(Vec3::from(&t * n), &t * v, epsilon = 1e-6);
    }

    #[test]
    fn ray_application() {
        let t = &translation(Vec3::new(0.0, 1.0, 0.0)) * &uniform_scale(2.0);
        let r = Ray::new(
            Point3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            8.0,
            0.5,
        );
        let tr = &t * r;
        assert_abs_diff_eq!(tr.o, Point3::new(2.0, 1.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(tr.d, Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-6);
        // Parameter range and payload pass through untouched
        assert_eq!(tr.t_max, 8.0);
        assert_eq!(tr.time, 0.5);
    }

    #[test]
    fn composition_applies_rhs_first() {
        let t = &translation(Vec3::new(1.0, 0.0, 0.0)) * &uniform_scale(2.0);
        // Scale first, then translate
        assert_eq!(&t * Point3::new(1.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0));

        let t = &uniform_scale(2.0) * &translation(Vec3::new(1.0, 0.0, 0.0));
        // Translate first, then scale
        assert_eq!(&t * Point3::new(1.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn swaps_handedness() {
        assert!(!Transform::default().swaps_handedness());
        assert!(scale(-1.0, 1.0, 1.0).swaps_handedness());
        assert!(!scale(-1.0, -1.0, 1.0).swaps_handedness());
        assert!(!rotation_y(std::f32::consts::PI).swaps_handedness());
    }

    #[test]
    fn bounds_application() {
        let t = rotation_y(std::f32::consts::FRAC_PI_4);
        let b = &t * Bounds3::new(Point3::splat(-1.0), Point3::splat(1.0));
        let expected = 2.0_f32.sqrt();
        assert_abs_diff_eq!(b.p_min.x, -expected, epsilon = 1e-5);
        assert_abs_diff_eq!(b.p_max.x, expected, epsilon = 1e-5);
        assert_abs_diff_eq!(b.p_min.y, -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(b.p_max.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    #[should_panic(expected = "singular")]
    fn singular_matrix_panics() {
        let _ = Transform::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }
}
