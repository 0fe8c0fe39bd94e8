#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_abs_diff_eq;
    use itertools::iproduct;
    use rayon::prelude::*;

    use kajo::{
        math::{transforms::translation, Point3, Ray, Transform, Vec3},
        shapes::{Rectangle, Shape, ShapeGroup, Sphere},
        SceneBuilder,
    };

    fn ray_towards(o: Point3, d: Vec3) -> Ray {
        Ray::new(o, d, f32::MAX, 0.0)
    }

    fn unit_sphere_group() -> ShapeGroup {
        ShapeGroup::new(vec![
            Arc::new(Sphere::new(&Transform::default(), 1.0)) as Arc<dyn Shape>,
        ])
    }

    #[test]
    fn empty_scene_misses() {
        crate::init_test_logger();

        let scene = SceneBuilder::new().build();

        let ray = ray_towards(Point3::zeros(), Vec3::new(0.0, 0.0, 1.0));
        assert!(scene.ray_intersect(ray).is_none());
        assert!(!scene.ray_test(ray));
    }

    #[test]
    fn nearest_hit_wins_across_entry_kinds() {
        crate::init_test_logger();

        // A direct sphere in front of an instanced one along +z
        let mut builder = SceneBuilder::new();
        builder.add_shape(Arc::new(Sphere::new(
            &translation(Vec3::new(0.0, 0.0, -3.0)),
            1.0,
        )));
        let group = builder.register_group(unit_sphere_group());
        builder
            .add_instance(group, &translation(Vec3::new(0.0, 0.0, 3.0)))
            .unwrap();
        let scene = builder.build();

        let si = scene
            .ray_intersect(ray_towards(
                Point3::new(0.0, 0.0, -8.0),
                Vec3::new(0.0, 0.0, 1.0),
            ))
            .unwrap();
        assert_abs_diff_eq!(si.t, 4.0, epsilon = 1e-4);
        assert!(si.provenance.is_direct());

        // From the other side the instance is in front
        let si = scene
            .ray_intersect(ray_towards(
                Point3::new(0.0, 0.0, 8.0),
                Vec3::new(0.0, 0.0, -1.0),
            ))
            .unwrap();
        assert_abs_diff_eq!(si.t, 4.0, epsilon = 1e-4);
        assert!(si.provenance.is_instanced());
        assert!(si.provenance.hit_shape().unwrap().is_instance());
    }

    #[test]
    fn scene_query_results_are_world_space() {
        crate::init_test_logger();

        let mut builder = SceneBuilder::new();
        let group = builder.register_group(unit_sphere_group());
        builder
            .add_instance(group, &translation(Vec3::new(5.0, 0.0, 0.0)))
            .unwrap();
        let scene = builder.build();

        let si = scene
            .ray_intersect(ray_towards(
                Point3::new(5.0, 0.0, -6.0),
                Vec3::new(0.0, 0.0, 1.0),
            ))
            .unwrap();
        assert_abs_diff_eq!(si.p, Point3::new(5.0, 0.0, -1.0), epsilon = 1e-4);
    }

    #[test]
    fn ray_test_sees_every_entry_kind() {
        crate::init_test_logger();

        let mut builder = SceneBuilder::new();
        builder.add_shape(Arc::new(Rectangle::new(&translation(Vec3::new(
            -3.0, 0.0, 0.0,
        )))));
        let group = builder.register_group(unit_sphere_group());
        builder
            .add_instance(group, &translation(Vec3::new(3.0, 0.0, 0.0)))
            .unwrap();
        let scene = builder.build();

        let d = Vec3::new(0.0, 0.0, 1.0);
        assert!(scene.ray_test(ray_towards(Point3::new(-3.0, 0.0, -5.0), d)));
        assert!(scene.ray_test(ray_towards(Point3::new(3.0, 0.0, -5.0), d)));
        assert!(!scene.ray_test(ray_towards(Point3::new(0.0, 0.0, -5.0), d)));
    }

    #[test]
    fn unknown_group_handle_errors() {
        crate::init_test_logger();

        let mut registered = SceneBuilder::new();
        let handle = registered.register_group(unit_sphere_group());

        // The handle belongs to another builder's arena
        let mut other = SceneBuilder::new();
        let result = other.add_instance(handle, &Transform::default());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("No shape group"));
    }

    #[test]
    fn instance_of_empty_group_misses() {
        crate::init_test_logger();

        let mut builder = SceneBuilder::new();
        let group = builder.register_group(ShapeGroup::new(Vec::new()));
        builder.add_instance(group, &Transform::default()).unwrap();
        let scene = builder.build();

        let ray = ray_towards(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(scene.ray_intersect(ray).is_none());
        assert!(!scene.ray_test(ray));
    }

    #[test]
    fn many_instances_share_one_group() {
        crate::init_test_logger();

        let mut builder = SceneBuilder::new();
        let group = builder.register_group(unit_sphere_group());
        for (x, y) in iproduct!(0..4, 0..4) {
            builder
                .add_instance(
                    group,
                    &translation(Vec3::new(x as f32 * 4.0, y as f32 * 4.0, 0.0)),
                )
                .unwrap();
        }
        let scene = builder.build();

        for (x, y) in iproduct!(0..4, 0..4) {
            let si = scene
                .ray_intersect(ray_towards(
                    Point3::new(x as f32 * 4.0, y as f32 * 4.0, -6.0),
                    Vec3::new(0.0, 0.0, 1.0),
                ))
                .unwrap();
            assert_abs_diff_eq!(si.t, 5.0, epsilon = 1e-4);
            assert!(si.provenance.is_instanced());
        }

        // Between the placements there is nothing
        assert!(!scene.ray_test(ray_towards(
            Point3::new(2.0, 2.0, -6.0),
            Vec3::new(0.0, 0.0, 1.0)
        )));
    }

    #[test]
    fn concurrent_queries() {
        crate::init_test_logger();

        let mut builder = SceneBuilder::new();
        let group = builder.register_group(unit_sphere_group());
        builder.add_instance(group, &Transform::default()).unwrap();
        builder.add_shape(Arc::new(Sphere::new(
            &translation(Vec3::new(4.0, 0.0, 0.0)),
            1.0,
        )));
        let scene = builder.build();

        // Immutable scenes answer queries from any number of threads
        let hits = (0..1024)
            .into_par_iter()
            .filter(|i| {
                let x = (i % 32) as f32 * 0.25 - 4.0;
                scene.ray_test(ray_towards(
                    Point3::new(x, 0.0, -5.0),
                    Vec3::new(0.0, 0.0, 1.0),
                ))
            })
            .count();
        assert!(hits > 0);
    }

    #[test]
    fn scene_normal_derivative_dispatches_by_provenance() {
        crate::init_test_logger();

        let mut builder = SceneBuilder::new();
        builder.add_shape(Arc::new(Sphere::new(&Transform::default(), 2.0)));
        let scene = builder.build();

        let si = scene
            .ray_intersect(ray_towards(
                Point3::new(4.0, 0.0, 0.0),
                Vec3::new(-1.0, 0.0, 0.0),
            ))
            .unwrap();

        let (dn_du, dn_dv) = scene.normal_derivative(&si, false);
        assert_abs_diff_eq!(dn_du, si.dp_du / 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(dn_dv, si.dp_dv / 2.0, epsilon = 1e-5);

        // Through an instance the dispatch lands on the group primitive
        let mut builder = SceneBuilder::new();
        let group = builder.register_group(ShapeGroup::new(vec![
            Arc::new(Sphere::new(&Transform::default(), 2.0)) as Arc<dyn Shape>,
        ]));
        builder
            .add_instance(group, &translation(Vec3::new(0.0, 0.0, 3.0)))
            .unwrap();
        let scene = builder.build();

        let si = scene
            .ray_intersect(ray_towards(
                Point3::new(4.0, 0.0, 3.0),
                Vec3::new(-1.0, 0.0, 0.0),
            ))
            .unwrap();
        assert!(si.provenance.is_instanced());

        let (dn_du, dn_dv) = scene.normal_derivative(&si, false);
        assert_abs_diff_eq!(dn_du, si.dp_du / 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(dn_dv, si.dp_dv / 2.0, epsilon = 1e-4);
    }
}
