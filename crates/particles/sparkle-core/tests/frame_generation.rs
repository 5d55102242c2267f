use sparkle_core::interp::generate;
use sparkle_core::shapes::{circle, line};
use sparkle_core::{
    chain_frames, morph_frames, normalize_point_count, Easing, FxError, Interpolator, Location,
    PointCloud, Shape, Vec3,
};
use sparkle_test_fixtures::shapes;

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn cloud(name: &str) -> Vec<Vec3> {
    PointCloud::from(shapes::points(name).unwrap()).sample()
}

/// it should produce steps + 1 values pinned to both ends for every curve
#[test]
fn generate_pins_endpoints() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ] {
        let values = generate(&0.1, &0.7, 9, easing).unwrap();
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], 0.1);
        assert_eq!(values[9], 0.7);
    }
}

/// it should follow each curve at a quarter of the way
#[test]
fn generate_follows_the_curve() {
    let at_quarter = |easing| generate(&0.0, &100.0, 4, easing).unwrap()[1];
    assert!(approx(at_quarter(Easing::Linear), 25.0, 1e-9));
    assert!(approx(at_quarter(Easing::EaseIn), 6.25, 1e-9));
    assert!(approx(at_quarter(Easing::EaseOut), 43.75, 1e-9));
    assert!(approx(at_quarter(Easing::EaseInOut), 6.25, 1e-9));
}

/// it should default the fluent interpolator to 20 linear steps
#[test]
fn interpolator_defaults() {
    let values = Interpolator::between(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0))
        .build()
        .unwrap();
    assert_eq!(values.len(), 21);
    assert!(approx(values[7].x, 7.0, 1e-9));

    let err = Interpolator::between(0.0_f64, 1.0).over(0).build().unwrap_err();
    assert!(matches!(err, FxError::DegenerateInput { .. }));
}

/// it should blend location angles along with the position
#[test]
fn location_interpolation_includes_angles() {
    let a = Location::new(0.0, 64.0, 0.0).with_rotation(-90.0, 0.0);
    let b = Location::new(8.0, 65.0, 0.0).with_rotation(90.0, 45.0);
    let mid = Interpolator::between(a, b).over(2).build().unwrap()[1];
    assert!(approx(mid.position.x, 4.0, 1e-9));
    assert!(approx(mid.position.y, 64.5, 1e-9));
    assert!(approx(mid.yaw as f64, 0.0, 1e-6));
    assert!(approx(mid.pitch as f64, 22.5, 1e-6));
}

/// it should resample the smaller cloud up to the larger one
#[test]
fn morph_frames_share_the_larger_point_count() {
    let triangle = cloud("triangle");
    let square = cloud("square");
    let frames = morph_frames(&triangle, &square, 4, Easing::Linear).unwrap();
    assert_eq!(frames.len(), 5);
    assert!(frames.iter().all(|f| f.len() == 4));
    assert_eq!(frames[0], normalize_point_count(&triangle, 4));
    assert_eq!(frames[4], square);
}

/// it should begin on the first shape and end on the last shape
#[test]
fn chain_starts_and_ends_on_its_shapes() {
    let samples = vec![cloud("star"), cloud("square"), cloud("triangle")];
    let frames = chain_frames(&samples, &[None, None], 40, Easing::EaseInOut).unwrap();
    assert_eq!(frames.len(), 41);
    assert_eq!(frames[0], samples[0]);
    assert_eq!(frames[40], normalize_point_count(&samples[2], 10));
    assert!(frames.iter().all(|f| f.len() == 10));
}

/// it should honour per-transition ticks and split the rest evenly
#[test]
fn chain_transition_lengths() {
    let samples = vec![line(2.0, 3).sample(), circle(1.0, 3).sample(), line(4.0, 3).sample()];
    let frames = chain_frames(&samples, &[Some(5), None], 12, Easing::Linear).unwrap();
    // 5 steps into the circle, 12 / 2 = 6 steps into the last line, plus the closing frame
    assert_eq!(frames.len(), 12);
    assert_eq!(frames[5], samples[1]);

    let tiny = chain_frames(&samples, &[Some(0), None], 1, Easing::Linear).unwrap();
    assert_eq!(tiny.len(), 3);
}

/// it should repeat a lone shape for the whole duration
#[test]
fn chain_of_one_shape_is_static() {
    let only = vec![circle(1.0, 6).sample()];
    let frames = chain_frames(&only, &[], 10, Easing::Linear).unwrap();
    assert_eq!(frames.len(), 11);
    assert!(frames.iter().all(|f| *f == only[0]));

    assert!(matches!(
        chain_frames(&[], &[], 10, Easing::Linear),
        Err(FxError::DegenerateInput { .. })
    ));
}
