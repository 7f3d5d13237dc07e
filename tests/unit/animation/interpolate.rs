use super::*;

#[test]
fn clamps_by_default() {
    let opts = InterpolateOpts::default();
    assert_eq!(interpolate(-5.0, &[0.0, 10.0], &[0.0, 1.0], opts).unwrap(), 0.0);
    assert_eq!(interpolate(5.0, &[0.0, 10.0], &[0.0, 1.0], opts).unwrap(), 0.5);
    assert_eq!(interpolate(50.0, &[0.0, 10.0], &[0.0, 1.0], opts).unwrap(), 1.0);
}

#[test]
fn extend_and_identity_extrapolation() {
    let extend = InterpolateOpts {
        left: Extrapolate::Extend,
        right: Extrapolate::Extend,
        ..InterpolateOpts::default()
    };
    assert_eq!(interpolate(20.0, &[0.0, 10.0], &[0.0, 1.0], extend).unwrap(), 2.0);
    assert_eq!(interpolate(-10.0, &[0.0, 10.0], &[0.0, 1.0], extend).unwrap(), -1.0);

    let identity = InterpolateOpts {
        right: Extrapolate::Identity,
        ..InterpolateOpts::default()
    };
    assert_eq!(
        interpolate(42.0, &[0.0, 10.0], &[0.0, 1.0], identity).unwrap(),
        42.0
    );
}

#[test]
fn multi_segment_ranges_pick_the_right_segment() {
    let input = [0.0, 20.0, 80.0, 100.0];
    let output = [0.0, 1.0, 1.0, 0.0];
    let opts = InterpolateOpts::default();
    assert_eq!(interpolate(10.0, &input, &output, opts).unwrap(), 0.5);
    assert_eq!(interpolate(50.0, &input, &output, opts).unwrap(), 1.0);
    assert_eq!(interpolate(90.0, &input, &output, opts).unwrap(), 0.5);
    assert_eq!(interpolate(100.0, &input, &output, opts).unwrap(), 0.0);
}

#[test]
fn easing_shapes_segment() {
    let opts = InterpolateOpts::eased(Ease::InQuad);
    assert_eq!(interpolate(5.0, &[0.0, 10.0], &[0.0, 100.0], opts).unwrap(), 25.0);
}

#[test]
fn malformed_ranges_are_rejected() {
    let opts = InterpolateOpts::default();
    assert!(interpolate(0.0, &[0.0], &[1.0], opts).is_err());
    assert!(interpolate(0.0, &[0.0, 1.0], &[1.0], opts).is_err());
    assert!(interpolate(0.0, &[1.0, 0.0], &[0.0, 1.0], opts).is_err());
    assert!(interpolate(0.0, &[0.0, 0.0], &[0.0, 1.0], opts).is_err());
    assert!(interpolate(f64::NAN, &[0.0, 1.0], &[0.0, 1.0], opts).is_err());
}

#[test]
fn tween_never_fails_and_handles_degenerate_ranges() {
    assert_eq!(tween(-3.0, (0.0, 20.0), (0.0, 1.0), Ease::Linear), 0.0);
    assert_eq!(tween(10.0, (0.0, 20.0), (0.0, 1.0), Ease::Linear), 0.5);
    assert_eq!(tween(99.0, (0.0, 20.0), (0.0, 1.0), Ease::Linear), 1.0);
    assert_eq!(tween(4.0, (5.0, 5.0), (1.0, 0.0), Ease::Linear), 1.0);
    assert_eq!(tween(5.0, (5.0, 5.0), (1.0, 0.0), Ease::Linear), 0.0);
}
