use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn unit(frame: f64, config: SpringConfig) -> f64 {
    spring(
        frame,
        fps30(),
        SpringParams {
            config,
            ..SpringParams::default()
        },
    )
    .unwrap()
}

#[test]
fn starts_at_from_and_settles_at_to() {
    let params = SpringParams {
        from: 40.0,
        to: 0.0,
        ..SpringParams::default()
    };
    assert_eq!(spring(0.0, fps30(), params).unwrap(), 40.0);
    let late = spring(200.0, fps30(), params).unwrap();
    assert!(late.abs() < 1e-3, "{late}");
}

#[test]
fn negative_frames_hold_the_start_value() {
    assert_eq!(unit(-12.0, SpringConfig::default()), 0.0);
}

#[test]
fn default_config_overshoots_and_smooth_does_not() {
    let peak = (0..90)
        .map(|f| unit(f as f64, SpringConfig::default()))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.05, "{peak}");

    let mut prev = 0.0;
    for f in 0..90 {
        let v = unit(f as f64, SpringConfig::smooth());
        assert!(v <= 1.0 + 1e-9);
        assert!(v + 1e-12 >= prev);
        prev = v;
    }
}

#[test]
fn overshoot_clamping_caps_at_target() {
    let cfg = SpringConfig {
        overshoot_clamping: true,
        ..SpringConfig::default()
    };
    for f in 0..90 {
        assert!(unit(f as f64, cfg) <= 1.0);
    }
}

#[test]
fn delay_shifts_the_curve() {
    let params = SpringParams {
        delay: 10.0,
        ..SpringParams::default()
    };
    assert_eq!(spring(10.0, fps30(), params).unwrap(), 0.0);
    assert_eq!(
        spring(25.0, fps30(), params).unwrap(),
        unit(15.0, SpringConfig::default())
    );
}

#[test]
fn duration_in_frames_reaches_target_exactly_after_window() {
    let params = SpringParams {
        duration_in_frames: Some(20.0),
        ..SpringParams::default()
    };
    assert_eq!(spring(21.0, fps30(), params).unwrap(), 1.0);
    let mid = spring(10.0, fps30(), params).unwrap();
    assert!(mid > 0.0 && mid < 1.2, "{mid}");
}

#[test]
fn reverse_runs_backwards() {
    let params = SpringParams {
        config: SpringConfig::smooth(),
        duration_in_frames: Some(30.0),
        reverse: true,
        ..SpringParams::default()
    };
    let start = spring(0.0, fps30(), params).unwrap();
    let end = spring(30.0, fps30(), params).unwrap();
    assert!(start > 0.99, "{start}");
    assert_eq!(end, 0.0);
}

#[test]
fn measure_spring_finds_rest_frame() {
    let n = measure_spring(fps30(), &SpringConfig::default()).unwrap();
    assert!(n > 5 && n < 200, "{n}");
    for f in n..n + 10 {
        let v = unit(f as f64, SpringConfig::default());
        assert!((v - 1.0).abs() < REST_THRESHOLD);
    }
}

#[test]
fn invalid_configs_are_rejected() {
    for cfg in [
        SpringConfig {
            damping: 0.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            mass: -1.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            stiffness: f64::NAN,
            ..SpringConfig::default()
        },
    ] {
        assert!(cfg.validate().is_err());
        assert!(
            spring(
                3.0,
                fps30(),
                SpringParams {
                    config: cfg,
                    ..SpringParams::default()
                }
            )
            .is_err()
        );
    }
    let bad_duration = SpringParams {
        duration_in_frames: Some(0.0),
        ..SpringParams::default()
    };
    assert!(spring(3.0, fps30(), bad_duration).is_err());
}

#[test]
fn sampling_is_pure() {
    let a = unit(17.0, SpringConfig::snappy());
    let b = unit(17.0, SpringConfig::snappy());
    assert_eq!(a.to_bits(), b.to_bits());
}
