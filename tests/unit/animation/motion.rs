use super::*;

fn ctx(local: u64) -> SampleCtx {
    SampleCtx {
        frame: FrameIndex(100 + local),
        fps: Fps::new(30, 1).unwrap(),
        local: FrameIndex(local),
    }
}

#[test]
fn tween_samples_local_frames_and_clamps() {
    let m = Motion::tween(0, 20, 0.0, 1.0, Ease::Linear);
    assert_eq!(m.sample(ctx(0)).unwrap(), 0.0);
    assert_eq!(m.sample(ctx(10)).unwrap(), 0.5);
    assert_eq!(m.sample(ctx(400)).unwrap(), 1.0);
}

#[test]
fn zero_length_tween_is_widened_to_one_frame() {
    let m = Motion::tween(5, 5, 0.0, 1.0, Ease::Linear);
    assert!(m.validate().is_ok());
    assert_eq!(m.sample(ctx(6)).unwrap(), 1.0);
}

#[test]
fn delay_remaps_local_and_global_frames() {
    let c = ctx(10).with_local(FrameIndex(4));
    assert_eq!(c.frame, FrameIndex(104));
    assert_eq!(c.local, FrameIndex(4));

    let m = Motion::Delay {
        inner: Box::new(Motion::tween(0, 10, 0.0, 10.0, Ease::Linear)),
        by: 5,
    };
    assert_eq!(m.sample(ctx(3)).unwrap(), 0.0);
    assert_eq!(m.sample(ctx(10)).unwrap(), 5.0);
}

#[test]
fn product_and_mix_combine() {
    let p = Motion::Product {
        a: Box::new(Motion::constant(0.5)),
        b: Box::new(Motion::constant(0.5)),
    };
    assert_eq!(p.sample(ctx(0)).unwrap(), 0.25);

    let m = Motion::Mix {
        a: Box::new(Motion::constant(0.0)),
        b: Box::new(Motion::constant(10.0)),
        t: Box::new(Motion::constant(3.0)),
    };
    assert_eq!(m.sample(ctx(0)).unwrap(), 10.0);
}

#[test]
fn pulse_follows_sine() {
    let m = Motion::Pulse {
        amp: 0.2,
        freq_hz: 0.25,
        phase: 0.0,
        offset: 0.5,
    };
    assert!((m.sample(ctx(0)).unwrap() - 0.5).abs() < 1e-12);
    // A quarter period at 0.25 Hz is one second, i.e. 30 frames.
    assert!((m.sample(ctx(30)).unwrap() - 0.7).abs() < 1e-9);
}

#[test]
fn spring_motion_uses_local_clock() {
    let m = Motion::spring(40.0, 0.0, SpringConfig::smooth(), 0);
    assert_eq!(m.sample(ctx(0)).unwrap(), 40.0);
    assert!(m.sample(ctx(90)).unwrap().abs() < 0.5);
}

#[test]
fn validation_catches_bad_leaves() {
    assert!(Motion::constant(f64::INFINITY).validate().is_err());
    let bad = Motion::Tween {
        input: vec![0.0, 10.0, 5.0],
        output: vec![0.0, 1.0, 0.0],
        opts: InterpolateOpts::default(),
    };
    assert!(bad.validate().is_err());
    let nested = Motion::Delay {
        inner: Box::new(Motion::spring(
            0.0,
            1.0,
            SpringConfig {
                damping: -1.0,
                ..SpringConfig::default()
            },
            0,
        )),
        by: 3,
    };
    assert!(nested.validate().is_err());
}

#[test]
fn motion_json_is_tagged() {
    let m: Motion = serde_json::from_value(serde_json::json!({
        "kind": "spring",
        "from": 0.0,
        "to": 1.0,
        "config": { "damping": 200.0 }
    }))
    .unwrap();
    assert_eq!(
        m,
        Motion::Spring {
            config: SpringConfig::smooth(),
            from: 0.0,
            to: 1.0,
            delay: 0,
            duration_frames: None,
        }
    );
}
