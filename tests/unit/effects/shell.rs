use super::*;
use crate::foundation::core::{Fps, FrameIndex};

fn ctx(local: u64) -> SampleCtx {
    SampleCtx {
        frame: FrameIndex(local),
        fps: Fps::new(30, 1).unwrap(),
        local: FrameIndex(local),
    }
}

fn scene(shell: ShellStyle) -> SceneDef {
    SceneDef {
        id: "intro".to_string(),
        duration_frames: 120,
        shell,
        blocks: vec![],
    }
}

fn canvas() -> Canvas {
    Canvas {
        width: 1920,
        height: 1080,
    }
}

#[test]
fn entrance_fades_and_settles() {
    let m = ShellMotions::new(&ShellStyle::default(), 120);
    assert_eq!(m.opacity.sample(ctx(0)).unwrap(), 0.0);
    assert_eq!(m.opacity.sample(ctx(10)).unwrap(), 0.5);
    assert_eq!(m.opacity.sample(ctx(20)).unwrap(), 1.0);
    assert_eq!(m.opacity.sample(ctx(119)).unwrap(), 1.0);

    assert_eq!(m.offset_y.sample(ctx(0)).unwrap(), 40.0);
    assert!(m.offset_y.sample(ctx(119)).unwrap().abs() < 0.5);
    assert_eq!(m.scale.sample(ctx(0)).unwrap(), 0.96);
    assert!((m.scale.sample(ctx(119)).unwrap() - 1.0).abs() < 1e-3);
}

#[test]
fn exit_fades_out_at_scene_end() {
    let shell = ShellStyle {
        exit_frames: 10,
        ..ShellStyle::default()
    };
    let m = ShellMotions::new(&shell, 120);
    assert_eq!(m.opacity.sample(ctx(110)).unwrap(), 1.0);
    assert_eq!(m.opacity.sample(ctx(115)).unwrap(), 0.5);
    assert_eq!(m.opacity.sample(ctx(120)).unwrap(), 0.0);
}

#[test]
fn zero_entrance_is_visible_immediately() {
    let shell = ShellStyle {
        entrance_frames: 0,
        ..ShellStyle::default()
    };
    let m = ShellMotions::new(&shell, 60);
    assert_eq!(m.opacity.sample(ctx(0)).unwrap(), 1.0);
}

#[test]
fn wrapped_scene_has_background_glow_and_content() {
    let theme = Theme::default();
    let node = wrap_scene(
        &scene(ShellStyle::default()),
        &theme,
        canvas(),
        ctx(0),
        vec![],
    )
    .unwrap();
    let ids: Vec<&str> = node.children().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["intro/background", "intro/glow", "intro/content"]);

    let glow = node.find("intro/glow").unwrap();
    assert_eq!(glow.transform.translate, Vec2::new(960.0, 486.0));
    assert!((glow.opacity - 0.35).abs() < 1e-12);

    let content = node.find("intro/content").unwrap();
    assert_eq!(content.opacity, 0.0);
    assert_eq!(content.transform.anchor, Vec2::new(960.0, 540.0));
}

#[test]
fn glow_can_be_disabled() {
    let shell = ShellStyle {
        glow: None,
        ..ShellStyle::default()
    };
    let node = wrap_scene(&scene(shell), &Theme::default(), canvas(), ctx(30), vec![]).unwrap();
    assert_eq!(node.children().len(), 2);
}

#[test]
fn glow_pulses_over_time() {
    let (opacity, drift) = glow_motions(&GlowStyle::default());
    // A quarter period of a 0.25 Hz sine at 30 fps is 30 frames.
    assert!((opacity.sample(ctx(30)).unwrap() - 0.45).abs() < 1e-9);
    assert!((drift.sample(ctx(30)).unwrap() - 60.0).abs() < 1e-9);
}
