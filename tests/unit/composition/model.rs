use super::*;
use crate::composition::dsl::{CompositionBuilder, SceneBuilder};

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn canvas() -> Canvas {
    Canvas {
        width: 1920,
        height: 1080,
    }
}

fn two_scenes() -> Composition {
    CompositionBuilder::new(fps(), canvas())
        .image_asset("ui", "assets/ui.png")
        .unwrap()
        .scene(
            SceneBuilder::new("intro", 90)
                .block(Block::title("Strategic Intelligence Manager"))
                .block(Block::subtitle("Competitive analysis to creative strategy"))
                .build(),
        )
        .scene(
            SceneBuilder::new("ui", 120)
                .block(Block::browser_window("localhost:8501", "ui", 1280.0, 720.0))
                .build(),
        )
        .transition(TransitionSpec::new("slide", 20))
        .build()
        .unwrap()
}

#[test]
fn json_round_trip_is_lossless() {
    let comp = two_scenes();
    let json = comp.to_json_pretty().unwrap();
    let back = Composition::from_json_str(&json).unwrap();
    assert_eq!(back, comp);
}

#[test]
fn defaults_fill_in_omitted_fields() {
    let comp = Composition::from_json_str(
        r#"{
            "fps": { "num": 30, "den": 1 },
            "canvas": { "width": 640, "height": 360 },
            "scenes": [
                { "id": "only", "duration_frames": 30,
                  "blocks": [ { "type": "tag_chips", "tags": ["a", "b"] } ] }
            ]
        }"#,
    )
    .unwrap();
    comp.validate().unwrap();
    assert_eq!(comp.theme, Theme::default());
    assert_eq!(comp.scenes[0].shell, ShellStyle::default());
    match &comp.scenes[0].blocks[0] {
        Block::TagChips(b) => {
            assert_eq!(b.size_px, 28.0);
            assert_eq!(b.stagger_frames, 6);
            assert_eq!(b.enter, Entrance::pop());
        }
        other => panic!("unexpected block {other:?}"),
    }
}

#[test]
fn timing_is_derived_from_scenes_and_transitions() {
    let comp = two_scenes();
    assert_eq!(comp.duration_frames().unwrap(), 190);
    let cfg = comp.video_config().unwrap();
    assert_eq!(cfg.duration_in_frames, 190);
    assert_eq!(cfg.canvas, canvas());
    assert_eq!(comp.scene("ui").map(|(i, _)| i), Some(1));
}

#[test]
fn validation_names_offending_scene_and_block() {
    let mut comp = two_scenes();
    comp.scenes[0].blocks.push(Block::Title(TextBlock {
        size_px: Some(f64::NAN),
        ..TextBlock::new("x")
    }));
    let msg = comp.validate().unwrap_err().to_string();
    assert!(msg.contains("scene 'intro' block 2 (title)"), "{msg}");
    assert!(msg.contains("size_px"), "{msg}");
}

#[test]
fn validation_rejects_missing_and_mistyped_assets() {
    let mut comp = two_scenes();
    comp.scenes[1].blocks = vec![Block::app_screenshot("nope", 10.0, 10.0)];
    let msg = comp.validate().unwrap_err().to_string();
    assert!(msg.contains("missing asset key 'nope'"), "{msg}");

    let mut comp = two_scenes();
    comp.assets.insert("ui".to_string(), AssetRef::audio("ui.mp3"));
    let msg = comp.validate().unwrap_err().to_string();
    assert!(msg.contains("expects a Image asset"), "{msg}");
}

#[test]
fn validation_rejects_bad_structure() {
    let mut comp = two_scenes();
    comp.scenes[1].id = "intro".to_string();
    assert!(comp.validate().unwrap_err().to_string().contains("duplicate scene id"));

    let mut comp = two_scenes();
    comp.transitions.clear();
    assert!(comp.validate().is_err());

    let mut comp = two_scenes();
    comp.transitions[0].duration_frames = 90;
    assert!(comp.validate().is_err());

    let mut comp = two_scenes();
    comp.transitions[0].kind = "spin".to_string();
    let msg = comp.validate().unwrap_err().to_string();
    assert!(msg.contains("transition 0 ('intro' -> 'ui')"), "{msg}");

    let mut comp = two_scenes();
    comp.assets.insert("abs".to_string(), AssetRef::image("/tmp/a.png"));
    assert!(comp.validate().unwrap_err().to_string().contains("asset 'abs'"));

    let mut comp = two_scenes();
    comp.fps.num = 0;
    assert!(comp.validate().is_err());
}

#[test]
fn entrance_presets_start_hidden_and_finish_in_place() {
    use crate::animation::motion::SampleCtx;
    use crate::foundation::core::FrameIndex;
    let ctx = |f: u64| SampleCtx {
        frame: FrameIndex(f),
        fps: fps(),
        local: FrameIndex(f),
    };
    for style in [
        EntranceStyle::Spring,
        EntranceStyle::Fade,
        EntranceStyle::Pop,
        EntranceStyle::Zoom,
    ] {
        let m = Entrance::new(style).with_delay(10).motions();
        assert_eq!(m.opacity.sample(ctx(10)).unwrap(), 0.0, "{style:?}");
        assert_eq!(m.opacity.sample(ctx(200)).unwrap(), 1.0, "{style:?}");
        assert!(m.offset_y.sample(ctx(200)).unwrap().abs() < 0.5, "{style:?}");
        assert!((m.scale.sample(ctx(200)).unwrap() - 1.0).abs() < 0.01, "{style:?}");
    }
    let none = Entrance::new(EntranceStyle::None).motions();
    assert_eq!(none.opacity.sample(ctx(0)).unwrap(), 1.0);
}

#[test]
fn delayed_sets_block_entrance_delay() {
    match Block::title("t").delayed(12) {
        Block::Title(b) => assert_eq!(b.enter, Some(Entrance::spring().with_delay(12))),
        other => panic!("unexpected block {other:?}"),
    }
    match Block::two_column(vec![], vec![]).delayed(5) {
        Block::TwoColumn(b) => assert_eq!(b.delay, 5),
        other => panic!("unexpected block {other:?}"),
    }
}

#[test]
fn padding_must_leave_a_content_area() {
    let mut comp = two_scenes();
    comp.theme.padding.left = 1000.0;
    comp.theme.padding.right = 920.0;
    let err = comp.validate().unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("padding"));

    let mut comp = two_scenes();
    comp.theme.padding.top = 540.0;
    comp.theme.padding.bottom = 600.0;
    assert!(comp.validate().is_err());

    let mut comp = two_scenes();
    comp.theme.padding.left = 900.0;
    comp.theme.padding.right = 900.0;
    comp.validate().unwrap();
}

#[test]
fn overflowing_scene_durations_are_rejected() {
    let mut comp = two_scenes();
    comp.scenes[0].duration_frames = 18_446_744_073_709_551_000;
    comp.scenes[1].duration_frames = 18_446_744_073_709_551_000;
    let json = comp.to_json_pretty().unwrap();
    let back = Composition::from_json_str(&json).unwrap();
    let err = back.validate().unwrap_err();
    assert!(err.to_string().contains("overflows"), "{err}");
}
