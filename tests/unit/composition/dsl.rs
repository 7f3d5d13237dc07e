use super::*;
use crate::foundation::core::Canvas;

fn builder() -> CompositionBuilder {
    CompositionBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 1280,
            height: 720,
        },
    )
}

#[test]
fn builder_produces_valid_composition() {
    let comp = builder()
        .image_asset("shot", "img/shot.png")
        .unwrap()
        .scene(
            SceneBuilder::new("one", 90)
                .block(Block::title("Hello"))
                .block(Block::app_screenshot("shot", 800.0, 450.0))
                .build(),
        )
        .scene(SceneBuilder::new("two", 60).exit_frames(12).build())
        .transition(TransitionSpec::new("fade", 15))
        .build()
        .unwrap();
    assert_eq!(comp.duration_frames().unwrap(), 135);
    assert_eq!(comp.scenes[1].shell.exit_frames, 12);
}

#[test]
fn duplicate_asset_keys_are_rejected() {
    let err = builder()
        .image_asset("a", "a.png")
        .unwrap()
        .audio_asset("a", "a.mp3")
        .err()
        .unwrap();
    assert!(err.to_string().contains("duplicate asset key 'a'"));
}

#[test]
fn build_runs_validation() {
    let err = builder()
        .scene(SceneBuilder::new("one", 30).build())
        .scene(SceneBuilder::new("two", 30).build())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("expected 1 transitions"));
}
