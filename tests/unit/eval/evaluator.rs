use super::*;
use crate::composition::promo::{TRANSITION_FRAMES, promo};
use crate::eval::node::NodeKind;

#[test]
fn single_layer_outside_transitions() {
    let comp = promo().unwrap();
    let f = Evaluator::eval_frame(&comp, FrameIndex(60)).unwrap();
    assert_eq!(f.layers.len(), 1);
    let layer = &f.layers[0];
    assert_eq!(layer.scene_id, "intro");
    assert_eq!(layer.role, LayerRole::Solo);
    assert_eq!(layer.local_frame, FrameIndex(60));
    assert_eq!(layer.presentation, PresentationStyle::default());
    assert_eq!(f.clock.config.duration_in_frames, 950);
}

#[test]
fn two_layers_inside_a_transition_exiting_first() {
    let comp = promo().unwrap();
    let first_overlap = 150 - TRANSITION_FRAMES;
    let f = Evaluator::eval_frame(&comp, FrameIndex(first_overlap)).unwrap();
    assert_eq!(f.layers.len(), 2);
    assert_eq!(f.layers[0].role, LayerRole::Exiting);
    assert_eq!(f.layers[0].scene_id, "intro");
    assert_eq!(f.layers[1].role, LayerRole::Entering);
    assert_eq!(f.layers[1].scene_id, "ui");
    assert_eq!(f.layers[1].local_frame, FrameIndex(0));
    assert_eq!(f.layers[0].progress, Some(0.0));

    let last = Evaluator::eval_frame(&comp, FrameIndex(149)).unwrap();
    assert_eq!(last.layers[1].progress, Some(1.0));
    assert_eq!(last.layers[1].presentation.translate.x, 0.0);
}

#[test]
fn out_of_range_frame_is_an_evaluation_error() {
    let comp = promo().unwrap();
    let err = Evaluator::eval_frame(&comp, FrameIndex(950)).unwrap_err();
    assert!(matches!(err, ReelError::Evaluation(_)));
    assert!(Evaluator::eval_frame(&comp, FrameIndex(949)).is_ok());
}

#[test]
fn scene_tree_contains_blocks_with_assets() {
    let comp = promo().unwrap();
    let f = Evaluator::eval_frame(&comp, FrameIndex(250)).unwrap();
    let root = &f.layers[0].root;
    let image = root.find("ui/block1/content").unwrap();
    match &image.kind {
        NodeKind::Image { asset, source, .. } => {
            assert_eq!(asset, "ui_screenshot");
            assert_eq!(source, "screens/dashboard.png");
        }
        other => panic!("unexpected node {other:?}"),
    }
    assert!(root.find("ui/block1/dot2").is_some());
}

#[test]
fn eval_range_matches_single_frames() {
    let comp = promo().unwrap();
    let range = FrameRange::new(FrameIndex(125), FrameIndex(135)).unwrap();
    let frames = Evaluator::eval_range(&comp, range).unwrap();
    assert_eq!(frames.len(), 10);
    for f in &frames {
        assert_eq!(f, &Evaluator::eval_frame(&comp, f.clock.frame).unwrap());
    }
}

#[test]
fn invalid_composition_is_rejected_before_evaluation() {
    let mut comp = promo().unwrap();
    comp.transitions.pop();
    assert!(Evaluator::eval_frame(&comp, FrameIndex(0)).is_err());
}
