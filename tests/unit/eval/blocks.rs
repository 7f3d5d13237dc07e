use super::*;
use crate::composition::model::FlowStep;
use crate::composition::promo::promo;
use crate::foundation::core::{Fps, FrameIndex};

fn env(comp: &Composition, local: u64) -> BlockEnv<'_> {
    BlockEnv {
        comp,
        scene_frames: 180,
        ctx: SampleCtx {
            frame: FrameIndex(local),
            fps: Fps::new(30, 1).unwrap(),
            local: FrameIndex(local),
        },
    }
}

fn bounds() -> Rect {
    Rect::new(160.0, 120.0, 1760.0, 960.0)
}

#[test]
fn text_sizes_follow_character_estimate() {
    let theme = Theme::default();
    let size = intrinsic_size(&Block::title("abcd"), &theme, 1600.0);
    assert!((size.x - 4.0 * 88.0 * 0.56).abs() < 1e-9);
    assert!((size.y - 110.0).abs() < 1e-9);

    let wrapped = intrinsic_size(&Block::subtitle("x".repeat(100)), &theme, 1000.0);
    assert_eq!(wrapped.x, 1000.0);
    assert!((wrapped.y - 3.0 * 50.0).abs() < 1e-9);
}

#[test]
fn declared_sizes_are_used_for_images() {
    let theme = Theme::default();
    assert_eq!(
        intrinsic_size(&Block::app_screenshot("a", 300.0, 200.0), &theme, 1600.0),
        Vec2::new(300.0, 200.0)
    );
    let flow = Block::flow_diagram(vec![FlowStep::new("a", None), FlowStep::new("b", None)]);
    assert_eq!(intrinsic_size(&flow, &theme, 1600.0), Vec2::new(896.0, 200.0));
}

#[test]
fn blocks_are_stacked_and_centered() {
    let comp = promo().unwrap();
    let blocks = [Block::title("ab"), Block::title("ab")];
    let nodes = layout_blocks(env(&comp, 100), &blocks, bounds(), "s").unwrap();
    assert_eq!(nodes.len(), 2);
    let w = 2.0 * 88.0 * 0.56;
    let total_h = 110.0 * 2.0 + comp.theme.block_gap_px;
    let top = 120.0 + (840.0 - total_h) * 0.5;
    let t0 = nodes[0].transform.translate;
    assert!((t0.x - (160.0 + (1600.0 - w) * 0.5)).abs() < 1e-9);
    assert!((t0.y - top).abs() < 0.5);
    assert_eq!(nodes[1].id, "s/block1");
}

#[test]
fn chips_pop_in_staggered() {
    let comp = promo().unwrap();
    let chips = Block::tag_chips(["one", "two", "three"]);
    let nodes = layout_blocks(env(&comp, 5), &[chips], bounds(), "s").unwrap();
    let row = &nodes[0];
    let opacities: Vec<f64> = row.children().iter().map(|c| c.opacity).collect();
    assert_eq!(opacities.len(), 3);
    assert!(opacities[0] > 0.0);
    assert_eq!(opacities[1], 0.0);
    assert_eq!(opacities[2], 0.0);
}

#[test]
fn flow_connectors_draw_after_cards() {
    let comp = promo().unwrap();
    let flow = Block::flow_diagram(vec![FlowStep::new("a", None), FlowStep::new("b", Some("c"))]);
    let width_at = |local| {
        let nodes = layout_blocks(env(&comp, local), std::slice::from_ref(&flow), bounds(), "s")
            .unwrap();
        match &nodes[0].find("s/block0/connector1").unwrap().kind {
            NodeKind::Rect { size, .. } => size.x,
            other => panic!("unexpected node {other:?}"),
        }
    };
    assert_eq!(width_at(0), 0.0);
    assert!(width_at(12) > 0.0);
    assert_eq!(width_at(18), 96.0);

    let nodes = layout_blocks(env(&comp, 60), &[flow], bounds(), "s").unwrap();
    assert!(nodes[0].find("s/block0/step1/caption").is_some());
    assert!(nodes[0].find("s/block0/step0/caption").is_none());
}

#[test]
fn two_column_slides_columns_in_from_opposite_sides() {
    let comp = promo().unwrap();
    let block = Block::two_column(vec![Block::title("L")], vec![Block::title("R")]);
    let nodes = layout_blocks(env(&comp, 0), std::slice::from_ref(&block), bounds(), "s").unwrap();
    let left = nodes[0].find("s/block0/left").unwrap();
    let right = nodes[0].find("s/block0/right").unwrap();
    assert_eq!(left.transform.translate.x, -60.0);
    assert_eq!(right.transform.translate.x, 768.0 + 64.0 + 60.0);
    assert_eq!(left.opacity, 0.0);

    let nodes = layout_blocks(env(&comp, 40), &[block], bounds(), "s").unwrap();
    let left = nodes[0].find("s/block0/left").unwrap();
    assert_eq!(left.transform.translate.x, 0.0);
    assert_eq!(left.opacity, 1.0);
    assert!(left.find("s/block0/left/block0/text").is_some());
}

#[test]
fn screenshot_zooms_over_the_scene() {
    let comp = promo().unwrap();
    let shot = Block::app_screenshot("report_creative", 400.0, 300.0);
    let scale_at = |local| {
        let nodes = layout_blocks(env(&comp, local), std::slice::from_ref(&shot), bounds(), "s")
            .unwrap();
        nodes[0].find("s/block0/zoom").unwrap().transform.scale.x
    };
    assert_eq!(scale_at(0), 1.0);
    assert!((scale_at(90) - 1.025).abs() < 1e-9);
    assert!((scale_at(180) - 1.05).abs() < 1e-9);
}

#[test]
fn missing_image_asset_is_an_evaluation_error() {
    let comp = promo().unwrap();
    let shot = Block::app_screenshot("nope", 400.0, 300.0);
    let err = layout_blocks(env(&comp, 0), &[shot], bounds(), "s").unwrap_err();
    assert!(matches!(err, ReelError::Evaluation(_)));
}
