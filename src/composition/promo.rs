//! Built-in promotional video for the Strategic Intelligence Manager workflow.
//!
//! Six scenes joined by five transitions: intro, dashboard, workflow diagram, one showcase per
//! phase, and a finale with the entry point.

use crate::{
    animation::spring::SpringConfig,
    audio::manifest::AudioTrack,
    composition::dsl::{CompositionBuilder, SceneBuilder},
    composition::model::{Block, Composition, FlowStep, SceneDef, TransitionSpec},
    effects::transitions::TransitionTiming,
    foundation::core::{Canvas, Fps},
    foundation::error::ReelResult,
};

/// Frame rate of the promo.
pub const PROMO_FPS: u32 = 30;
/// Canvas width in pixels.
pub const PROMO_WIDTH: u32 = 1920;
/// Canvas height in pixels.
pub const PROMO_HEIGHT: u32 = 1080;

/// Intro scene length.
pub const INTRO_FRAMES: u64 = 150;
/// Dashboard scene length.
pub const UI_FRAMES: u64 = 180;
/// Workflow diagram scene length.
pub const WORKFLOW_FRAMES: u64 = 210;
/// Competitive analysis showcase length.
pub const SHOWCASE_COMPETITIVE_FRAMES: u64 = 180;
/// Creative strategy showcase length.
pub const SHOWCASE_CREATIVE_FRAMES: u64 = 180;
/// Finale scene length.
pub const FINALE_FRAMES: u64 = 150;
/// Overlap of every scene boundary.
pub const TRANSITION_FRAMES: u64 = 20;

/// Scene lengths in timeline order.
pub const SCENE_FRAMES: [u64; 6] = [
    INTRO_FRAMES,
    UI_FRAMES,
    WORKFLOW_FRAMES,
    SHOWCASE_COMPETITIVE_FRAMES,
    SHOWCASE_CREATIVE_FRAMES,
    FINALE_FRAMES,
];

/// Build and validate the promo composition.
pub fn promo() -> ReelResult<Composition> {
    let fps = Fps::new(PROMO_FPS, 1)?;
    let canvas = Canvas {
        width: PROMO_WIDTH,
        height: PROMO_HEIGHT,
    };

    CompositionBuilder::new(fps, canvas)
        .image_asset("ui_screenshot", "screens/dashboard.png")?
        .image_asset("report_competitive", "screens/report_competitive.png")?
        .image_asset("report_creative", "screens/report_creative.png")?
        .audio_asset("narration", "audio/narration.mp3")?
        .scene(intro())
        .transition(
            TransitionSpec::new("slide", TRANSITION_FRAMES)
                .with_params(serde_json::json!({ "direction": "from_right" })),
        )
        .scene(dashboard())
        .transition(TransitionSpec::new("fade", TRANSITION_FRAMES))
        .scene(workflow())
        .transition(
            TransitionSpec::new("wipe", TRANSITION_FRAMES)
                .with_params(serde_json::json!({ "direction": "from_left" })),
        )
        .scene(showcase_competitive())
        .transition(
            TransitionSpec::new("flip", TRANSITION_FRAMES)
                .with_params(serde_json::json!({ "direction": "from_right" }))
                .with_timing(TransitionTiming::Spring {
                    config: SpringConfig::smooth(),
                }),
        )
        .scene(showcase_creative())
        .transition(TransitionSpec::new("clock_wipe", TRANSITION_FRAMES))
        .scene(finale())
        .audio(AudioTrack {
            volume: 0.9,
            fade_in_frames: 10,
            fade_out_frames: 30,
            ..AudioTrack::new("narration")
        })
        .build()
}

fn chips(tags: &[&str], size_px: f64) -> Block {
    Block::tag_chips(tags.iter().copied()).sized(size_px)
}

fn intro() -> SceneDef {
    SceneBuilder::new("intro", INTRO_FRAMES)
        .block(Block::title("Strategic Intelligence"))
        .block(
            Block::subtitle("From competitive signals to creative strategy, with you in the loop")
                .delayed(18),
        )
        .block(chips(&["LangGraph", "Streamlit", "MCP tools", "LangSmith"], 28.0).delayed(36))
        .build()
}

fn dashboard() -> SceneDef {
    SceneBuilder::new("ui", UI_FRAMES)
        .block(Block::title("One dashboard, two phases").sized(56.0))
        .block(Block::browser_window("localhost:8501", "ui_screenshot", 1120.0, 600.0).delayed(10))
        .build()
}

fn workflow() -> SceneDef {
    SceneBuilder::new("workflow", WORKFLOW_FRAMES)
        .block(Block::title("How it works").sized(64.0))
        .block(
            Block::flow_diagram(vec![
                FlowStep::new("Competitive Analyzer", Some("Phase 1, five workers")),
                FlowStep::new("Human Checkpoint", Some("Review and confirm")),
                FlowStep::new("Audience Strategy", Some("Phase 2, three workers")),
            ])
            .delayed(20),
        )
        .block(Block::subtitle("Results pause for your approval before Phase 2 runs").delayed(84))
        .build()
}

fn showcase_competitive() -> SceneDef {
    SceneBuilder::new("showcase_competitive", SHOWCASE_COMPETITIVE_FRAMES)
        .block(Block::two_column(
            vec![
                Block::title("Competitive Analysis").sized(60.0),
                Block::subtitle("Category entry points ranked against rivals")
                    .sized(30.0)
                    .delayed(12),
                chips(&["Data merger", "CEP prioritizer", "Insight analyzer", "Visualizer"], 22.0)
                    .delayed(24),
            ],
            vec![Block::app_screenshot("report_competitive", 760.0, 480.0).delayed(8)],
        ))
        .build()
}

fn showcase_creative() -> SceneDef {
    SceneBuilder::new("showcase_creative", SHOWCASE_CREATIVE_FRAMES)
        .block(Block::two_column(
            vec![Block::app_screenshot("report_creative", 760.0, 480.0).delayed(8)],
            vec![
                Block::title("Audience to Creative").sized(60.0),
                Block::subtitle("Audience CEPs become a strategic creative table")
                    .sized(30.0)
                    .delayed(12),
                chips(&["Audience analyzer", "Data extractor", "Slide builder"], 22.0).delayed(24),
            ],
        ))
        .build()
}

fn finale() -> SceneDef {
    SceneBuilder::new("finale", FINALE_FRAMES)
        .exit_frames(30)
        .block(Block::title("python main.py").sized(96.0))
        .block(Block::subtitle("Phase 1 runs, you confirm, Phase 2 delivers").delayed(16))
        .block(chips(&["PDF report", "PowerPoint deck", "PNG charts"], 26.0).delayed(32))
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/promo.rs"]
mod tests;
