use crate::{
    animation::motion::SampleCtx,
    composition::model::{Composition, SceneDef},
    effects::shell::wrap_scene,
    effects::transitions::{PresentationStyle, parse_transition, present},
    eval::blocks::{BlockEnv, layout_blocks},
    eval::node::Node,
    foundation::core::{FrameClock, FrameIndex, FrameRange, Rect, VideoConfig},
    foundation::error::{ReelError, ReelResult},
    timeline::timing::SceneTiming,
};

/// Renderable tree for one global frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedFrame {
    /// Frame clock the tree was evaluated at.
    pub clock: FrameClock,
    /// Scene layers in painter's order.
    pub layers: Vec<SceneLayer>,
}

/// Part a scene plays in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    /// Only scene on screen.
    Solo,
    /// Leaving scene of a transition, painted first.
    Exiting,
    /// Arriving scene of a transition, painted second.
    Entering,
}

/// One visible scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneLayer {
    /// Scene id.
    pub scene_id: String,
    /// Scene position in the composition.
    pub scene_index: usize,
    /// Scene-local frame.
    pub local_frame: FrameIndex,
    /// Role in the current frame.
    pub role: LayerRole,
    /// Transition progress when the layer is part of a transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Layer-level presentation applied by the host.
    pub presentation: PresentationStyle,
    /// Scene content.
    pub root: Node,
}

/// Pure composition evaluator.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate the visible scene layers at `frame`.
    #[tracing::instrument(skip(comp))]
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> ReelResult<EvaluatedFrame> {
        comp.validate()?;
        let timing = comp.timing()?;
        eval_with_timing(comp, &timing, frame)
    }

    /// Evaluate every frame of `range`; validation runs once.
    #[tracing::instrument(skip(comp))]
    pub fn eval_range(comp: &Composition, range: FrameRange) -> ReelResult<Vec<EvaluatedFrame>> {
        comp.validate()?;
        let timing = comp.timing()?;
        (range.start.0..range.end.0)
            .map(|f| eval_with_timing(comp, &timing, FrameIndex(f)))
            .collect()
    }
}

fn eval_with_timing(
    comp: &Composition,
    timing: &SceneTiming,
    frame: FrameIndex,
) -> ReelResult<EvaluatedFrame> {
    let total = timing.total_frames();
    if frame.0 >= total {
        return Err(ReelError::evaluation(format!(
            "frame {} is out of bounds (duration {total})",
            frame.0
        )));
    }
    let clock = FrameClock {
        frame,
        config: VideoConfig {
            fps: comp.fps,
            canvas: comp.canvas,
            duration_in_frames: total,
        },
    };

    let layers = match timing.transition_at(frame) {
        Some(window) => {
            let spec = &comp.transitions[window.boundary];
            let kind = parse_transition(spec)?;
            let progress = spec.timing.progress(window, comp.fps)?;
            let (exiting, entering) = present(kind, progress, comp.canvas);
            tracing::trace!(boundary = window.boundary, progress, "transition frame");
            vec![
                eval_layer(
                    comp,
                    timing,
                    window.boundary,
                    frame,
                    LayerRole::Exiting,
                    Some(progress),
                    exiting,
                )?,
                eval_layer(
                    comp,
                    timing,
                    window.boundary + 1,
                    frame,
                    LayerRole::Entering,
                    Some(progress),
                    entering,
                )?,
            ]
        }
        None => {
            let active = timing.active_at(frame);
            let &[index] = active.as_slice() else {
                return Err(ReelError::evaluation(format!(
                    "expected one active scene at frame {}, found {}",
                    frame.0,
                    active.len()
                )));
            };
            vec![eval_layer(
                comp,
                timing,
                index,
                frame,
                LayerRole::Solo,
                None,
                PresentationStyle::default(),
            )?]
        }
    };

    Ok(EvaluatedFrame { clock, layers })
}

fn eval_layer(
    comp: &Composition,
    timing: &SceneTiming,
    index: usize,
    frame: FrameIndex,
    role: LayerRole,
    progress: Option<f64>,
    presentation: PresentationStyle,
) -> ReelResult<SceneLayer> {
    let scene = &comp.scenes[index];
    let local = timing
        .local_frame(index, frame)
        .ok_or_else(|| ReelError::evaluation(format!("scene index {index} out of range")))?;
    let ctx = SampleCtx {
        frame,
        fps: comp.fps,
        local,
    };
    let root = eval_scene(comp, scene, ctx)
        .map_err(|e| e.context(format!("scene '{}' at local frame {}", scene.id, local.0)))?;
    Ok(SceneLayer {
        scene_id: scene.id.clone(),
        scene_index: index,
        local_frame: local,
        role,
        progress,
        presentation,
        root,
    })
}

fn eval_scene(comp: &Composition, scene: &SceneDef, ctx: SampleCtx) -> ReelResult<Node> {
    let size = comp.canvas.size();
    let pad = comp.theme.padding;
    let content_box = Rect::new(pad.left, pad.top, size.x - pad.right, size.y - pad.bottom);
    let env = BlockEnv {
        comp,
        scene_frames: scene.duration_frames,
        ctx,
    };
    let content = layout_blocks(env, &scene.blocks, content_box, &scene.id)?;
    wrap_scene(scene, &comp.theme, comp.canvas, ctx, content)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
