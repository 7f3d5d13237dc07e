//! Shared scene chrome: background, pulsing glow and the entrance/exit envelope around content.

use crate::{
    animation::ease::Ease,
    animation::motion::{Motion, SampleCtx},
    animation::ops::product,
    animation::spring::SpringConfig,
    composition::model::{GlowStyle, SceneDef, ShellStyle, Theme},
    eval::node::{Node, NodeKind},
    foundation::core::{Canvas, Transform2D, Vec2},
    foundation::error::ReelResult,
};

/// Motions driving a scene's content envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellMotions {
    /// Entrance fade multiplied by the exit fade.
    pub opacity: Motion,
    /// Vertical content offset in pixels.
    pub offset_y: Motion,
    /// Uniform content scale about the canvas center.
    pub scale: Motion,
}

impl ShellMotions {
    /// Build the envelope for a scene of `duration_frames`.
    pub fn new(shell: &ShellStyle, duration_frames: u64) -> Self {
        let enter = if shell.entrance_frames == 0 {
            Motion::constant(1.0)
        } else {
            Motion::tween(0, shell.entrance_frames, 0.0, 1.0, Ease::Linear)
        };
        let opacity = if shell.exit_frames == 0 {
            enter
        } else {
            let start = duration_frames.saturating_sub(shell.exit_frames);
            product(
                enter,
                Motion::tween(start, duration_frames, 1.0, 0.0, Ease::Linear),
            )
        };
        Self {
            opacity,
            offset_y: Motion::spring(shell.entrance_offset_px, 0.0, SpringConfig::smooth(), 0),
            scale: Motion::spring(shell.start_scale, 1.0, SpringConfig::smooth(), 0),
        }
    }
}

/// Opacity and horizontal drift of the glow, sharing one sine.
pub(crate) fn glow_motions(glow: &GlowStyle) -> (Motion, Motion) {
    let opacity = Motion::Pulse {
        amp: glow.pulse_amp,
        freq_hz: glow.pulse_hz,
        phase: 0.0,
        offset: glow.base_opacity,
    };
    let drift = Motion::Pulse {
        amp: glow.drift_px,
        freq_hz: glow.pulse_hz,
        phase: 0.0,
        offset: 0.0,
    };
    (opacity, drift)
}

/// Wrap evaluated `content` in the scene's background, glow and envelope.
pub(crate) fn wrap_scene(
    scene: &SceneDef,
    theme: &Theme,
    canvas: Canvas,
    ctx: SampleCtx,
    content: Vec<Node>,
) -> ReelResult<Node> {
    let size = canvas.size();
    let id = |part: &str| format!("{}/{part}", scene.id);
    let mut children = vec![Node::rect(id("background"), size, 0.0, theme.background)];

    if let Some(glow) = &scene.shell.glow {
        let (opacity, drift) = glow_motions(glow);
        let color = glow.color.unwrap_or(theme.accent);
        let center = Vec2::new(glow.center.x * size.x, glow.center.y * size.y);
        let node = Node::new(
            id("glow"),
            NodeKind::Glow {
                radius: glow.radius_px,
                color,
            },
        )
        .at(center.x + drift.sample(ctx)?, center.y)
        .with_opacity(opacity.sample(ctx)?);
        children.push(node);
    }

    let motions = ShellMotions::new(&scene.shell, scene.duration_frames);
    let offset_y = motions.offset_y.sample(ctx)?;
    let scale = motions.scale.sample(ctx)?;
    let content = Node::group(id("content"), content)
        .with_transform(
            Transform2D::translate(0.0, offset_y).with_uniform_scale(scale, size * 0.5),
        )
        .with_opacity(motions.opacity.sample(ctx)?);
    children.push(content);

    Ok(Node::group(scene.id.clone(), children))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shell.rs"]
mod tests;
