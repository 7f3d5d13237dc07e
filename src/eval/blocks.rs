use crate::{
    animation::ease::Ease,
    animation::motion::{Motion, SampleCtx},
    composition::model::{
        AppScreenshotBlock, Block, BrowserWindowBlock, Composition, Entrance, FlowDiagramBlock,
        TagChipsBlock, TextBlock, Theme, TwoColumnBlock,
    },
    eval::node::{Node, NodeKind, Stroke, TextAlign},
    foundation::core::{Point, Rect, Rgba8, Transform2D, Vec2},
    foundation::error::{ReelError, ReelResult},
    foundation::math::{estimate_text_width, line_height},
    layout::stack::{Align, hstack, stack_extent, vstack},
};

const TITLE_SIZE_PX: f64 = 88.0;
const SUBTITLE_SIZE_PX: f64 = 40.0;

const SURFACE: Rgba8 = Rgba8::rgb(0x15, 0x1a, 0x2b);
const SURFACE_RAISED: Rgba8 = Rgba8::rgb(0x23, 0x28, 0x3a);
const SHADOW: Rgba8 = Rgba8::rgba(0, 0, 0, 115);
const TRAFFIC_LIGHTS: [Rgba8; 3] = [
    Rgba8::rgb(0xff, 0x5f, 0x57),
    Rgba8::rgb(0xfe, 0xbc, 0x2e),
    Rgba8::rgb(0x28, 0xc8, 0x40),
];

const TITLE_BAR_PX: f64 = 44.0;
const COLUMN_SLIDE_PX: f64 = 60.0;
const COLUMN_SLIDE_FRAMES: u64 = 20;

/// Inputs shared by every block in one scene evaluation.
#[derive(Clone, Copy)]
pub(crate) struct BlockEnv<'a> {
    pub(crate) comp: &'a Composition,
    pub(crate) scene_frames: u64,
    pub(crate) ctx: SampleCtx,
}

impl BlockEnv<'_> {
    fn theme(&self) -> &Theme {
        &self.comp.theme
    }

    fn sample(&self, m: &Motion) -> ReelResult<f64> {
        m.sample(self.ctx)
    }
}

/// Estimated outer size of `block` when given `avail_width` pixels.
pub(crate) fn intrinsic_size(block: &Block, theme: &Theme, avail_width: f64) -> Vec2 {
    match block {
        Block::Title(b) => text_size(&b.text, b.size_px.unwrap_or(TITLE_SIZE_PX), avail_width),
        Block::Subtitle(b) => {
            text_size(&b.text, b.size_px.unwrap_or(SUBTITLE_SIZE_PX), avail_width)
        }
        Block::TagChips(b) => {
            let sizes: Vec<Vec2> = b.tags.iter().map(|t| chip_size(t, b.size_px)).collect();
            stack_extent(&sizes, chip_gap(b.size_px), false)
        }
        Block::BrowserWindow(b) => Vec2::new(b.width, b.height),
        Block::AppScreenshot(b) => Vec2::new(b.width, b.height),
        Block::TwoColumn(b) => {
            let (left_w, right_w) = column_widths(b, avail_width);
            let column_h = |blocks: &[Block], w: f64| {
                let sizes: Vec<Vec2> = blocks.iter().map(|c| intrinsic_size(c, theme, w)).collect();
                stack_extent(&sizes, theme.block_gap_px, true).y
            };
            Vec2::new(
                avail_width,
                column_h(&b.left, left_w).max(column_h(&b.right, right_w)),
            )
        }
        Block::FlowDiagram(b) => {
            let n = b.steps.len() as f64;
            Vec2::new(
                n * b.card_width + (n - 1.0).max(0.0) * b.connector_px,
                b.card_height,
            )
        }
    }
}

/// Stack `blocks` vertically inside `bounds` and evaluate each one.
pub(crate) fn layout_blocks(
    env: BlockEnv<'_>,
    blocks: &[Block],
    bounds: Rect,
    id_prefix: &str,
) -> ReelResult<Vec<Node>> {
    let theme = env.theme();
    let sizes: Vec<Vec2> = blocks
        .iter()
        .map(|b| intrinsic_size(b, theme, bounds.width()))
        .collect();
    let origins = vstack(bounds, &sizes, theme.block_gap_px, Align::Center, Align::Center);
    blocks
        .iter()
        .zip(sizes.iter().zip(origins))
        .enumerate()
        .map(|(i, (block, (&size, origin)))| {
            eval_block(env, block, &format!("{id_prefix}/block{i}"), origin, size)
        })
        .collect()
}

fn eval_block(
    env: BlockEnv<'_>,
    block: &Block,
    id: &str,
    origin: Point,
    size: Vec2,
) -> ReelResult<Node> {
    let theme = env.theme();
    match block {
        Block::Title(b) => {
            let enter = b.enter.unwrap_or_else(Entrance::spring);
            let text = text_node(id, b, TITLE_SIZE_PX, 800, theme.foreground, theme, size.x);
            entered(env, Node::group(id, vec![text]), enter, origin, size)
        }
        Block::Subtitle(b) => {
            let enter = b.enter.unwrap_or_else(Entrance::fade);
            let text = text_node(id, b, SUBTITLE_SIZE_PX, 400, theme.muted, theme, size.x);
            entered(env, Node::group(id, vec![text]), enter, origin, size)
        }
        Block::TagChips(b) => tag_chips(env, b, id, origin, size),
        Block::BrowserWindow(b) => {
            let node = browser_window(env, b, id)?;
            entered(env, node, b.enter, origin, size)
        }
        Block::AppScreenshot(b) => {
            let node = app_screenshot(env, b, id)?;
            entered(env, node, b.enter, origin, size)
        }
        Block::TwoColumn(b) => two_column(env, b, id, origin, size),
        Block::FlowDiagram(b) => flow_diagram(env, b, id, origin),
    }
}

/// Position `node` at `origin` and apply the entrance around its center.
fn entered(
    env: BlockEnv<'_>,
    node: Node,
    enter: Entrance,
    origin: Point,
    size: Vec2,
) -> ReelResult<Node> {
    let m = enter.motions();
    let opacity = env.sample(&m.opacity)?;
    let offset_y = env.sample(&m.offset_y)?;
    let scale = env.sample(&m.scale)?;
    let transform =
        Transform2D::translate(origin.x, origin.y + offset_y).with_uniform_scale(scale, size * 0.5);
    Ok(node.with_transform(transform).with_opacity(opacity))
}

fn text_size(text: &str, size_px: f64, avail_width: f64) -> Vec2 {
    let width = estimate_text_width(text, size_px);
    let lines = if avail_width > 0.0 {
        (width / avail_width).ceil().max(1.0)
    } else {
        1.0
    };
    Vec2::new(width.min(avail_width.max(0.0)), lines * line_height(size_px))
}

fn text_node(
    id: &str,
    b: &TextBlock,
    default_size: f64,
    weight: u16,
    default_color: Rgba8,
    theme: &Theme,
    box_width: f64,
) -> Node {
    Node::new(
        format!("{id}/text"),
        NodeKind::Text {
            text: b.text.clone(),
            size_px: b.size_px.unwrap_or(default_size),
            weight,
            color: b.color.unwrap_or(default_color),
            font_family: theme.font_family.clone(),
            align: TextAlign::Center,
            box_width,
        },
    )
}

fn label(
    id: String,
    text: &str,
    size_px: f64,
    weight: u16,
    color: Rgba8,
    theme: &Theme,
    box_width: f64,
) -> Node {
    Node::new(
        id,
        NodeKind::Text {
            text: text.to_string(),
            size_px,
            weight,
            color,
            font_family: theme.font_family.clone(),
            align: TextAlign::Center,
            box_width,
        },
    )
}

fn chip_size(tag: &str, size_px: f64) -> Vec2 {
    Vec2::new(
        estimate_text_width(tag, size_px) + size_px * 1.8,
        line_height(size_px) + size_px,
    )
}

fn chip_gap(size_px: f64) -> f64 {
    size_px * 0.6
}

fn tag_chips(
    env: BlockEnv<'_>,
    b: &TagChipsBlock,
    id: &str,
    origin: Point,
    size: Vec2,
) -> ReelResult<Node> {
    let theme = env.theme();
    let sizes: Vec<Vec2> = b.tags.iter().map(|t| chip_size(t, b.size_px)).collect();
    let bounds = Rect::from_origin_size(Point::ZERO, size.to_size());
    let origins = hstack(bounds, &sizes, chip_gap(b.size_px), Align::Center, Align::Center);

    let mut chips = Vec::with_capacity(b.tags.len());
    for (i, (tag, (&chip, at))) in b.tags.iter().zip(sizes.iter().zip(origins)).enumerate() {
        let chip_id = format!("{id}/chip{i}");
        let pill = Node::new(
            format!("{chip_id}/pill"),
            NodeKind::Rect {
                size: chip,
                corner_radius: chip.y * 0.5,
                fill: theme.accent.with_alpha_mul(0.18),
                stroke: Some(Stroke {
                    color: theme.accent.with_alpha_mul(0.6),
                    width: 2.0,
                }),
                blur_px: 0.0,
            },
        );
        let text = label(
            format!("{chip_id}/label"),
            tag,
            b.size_px,
            600,
            theme.foreground,
            theme,
            chip.x,
        )
        .at(0.0, b.size_px * 0.5);
        let stagger = (i as u64).saturating_mul(b.stagger_frames);
        let enter = b.enter.with_delay(b.enter.delay.saturating_add(stagger));
        chips.push(entered(env, Node::group(chip_id, vec![pill, text]), enter, at, chip)?);
    }
    Ok(Node::group(id, chips).at(origin.x, origin.y))
}

fn image_source(env: BlockEnv<'_>, key: &str) -> ReelResult<String> {
    env.comp
        .assets
        .get(key)
        .map(|a| a.source.clone())
        .ok_or_else(|| ReelError::evaluation(format!("missing asset key '{key}'")))
}

fn browser_window(env: BlockEnv<'_>, b: &BrowserWindowBlock, id: &str) -> ReelResult<Node> {
    let theme = env.theme();
    let frame = Node::new(
        format!("{id}/frame"),
        NodeKind::Rect {
            size: Vec2::new(b.width, b.height),
            corner_radius: 16.0,
            fill: SURFACE,
            stroke: Some(Stroke {
                color: theme.muted.with_alpha_mul(0.35),
                width: 1.5,
            }),
            blur_px: 0.0,
        },
    );
    let bar = Node::rect(
        format!("{id}/title_bar"),
        Vec2::new(b.width, TITLE_BAR_PX),
        16.0,
        SURFACE_RAISED,
    );
    let dots = TRAFFIC_LIGHTS.iter().enumerate().map(|(i, &color)| {
        Node::rect(format!("{id}/dot{i}"), Vec2::new(12.0, 12.0), 6.0, color)
            .at(20.0 + i as f64 * 20.0, (TITLE_BAR_PX - 12.0) * 0.5)
    });
    let url_w = (b.width - 200.0).max(0.0);
    let url_bar = Node::rect(format!("{id}/url_bar"), Vec2::new(url_w, 28.0), 14.0, SURFACE)
        .at(100.0, 8.0);
    let url_text = label(
        format!("{id}/url"),
        &b.url,
        16.0,
        400,
        theme.muted,
        theme,
        url_w,
    )
    .at(100.0, 12.0);
    let content = Node::new(
        format!("{id}/content"),
        NodeKind::Image {
            asset: b.content.clone(),
            source: image_source(env, &b.content)?,
            size: Vec2::new(b.width, (b.height - TITLE_BAR_PX).max(0.0)),
            corner_radius: 0.0,
        },
    )
    .at(0.0, TITLE_BAR_PX);

    let mut children = vec![frame, bar];
    children.extend(dots);
    children.extend([url_bar, url_text, content]);
    Ok(Node::group(id, children))
}

fn app_screenshot(env: BlockEnv<'_>, b: &AppScreenshotBlock, id: &str) -> ReelResult<Node> {
    let size = Vec2::new(b.width, b.height);
    let shadow = Node::new(
        format!("{id}/shadow"),
        NodeKind::Rect {
            size,
            corner_radius: b.corner_radius,
            fill: SHADOW,
            stroke: None,
            blur_px: 48.0,
        },
    )
    .at(0.0, 24.0);
    let image = Node::new(
        format!("{id}/image"),
        NodeKind::Image {
            asset: b.asset.clone(),
            source: image_source(env, &b.asset)?,
            size,
            corner_radius: b.corner_radius,
        },
    );
    let zoom = Motion::tween(0, env.scene_frames, 1.0, 1.0 + b.zoom, Ease::Linear);
    let zoom = Transform2D::default().with_uniform_scale(env.sample(&zoom)?, size * 0.5);
    let zoomed = Node::group(format!("{id}/zoom"), vec![shadow, image]).with_transform(zoom);
    Ok(Node::group(id, vec![zoomed]))
}

fn column_widths(b: &TwoColumnBlock, avail_width: f64) -> (f64, f64) {
    let inner = (avail_width - b.gap_px).max(0.0);
    (inner * b.split, inner * (1.0 - b.split))
}

fn two_column(
    env: BlockEnv<'_>,
    b: &TwoColumnBlock,
    id: &str,
    origin: Point,
    size: Vec2,
) -> ReelResult<Node> {
    let (left_w, right_w) = column_widths(b, size.x);
    let end = b.delay.saturating_add(COLUMN_SLIDE_FRAMES);
    let opacity = env.sample(&Motion::tween(b.delay, end, 0.0, 1.0, Ease::Linear))?;

    let column = |side: &str, blocks: &[Block], x: f64, w: f64, from: f64| -> ReelResult<Node> {
        let col_id = format!("{id}/{side}");
        let slide = env.sample(&Motion::tween(b.delay, end, from, 0.0, Ease::OutCubic))?;
        let bounds = Rect::new(0.0, 0.0, w, size.y);
        let children = layout_blocks(env, blocks, bounds, &col_id)?;
        Ok(Node::group(col_id, children)
            .at(x + slide, 0.0)
            .with_opacity(opacity))
    };

    let left = column("left", &b.left, 0.0, left_w, -COLUMN_SLIDE_PX)?;
    let right = column("right", &b.right, left_w + b.gap_px, right_w, COLUMN_SLIDE_PX)?;
    Ok(Node::group(id, vec![left, right]).at(origin.x, origin.y))
}

fn flow_diagram(
    env: BlockEnv<'_>,
    b: &FlowDiagramBlock,
    id: &str,
    origin: Point,
) -> ReelResult<Node> {
    let theme = env.theme();
    let card = Vec2::new(b.card_width, b.card_height);
    let step_delay =
        |i: usize| b.enter.delay.saturating_add((i as u64).saturating_mul(b.stagger_frames));
    let mut children = Vec::with_capacity(b.steps.len() * 2);

    for (i, step) in b.steps.iter().enumerate() {
        let x = i as f64 * (b.card_width + b.connector_px);
        let card_id = format!("{id}/step{i}");

        if i > 0 {
            let start = step_delay(i - 1).saturating_add(6);
            let end = step_delay(i).max(start.saturating_add(1));
            let grow = env.sample(&Motion::tween(start, end, 0.0, 1.0, Ease::OutCubic))?;
            let connector = Node::rect(
                format!("{id}/connector{i}"),
                Vec2::new(b.connector_px * grow, 4.0),
                2.0,
                theme.accent_alt,
            )
            .at(x - b.connector_px, b.card_height * 0.5 - 2.0);
            children.push(connector);
        }

        let bg = Node::new(
            format!("{card_id}/card"),
            NodeKind::Rect {
                size: card,
                corner_radius: 20.0,
                fill: SURFACE,
                stroke: Some(Stroke {
                    color: theme.accent.with_alpha_mul(0.7),
                    width: 2.0,
                }),
                blur_px: 0.0,
            },
        );
        let mut parts = vec![bg];
        let label_y = if step.caption.is_some() {
            b.card_height * 0.28
        } else {
            (b.card_height - line_height(30.0)) * 0.5
        };
        parts.push(
            label(
                format!("{card_id}/label"),
                &step.label,
                30.0,
                700,
                theme.foreground,
                theme,
                b.card_width,
            )
            .at(0.0, label_y),
        );
        if let Some(caption) = &step.caption {
            parts.push(
                label(
                    format!("{card_id}/caption"),
                    caption,
                    20.0,
                    400,
                    theme.muted,
                    theme,
                    b.card_width,
                )
                .at(0.0, label_y + line_height(30.0) + 8.0),
            );
        }

        let enter = Entrance {
            style: b.enter.style,
            delay: step_delay(i),
        };
        children.push(entered(
            env,
            Node::group(card_id, parts),
            enter,
            Point::new(x, 0.0),
            card,
        )?);
    }
    Ok(Node::group(id, children).at(origin.x, origin.y))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/blocks.rs"]
mod tests;
