use crate::foundation::core::{Rgba8, Transform2D, Vec2};

/// One element of the renderable tree.
///
/// Transforms are relative to the parent node; leaf geometry starts at the local origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Node {
    /// Path-like id, unique within a scene layer (`intro/block0/chip2`).
    pub id: String,
    /// Local transform.
    pub transform: Transform2D,
    /// Opacity multiplied into every descendant.
    pub opacity: f64,
    /// Node payload.
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Horizontal text alignment inside a text node's box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Left-aligned.
    Start,
    /// Centered.
    #[default]
    Center,
    /// Right-aligned.
    End,
}

/// Outline of a rect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Stroke {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Node payloads the host knows how to draw.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Container.
    Group {
        /// Children in painter's order.
        children: Vec<Node>,
    },
    /// Filled rounded rectangle.
    Rect {
        /// Width and height.
        size: Vec2,
        /// Corner radius.
        corner_radius: f64,
        /// Fill color.
        fill: Rgba8,
        /// Optional outline.
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<Stroke>,
        /// Gaussian blur radius, used for shadows.
        #[serde(skip_serializing_if = "is_zero")]
        blur_px: f64,
    },
    /// Single-line or wrapped text.
    Text {
        /// Content.
        text: String,
        /// Font size.
        size_px: f64,
        /// CSS font weight.
        weight: u16,
        /// Fill color.
        color: Rgba8,
        /// Font family.
        font_family: String,
        /// Alignment inside `box_width`.
        align: TextAlign,
        /// Layout width of the text box.
        box_width: f64,
    },
    /// Image asset scaled into `size`.
    Image {
        /// Asset key.
        asset: String,
        /// Relative source path.
        source: String,
        /// Drawn size.
        size: Vec2,
        /// Corner radius of the clip.
        corner_radius: f64,
    },
    /// Radial glow centered on the local origin.
    Glow {
        /// Falloff radius.
        radius: f64,
        /// Center color.
        color: Rgba8,
    },
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl Node {
    /// Node at the origin with full opacity.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            transform: Transform2D::default(),
            opacity: 1.0,
            kind,
        }
    }

    /// Group of `children`.
    pub fn group(id: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(id, NodeKind::Group { children })
    }

    /// Solid rounded rect.
    pub fn rect(id: impl Into<String>, size: Vec2, corner_radius: f64, fill: Rgba8) -> Self {
        Self::new(
            id,
            NodeKind::Rect {
                size,
                corner_radius,
                fill,
                stroke: None,
                blur_px: 0.0,
            },
        )
    }

    /// Replace the transform.
    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }

    /// Move by `(x, y)`.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.transform.translate = Vec2::new(x, y);
        self
    }

    /// Replace the opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Children of a group, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Group { children } => children,
            _ => &[],
        }
    }

    /// Depth-first pre-order visit.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// First node with `id` in pre-order.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    /// Total number of nodes in this subtree.
    pub fn count(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_| n += 1);
        n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/node.rs"]
mod tests;
