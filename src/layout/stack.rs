use crate::foundation::core::{Point, Rect, Vec2};

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Cross- and main-axis alignment inside a layout box.
pub enum Align {
    /// Align to start (left/top).
    Start,
    /// Align to center.
    #[default]
    Center,
    /// Align to end (right/bottom).
    End,
}

/// Place `sizes` top to bottom inside `bounds`, `gap` pixels apart.
///
/// Returns the top-left corner of each item. Centered items wider than the box overflow on both
/// sides.
pub fn vstack(
    bounds: Rect,
    sizes: &[Vec2],
    gap: f64,
    align_x: Align,
    align_y: Align,
) -> Vec<Point> {
    let total_h = sizes.iter().map(|s| s.y).sum::<f64>() + gaps(sizes.len(), gap);
    let mut y = bounds.y0 + align_offset(bounds.height(), total_h, align_y);
    sizes
        .iter()
        .map(|s| {
            let p = Point::new(bounds.x0 + align_offset(bounds.width(), s.x, align_x), y);
            y += s.y + gap;
            p
        })
        .collect()
}

/// Place `sizes` left to right inside `bounds`, `gap` pixels apart.
pub fn hstack(
    bounds: Rect,
    sizes: &[Vec2],
    gap: f64,
    align_x: Align,
    align_y: Align,
) -> Vec<Point> {
    let total_w = sizes.iter().map(|s| s.x).sum::<f64>() + gaps(sizes.len(), gap);
    let mut x = bounds.x0 + align_offset(bounds.width(), total_w, align_x);
    sizes
        .iter()
        .map(|s| {
            let p = Point::new(x, bounds.y0 + align_offset(bounds.height(), s.y, align_y));
            x += s.x + gap;
            p
        })
        .collect()
}

/// Outer size of `sizes` stacked vertically or horizontally.
pub fn stack_extent(sizes: &[Vec2], gap: f64, vertical: bool) -> Vec2 {
    let g = gaps(sizes.len(), gap);
    if vertical {
        Vec2::new(
            sizes.iter().map(|s| s.x).fold(0.0, f64::max),
            sizes.iter().map(|s| s.y).sum::<f64>() + g,
        )
    } else {
        Vec2::new(
            sizes.iter().map(|s| s.x).sum::<f64>() + g,
            sizes.iter().map(|s| s.y).fold(0.0, f64::max),
        )
    }
}

fn gaps(n: usize, gap: f64) -> f64 {
    (n.saturating_sub(1) as f64) * gap
}

fn align_offset(container: f64, content: f64, align: Align) -> f64 {
    let rem = container - content;
    match align {
        Align::Start => 0.0,
        Align::Center => rem * 0.5,
        Align::End => rem,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/stack.rs"]
mod tests;
