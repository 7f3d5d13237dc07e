/// Estimated advance width of a single line of text.
pub(crate) fn estimate_text_width(text: &str, size_px: f64) -> f64 {
    text.chars().count() as f64 * size_px * 0.56
}

/// Estimated line height for a font size.
pub(crate) fn line_height(size_px: f64) -> f64 {
    size_px * 1.25
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
