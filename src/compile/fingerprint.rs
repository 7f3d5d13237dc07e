use crate::{
    effects::transitions::{ClipShape, FlipAxis, PresentationStyle},
    eval::evaluator::{EvaluatedFrame, LayerRole},
    eval::node::{Node, NodeKind, TextAlign},
    foundation::core::{Rgba8, Vec2},
};

use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x7265_656c_6372_6166;

/// Stable 128-bit fingerprint of an evaluated frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl FrameFingerprint {
    /// Big-endian bytes, `hi` first.
    pub fn to_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.hi.to_be_bytes());
        out[8..].copy_from_slice(&self.lo.to_be_bytes());
        out
    }
}

/// Compute a stable fingerprint for an evaluated frame.
///
/// The global frame index is not hashed, so identical still frames share a fingerprint.
pub fn fingerprint_frame(frame: &EvaluatedFrame) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(frame.layers.len() as u32);
    for layer in &frame.layers {
        h.write_str(&layer.scene_id);
        h.write_u8(match layer.role {
            LayerRole::Solo => 0,
            LayerRole::Exiting => 1,
            LayerRole::Entering => 2,
        });
        write_presentation(&mut h, &layer.presentation);
        write_node(&mut h, &layer.root);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        // -0.0 and 0.0 draw identically.
        let v = if v == 0.0 { 0.0 } else { v };
        self.write_u64(v.to_bits());
    }

    fn write_vec2(&mut self, v: Vec2) {
        self.write_f64(v.x);
        self.write_f64(v.y);
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn write_rgba(&mut self, c: Rgba8) {
        self.write_bytes(&[c.r, c.g, c.b, c.a]);
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_presentation(h: &mut StableHasher, p: &PresentationStyle) {
    h.write_f64(p.opacity);
    h.write_vec2(p.translate);
    match &p.flip {
        None => h.write_u8(0),
        Some(f) => {
            h.write_u8(1);
            h.write_u8(match f.axis {
                FlipAxis::X => 0,
                FlipAxis::Y => 1,
            });
            h.write_f64(f.rotation_deg);
            h.write_f64(f.perspective_px);
            h.write_u8(u8::from(f.backface_hidden));
        }
    }
    match &p.clip {
        None => h.write_u8(0),
        Some(ClipShape::Rect { rect }) => {
            h.write_u8(1);
            for v in [rect.x0, rect.y0, rect.x1, rect.y1] {
                h.write_f64(v);
            }
        }
        Some(ClipShape::Sector {
            center,
            radius,
            start_deg,
            sweep_deg,
        }) => {
            h.write_u8(2);
            for v in [center.x, center.y, *radius, *start_deg, *sweep_deg] {
                h.write_f64(v);
            }
        }
    }
}

fn write_node(h: &mut StableHasher, node: &Node) {
    h.write_str(&node.id);
    for c in node.transform.to_affine().as_coeffs() {
        h.write_f64(c);
    }
    h.write_f64(node.opacity);
    match &node.kind {
        NodeKind::Group { children } => {
            h.write_u8(0);
            h.write_u32(children.len() as u32);
            for child in children {
                write_node(h, child);
            }
        }
        NodeKind::Rect {
            size,
            corner_radius,
            fill,
            stroke,
            blur_px,
        } => {
            h.write_u8(1);
            h.write_vec2(*size);
            h.write_f64(*corner_radius);
            h.write_rgba(*fill);
            match stroke {
                None => h.write_u8(0),
                Some(s) => {
                    h.write_u8(1);
                    h.write_rgba(s.color);
                    h.write_f64(s.width);
                }
            }
            h.write_f64(*blur_px);
        }
        NodeKind::Text {
            text,
            size_px,
            weight,
            color,
            font_family,
            align,
            box_width,
        } => {
            h.write_u8(2);
            h.write_str(text);
            h.write_f64(*size_px);
            h.write_u32(u32::from(*weight));
            h.write_rgba(*color);
            h.write_str(font_family);
            h.write_u8(match align {
                TextAlign::Start => 0,
                TextAlign::Center => 1,
                TextAlign::End => 2,
            });
            h.write_f64(*box_width);
        }
        NodeKind::Image {
            asset,
            source,
            size,
            corner_radius,
        } => {
            h.write_u8(3);
            h.write_str(asset);
            h.write_str(source);
            h.write_vec2(*size);
            h.write_f64(*corner_radius);
        }
        NodeKind::Glow { radius, color } => {
            h.write_u8(4);
            h.write_f64(*radius);
            h.write_rgba(*color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
