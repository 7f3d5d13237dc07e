use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
};

/// Placement of every scene on the global timeline.
///
/// Adjacent scenes overlap by their transition duration, so scene `i` starts at
/// `start[i - 1] + d[i - 1] - overlap[i - 1]`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SceneTiming {
    ranges: Vec<FrameRange>,
    overlaps: Vec<u64>,
    total: u64,
}

/// Overlap window between scene `boundary` and scene `boundary + 1` containing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TransitionWindow {
    /// Index of the exiting scene.
    pub boundary: usize,
    /// Frame offset inside the window, `0..duration`.
    pub offset: u64,
    /// Window length in frames.
    pub duration: u64,
}

impl SceneTiming {
    /// Lay out scenes with `durations` joined by `overlaps` (one fewer than durations).
    pub fn new(durations: &[u64], overlaps: &[u64]) -> ReelResult<Self> {
        if durations.is_empty() {
            return Err(ReelError::validation("timing needs at least one scene"));
        }
        if overlaps.len() + 1 != durations.len() {
            return Err(ReelError::validation(format!(
                "timing needs {} overlaps for {} scenes, got {}",
                durations.len() - 1,
                durations.len(),
                overlaps.len()
            )));
        }
        if let Some(i) = durations.iter().position(|&d| d == 0) {
            return Err(ReelError::validation(format!("scene {i} duration must be > 0")));
        }
        for (i, &ov) in overlaps.iter().enumerate() {
            if ov >= durations[i] || ov >= durations[i + 1] {
                return Err(ReelError::validation(format!(
                    "transition {i} overlap {ov} must be shorter than scenes {i} ({}) and {} ({})",
                    durations[i],
                    i + 1,
                    durations[i + 1]
                )));
            }
        }
        for i in 1..durations.len().saturating_sub(1) {
            let shared = overlaps[i - 1].saturating_add(overlaps[i]);
            if shared > durations[i] {
                return Err(ReelError::validation(format!(
                    "scene {i} ({} frames) is shorter than its incoming and outgoing overlaps ({shared})",
                    durations[i]
                )));
            }
        }

        let overflow = || ReelError::validation("timeline length overflows u64");
        let mut ranges: Vec<FrameRange> = Vec::with_capacity(durations.len());
        for (i, &d) in durations.iter().enumerate() {
            // Overlaps are shorter than their scenes, so the subtraction cannot underflow.
            let start = match ranges.last() {
                Some(prev) => prev.end.0 - overlaps[i - 1],
                None => 0,
            };
            let end = start.checked_add(d).ok_or_else(overflow)?;
            ranges.push(FrameRange {
                start: FrameIndex(start),
                end: FrameIndex(end),
            });
        }
        // Equals the sum of durations minus the sum of overlaps.
        let total = ranges.last().map_or(0, |r| r.end.0);

        tracing::debug!(scenes = durations.len(), total, "scene timing laid out");
        Ok(Self {
            ranges,
            overlaps: overlaps.to_vec(),
            total,
        })
    }

    /// Total timeline length in frames.
    pub fn total_frames(&self) -> u64 {
        self.total
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always `false`; construction rejects empty timelines.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Global `[start, end)` of scene `i`.
    pub fn scene_range(&self, i: usize) -> Option<FrameRange> {
        self.ranges.get(i).copied()
    }

    /// All scene ranges in order.
    pub fn ranges(&self) -> &[FrameRange] {
        &self.ranges
    }

    /// Scene-local frame, clamped at 0 before the scene starts.
    pub fn local_frame(&self, i: usize, global: FrameIndex) -> Option<FrameIndex> {
        let r = self.ranges.get(i)?;
        Some(FrameIndex(global.0.saturating_sub(r.start.0)))
    }

    /// Indices of the scenes visible at `global`, in timeline order.
    pub fn active_at(&self, global: FrameIndex) -> Vec<usize> {
        self.ranges
            .iter()
            .enumerate()
            .filter(|(_, r)| r.contains(global))
            .map(|(i, _)| i)
            .collect()
    }

    /// Overlap window containing `global`, if any.
    pub fn transition_at(&self, global: FrameIndex) -> Option<TransitionWindow> {
        self.overlaps.iter().enumerate().find_map(|(i, &dur)| {
            if dur == 0 {
                return None;
            }
            let start = self.ranges[i + 1].start.0;
            let end = self.ranges[i].end.0;
            (start <= global.0 && global.0 < end).then(|| TransitionWindow {
                boundary: i,
                offset: global.0 - start,
                duration: dur,
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timing.rs"]
mod tests;
